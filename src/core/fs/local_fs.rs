use crate::shared::npath::{Abs, Dir, File, NPath};

use super::fs_base::{FS, FSError, FSKind};
use super::fs_node::FSNodeMetaData;

/// A struct representing a local fs that implements the FS trait.
pub struct LocalFS {
    abs_dir_path: NPath<Abs, Dir>,
}

impl LocalFS {
    /// Creates a new instance of `LocalFS` rooted at `abs_dir_path`.
    pub fn new(abs_dir_path: NPath<Abs, Dir>) -> Self {
        LocalFS { abs_dir_path }
    }
}

impl FS for LocalFS {
    fn kind(&self) -> FSKind {
        FSKind::Local
    }

    fn base_path(&self) -> Result<NPath<Abs, Dir>, FSError> {
        Ok(self.abs_dir_path.clone())
    }

    fn meta(&self, abs_file_path: &NPath<Abs, File>) -> Result<FSNodeMetaData, FSError> {
        let metadata = std::fs::metadata(abs_file_path.as_os_path())
            .map_err(|err| FSError::MetaFailed(abs_file_path.clone(), err.into()))?;

        if !metadata.file_type().is_file() {
            return Err(FSError::MetaFailed(
                abs_file_path.clone(),
                "Not a regular file".into(),
            ));
        }

        // Not every platform and filesystem records a birth time.
        let created = metadata
            .created()
            .map_err(|err| FSError::MetaFailed(abs_file_path.clone(), err.into()))?;
        let modified = metadata
            .modified()
            .map_err(|err| FSError::MetaFailed(abs_file_path.clone(), err.into()))?;

        Ok(FSNodeMetaData { created, modified })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::npath::Rel;

    fn vault(dir: &tempfile::TempDir) -> LocalFS {
        LocalFS::new(NPath::<Abs, Dir>::from_os_path(dir.path()).unwrap())
    }

    #[test]
    fn missing_file_fails_with_meta_error() {
        let dir = tempfile::tempdir().unwrap();
        let fs = vault(&dir);
        let rel = NPath::<Rel, File>::try_from("missing.md").unwrap();
        let abs = fs.base_path().unwrap().add_rel_file(&rel);

        assert!(matches!(fs.meta(&abs), Err(FSError::MetaFailed(_, _))));
    }

    #[test]
    fn directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("folder")).unwrap();
        let fs = vault(&dir);
        let rel = NPath::<Rel, File>::try_from("folder").unwrap();
        let abs = fs.base_path().unwrap().add_rel_file(&rel);

        assert!(matches!(fs.meta(&abs), Err(FSError::MetaFailed(_, _))));
    }

    #[test]
    fn existing_file_reports_times_when_birth_time_is_available() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("note.md"), "# note").unwrap();
        let fs = vault(&dir);
        let rel = NPath::<Rel, File>::try_from("note.md").unwrap();
        let abs = fs.base_path().unwrap().add_rel_file(&rel);

        let std_meta = std::fs::metadata(dir.path().join("note.md")).unwrap();
        let birth_time_supported = std_meta.created().is_ok();

        match fs.meta(&abs) {
            Ok(meta) => {
                assert!(birth_time_supported);
                assert_eq!(meta.created, std_meta.created().unwrap());
                assert_eq!(meta.modified, std_meta.modified().unwrap());
            }
            Err(FSError::MetaFailed(_, _)) => assert!(!birth_time_supported),
            Err(err) => panic!("unexpected error {err}"),
        }
    }
}
