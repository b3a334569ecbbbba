mod common;

use mtime2created::core::fs::fs_base::{FSError, FSKind};
use mtime2created::core::fs::local_fs::LocalFS;
use mtime2created::core::fs::null_fs::NullFS;
use mtime2created::core::sync::{SyncError, sync_file};
use mtime2created::core::touch::SetFileTouch;
use mtime2created::shared::npath::{Abs, Dir, File, NPath, Rel};

use common::{FakeFS, RecordingTouch, UnsupportedFS, local_time};
use std::sync::atomic::Ordering;

fn rel(path: &str) -> NPath<Rel, File> {
    NPath::<Rel, File>::try_from(path).unwrap()
}

#[test]
fn sync_hands_the_formatted_birth_time_to_the_utility() {
    let fs = FakeFS::new().with_file("notes/a.md", local_time(2024, 3, 4, 5, 6, 7));
    let touch = RecordingTouch::new();

    let outcome = sync_file(&fs, &touch, &rel("notes/a.md")).unwrap();

    assert_eq!(outcome.timestamp, "03/04/2024 05:06:07");
    assert_eq!(outcome.abs_file_path.to_raw(), "/vault/notes/a.md");
    assert_eq!(
        touch.timestamp_of("notes/a.md").as_deref(),
        Some("03/04/2024 05:06:07")
    );
}

#[test]
fn paths_with_special_characters_reach_the_utility_unchanged() {
    let name = "it's \"quoted\" $HOME & more.md";
    let fs = FakeFS::new().with_file(name, local_time(2023, 12, 31, 23, 59, 59));
    let touch = RecordingTouch::new();

    sync_file(&fs, &touch, &rel(name)).unwrap();

    assert_eq!(
        touch.timestamp_of(name).as_deref(),
        Some("12/31/2023 23:59:59")
    );
}

#[test]
fn unsupported_adapter_neither_stats_nor_spawns() {
    let fs = UnsupportedFS::default();
    let touch = RecordingTouch::new();

    let result = sync_file(&fs, &touch, &rel("a.md"));

    assert!(matches!(
        result,
        Err(SyncError::UnsupportedAdapter(FSKind::Null))
    ));
    assert_eq!(fs.meta_calls.load(Ordering::SeqCst), 0);
    assert_eq!(touch.call_count(), 0);
}

#[test]
fn null_adapter_is_unsupported() {
    let touch = RecordingTouch::new();

    let result = sync_file(&NullFS::new(), &touch, &rel("a.md"));

    assert!(matches!(
        result,
        Err(SyncError::UnsupportedAdapter(FSKind::Null))
    ));
    assert_eq!(touch.call_count(), 0);
}

#[test]
fn missing_file_fails_the_stat_and_never_spawns() {
    let fs = FakeFS::new();
    let touch = RecordingTouch::new();

    let result = sync_file(&fs, &touch, &rel("gone.md"));

    match result {
        Err(SyncError::Stat(abs_file_path, FSError::MetaFailed(..))) => {
            assert_eq!(abs_file_path.to_raw(), "/vault/gone.md");
        }
        other => panic!("unexpected result: {:?}", other),
    }
    assert_eq!(fs.meta_calls.load(Ordering::SeqCst), 1);
    assert_eq!(touch.call_count(), 0);
}

#[test]
fn failing_utility_is_an_exec_error() {
    let fs = FakeFS::new().with_file("a.md", local_time(2024, 1, 2, 3, 4, 5));
    let touch = RecordingTouch::new().failing("a.md");

    let err = sync_file(&fs, &touch, &rel("a.md")).unwrap_err();

    assert!(matches!(err, SyncError::Exec(..)));
    assert!(err.to_string().contains("utility failed"));
}

/// A vault on disk holding `note.md`, if the platform reports birth times.
#[cfg(unix)]
fn local_vault() -> Option<(tempfile::TempDir, LocalFS)> {
    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("note.md");
    std::fs::write(&file_path, "# note").unwrap();

    if std::fs::metadata(&file_path).unwrap().created().is_err() {
        return None;
    }

    let fs = LocalFS::new(NPath::<Abs, Dir>::from_os_path(dir.path()).unwrap());
    Some((dir, fs))
}

#[cfg(unix)]
#[test]
fn local_file_with_succeeding_utility_is_synced() {
    let Some((_dir, fs)) = local_vault() else {
        return;
    };

    let outcome = sync_file(&fs, &SetFileTouch::new("true"), &rel("note.md")).unwrap();

    assert!(outcome.abs_file_path.to_raw().ends_with("/note.md"));
    assert_eq!(outcome.timestamp.len(), "MM/DD/YYYY HH:MM:SS".len());
}

#[cfg(unix)]
#[test]
fn local_file_with_failing_utility_is_an_exec_error() {
    let Some((_dir, fs)) = local_vault() else {
        return;
    };

    let result = sync_file(&fs, &SetFileTouch::new("false"), &rel("note.md"));

    assert!(matches!(result, Err(SyncError::Exec(..))));
}
