use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Deserializer};
use std::fmt;
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use thiserror::Error;
use unicode_normalization::UnicodeNormalization;

static UNIX_ROOT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^/").unwrap());
static WINDOWS_DRIVE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-zA-Z]:").unwrap());

/// Normalizes a path to canonical internal representation with separator `/`.
fn normalize_path(path: &str) -> String {
    let normalized_path: String = path.replace('\\', "/");

    // trim trailing slash.
    normalized_path.trim_end_matches('/').to_string()
}

/// Checks, if a path has a root.
fn has_root(normalized_path: &str) -> bool {
    UNIX_ROOT.is_match(normalized_path) || WINDOWS_DRIVE.is_match(normalized_path)
}

/// Checks, if a relative path climbs out of its base with `..`.
fn escapes_base(normalized_path: &str) -> bool {
    normalized_path.split('/').any(|segment| segment == "..")
}

/// An absolute path must have a root or be empty.
pub enum Abs {}

/// A relative path must have no root.
pub enum Rel {}

/// A file path must target to a file.
pub enum File {}

/// A dir path must target to a directory.
pub enum Dir {}

/// Defines a `NPathError`.
#[derive(Error, Debug)]
pub enum NPathError {
    #[error("Path is not absolute")]
    NoAbsPath,

    #[error("Path is not relative")]
    NoRelPath,

    #[error("Path leaves its base directory")]
    EscapesBase,

    #[error("Path is not inside {0}")]
    NotInside(String),
}

/// Defines a `NPath<K, T>`.
///
/// `NPath` ensures a normalized pattern for paths.
/// Conventions:
///
/// - separates its elements with '/'
/// - no trailing `/`
/// - relative paths never contain `..`
///
/// Operations:
/// `NPath<Abs, File> = NPath<Abs, Dir> + NPath<Rel, File>`
/// `NPath<Rel, File> = NPath<Abs, File> - NPath<Abs, Dir>`
pub struct NPath<K, T> {
    path_raw: String,
    path_nfc: String, // Only use for comparsion and hashing.
    _marker: PhantomData<(K, T)>,
}

/// Impl `TryFrom` for an absolute `NPath`.
impl<T> TryFrom<&str> for NPath<Abs, T> {
    type Error = NPathError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        let normalized_path = normalize_path(path);

        if has_root(&normalized_path) || normalized_path.is_empty() {
            Ok(NPath::new(&normalized_path))
        } else {
            Err(NPathError::NoAbsPath)
        }
    }
}

/// Impl `TryFrom` for an absolute `NPath`.
impl<T> TryFrom<String> for NPath<Abs, T> {
    type Error = NPathError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        NPath::<Abs, T>::try_from(path.as_str())
    }
}

/// Impl `TryFrom` for a relative `NPath`.
impl<T> TryFrom<&str> for NPath<Rel, T> {
    type Error = NPathError;

    fn try_from(path: &str) -> Result<Self, Self::Error> {
        let normalized_path = normalize_path(path);
        let normalized_path = normalized_path.trim_start_matches("./");

        if has_root(normalized_path) {
            Err(NPathError::NoRelPath)
        } else if escapes_base(normalized_path) {
            Err(NPathError::EscapesBase)
        } else {
            Ok(NPath::new(normalized_path))
        }
    }
}

/// Impl `TryFrom` for a relative `NPath`.
impl<T> TryFrom<String> for NPath<Rel, T> {
    type Error = NPathError;

    fn try_from(path: String) -> Result<Self, Self::Error> {
        NPath::<Rel, T>::try_from(path.as_str())
    }
}

/// Impl of `Debug` for `NPath`.
impl<K, T> fmt::Debug for NPath<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_nfc())
    }
}

/// Impl of `Display` for `NPath`.
impl<K, T> fmt::Display for NPath<K, T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.to_nfc())
    }
}

/// Methods for `NPath`.
impl<K, T> NPath<K, T> {
    /// Create a new `NPath`, only for internal use.
    fn new(path_str: &str) -> Self {
        let path_raw = path_str.to_string();
        let path_nfc: String = path_str.nfc().collect(); // only for equality & hashing
        Self {
            path_raw,
            path_nfc,
            _marker: PhantomData,
        }
    }

    /// Returns the `NPath` as raw str.
    pub fn to_raw(&self) -> &str {
        &self.path_raw
    }

    /// Returns the `NPath` as nfc str.
    pub fn to_nfc(&self) -> &str {
        &self.path_nfc
    }
}

/// Impl of `Clone` for `NPath`.
impl<K, T> Clone for NPath<K, T> {
    fn clone(&self) -> Self {
        NPath {
            path_raw: self.path_raw.clone(),
            path_nfc: self.path_nfc.clone(),
            _marker: PhantomData,
        }
    }
}

/// Impl of `Eq` for `NPath`.
impl<K, T> Eq for NPath<K, T> {}

// Impl of `PartialEq` for `NPath`.
impl<K1, T1, K2, T2> PartialEq<NPath<K2, T2>> for NPath<K1, T1> {
    fn eq(&self, other: &NPath<K2, T2>) -> bool {
        self.path_nfc == other.path_nfc
    }
}

/// Impl of `Deserialize` for `NPath`.
impl<'de, K, T> Deserialize<'de> for NPath<K, T>
where
    NPath<K, T>: TryFrom<String>,
    <NPath<K, T> as TryFrom<String>>::Error: std::fmt::Display,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let path_raw = String::deserialize(deserializer)?;
        NPath::<K, T>::try_from(path_raw).map_err(serde::de::Error::custom)
    }
}

/// Methods of an absolute `NPath`.
impl<T> NPath<Abs, T> {
    /// Returns the absolut path as os path.
    pub fn as_os_path(&self) -> PathBuf {
        let os_string = self.path_raw.replace("/", std::path::MAIN_SEPARATOR_STR);
        PathBuf::from(os_string)
    }

    /// `NPath<Rel, T> = NPath<Abs, T> - NPath<Abs, Dir>`
    pub fn sub_abs_dir(&self, abs_dir_path: &NPath<Abs, Dir>) -> Result<NPath<Rel, T>, NPathError> {
        let inside = self
            .path_raw
            .strip_prefix(abs_dir_path.path_raw.as_str())
            .filter(|rest| rest.starts_with('/'));

        match inside {
            Some(rel_path) => NPath::<Rel, T>::try_from(rel_path.trim_start_matches('/')),
            None => Err(NPathError::NotInside(abs_dir_path.path_raw.clone())),
        }
    }
}

/// Methods of an absolute directory `NPath`.
impl NPath<Abs, Dir> {
    /// `NPath<Abs, File> = NPath<Abs, Dir> + NPath<Rel, File>`
    pub fn add_rel_file(&self, rel_file_path: &NPath<Rel, File>) -> NPath<Abs, File> {
        NPath::new(&(self.path_raw.clone() + "/" + &rel_file_path.path_raw))
    }

    /// Creates an absolute directory `NPath` from an os path.
    pub fn from_os_path(path: &Path) -> Result<Self, NPathError> {
        match path.to_str() {
            Some(path_str) => NPath::<Abs, Dir>::try_from(path_str),
            None => Err(NPathError::NoAbsPath),
        }
    }
}
