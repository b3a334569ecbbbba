use std::process::Command;
use thiserror::Error;

use crate::shared::npath::{Abs, File, NPath};

/// Defines a `TouchError`.
#[derive(Error, Debug)]
pub enum TouchError {
    /// The utility could not be started at all.
    #[error("Failed to run {0:?}: {1}")]
    SpawnFailed(String, #[source] std::io::Error),

    /// The utility ran and reported a failure.
    #[error("{0}")]
    Failed(String),
}

/// Sets the modification time of a file.
pub trait Touch: Send + Sync {
    /// Sets the modification time of `abs_file_path` to `timestamp`
    /// (`MM/DD/YYYY HH:MM:SS`, local time).
    fn set_modified(
        &self,
        abs_file_path: &NPath<Abs, File>,
        timestamp: &str,
    ) -> Result<(), TouchError>;
}

/// Runs `<program> -m <timestamp> <path>` (the macOS `SetFile` calling convention).
///
/// Arguments go to the process as an argument vector; no shell is involved,
/// so paths with quotes, spaces or `$` reach the utility unchanged.
pub struct SetFileTouch {
    program: String,
}

impl SetFileTouch {
    /// Creates a `SetFileTouch` calling `program`.
    pub fn new(program: &str) -> Self {
        SetFileTouch {
            program: program.to_string(),
        }
    }
}

impl Touch for SetFileTouch {
    fn set_modified(
        &self,
        abs_file_path: &NPath<Abs, File>,
        timestamp: &str,
    ) -> Result<(), TouchError> {
        let output = Command::new(&self.program)
            .arg("-m")
            .arg(timestamp)
            .arg(abs_file_path.as_os_path())
            .output()
            .map_err(|err| TouchError::SpawnFailed(self.program.clone(), err))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();

        if stderr.is_empty() {
            Err(TouchError::Failed(format!(
                "{} exited with {}",
                self.program, output.status
            )))
        } else {
            Err(TouchError::Failed(stderr))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some_file() -> NPath<Abs, File> {
        NPath::<Abs, File>::try_from("/vault/it's a \"note\" $HOME.md").unwrap()
    }

    #[test]
    fn missing_program_is_a_spawn_failure() {
        let touch = SetFileTouch::new("mtime2created-no-such-utility");

        assert!(matches!(
            touch.set_modified(&some_file(), "03/04/2024 05:06:07"),
            Err(TouchError::SpawnFailed(_, _))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn zero_exit_is_success() {
        let touch = SetFileTouch::new("true");

        assert!(touch.set_modified(&some_file(), "03/04/2024 05:06:07").is_ok());
    }

    #[cfg(unix)]
    #[test]
    fn non_zero_exit_without_stderr_reports_the_status() {
        let touch = SetFileTouch::new("false");

        match touch.set_modified(&some_file(), "03/04/2024 05:06:07") {
            Err(TouchError::Failed(message)) => assert!(message.starts_with("false exited with")),
            other => panic!("unexpected result {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn stderr_becomes_the_message() {
        // `ls -m <timestamp> <missing path>` fails and complains on stderr.
        let touch = SetFileTouch::new("ls");

        match touch.set_modified(&some_file(), "03/04/2024 05:06:07") {
            Err(TouchError::Failed(message)) => {
                assert!(!message.is_empty());
                assert!(!message.contains("exited with"));
            }
            other => panic!("unexpected result {other:?}"),
        }
    }
}
