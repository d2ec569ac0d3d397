//! Terminal result of a run and its exit code

use std::fmt;
use std::path::PathBuf;
use std::process::ExitCode;

use super::config::ConfigError;

pub const EXIT_UNIQUE: u8 = 0;
pub const EXIT_DUPLICATE: u8 = 1;
pub const EXIT_ERROR: u8 = 2;

/// What a run concluded
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    NoDuplicateFound,
    DuplicateFound(PathBuf),
    ValidationError(String),
    DirectoryError(PathBuf),
}

impl ScanOutcome {
    /// Process status for this outcome
    ///
    /// A missing search directory shares status 1 with a found duplicate.
    pub fn code(&self) -> u8 {
        match self {
            ScanOutcome::NoDuplicateFound => EXIT_UNIQUE,
            ScanOutcome::DuplicateFound(_) | ScanOutcome::DirectoryError(_) => EXIT_DUPLICATE,
            ScanOutcome::ValidationError(_) => EXIT_ERROR,
        }
    }

    pub fn exit_code(&self) -> ExitCode {
        ExitCode::from(self.code())
    }
}

impl From<ConfigError> for ScanOutcome {
    fn from(err: ConfigError) -> Self {
        ScanOutcome::ValidationError(err.to_string())
    }
}

impl fmt::Display for ScanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScanOutcome::NoDuplicateFound => write!(f, "unique"),
            ScanOutcome::DuplicateFound(path) => write!(f, "duplicate of {}", path.display()),
            ScanOutcome::ValidationError(reason) => write!(f, "{}", reason),
            ScanOutcome::DirectoryError(path) => {
                write!(f, "Directory {} does not exist", path.display())
            }
        }
    }
}
