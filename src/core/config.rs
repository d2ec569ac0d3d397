//! Resolution and validation of the run configuration

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Reasons a configuration is rejected before any directory is touched
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("At least one search directory is required")]
    NoDirectories,

    #[error("Reference file {} does not exist", .0.display())]
    MissingReference(PathBuf),

    #[error("Reference file {} is empty", .0.display())]
    EmptyReference(PathBuf),
}

/// An existing, non-empty regular file to look for copies of
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReferenceFile {
    path: PathBuf,
    size: u64,
}

impl ReferenceFile {
    /// Validate `path` as a reference file
    ///
    /// Symlinks are followed, so a link to a regular file is accepted.
    ///
    /// # Returns
    /// The reference file with its size at validation time
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        let path = path.into();
        let metadata = match fs::metadata(&path) {
            Ok(metadata) if metadata.is_file() => metadata,
            _ => return Err(ConfigError::MissingReference(path)),
        };

        if metadata.len() == 0 {
            return Err(ConfigError::EmptyReference(path));
        }

        Ok(Self {
            size: metadata.len(),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Size recorded when the file was validated
    pub fn size(&self) -> u64 {
        self.size
    }
}

/// Validated inputs for a single run
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub reference: ReferenceFile,
    pub directories: Vec<PathBuf>,
    pub verbose: bool,
}

impl ResolvedConfig {
    /// Check the raw inputs in order: directories, reference existence, reference size
    ///
    /// # Arguments
    /// * `reference_file` - File to look for copies of
    /// * `directories` - Search roots, walked later in this order
    /// * `verbose` - Whether to print the matching file
    pub fn resolve(
        reference_file: impl Into<PathBuf>,
        directories: Vec<PathBuf>,
        verbose: bool,
    ) -> Result<Self, ConfigError> {
        if directories.is_empty() {
            return Err(ConfigError::NoDirectories);
        }

        let reference = ReferenceFile::open(reference_file)?;

        Ok(Self {
            reference,
            directories,
            verbose,
        })
    }
}
