//! Duplicate detection by size prefilter and full content comparison

use anyhow::{Context, Result};
use std::fs::{self, File};
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

use crate::core::config::ReferenceFile;
use crate::core::outcome::ScanOutcome;
use super::file_scanner::{walk_candidates, Candidate};

/// Chunk size used when comparing file contents
pub const COMPARE_BUFFER_SIZE: usize = 8192;

/// Which side of a comparison failed
#[derive(Debug, Error)]
pub enum CompareError {
    #[error("reference file unreadable: {0}")]
    Reference(#[source] io::Error),

    #[error("candidate file unreadable: {0}")]
    Candidate(#[source] io::Error),
}

/// Counters collected while scanning
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ScanStats {
    /// Regular files yielded by the walk
    pub files_visited: u64,
    /// Files whose size equals the reference size
    pub size_matches: u64,
    /// Content comparisons run, i.e. same-size candidates that could be opened
    pub comparisons: u64,
    /// Same-size candidates that could not be opened or read
    pub unreadable: u64,
}

/// Compare two byte streams chunk by chunk
///
/// # Returns
/// `true` if both streams yield exactly the same bytes
pub fn contents_equal<A: Read, B: Read>(
    mut reference: A,
    mut candidate: B,
) -> Result<bool, CompareError> {
    let mut reference_buf = [0u8; COMPARE_BUFFER_SIZE];
    let mut candidate_buf = [0u8; COMPARE_BUFFER_SIZE];

    loop {
        let reference_len =
            fill_buffer(&mut reference, &mut reference_buf).map_err(CompareError::Reference)?;
        let candidate_len =
            fill_buffer(&mut candidate, &mut candidate_buf).map_err(CompareError::Candidate)?;

        if reference_buf[..reference_len] != candidate_buf[..candidate_len] {
            return Ok(false);
        }
        if reference_len == 0 {
            return Ok(true);
        }
    }
}

/// Read until `buf` is full or the stream ends
fn fill_buffer<R: Read>(reader: &mut R, buf: &mut [u8]) -> io::Result<usize> {
    let mut filled = 0;
    while filled < buf.len() {
        match reader.read(&mut buf[filled..]) {
            Ok(0) => break,
            Ok(n) => filled += n,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
            Err(e) => return Err(e),
        }
    }
    Ok(filled)
}

/// Byte-exact comparison of two files
///
/// Both handles are closed before this returns.
pub fn files_identical(reference: &Path, candidate: &Path) -> Result<bool, CompareError> {
    let (reference, candidate) = open_pair(reference, candidate)?;
    contents_equal(reference, candidate)
}

/// Open the reference, then the candidate
fn open_pair(reference: &Path, candidate: &Path) -> Result<(File, File), CompareError> {
    let reference = File::open(reference).map_err(CompareError::Reference)?;
    let candidate = File::open(candidate).map_err(CompareError::Candidate)?;
    Ok((reference, candidate))
}

/// Searches directory trees for the first copy of a reference file
pub struct DuplicateScanner<'a> {
    reference: &'a ReferenceFile,
    stats: ScanStats,
}

impl<'a> DuplicateScanner<'a> {
    pub fn new(reference: &'a ReferenceFile) -> Self {
        Self {
            reference,
            stats: ScanStats::default(),
        }
    }

    pub fn stats(&self) -> ScanStats {
        self.stats
    }

    /// Walk `directories` in order and stop at the first byte-identical file
    ///
    /// # Arguments
    /// * `directories` - Search roots; a missing one ends the scan with
    ///   `ScanOutcome::DirectoryError`
    ///
    /// # Returns
    /// The outcome, or an error if the reference file became unreadable
    pub fn scan<P: AsRef<Path>>(&mut self, directories: &[P]) -> Result<ScanOutcome> {
        let reference_path = self.reference.path();
        let reference_size = fs::metadata(reference_path)
            .with_context(|| format!("Failed to stat reference file {:?}", reference_path))?
            .len();

        if reference_size != self.reference.size() {
            debug!(
                "Reference size changed since validation: {} -> {}",
                self.reference.size(),
                reference_size
            );
        }

        for directory in directories {
            let directory = directory.as_ref();
            if !directory.is_dir() {
                return Ok(ScanOutcome::DirectoryError(directory.to_path_buf()));
            }

            debug!("Walking {:?}", directory);
            if let Some(found) = self.scan_root(directory, reference_size)? {
                return Ok(ScanOutcome::DuplicateFound(found));
            }
        }

        Ok(ScanOutcome::NoDuplicateFound)
    }

    fn scan_root(&mut self, root: &Path, reference_size: u64) -> Result<Option<PathBuf>> {
        self.scan_candidates(walk_candidates(root), reference_size)
    }

    fn scan_candidates<I>(&mut self, candidates: I, reference_size: u64) -> Result<Option<PathBuf>>
    where
        I: IntoIterator<Item = Candidate>,
    {
        for candidate in candidates {
            self.stats.files_visited += 1;
            if candidate.size != reference_size {
                continue;
            }

            self.stats.size_matches += 1;
            let compared = open_pair(self.reference.path(), &candidate.path).and_then(|(a, b)| {
                self.stats.comparisons += 1;
                contents_equal(a, b)
            });

            match compared {
                Ok(true) => return Ok(Some(candidate.path)),
                Ok(false) => {}
                Err(CompareError::Candidate(e)) => {
                    self.stats.unreadable += 1;
                    warn!("Skipping {:?}: {}", candidate.path, e);
                }
                Err(CompareError::Reference(e)) => {
                    return Err(anyhow::Error::new(e).context(format!(
                        "Failed to read reference file {:?}",
                        self.reference.path()
                    )));
                }
            }
        }

        Ok(None)
    }
}

/// Scan `directories` for a copy of `reference`
///
/// Convenience wrapper around `DuplicateScanner` when the stats are not needed.
pub fn find_duplicate<P: AsRef<Path>>(
    reference: &ReferenceFile,
    directories: &[P],
) -> Result<ScanOutcome> {
    DuplicateScanner::new(reference).scan(directories)
}
