//! Directory walking and duplicate detection

pub mod file_scanner;
pub mod duplicate_detector;

pub use file_scanner::{walk_candidates, Candidate};
pub use duplicate_detector::{
    contents_equal, files_identical, find_duplicate, CompareError, DuplicateScanner, ScanStats,
};
