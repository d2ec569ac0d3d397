//! Reference-file duplicate checker
//!
//! Looks for a byte-identical copy of one file under a set of directories,
//! stopping at the first match, and records the verdict as a file tag.

pub mod core;
pub mod logging;
pub mod reporting;
pub mod scanner;

pub use crate::core::checker;
pub use crate::reporting::tag_store;
pub use crate::scanner::duplicate_detector;

/// Re-export commonly used types
pub mod prelude {
    pub use crate::core::checker::{check_reference, report_outcome};
    pub use crate::core::config::{ConfigError, ReferenceFile, ResolvedConfig};
    pub use crate::core::outcome::{ScanOutcome, EXIT_DUPLICATE, EXIT_ERROR, EXIT_UNIQUE};
    pub use crate::reporting::{
        platform_tag_store, MemoryTagStore, NoopTagStore, Tag, TagColor, TagStore,
        DUPLICATE_TAG_NAME, UNIQUE_TAG_NAME,
    };
    pub use crate::scanner::duplicate_detector::{
        contents_equal, files_identical, find_duplicate, CompareError, DuplicateScanner, ScanStats,
    };
    pub use crate::scanner::file_scanner::{walk_candidates, Candidate};
}
