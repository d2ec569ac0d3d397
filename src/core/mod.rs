//! Configuration, outcomes and the check that ties them together

pub mod checker;
pub mod config;
pub mod outcome;

pub use checker::{check_reference, report_outcome};
pub use config::{ConfigError, ReferenceFile, ResolvedConfig};
pub use outcome::ScanOutcome;
