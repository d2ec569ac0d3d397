//! One complete check of a reference file: clear tags, scan, publish

use anyhow::Result;
use std::io::{self, Write};
use std::path::Path;
use tracing::{debug, info, warn};

use super::config::ResolvedConfig;
use super::outcome::ScanOutcome;
use crate::reporting::tag_store::{Tag, TagStore};
use crate::scanner::duplicate_detector::DuplicateScanner;

/// Run the duplicate check described by `config`
///
/// Tags on the reference file are cleared first, then exactly one of the
/// Duplicate tag, the Unique tag or no tag (missing directory) is applied.
/// Tagging and message failures are logged and do not change the outcome.
///
/// # Arguments
/// * `config` - Validated run configuration
/// * `tags` - Where the verdict is recorded
/// * `out` - Receives the user-facing messages
///
/// # Returns
/// The outcome, or an error if the reference file became unreadable
pub fn check_reference<W: Write>(
    config: &ResolvedConfig,
    tags: &mut dyn TagStore,
    out: &mut W,
) -> Result<ScanOutcome> {
    let reference = config.reference.path();
    debug!(
        "Checking {:?} ({} bytes) against {} director{}",
        reference,
        config.reference.size(),
        config.directories.len(),
        if config.directories.len() == 1 { "y" } else { "ies" }
    );

    if let Err(e) = tags.clear_tags(reference) {
        warn!("Could not clear tags on {:?}: {:#}", reference, e);
    }

    let mut scanner = DuplicateScanner::new(&config.reference);
    let outcome = scanner.scan(config.directories.as_slice())?;
    debug!("Scan finished: {:?}", scanner.stats());

    let verdict = match outcome {
        ScanOutcome::DuplicateFound(_) => Some(Tag::duplicate()),
        ScanOutcome::NoDuplicateFound => Some(Tag::unique()),
        _ => None,
    };
    if let Some(tag) = verdict {
        if let Err(e) = tags.add_tag(reference, &tag) {
            warn!("Could not tag {:?} as {}: {:#}", reference, tag, e);
        }
    }

    if let Err(e) = report_outcome(&outcome, reference, config.verbose, out) {
        warn!("Could not print result: {}", e);
    }

    info!("{:?}: {}", reference, outcome);
    Ok(outcome)
}

/// Write the user-facing message for `outcome`, if it has one
///
/// A match is only reported when `verbose` is set; a unique file prints nothing.
pub fn report_outcome<W: Write>(
    outcome: &ScanOutcome,
    reference: &Path,
    verbose: bool,
    out: &mut W,
) -> io::Result<()> {
    match outcome {
        ScanOutcome::DuplicateFound(found) if verbose => writeln!(
            out,
            "File {} is identical to {}",
            found.display(),
            reference.display()
        ),
        ScanOutcome::DuplicateFound(_) | ScanOutcome::NoDuplicateFound => Ok(()),
        ScanOutcome::ValidationError(_) | ScanOutcome::DirectoryError(_) => {
            writeln!(out, "{}", outcome)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reporting::tag_store::{MemoryTagStore, DUPLICATE_TAG_NAME, UNIQUE_TAG_NAME};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    /// Writer whose every write fails, like stdout redirected to a full disk
    struct FullWriter;

    impl Write for FullWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::Other, "No space left on device"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Err(io::Error::new(io::ErrorKind::Other, "No space left on device"))
        }
    }

    fn setup(reference_content: &[u8]) -> (TempDir, PathBuf) {
        let temp_dir = TempDir::new().unwrap();
        let reference = temp_dir.path().join("a.txt");
        fs::write(&reference, reference_content).unwrap();
        (temp_dir, reference)
    }

    #[test]
    fn test_duplicate_is_tagged_and_reported() {
        let (temp_dir, reference) = setup(b"hello");
        let dir_a = temp_dir.path().join("dirA");
        fs::create_dir(&dir_a).unwrap();
        fs::write(dir_a.join("x.txt"), b"hello").unwrap();

        let config = ResolvedConfig::resolve(&reference, vec![dir_a.clone()], true).unwrap();
        let mut tags = MemoryTagStore::new();
        let mut out = Vec::new();

        let outcome = check_reference(&config, &mut tags, &mut out).unwrap();
        assert_eq!(outcome, ScanOutcome::DuplicateFound(dir_a.join("x.txt")));
        assert!(tags.has_tag(&reference, DUPLICATE_TAG_NAME));
        assert!(!tags.has_tag(&reference, UNIQUE_TAG_NAME));

        let printed = String::from_utf8(out).unwrap();
        assert!(printed.contains("x.txt"));
        assert!(printed.contains("is identical to"));
    }

    #[test]
    fn test_quiet_duplicate_prints_nothing() {
        let (temp_dir, reference) = setup(b"hello");
        let dir_a = temp_dir.path().join("dirA");
        fs::create_dir(&dir_a).unwrap();
        fs::write(dir_a.join("x.txt"), b"hello").unwrap();

        let config = ResolvedConfig::resolve(&reference, vec![dir_a], false).unwrap();
        let mut out = Vec::new();

        check_reference(&config, &mut MemoryTagStore::new(), &mut out).unwrap();
        assert!(out.is_empty());
    }

    #[test]
    fn test_directory_error_clears_without_tagging() {
        let (temp_dir, reference) = setup(b"hello");
        let missing = temp_dir.path().join("missing");
        let config = ResolvedConfig::resolve(&reference, vec![missing.clone()], false).unwrap();

        let mut tags = MemoryTagStore::new();
        tags.mark_unique(&reference).unwrap();
        let mut out = Vec::new();

        let outcome = check_reference(&config, &mut tags, &mut out).unwrap();
        assert_eq!(outcome, ScanOutcome::DirectoryError(missing));
        assert!(tags.tags_for(&reference).is_empty());
        assert!(String::from_utf8(out).unwrap().contains("does not exist"));
    }

    #[test]
    fn test_failed_match_message_keeps_duplicate_outcome() {
        let (temp_dir, reference) = setup(b"hello");
        let dir_a = temp_dir.path().join("dirA");
        fs::create_dir(&dir_a).unwrap();
        fs::write(dir_a.join("x.txt"), b"hello").unwrap();

        let config = ResolvedConfig::resolve(&reference, vec![dir_a.clone()], true).unwrap();
        let mut tags = MemoryTagStore::new();

        let outcome = check_reference(&config, &mut tags, &mut FullWriter).unwrap();
        assert_eq!(outcome, ScanOutcome::DuplicateFound(dir_a.join("x.txt")));
        assert_eq!(outcome.code(), 1);
        assert!(tags.has_tag(&reference, DUPLICATE_TAG_NAME));
    }

    #[test]
    fn test_failed_directory_message_keeps_directory_outcome() {
        let (temp_dir, reference) = setup(b"hello");
        let missing = temp_dir.path().join("missing");
        let config = ResolvedConfig::resolve(&reference, vec![missing.clone()], false).unwrap();

        let mut tags = MemoryTagStore::new();

        let outcome = check_reference(&config, &mut tags, &mut FullWriter).unwrap();
        assert_eq!(outcome, ScanOutcome::DirectoryError(missing));
        assert_eq!(outcome.code(), 1);
    }

    #[test]
    fn test_report_outcome_messages() {
        let reference = Path::new("a.txt");
        let found = ScanOutcome::DuplicateFound(PathBuf::from("dirA/x.txt"));

        let mut out = Vec::new();
        report_outcome(&found, reference, false, &mut out).unwrap();
        report_outcome(&ScanOutcome::NoDuplicateFound, reference, true, &mut out).unwrap();
        assert!(out.is_empty());

        report_outcome(&found, reference, true, &mut out).unwrap();
        let invalid = ScanOutcome::ValidationError("Reference file a.txt is empty".into());
        report_outcome(&invalid, reference, false, &mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "File dirA/x.txt is identical to a.txt\nReference file a.txt is empty\n"
        );
    }
}
