//! Lazy discovery of candidate files under a search root

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;
use walkdir::{DirEntry, WalkDir};

/// A regular file met during the walk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub path: PathBuf,
    pub size: u64,
}

/// Walk `root` recursively and yield every regular file under it
///
/// Directory symlinks below the root are not descended into; file symlinks
/// are yielded with the size of their target. Entries that cannot be read
/// are logged and skipped.
///
/// # Arguments
/// * `root` - Directory to walk
///
/// # Returns
/// Iterator over candidates in walk order
pub fn walk_candidates(root: &Path) -> impl Iterator<Item = Candidate> {
    WalkDir::new(root)
        .follow_links(false)
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) => candidate_from_entry(&entry),
            Err(e) => {
                warn!("Skipping unreadable entry under walk: {}", e);
                None
            }
        })
}

fn candidate_from_entry(entry: &DirEntry) -> Option<Candidate> {
    if entry.file_type().is_dir() {
        return None;
    }

    // Follows symlinks so a link to a regular file counts as that file
    match fs::metadata(entry.path()) {
        Ok(metadata) if metadata.is_file() => Some(Candidate {
            path: entry.path().to_path_buf(),
            size: metadata.len(),
        }),
        Ok(_) => None,
        Err(e) => {
            warn!("Skipping {:?}: {}", entry.path(), e);
            None
        }
    }
}
