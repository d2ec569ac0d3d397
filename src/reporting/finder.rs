//! macOS Finder tags
//!
//! Finder keeps a file's tags in the `com.apple.metadata:_kMDItemUserTags`
//! extended attribute: a binary property list holding an array of strings,
//! each `"<name>\n<color index>"`. A label without a color index has no color.

use super::tag_store::{Tag, TagColor};

pub const USER_TAGS_ATTR: &str = "com.apple.metadata:_kMDItemUserTags";

/// Encode a tag as a Finder label string
pub fn finder_label(tag: &Tag) -> String {
    format!("{}\n{}", tag.name, tag.color.finder_index())
}

/// Decode a Finder label string
pub fn parse_finder_label(label: &str) -> Tag {
    match label.rsplit_once('\n') {
        Some((name, index)) => {
            let color = index
                .parse::<u8>()
                .ok()
                .and_then(TagColor::from_finder_index)
                .unwrap_or(TagColor::None);
            Tag::new(name, color)
        }
        None => Tag::new(label, TagColor::None),
    }
}

/// Put `tag` into `labels`, replacing any label with the same name
///
/// # Returns
/// `true` if `labels` changed
pub fn merge_label(labels: &mut Vec<String>, tag: &Tag) -> bool {
    let encoded = finder_label(tag);
    if labels.iter().any(|label| *label == encoded) {
        return false;
    }

    labels.retain(|label| parse_finder_label(label).name != tag.name);
    labels.push(encoded);
    true
}

#[cfg(target_os = "macos")]
pub use self::store::FinderTagStore;

#[cfg(target_os = "macos")]
mod store {
    use anyhow::{Context, Result};
    use plist::Value;
    use std::io::Cursor;
    use std::path::Path;

    use super::{merge_label, USER_TAGS_ATTR};
    use crate::reporting::tag_store::{Tag, TagStore};

    /// Tag store backed by Finder's user tag attribute
    #[derive(Debug, Default, Clone, Copy)]
    pub struct FinderTagStore;

    impl FinderTagStore {
        fn read_labels(path: &Path) -> Result<Vec<String>> {
            let raw = xattr::get(path, USER_TAGS_ATTR)
                .with_context(|| format!("Failed to read tags of {:?}", path))?;
            let Some(raw) = raw else {
                return Ok(Vec::new());
            };

            let value = Value::from_reader(Cursor::new(raw))
                .with_context(|| format!("Malformed tag list on {:?}", path))?;
            Ok(value
                .into_array()
                .unwrap_or_default()
                .into_iter()
                .filter_map(Value::into_string)
                .collect())
        }

        fn write_labels(path: &Path, labels: &[String]) -> Result<()> {
            let value = Value::Array(labels.iter().cloned().map(Value::String).collect());
            let mut buf = Vec::new();
            value.to_writer_binary(&mut buf)?;
            xattr::set(path, USER_TAGS_ATTR, &buf)
                .with_context(|| format!("Failed to write tags of {:?}", path))
        }
    }

    impl TagStore for FinderTagStore {
        fn clear_tags(&mut self, path: &Path) -> Result<()> {
            let present = xattr::get(path, USER_TAGS_ATTR)
                .with_context(|| format!("Failed to read tags of {:?}", path))?
                .is_some();
            if present {
                xattr::remove(path, USER_TAGS_ATTR)
                    .with_context(|| format!("Failed to clear tags of {:?}", path))?;
            }
            Ok(())
        }

        fn add_tag(&mut self, path: &Path, tag: &Tag) -> Result<()> {
            let mut labels = Self::read_labels(path)?;
            if merge_label(&mut labels, tag) {
                Self::write_labels(path, &labels)?;
            }
            Ok(())
        }
    }

}
