//! Freedesktop tags in the `user.xdg.tags` extended attribute
//!
//! The attribute holds comma-separated tag names. Colors have no slot there
//! and are dropped.

use super::tag_store::Tag;

pub const XDG_TAGS_ATTR: &str = "user.xdg.tags";

/// Split a raw attribute value into tag names
pub fn parse_tag_names(raw: &[u8]) -> Vec<String> {
    String::from_utf8_lossy(raw)
        .split(',')
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

/// Add `tag` to `names` unless already present
///
/// # Returns
/// `true` if `names` changed
pub fn merge_tag_name(names: &mut Vec<String>, tag: &Tag) -> bool {
    if names.iter().any(|name| *name == tag.name) {
        return false;
    }
    names.push(tag.name.clone());
    true
}

#[cfg(unix)]
pub use self::store::XdgTagStore;

#[cfg(unix)]
mod store {
    use anyhow::{Context, Result};
    use std::path::Path;

    use super::{merge_tag_name, parse_tag_names, XDG_TAGS_ATTR};
    use crate::reporting::tag_store::{Tag, TagStore};

    /// Tag store backed by `user.xdg.tags`
    #[derive(Debug, Default, Clone, Copy)]
    pub struct XdgTagStore;

    impl TagStore for XdgTagStore {
        fn clear_tags(&mut self, path: &Path) -> Result<()> {
            let present = xattr::get(path, XDG_TAGS_ATTR)
                .with_context(|| format!("Failed to read tags of {:?}", path))?
                .is_some();
            if present {
                xattr::remove(path, XDG_TAGS_ATTR)
                    .with_context(|| format!("Failed to clear tags of {:?}", path))?;
            }
            Ok(())
        }

        fn add_tag(&mut self, path: &Path, tag: &Tag) -> Result<()> {
            let raw = xattr::get(path, XDG_TAGS_ATTR)
                .with_context(|| format!("Failed to read tags of {:?}", path))?
                .unwrap_or_default();
            let mut names = parse_tag_names(&raw);

            if merge_tag_name(&mut names, tag) {
                xattr::set(path, XDG_TAGS_ATTR, names.join(",").as_bytes())
                    .with_context(|| format!("Failed to write tags of {:?}", path))?;
            }
            Ok(())
        }
    }
}
