//! File tags used to publish the verdict on the reference file

use anyhow::Result;
use std::collections::HashMap;
use std::fmt;
use std::path::{Path, PathBuf};

pub const DUPLICATE_TAG_NAME: &str = "Duplicate";
pub const UNIQUE_TAG_NAME: &str = "Unique";

/// Label colors, in Finder's numbering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TagColor {
    None,
    Gray,
    Green,
    Purple,
    Blue,
    Yellow,
    Red,
    Orange,
}

impl TagColor {
    /// Index stored after the tag name in Finder's tag list
    pub fn finder_index(self) -> u8 {
        match self {
            TagColor::None => 0,
            TagColor::Gray => 1,
            TagColor::Green => 2,
            TagColor::Purple => 3,
            TagColor::Blue => 4,
            TagColor::Yellow => 5,
            TagColor::Red => 6,
            TagColor::Orange => 7,
        }
    }

    pub fn from_finder_index(index: u8) -> Option<Self> {
        let color = match index {
            0 => TagColor::None,
            1 => TagColor::Gray,
            2 => TagColor::Green,
            3 => TagColor::Purple,
            4 => TagColor::Blue,
            5 => TagColor::Yellow,
            6 => TagColor::Red,
            7 => TagColor::Orange,
            _ => return None,
        };
        Some(color)
    }
}

/// A named, colored label attached to a file
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    pub name: String,
    pub color: TagColor,
}

impl Tag {
    pub fn new(name: impl Into<String>, color: TagColor) -> Self {
        Self {
            name: name.into(),
            color,
        }
    }

    pub fn duplicate() -> Self {
        Self::new(DUPLICATE_TAG_NAME, TagColor::Red)
    }

    pub fn unique() -> Self {
        Self::new(UNIQUE_TAG_NAME, TagColor::Green)
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:?})", self.name, self.color)
    }
}

/// Storage for file tags
///
/// Implementations only need `clear_tags` and `add_tag`. Adding a tag whose
/// name is already present replaces it.
pub trait TagStore {
    /// Remove every tag from `path`
    fn clear_tags(&mut self, path: &Path) -> Result<()>;

    /// Attach `tag` to `path`, keeping unrelated tags
    fn add_tag(&mut self, path: &Path, tag: &Tag) -> Result<()>;

    fn mark_duplicate(&mut self, path: &Path) -> Result<()> {
        self.add_tag(path, &Tag::duplicate())
    }

    fn mark_unique(&mut self, path: &Path) -> Result<()> {
        self.add_tag(path, &Tag::unique())
    }
}

/// Tag store that records nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopTagStore;

impl TagStore for NoopTagStore {
    fn clear_tags(&mut self, _path: &Path) -> Result<()> {
        Ok(())
    }

    fn add_tag(&mut self, _path: &Path, _tag: &Tag) -> Result<()> {
        Ok(())
    }
}

/// In-process tag store
#[derive(Debug, Default, Clone)]
pub struct MemoryTagStore {
    tags: HashMap<PathBuf, Vec<Tag>>,
}

impl MemoryTagStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Tags currently attached to `path`, in insertion order
    pub fn tags_for(&self, path: &Path) -> &[Tag] {
        self.tags.get(path).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn has_tag(&self, path: &Path, name: &str) -> bool {
        self.tags_for(path).iter().any(|tag| tag.name == name)
    }
}

impl TagStore for MemoryTagStore {
    fn clear_tags(&mut self, path: &Path) -> Result<()> {
        self.tags.remove(path);
        Ok(())
    }

    fn add_tag(&mut self, path: &Path, tag: &Tag) -> Result<()> {
        let tags = self.tags.entry(path.to_path_buf()).or_default();
        tags.retain(|existing| existing.name != tag.name);
        tags.push(tag.clone());
        Ok(())
    }
}
