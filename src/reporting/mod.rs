//! Publishing the verdict as file tags

pub mod finder;
pub mod tag_store;
pub mod xdg;

pub use tag_store::{
    MemoryTagStore, NoopTagStore, Tag, TagColor, TagStore, DUPLICATE_TAG_NAME, UNIQUE_TAG_NAME,
};

/// Native tag store for the build target
#[cfg(target_os = "macos")]
pub fn platform_tag_store() -> Box<dyn TagStore> {
    Box::new(finder::FinderTagStore)
}

/// Native tag store for the build target
#[cfg(all(unix, not(target_os = "macos")))]
pub fn platform_tag_store() -> Box<dyn TagStore> {
    Box::new(xdg::XdgTagStore)
}

/// Native tag store for the build target
#[cfg(not(unix))]
pub fn platform_tag_store() -> Box<dyn TagStore> {
    Box::new(NoopTagStore)
}
