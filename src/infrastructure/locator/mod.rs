//! File locator infrastructure module

mod bookmark;

pub use bookmark::BookmarkLocator;
