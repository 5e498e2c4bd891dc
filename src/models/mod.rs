//! Data models for guides and search history.
//!
//! - [`GuideItem`] - An immutable how-to guide supplied by a catalog
//! - [`SearchHistoryEntry`] - A recorded search query with its timestamp
//!
//! Both serialize with serde. History timestamps go through a custom
//! deserializer in the `deserializers` module so older files that stored
//! epoch milliseconds still load.

pub mod deserializers;
pub mod guide;
pub mod history;

pub use guide::GuideItem;
pub use history::{SearchHistoryEntry, normalize_query};
