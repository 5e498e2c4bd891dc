//! Guide catalogs: where the searchable corpus comes from.
//!
//! # Error Handling Strategy
//!
//! Catalog failures are returned to the caller, never papered over. A search
//! against a catalog that cannot be read is an error, not an empty result.
//! Individual malformed guides inside a catalog file are skipped with a
//! warning, but a file where most guides are malformed is rejected, as is a
//! file without exactly [`FEATURED_COUNT`] featured guides or with a repeated
//! guide id.

pub mod builtin;
pub mod file;

use anyhow::Result;

pub use builtin::BuiltinCatalog;
pub use file::FileCatalog;

use crate::models::GuideItem;

/// Number of guides every catalog features
pub const FEATURED_COUNT: usize = 5;

/// Supplies the guide corpus.
///
/// Guide ids are unique across everything a provider returns.
pub trait GuideCatalogProvider: Send + Sync {
    /// The curated guides shown up front, exactly [`FEATURED_COUNT`] of them
    fn fetch_featured(&self) -> Result<Vec<GuideItem>>;

    /// Featured guides followed by every other guide; the search corpus
    fn fetch_all(&self) -> Result<Vec<GuideItem>>;
}
