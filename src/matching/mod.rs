//! String similarity primitives used by the search engine.

pub mod edit_distance;

pub use edit_distance::{distance, similarity};
