//! Fuzzy dataset search.
//!
//! This module provides:
//! - Approximate substring scoring (`fuzzy`)
//! - A weighted, read-only index built from a registry snapshot (`index`)

mod fuzzy;
mod index;

pub use fuzzy::{field_score, normalize, substring_distance};
pub use index::{SearchField, SearchHit, SearchIndex, SearchKey, SearchOptions};
