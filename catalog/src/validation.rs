//! The canonical validation policy, applied by the store before any I/O.
//!
//! Every adapter goes through the same rules; the `categories` shape check
//! is structural (the typed draft only deserializes a JSON array).

use crate::error::{CatalogError, Result};
use crate::models::ProductDraft;

pub fn validate(draft: &ProductDraft) -> Result<()> {
    match draft.name.as_deref() {
        Some(name) if !name.is_empty() => {}
        _ => return Err(CatalogError::validation("name required")),
    }

    // `price > 0.0` is false for NaN as well, so NaN is rejected here.
    match draft.price {
        Some(price) if price > 0.0 => {}
        _ => return Err(CatalogError::validation("price must be a positive number")),
    }

    Ok(())
}
