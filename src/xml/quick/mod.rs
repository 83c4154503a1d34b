//! Quick-xml helper utilities for catalog documents.
//!
//! Wraps quick-xml's low-level attribute APIs so the document builder only
//! decodes each attribute once.

pub mod de;

pub use de::{Attrs, parse_boolean};
