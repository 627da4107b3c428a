//! Static registry of supported file extensions.
//!
//! Every extension the service understands belongs to exactly one
//! [`MediaCategory`]. Conversions are only allowed within a category, so the
//! registry is the single source of truth for both upload validation and
//! target-format validation.

mod types;

pub use types::{FormatRegistry, MediaCategory};
