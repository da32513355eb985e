// Copyright 2025-2026 Neil Henderson
//
//! The `core` module provides foundational types and functions used by the various compiler stages.

mod internal_error;
mod source_location;
mod types;


pub use internal_error::{InternalError, Stage};
pub use source_location::SourceLocation;
pub use types::Type;
