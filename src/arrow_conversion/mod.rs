//! Arrow data format conversion utilities.
//!
//! This module handles conversion between row-major Data API results
//! and Apache Arrow columnar format.

mod builders;
mod converter;

pub use builders::build_array;
pub use converter::ArrowConverter;
