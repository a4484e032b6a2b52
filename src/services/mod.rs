//! Service layer for business logic.
//!
//! This module contains services that coordinate the converters with file
//! output for the CLI and the web API.

pub mod conversion;

// Re-export commonly used types
pub use conversion::{ConversionError, ConversionService, KeymapConversion, SftlConversion};
