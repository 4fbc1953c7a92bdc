// lib.rs
//! Converts a single office document between DOCX, PDF, XLSX, CSV, TXT and PPTX.
//!
//! [`formats`] resolves dropdown labels and knows which conversions exist;
//! [`conversion::Converter`] derives the output path and runs the matching routine.

pub mod config;
pub mod conversion;
pub mod error;
pub mod formats;
pub mod utils;

pub use conversion::{ConversionOutcome, ConversionPair, ConversionRequest, Converter, Written};
pub use error::{ConvertError, Error};
pub use formats::{extension_for, is_supported, FormatLabel};
