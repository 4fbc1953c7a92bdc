// error.rs
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised inside a single leaf routine.
#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("ZIP error: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    #[error("PDF error: {0}")]
    Pdf(#[from] lopdf::Error),

    #[error("PDF authoring error: {0}")]
    PdfAuthoring(String),

    #[error("character {character:?} on line {line} cannot be drawn with the built-in PDF font")]
    UnencodableCharacter { character: char, line: usize },

    #[error("DOCX authoring error: {0}")]
    DocxAuthoring(String),

    #[error("spreadsheet error: {0}")]
    Spreadsheet(#[from] calamine::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("XLSX error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("workbook has no worksheets")]
    EmptyWorkbook,

    #[error("sheet is too large: {0}")]
    SheetTooLarge(String),

    #[error("{tool} not found (searched {searched})")]
    ToolNotFound { tool: &'static str, searched: String },

    #[error("{tool} failed ({status}): {stderr}")]
    ToolFailed {
        tool: String,
        status: String,
        stderr: String,
    },

    #[error("{tool} finished but did not produce {expected}")]
    ToolProducedNothing { tool: String, expected: PathBuf },

    #[error("presentation export is unavailable on this platform: {0}")]
    PresentationUnavailable(String),
}

/// User-facing failure kinds reported by the dispatcher.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConvertError {
    #[error("no valid output format selected ({label:?})")]
    InvalidFormatSelection { label: String },

    #[error(".{input} file cannot be converted to {output} format")]
    UnsupportedConversion { input: String, output: String },

    #[error("no conversion routine registered for .{input} -> {output}")]
    UnimplementedConversion { input: String, output: String },

    #[error("conversion failed: {message}")]
    ConversionFailed { message: String },
}

impl ConvertError {
    pub fn failed(err: impl fmt::Display) -> Self {
        ConvertError::ConversionFailed {
            message: err.to_string(),
        }
    }
}

impl From<Error> for ConvertError {
    fn from(err: Error) -> Self {
        ConvertError::failed(err)
    }
}
