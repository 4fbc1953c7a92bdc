// conversion/mod.rs
//! Dispatch of a single file conversion to its leaf routine.

pub mod office;
pub mod pdf;
pub mod presentation;
pub mod sheet;
mod staging;
pub mod text;

use crate::error::{ConvertError, Error};
use crate::formats::{self, SupportTable};
use office::OfficeSuite;
use presentation::PresentationExporter;
use std::path::{Path, PathBuf};

/// One conversion the user asked for. Built after both a file and a format are chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionRequest {
    input_path: PathBuf,
    target_format_label: String,
}

impl ConversionRequest {
    pub fn new(input_path: impl Into<PathBuf>, target_format_label: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            target_format_label: target_format_label.into(),
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }

    pub fn target_format_label(&self) -> &str {
        &self.target_format_label
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConversionOutcome {
    pub output_path: Option<PathBuf>,
    pub error: Option<ConvertError>,
    /// The input already was the requested format; nothing was written.
    pub already_in_format: bool,
}

impl ConversionOutcome {
    pub fn succeeded(&self) -> bool {
        self.error.is_none()
    }

    pub fn error_message(&self) -> Option<String> {
        self.error.as_ref().map(ToString::to_string)
    }

    /// Status line for a successful conversion, `None` after a failure.
    pub fn success_message(&self) -> Option<String> {
        if self.error.is_some() {
            return None;
        }
        let output_path = self.output_path.as_deref()?;
        let extension = output_path
            .extension()
            .map(|ext| ext.to_string_lossy().to_uppercase())
            .unwrap_or_default();
        if self.already_in_format {
            return Some(format!("File is already in {extension} format. Nothing was written."));
        }
        let directory = output_path
            .parent()
            .map(|dir| dir.display().to_string())
            .unwrap_or_default();
        Some(format!("{extension} file saved to {directory}."))
    }
}

/// What a successful leaf routine did at the output path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Written {
    Created,
    /// The output path is the input file itself; it was left untouched.
    AlreadyInFormat,
}

/// Every leaf routine, one variant per (input, output) extension pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionPair {
    DocxToPdf,
    DocxToDocx,
    DocxToTxt,
    PdfToDocx,
    PdfToTxt,
    XlsxToCsv,
    XlsxToXlsx,
    CsvToXlsx,
    CsvToCsv,
    PptxToPdf,
    TxtToPdf,
    TxtToDocx,
    TxtToTxt,
}

impl ConversionPair {
    pub const ALL: [ConversionPair; 13] = [
        ConversionPair::DocxToPdf,
        ConversionPair::DocxToDocx,
        ConversionPair::DocxToTxt,
        ConversionPair::PdfToDocx,
        ConversionPair::PdfToTxt,
        ConversionPair::XlsxToCsv,
        ConversionPair::XlsxToXlsx,
        ConversionPair::CsvToXlsx,
        ConversionPair::CsvToCsv,
        ConversionPair::PptxToPdf,
        ConversionPair::TxtToPdf,
        ConversionPair::TxtToDocx,
        ConversionPair::TxtToTxt,
    ];

    pub fn extensions(self) -> (&'static str, &'static str) {
        match self {
            ConversionPair::DocxToPdf => ("docx", "pdf"),
            ConversionPair::DocxToDocx => ("docx", "docx"),
            ConversionPair::DocxToTxt => ("docx", "txt"),
            ConversionPair::PdfToDocx => ("pdf", "docx"),
            ConversionPair::PdfToTxt => ("pdf", "txt"),
            ConversionPair::XlsxToCsv => ("xlsx", "csv"),
            ConversionPair::XlsxToXlsx => ("xlsx", "xlsx"),
            ConversionPair::CsvToXlsx => ("csv", "xlsx"),
            ConversionPair::CsvToCsv => ("csv", "csv"),
            ConversionPair::PptxToPdf => ("pptx", "pdf"),
            ConversionPair::TxtToPdf => ("txt", "pdf"),
            ConversionPair::TxtToDocx => ("txt", "docx"),
            ConversionPair::TxtToTxt => ("txt", "txt"),
        }
    }

    /// Exact lookup on lowercase extensions without a leading dot.
    pub fn from_extensions(input: &str, output: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|pair| pair.extensions() == (input, output))
    }
}

/// Lowercased extension of `path`, empty when it has none.
pub fn input_extension(path: &Path) -> String {
    path.extension()
        .map(|ext| ext.to_string_lossy().to_lowercase())
        .unwrap_or_default()
}

/// `<input_directory>/<input_basename>.<output_extension>`
pub fn output_path_for(input_path: &Path, output_extension: &str) -> PathBuf {
    input_path.with_extension(output_extension)
}

pub struct Converter {
    support: SupportTable,
    office: OfficeSuite,
    presentations: Box<dyn PresentationExporter>,
}

impl Converter {
    pub fn new(office_path: Option<PathBuf>) -> Self {
        Self {
            support: formats::SUPPORT_TABLE,
            office: OfficeSuite::new(office_path),
            presentations: presentation::platform_exporter(),
        }
    }

    pub fn with_support_table(mut self, support: SupportTable) -> Self {
        self.support = support;
        self
    }

    pub fn with_presentation_exporter(mut self, exporter: Box<dyn PresentationExporter>) -> Self {
        self.presentations = exporter;
        self
    }

    pub fn support_table(&self) -> &SupportTable {
        &self.support
    }

    /// Resolves the request's label and converts. Never panics on conversion errors;
    /// every failure is reported through the outcome.
    pub fn run(&self, request: &ConversionRequest) -> ConversionOutcome {
        let Some(output_extension) = formats::extension_for(request.target_format_label()) else {
            tracing::warn!(label = request.target_format_label(), "invalid format selection");
            return ConversionOutcome {
                output_path: None,
                error: Some(ConvertError::InvalidFormatSelection {
                    label: request.target_format_label().to_string(),
                }),
                already_in_format: false,
            };
        };

        let output_path = output_path_for(request.input_path(), output_extension);
        match self.convert_file(request.input_path(), output_extension) {
            Ok((written_path, written)) => ConversionOutcome {
                output_path: Some(written_path),
                error: None,
                already_in_format: written == Written::AlreadyInFormat,
            },
            Err(err) => ConversionOutcome {
                output_path: Some(output_path),
                error: Some(err),
                already_in_format: false,
            },
        }
    }

    pub fn convert(&self, input_path: &Path, output_extension: &str) -> Result<PathBuf, ConvertError> {
        self.convert_file(input_path, output_extension)
            .map(|(output_path, _)| output_path)
    }

    /// Like [`Converter::convert`], also telling whether anything was written.
    pub fn convert_file(
        &self,
        input_path: &Path,
        output_extension: &str,
    ) -> Result<(PathBuf, Written), ConvertError> {
        let input_ext = input_extension(input_path);
        let output_ext = output_extension.trim_start_matches('.').to_lowercase();

        if !self.support.is_supported(&input_ext, &output_ext) {
            return Err(ConvertError::UnsupportedConversion {
                input: input_ext,
                output: output_ext,
            });
        }

        if !input_path.is_file() {
            return Err(ConvertError::failed(format!(
                "input file not found: {}",
                input_path.display()
            )));
        }

        let Some(pair) = ConversionPair::from_extensions(&input_ext, &output_ext) else {
            return Err(ConvertError::UnimplementedConversion {
                input: input_ext,
                output: output_ext,
            });
        };

        let output_path = output_path_for(input_path, &output_ext);
        tracing::info!(
            input = %input_path.display(),
            output = %output_path.display(),
            ?pair,
            "converting"
        );

        match self.run_leaf(pair, input_path, &output_path) {
            Ok(written) => Ok((output_path, written)),
            Err(err) => {
                tracing::warn!(?pair, error = %err, "conversion failed");
                Err(err.into())
            }
        }
    }

    fn run_leaf(&self, pair: ConversionPair, input: &Path, output: &Path) -> Result<Written, Error> {
        let result = match pair {
            ConversionPair::DocxToDocx
            | ConversionPair::XlsxToXlsx
            | ConversionPair::CsvToCsv
            | ConversionPair::TxtToTxt => return text::copy_file(input, output),
            ConversionPair::DocxToPdf => self.office.docx_to_pdf(input, output),
            ConversionPair::DocxToTxt => text::docx_to_txt(input, output),
            ConversionPair::PdfToDocx => self.office.pdf_to_docx(input, output),
            ConversionPair::PdfToTxt => pdf::pdf_to_txt(input, output),
            ConversionPair::XlsxToCsv => sheet::xlsx_to_csv(input, output),
            ConversionPair::CsvToXlsx => sheet::csv_to_xlsx(input, output),
            ConversionPair::PptxToPdf => self.presentations.export_pdf(input, output),
            ConversionPair::TxtToPdf => pdf::txt_to_pdf(input, output),
            ConversionPair::TxtToDocx => text::txt_to_docx(input, output),
        };
        result.map(|()| Written::Created)
    }
}
