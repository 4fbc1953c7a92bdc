// formats.rs
//! Format labels shown in the dropdown and the table of supported conversions.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormatLabel {
    Pdf,
    Word,
    Excel,
    Csv,
    Text,
}

impl FormatLabel {
    /// Dropdown order.
    pub const ALL: [FormatLabel; 5] = [
        FormatLabel::Pdf,
        FormatLabel::Word,
        FormatLabel::Excel,
        FormatLabel::Csv,
        FormatLabel::Text,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FormatLabel::Pdf => "PDF",
            FormatLabel::Word => "Word",
            FormatLabel::Excel => "Excel",
            FormatLabel::Csv => "CSV",
            FormatLabel::Text => "Text",
        }
    }

    pub fn extension(self) -> &'static str {
        match self {
            FormatLabel::Pdf => "pdf",
            FormatLabel::Word => "docx",
            FormatLabel::Excel => "xlsx",
            FormatLabel::Csv => "csv",
            FormatLabel::Text => "txt",
        }
    }

    /// Labels are matched exactly. "Metin" is kept as an alias for `Text`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label {
            "PDF" => Some(FormatLabel::Pdf),
            "Word" => Some(FormatLabel::Word),
            "Excel" => Some(FormatLabel::Excel),
            "CSV" => Some(FormatLabel::Csv),
            "Text" | "Metin" => Some(FormatLabel::Text),
            _ => None,
        }
    }
}

impl fmt::Display for FormatLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Maps a dropdown label to the extension of the file it produces.
pub fn extension_for(label: &str) -> Option<&'static str> {
    FormatLabel::from_label(label).map(FormatLabel::extension)
}

/// Static mapping of input extension to the output extensions it can reach.
#[derive(Debug, Clone, Copy)]
pub struct SupportTable {
    entries: &'static [(&'static str, &'static [&'static str])],
}

pub const SUPPORT_TABLE: SupportTable = SupportTable::new(&[
    ("docx", &["pdf", "docx", "txt"]),
    ("pdf", &["docx", "txt"]),
    ("xlsx", &["csv", "xlsx"]),
    ("csv", &["xlsx", "csv"]),
    ("pptx", &["pdf"]),
    ("txt", &["pdf", "docx", "txt"]),
]);

impl SupportTable {
    pub const fn new(entries: &'static [(&'static str, &'static [&'static str])]) -> Self {
        Self { entries }
    }

    /// Outputs reachable from `input_extension`. Case-insensitive, leading dot optional.
    pub fn outputs_for(&self, input_extension: &str) -> &'static [&'static str] {
        let input = input_extension.trim_start_matches('.');
        self.entries
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(input))
            .map(|(_, outputs)| *outputs)
            .unwrap_or(&[])
    }

    pub fn is_supported(&self, input_extension: &str, output_extension: &str) -> bool {
        self.outputs_for(input_extension).contains(&output_extension)
    }

    pub fn pairs(&self) -> impl Iterator<Item = (&'static str, &'static str)> + '_ {
        self.entries
            .iter()
            .flat_map(|(input, outputs)| outputs.iter().map(move |output| (*input, *output)))
    }
}

impl Default for SupportTable {
    fn default() -> Self {
        SUPPORT_TABLE
    }
}

pub fn is_supported(input_extension: &str, output_extension: &str) -> bool {
    SUPPORT_TABLE.is_supported(input_extension, output_extension)
}
