// conversion/pdf.rs
use crate::conversion::staging;
use crate::error::Error;
use lopdf::Document;
use printpdf::{BuiltinFont, Mm, PdfDocument};
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;

// A4 portrait, Helvetica 12pt, 10 mm rows.
const PAGE_WIDTH_MM: f32 = 210.0;
const PAGE_HEIGHT_MM: f32 = 297.0;
const MARGIN_MM: f32 = 10.0;
const BREAK_MARGIN_MM: f32 = 20.0;
const CELL_PADDING_MM: f32 = 1.0;
const ROW_HEIGHT_MM: f32 = 10.0;
const FONT_SIZE_PT: f32 = 12.0;
const PT_TO_MM: f32 = 25.4 / 72.0;

/// Helvetica advance widths in 1/1000 em, U+0020 to U+007E.
#[rustfmt::skip]
const ASCII_WIDTHS: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556, 278, 278, 584, 584, 584, 556,
    1015, 667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833, 722, 778,
    667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611, 278, 278, 278, 469, 556,
    333, 556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833, 556, 556,
    556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500, 334, 260, 334, 584,
];

/// Helvetica advance widths in 1/1000 em, U+00A0 to U+00FF.
#[rustfmt::skip]
const LATIN1_WIDTHS: [u16; 96] = [
    278, 333, 556, 556, 556, 556, 260, 556, 333, 737, 370, 556, 584, 333, 737, 333,
    400, 584, 333, 333, 333, 556, 537, 278, 333, 333, 365, 556, 834, 834, 834, 611,
    667, 667, 667, 667, 667, 667, 1000, 722, 667, 667, 667, 667, 278, 278, 278, 278,
    722, 722, 778, 778, 778, 778, 778, 584, 778, 722, 722, 722, 722, 667, 667, 611,
    556, 556, 556, 556, 556, 556, 889, 500, 556, 556, 556, 556, 278, 278, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 584, 611, 556, 556, 556, 556, 500, 556, 500,
];

pub fn pdf_to_txt(input: &Path, output: &Path) -> Result<(), Error> {
    let doc = Document::load(input)?;
    let mut text = String::new();
    for page_number in doc.get_pages().keys() {
        text.push_str(&doc.extract_text(&[*page_number])?);
    }
    staging::write_staged(output, |file| {
        file.write_all(text.as_bytes())?;
        Ok(())
    })
}

/// Draws the text with the built-in Helvetica font, which only covers WinAnsi.
/// Any other character fails the conversion before anything is written.
pub fn txt_to_pdf(input: &Path, output: &Path) -> Result<(), Error> {
    let content = fs::read_to_string(input)?;
    check_encodable(&content)?;
    let title = input
        .file_stem()
        .map(|stem| stem.to_string_lossy().into_owned())
        .unwrap_or_default();

    let (doc, page, layer) = PdfDocument::new(
        title,
        Mm(PAGE_WIDTH_MM),
        Mm(PAGE_HEIGHT_MM),
        "Layer 1",
    );
    let font = doc
        .add_builtin_font(BuiltinFont::Helvetica)
        .map_err(|e| Error::PdfAuthoring(e.to_string()))?;

    let mut current_layer = doc.get_page(page).get_layer(layer);
    let mut cursor_mm = MARGIN_MM;
    let max_width = row_capacity();

    for line in content.lines() {
        let line = line.replace('\t', " ");
        for row in wrap_line(&line, max_width, glyph_width) {
            if cursor_mm + ROW_HEIGHT_MM > PAGE_HEIGHT_MM - BREAK_MARGIN_MM {
                let (page, layer) = doc.add_page(Mm(PAGE_WIDTH_MM), Mm(PAGE_HEIGHT_MM), "Layer 1");
                current_layer = doc.get_page(page).get_layer(layer);
                cursor_mm = MARGIN_MM;
            }
            // Baseline sits mid-row, offset by 0.3 of the font size.
            let baseline_from_top = cursor_mm + ROW_HEIGHT_MM / 2.0 + 0.3 * FONT_SIZE_PT * PT_TO_MM;
            current_layer.use_text(
                row,
                FONT_SIZE_PT,
                Mm(MARGIN_MM + CELL_PADDING_MM),
                Mm(PAGE_HEIGHT_MM - baseline_from_top),
                &font,
            );
            cursor_mm += ROW_HEIGHT_MM;
        }
    }

    staging::write_staged(output, |file| {
        let mut writer = BufWriter::new(file);
        doc.save(&mut writer)
            .map_err(|e| Error::PdfAuthoring(e.to_string()))?;
        writer.flush()?;
        Ok(())
    })
}

fn check_encodable(content: &str) -> Result<(), Error> {
    for (index, line) in content.lines().enumerate() {
        if let Some(character) = line.chars().find(|c| helvetica_width(*c).is_none()) {
            return Err(Error::UnencodableCharacter {
                character,
                line: index + 1,
            });
        }
    }
    Ok(())
}

/// Advance width of `c` in the built-in Helvetica, or `None` when WinAnsi has no code for it.
/// Tabs are drawn as spaces.
fn helvetica_width(c: char) -> Option<u32> {
    let code = c as u32;
    let width = match code {
        0x09 => ASCII_WIDTHS[0],
        0x20..=0x7E => ASCII_WIDTHS[(code - 0x20) as usize],
        0xA0..=0xFF => LATIN1_WIDTHS[(code - 0xA0) as usize],
        _ => match c {
            '€' | 'ƒ' | '†' | '‡' | '–' => 556,
            '‚' | '‘' | '’' => 222,
            '„' | '“' | '”' => 333,
            '…' | '‰' | 'Œ' | '—' | '™' => 1000,
            'ˆ' | '‹' | '˜' | '›' => 333,
            'Š' | 'Ÿ' => 667,
            'Ž' => 611,
            '•' => 350,
            'š' | 'ž' => 500,
            'œ' => 944,
            _ => return None,
        },
    };
    Some(u32::from(width))
}

fn glyph_width(c: char) -> u32 {
    helvetica_width(c).unwrap_or(u32::from(ASCII_WIDTHS[0]))
}

/// Usable row width in 1/1000 em of the body font.
fn row_capacity() -> u32 {
    let usable = PAGE_WIDTH_MM - 2.0 * MARGIN_MM - 2.0 * CELL_PADDING_MM;
    let em = FONT_SIZE_PT * PT_TO_MM;
    (usable / em * 1000.0).floor() as u32
}

/// Splits a line at the last space before the row overflows; words wider than a row are cut.
/// An empty line still produces one (empty) row.
fn wrap_line(line: &str, max_width: u32, width_of: impl Fn(char) -> u32) -> Vec<String> {
    let chars: Vec<char> = line.chars().collect();
    let mut rows = Vec::new();
    let mut start = 0;
    let mut index = 0;
    let mut width = 0;
    let mut last_space = None;

    while index < chars.len() {
        let c = chars[index];
        if c == ' ' {
            last_space = Some(index);
        }
        width += width_of(c);
        if width <= max_width {
            index += 1;
            continue;
        }

        match last_space {
            Some(space) if space > start => {
                rows.push(chars[start..space].iter().collect());
                start = space + 1;
            }
            _ => {
                let end = index.max(start + 1);
                rows.push(chars[start..end].iter().collect());
                start = end;
            }
        }
        index = start;
        width = 0;
        last_space = None;
    }

    if start < chars.len() || rows.is_empty() {
        rows.push(chars[start..].iter().collect());
    }
    rows
}
