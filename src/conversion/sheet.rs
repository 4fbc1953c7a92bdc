// conversion/sheet.rs
use crate::conversion::staging;
use crate::error::Error;
use calamine::{open_workbook_auto, Data, Reader};
use rust_xlsxwriter::{Format, Workbook};
use std::io::Write;
use std::path::Path;

/// First worksheet to CSV, no index column.
pub fn xlsx_to_csv(input: &Path, output: &Path) -> Result<(), Error> {
    let mut workbook = open_workbook_auto(input)?;
    let range = workbook.worksheet_range_at(0).ok_or(Error::EmptyWorkbook)??;

    staging::write_staged(output, |file| {
        let mut writer = csv::Writer::from_writer(file);
        for row in range.rows() {
            writer.write_record(row.iter().map(cell_to_field))?;
        }
        writer.flush()?;
        Ok(())
    })
}

/// CSV to a single-sheet workbook. The first record becomes a bold header row.
pub fn csv_to_xlsx(input: &Path, output: &Path) -> Result<(), Error> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(input)?;

    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let worksheet = workbook.add_worksheet();

    for (row_index, record) in reader.records().enumerate() {
        let record = record?;
        let row = u32::try_from(row_index)
            .map_err(|_| Error::SheetTooLarge(format!("row {row_index}")))?;

        for (col_index, field) in record.iter().enumerate() {
            let col = u16::try_from(col_index)
                .map_err(|_| Error::SheetTooLarge(format!("column {col_index}")))?;

            if row == 0 {
                worksheet.write_string_with_format(row, col, field, &header_format)?;
                continue;
            }
            match parse_field(field) {
                Field::Blank => {}
                Field::Number(n) => {
                    worksheet.write_number(row, col, n)?;
                }
                Field::Text(s) => {
                    worksheet.write_string(row, col, s)?;
                }
            }
        }
    }

    let bytes = workbook.save_to_buffer()?;
    staging::write_staged(output, |file| {
        file.write_all(&bytes)?;
        Ok(())
    })
}

#[derive(Debug, PartialEq)]
enum Field<'a> {
    Blank,
    Number(f64),
    Text(&'a str),
}

fn parse_field(field: &str) -> Field<'_> {
    if field.is_empty() {
        return Field::Blank;
    }
    match field.parse::<f64>() {
        Ok(n) if n.is_finite() => Field::Number(n),
        _ => Field::Text(field),
    }
}

fn cell_to_field(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) => format_number(*f),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => (if *b { "True" } else { "False" }).to_string(),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(|d| d.format("%Y-%m-%d %H:%M:%S").to_string())
            .unwrap_or_else(|| cell.to_string()),
        other => other.to_string(),
    }
}

fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        n.to_string()
    }
}
