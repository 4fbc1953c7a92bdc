use calamine::{open_workbook_auto, Data, Reader};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use office_file_converter::conversion::presentation::UnavailablePresentationExporter;
use office_file_converter::formats::SupportTable;
use office_file_converter::{ConversionRequest, ConvertError, Converter};
use pretty_assertions::assert_eq;
use rust_xlsxwriter::Workbook;
use std::fs::{self, File};
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::tempdir;
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

/// No external tools: LibreOffice points nowhere and PPTX export is unavailable.
fn converter() -> Converter {
    Converter::new(Some(PathBuf::from("/nonexistent/office/soffice")))
        .with_presentation_exporter(Box::new(UnavailablePresentationExporter::new(
            "no presentation application in tests",
        )))
}

fn write_docx(path: &Path, paragraphs: &[&str]) {
    let body: String = paragraphs
        .iter()
        .map(|text| format!("<w:p><w:r><w:t xml:space=\"preserve\">{text}</w:t></w:r></w:p>"))
        .collect();
    let xml = format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main"><w:body>{body}<w:sectPr/></w:body></w:document>"#
    );

    let mut zip = ZipWriter::new(File::create(path).unwrap());
    zip.start_file("word/document.xml", SimpleFileOptions::default())
        .unwrap();
    zip.write_all(xml.as_bytes()).unwrap();
    zip.finish().unwrap();
}

fn write_hello_pdf(path: &Path) {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Courier",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });
    let content = Content {
        operations: vec![
            Operation::new("BT", vec![]),
            Operation::new("Tf", vec!["F1".into(), 48.into()]),
            Operation::new("Td", vec![100.into(), 600.into()]),
            Operation::new("Tj", vec![Object::string_literal("Hello World!")]),
            Operation::new("ET", vec![]),
        ],
    };
    let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
    let page_id = doc.add_object(dictionary! {
        "Type" => "Page",
        "Parent" => pages_id,
        "Contents" => content_id,
        "Resources" => resources_id,
    });
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => vec![page_id.into()],
        "Count" => 1,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.save(path).unwrap();
}

#[test]
fn txt_to_txt_keeps_bytes() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    let content = "first line\r\nsecond line with ünïcödé\n\n".as_bytes();
    fs::write(&input, content).unwrap();

    let output = converter().convert(&input, "txt").unwrap();
    assert_eq!(output, input);
    assert_eq!(fs::read(&output).unwrap(), content);
}

#[test]
fn same_format_run_reports_nothing_written() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, b"already text\n").unwrap();

    let outcome = converter().run(&ConversionRequest::new(&input, "Text"));
    assert!(outcome.succeeded(), "{:?}", outcome.error_message());
    assert!(outcome.already_in_format);
    assert_eq!(
        outcome.success_message().as_deref(),
        Some("File is already in TXT format. Nothing was written.")
    );
    assert_eq!(fs::read(&input).unwrap(), b"already text\n");
}

#[test]
fn txt_to_txt_copies_uppercase_extension() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("Notes.TXT");
    fs::write(&input, b"copy me\n").unwrap();

    let output = converter().convert(&input, "txt").unwrap();
    assert_eq!(output, dir.path().join("Notes.txt"));
    assert_eq!(fs::read(&output).unwrap(), b"copy me\n");
    assert_eq!(fs::read(&input).unwrap(), b"copy me\n");
}

#[test]
fn unsupported_pairs_write_nothing() {
    let inputs = ["docx", "pdf", "xlsx", "csv", "pptx", "txt", "png"];
    let outputs = ["pdf", "docx", "xlsx", "csv", "txt"];
    let converter = converter();

    for input_ext in inputs {
        for output_ext in outputs {
            if converter.support_table().is_supported(input_ext, output_ext) {
                continue;
            }
            let dir = tempdir().unwrap();
            let input = dir.path().join(format!("file.{input_ext}"));
            fs::write(&input, b"placeholder").unwrap();

            let err = converter.convert(&input, output_ext).unwrap_err();
            assert_eq!(
                err,
                ConvertError::UnsupportedConversion {
                    input: input_ext.to_string(),
                    output: output_ext.to_string(),
                }
            );
            assert!(!dir.path().join(format!("file.{output_ext}")).exists());
        }
    }
}

#[test]
fn docx_to_text_with_turkish_label() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("report.docx");
    write_docx(&input, &["Quarterly report", "Revenue grew.", "Outlook is stable."]);

    let outcome = converter().run(&ConversionRequest::new(&input, "Metin"));
    assert!(outcome.succeeded(), "{:?}", outcome.error_message());

    let output = dir.path().join("report.txt");
    assert_eq!(outcome.output_path.as_deref(), Some(output.as_path()));
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "Quarterly report\nRevenue grew.\nOutlook is stable."
    );
}

#[test]
fn uppercase_txt_to_pdf() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.TXT");
    let lines: Vec<String> = (1..=40).map(|n| format!("line number {n}")).collect();
    fs::write(&input, lines.join("\n")).unwrap();

    let outcome = converter().run(&ConversionRequest::new(&input, "PDF"));
    assert!(outcome.succeeded(), "{:?}", outcome.error_message());

    let output = dir.path().join("notes.pdf");
    assert_eq!(outcome.output_path.as_deref(), Some(output.as_path()));
    let bytes = fs::read(&output).unwrap();
    assert!(bytes.starts_with(b"%PDF"));

    // 26 rows fit on a page.
    let pdf = Document::load(&output).unwrap();
    assert_eq!(pdf.get_pages().len(), 2);
}

#[test]
fn turkish_text_to_pdf_fails_naming_the_character() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("mektup.txt");
    fs::write(&input, "Merhaba\nTürkçe: şğıİ\n").unwrap();

    let outcome = converter().run(&ConversionRequest::new(&input, "PDF"));
    match outcome.error {
        Some(ConvertError::ConversionFailed { message }) => {
            assert!(message.contains("'ş'"), "{message}");
            assert!(message.contains("line 2"), "{message}");
        }
        other => panic!("expected a conversion failure, got {other:?}"),
    }
    assert!(!outcome.already_in_format);

    let names: Vec<_> = fs::read_dir(dir.path())
        .unwrap()
        .map(|entry| entry.unwrap().file_name())
        .collect();
    assert_eq!(names, vec![std::ffi::OsString::from("mektup.txt")]);
}

#[test]
fn latin1_text_to_pdf_succeeds() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("brief.txt");
    fs::write(&input, "Grüße aus Köln – “café” für 5 €\tdanke\n").unwrap();

    let output = converter().convert(&input, "pdf").unwrap();
    assert_eq!(output, dir.path().join("brief.pdf"));
    assert_eq!(Document::load(&output).unwrap().get_pages().len(), 1);
}

#[test]
fn csv_to_pdf_is_unsupported() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    fs::write(&input, "a,b\n1,2\n").unwrap();

    let outcome = converter().run(&ConversionRequest::new(&input, "PDF"));
    assert_eq!(
        outcome.error,
        Some(ConvertError::UnsupportedConversion {
            input: "csv".to_string(),
            output: "pdf".to_string(),
        })
    );
    assert!(!dir.path().join("data.pdf").exists());
}

#[test]
fn xlsx_csv_xlsx_keeps_values() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("book.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "name").unwrap();
    sheet.write_string(0, 1, "qty").unwrap();
    sheet.write_string(0, 2, "price").unwrap();
    sheet.write_string(1, 0, "apple").unwrap();
    sheet.write_number(1, 1, 3).unwrap();
    sheet.write_number(1, 2, 1.25).unwrap();
    sheet.write_string(2, 0, "pear, green").unwrap();
    sheet.write_number(2, 1, 10).unwrap();
    sheet.write_number(2, 2, 0.5).unwrap();
    workbook.save(&input).unwrap();

    let converter = converter();
    let csv_path = converter.convert(&input, "csv").unwrap();
    assert_eq!(csv_path, dir.path().join("book.csv"));
    let csv_text = fs::read_to_string(&csv_path).unwrap();
    assert_eq!(
        csv_text.lines().collect::<Vec<_>>(),
        vec!["name,qty,price", "apple,3,1.25", "\"pear, green\",10,0.5"]
    );

    fs::remove_file(&input).unwrap();
    let xlsx_path = converter.convert(&csv_path, "xlsx").unwrap();
    assert_eq!(xlsx_path, input);

    let mut reread = open_workbook_auto(&xlsx_path).unwrap();
    let range = reread.worksheet_range_at(0).unwrap().unwrap();
    let rows: Vec<Vec<Data>> = range.rows().map(<[Data]>::to_vec).collect();
    assert_eq!(
        rows,
        vec![
            vec![
                Data::String("name".into()),
                Data::String("qty".into()),
                Data::String("price".into()),
            ],
            vec![Data::String("apple".into()), Data::Float(3.0), Data::Float(1.25)],
            vec![
                Data::String("pear, green".into()),
                Data::Float(10.0),
                Data::Float(0.5),
            ],
        ]
    );
}

#[test]
fn txt_docx_txt_keeps_lines() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("story.txt");
    let content = "alpha\nbeta\n\ngamma";
    fs::write(&input, content).unwrap();

    let converter = converter();
    let docx = converter.convert(&input, "docx").unwrap();
    assert_eq!(docx, dir.path().join("story.docx"));

    fs::remove_file(&input).unwrap();
    let txt = converter.convert(&docx, "txt").unwrap();
    assert_eq!(fs::read_to_string(txt).unwrap(), content);
}

#[test]
fn pdf_to_txt_extracts_page_text() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("hello.pdf");
    write_hello_pdf(&input);

    let output = converter().convert(&input, "txt").unwrap();
    assert!(fs::read_to_string(output).unwrap().contains("Hello World!"));
}

#[test]
fn corrupt_pdf_fails_without_output() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("broken.pdf");
    fs::write(&input, b"this is not a pdf").unwrap();

    let err = converter().convert(&input, "txt").unwrap_err();
    assert!(matches!(err, ConvertError::ConversionFailed { .. }), "{err:?}");
    assert!(!dir.path().join("broken.txt").exists());
}

#[test]
fn invalid_utf8_text_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("latin1.txt");
    fs::write(&input, [0x66, 0x6f, 0xff, 0xfe]).unwrap();

    let err = converter().convert(&input, "pdf").unwrap_err();
    assert!(matches!(err, ConvertError::ConversionFailed { .. }), "{err:?}");
    assert!(!dir.path().join("latin1.pdf").exists());
}

#[test]
fn invalid_label_is_reported() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("notes.txt");
    fs::write(&input, "hi").unwrap();

    let outcome = converter().run(&ConversionRequest::new(&input, "Select..."));
    assert_eq!(outcome.output_path, None);
    assert_eq!(
        outcome.error,
        Some(ConvertError::InvalidFormatSelection {
            label: "Select...".to_string(),
        })
    );
}

#[test]
fn table_without_routine_is_unimplemented() {
    const INCONSISTENT: SupportTable = SupportTable::new(&[("csv", &["pdf"])]);

    let dir = tempdir().unwrap();
    let input = dir.path().join("data.csv");
    fs::write(&input, "a,b\n").unwrap();

    let err = converter()
        .with_support_table(INCONSISTENT)
        .convert(&input, "pdf")
        .unwrap_err();
    assert_eq!(
        err,
        ConvertError::UnimplementedConversion {
            input: "csv".to_string(),
            output: "pdf".to_string(),
        }
    );
}

#[test]
fn missing_office_suite_fails_docx_to_pdf() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("report.docx");
    write_docx(&input, &["Hello"]);

    let err = converter().convert(&input, "pdf").unwrap_err();
    match err {
        ConvertError::ConversionFailed { message } => assert!(message.contains("LibreOffice"), "{message}"),
        other => panic!("unexpected: {other:?}"),
    }
    assert!(!dir.path().join("report.pdf").exists());
}

#[test]
fn unavailable_presentation_export_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("deck.pptx");
    fs::write(&input, b"PK").unwrap();

    let outcome = converter().run(&ConversionRequest::new(&input, "PDF"));
    match outcome.error {
        Some(ConvertError::ConversionFailed { message }) => {
            assert!(message.contains("unavailable"), "{message}");
        }
        other => panic!("unexpected: {other:?}"),
    }
    assert!(!dir.path().join("deck.pdf").exists());
}

#[test]
fn missing_input_fails() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("missing.txt");

    let err = converter().convert(&input, "pdf").unwrap_err();
    assert!(matches!(err, ConvertError::ConversionFailed { .. }), "{err:?}");
}

#[test]
fn output_lands_next_to_nested_input() {
    let dir = tempdir().unwrap();
    let nested = dir.path().join("A").join("b").join("C");
    fs::create_dir_all(&nested).unwrap();
    let input = nested.join("Mixed.Case.TXT");
    fs::write(&input, "deep").unwrap();

    let output = converter().convert(&input, "docx").unwrap();
    assert_eq!(output, nested.join("Mixed.Case.docx"));
    assert!(output.is_file());
}
