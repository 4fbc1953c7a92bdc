// conversion/text.rs
use crate::conversion::{staging, Written};
use crate::error::Error;
use docx_rs::{BreakType, Docx, Paragraph, Run};
use quick_xml::events::Event;
use quick_xml::Reader;
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::Path;
use zip::ZipArchive;

const DOCUMENT_PART: &str = "word/document.xml";

/// Byte-for-byte copy. Copying a file onto itself leaves it untouched and reports
/// [`Written::AlreadyInFormat`].
pub fn copy_file(input: &Path, output: &Path) -> Result<Written, Error> {
    if is_same_file(input, output)? {
        tracing::info!(path = %input.display(), "file is already in the requested format");
        return Ok(Written::AlreadyInFormat);
    }
    fs::copy(input, output)?;
    Ok(Written::Created)
}

fn is_same_file(a: &Path, b: &Path) -> Result<bool, Error> {
    if !b.exists() {
        return Ok(false);
    }

    #[cfg(unix)]
    {
        use std::os::unix::fs::MetadataExt;
        let (ma, mb) = (fs::metadata(a)?, fs::metadata(b)?);
        Ok(ma.dev() == mb.dev() && ma.ino() == mb.ino())
    }

    #[cfg(not(unix))]
    {
        Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
    }
}

pub fn docx_to_txt(input: &Path, output: &Path) -> Result<(), Error> {
    let paragraphs = read_docx_paragraphs(input)?;
    staging::write_staged(output, |file| {
        file.write_all(paragraphs.join("\n").as_bytes())?;
        Ok(())
    })
}

pub fn txt_to_docx(input: &Path, output: &Path) -> Result<(), Error> {
    let content = fs::read_to_string(input)?.replace("\r\n", "\n");

    let mut run = Run::new();
    for (index, line) in content.split('\n').enumerate() {
        if index > 0 {
            run = run.add_break(BreakType::TextWrapping);
        }
        if !line.is_empty() {
            run = run.add_text(line);
        }
    }

    let docx = Docx::new().add_paragraph(Paragraph::new().add_run(run));
    staging::write_staged(output, |file| {
        docx.build()
            .pack(file)
            .map_err(|e| Error::DocxAuthoring(e.to_string()))?;
        Ok(())
    })
}

/// Text of the body-level paragraphs of a DOCX package, in document order.
pub fn read_docx_paragraphs(path: &Path) -> Result<Vec<String>, Error> {
    let mut archive = ZipArchive::new(File::open(path)?)?;
    let mut xml = String::new();
    archive.by_name(DOCUMENT_PART)?.read_to_string(&mut xml)?;
    paragraphs_from_xml(&xml)
}

/// Walks `word/document.xml`. Only `w:p` elements that are direct children of `w:body`
/// count; tables, text boxes and drawings are skipped.
fn paragraphs_from_xml(xml: &str) -> Result<Vec<String>, Error> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut buf = Vec::new();
    let mut stack: Vec<Vec<u8>> = Vec::new();
    let mut paragraphs = Vec::new();
    let mut current: Option<String> = None;
    let mut skipped_depth = 0usize;
    let mut run_depth = 0usize;
    let mut in_text = false;

    loop {
        match reader.read_event_into(&mut buf)? {
            Event::Start(e) => {
                let name = e.local_name().as_ref().to_vec();
                match name.as_slice() {
                    b"p" if parent_is_body(&stack) => current = Some(String::new()),
                    b"txbxContent" | b"drawing" | b"pict" | b"tbl" => skipped_depth += 1,
                    b"r" => run_depth += 1,
                    b"t" => in_text = true,
                    _ => {}
                }
                stack.push(name);
            }
            Event::Empty(e) => {
                let collecting = skipped_depth == 0 && run_depth > 0;
                match e.local_name().as_ref() {
                    b"p" if parent_is_body(&stack) => paragraphs.push(String::new()),
                    b"tab" if collecting => push_text(&mut current, "\t"),
                    b"br" | b"cr" if collecting => push_text(&mut current, "\n"),
                    _ => {}
                }
            }
            Event::Text(t) => {
                if in_text && skipped_depth == 0 {
                    push_text(&mut current, &t.unescape()?);
                }
            }
            Event::End(e) => {
                stack.pop();
                match e.local_name().as_ref() {
                    b"p" if parent_is_body(&stack) => {
                        if let Some(paragraph) = current.take() {
                            paragraphs.push(paragraph);
                        }
                    }
                    b"txbxContent" | b"drawing" | b"pict" | b"tbl" => {
                        skipped_depth = skipped_depth.saturating_sub(1);
                    }
                    b"r" => run_depth = run_depth.saturating_sub(1),
                    b"t" => in_text = false,
                    _ => {}
                }
            }
            Event::Eof => break,
            _ => {}
        }
        buf.clear();
    }

    Ok(paragraphs)
}

fn parent_is_body(stack: &[Vec<u8>]) -> bool {
    stack.last().map_or(false, |name| name.as_slice() == b"body")
}

fn push_text(current: &mut Option<String>, text: &str) {
    if let Some(paragraph) = current.as_mut() {
        paragraph.push_str(text);
    }
}
