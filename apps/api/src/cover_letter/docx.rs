//! Docx templating — placeholder substitution inside the template package.
//!
//! A .docx file is a zip archive; the letter text lives in
//! `word/document.xml`. We rewrite that one entry and copy every other
//! entry through untouched, so styles, fonts, and headers survive exactly
//! as designed in the template.

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use anyhow::{Context, Result};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipArchive, ZipWriter};

const DOCUMENT_ENTRY: &str = "word/document.xml";

/// Placeholder markers expected in the template document.
pub const PLACEHOLDER_DATE: &str = "{{DATE}}";
pub const PLACEHOLDER_COMPANY: &str = "{{COMPANY_NAME}}";
pub const PLACEHOLDER_ROLE: &str = "{{ROLE_TITLE}}";
pub const PLACEHOLDER_WHY: &str = "{{WHY_COMPANY_PARAGRAPH}}";

/// Values substituted into the template. Already formatted for display;
/// XML escaping happens here.
#[derive(Debug)]
pub struct LetterSubstitutions<'a> {
    pub date: &'a str,
    pub company_line: &'a str,
    pub role_line: &'a str,
    pub why_paragraph: &'a str,
}

/// Renders the template docx to `output`, replacing the placeholders in
/// `word/document.xml` and copying all other zip entries byte-for-byte.
pub fn render_template(
    template: &Path,
    output: &Path,
    subs: &LetterSubstitutions<'_>,
) -> Result<()> {
    let template_file = File::open(template)
        .with_context(|| format!("Cover letter template not found: {}", template.display()))?;
    let mut archive = ZipArchive::new(BufReader::new(template_file))
        .with_context(|| format!("Template is not a valid docx: {}", template.display()))?;

    if let Some(parent) = output.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let output_file = File::create(output)
        .with_context(|| format!("Cannot create cover letter at {}", output.display()))?;
    let mut writer = ZipWriter::new(BufWriter::new(output_file));

    for i in 0..archive.len() {
        let mut entry = archive.by_index(i)?;
        if entry.name() == DOCUMENT_ENTRY {
            let mut xml = String::new();
            entry.read_to_string(&mut xml)?;
            let rendered = apply_substitutions(&xml, subs);
            writer.start_file(
                DOCUMENT_ENTRY,
                FileOptions::default().compression_method(CompressionMethod::Deflated),
            )?;
            writer.write_all(rendered.as_bytes())?;
        } else {
            writer.raw_copy_file(entry)?;
        }
    }

    writer.finish()?;
    Ok(())
}

fn apply_substitutions(xml: &str, subs: &LetterSubstitutions<'_>) -> String {
    xml.replace(PLACEHOLDER_DATE, &xml_escape(subs.date))
        .replace(PLACEHOLDER_COMPANY, &xml_escape(subs.company_line))
        .replace(PLACEHOLDER_ROLE, &xml_escape(subs.role_line))
        .replace(PLACEHOLDER_WHY, &xml_escape(subs.why_paragraph))
}

/// Substituted text lands inside XML text nodes; raw `&`, `<`, `>` would
/// corrupt the document.
fn xml_escape(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}

/// Keeps word characters, spaces, and dashes, then turns spaces into `_`
/// so company and role names become safe path components.
pub fn sanitize_component(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || *c == '-' || c.is_whitespace())
        .collect::<String>()
        .trim()
        .replace(char::is_whitespace, "_")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn write_template(path: &Path, document_xml: &str) {
        let file = File::create(path).unwrap();
        let mut writer = ZipWriter::new(file);
        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        writer.start_file("[Content_Types].xml", options).unwrap();
        writer.write_all(b"<Types/>").unwrap();
        writer.start_file(DOCUMENT_ENTRY, options).unwrap();
        writer.write_all(document_xml.as_bytes()).unwrap();
        writer.finish().unwrap();
    }

    fn read_entry(path: &Path, name: &str) -> String {
        let mut archive = ZipArchive::new(File::open(path).unwrap()).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut out = String::new();
        entry.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn test_placeholders_are_replaced_in_document_xml() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("template.docx");
        let output = dir.path().join("out.docx");
        write_template(
            &template,
            "<w:t>{{DATE}}</w:t><w:t>{{COMPANY_NAME}}</w:t>\
             <w:t>{{ROLE_TITLE}}</w:t><w:t>{{WHY_COMPANY_PARAGRAPH}}</w:t>",
        );

        render_template(
            &template,
            &output,
            &LetterSubstitutions {
                date: "August 06, 2026",
                company_line: "Acme hiring team",
                role_line: "Platform Engineer role at Acme",
                why_paragraph: "Because Acme ships.",
            },
        )
        .unwrap();

        let xml = read_entry(&output, DOCUMENT_ENTRY);
        assert!(xml.contains("August 06, 2026"));
        assert!(xml.contains("Acme hiring team"));
        assert!(xml.contains("Because Acme ships."));
        assert!(!xml.contains("{{"));
    }

    #[test]
    fn test_other_entries_are_preserved() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("template.docx");
        let output = dir.path().join("out.docx");
        write_template(&template, "<w:t>{{DATE}}</w:t>");

        render_template(
            &template,
            &output,
            &LetterSubstitutions {
                date: "today",
                company_line: "c",
                role_line: "r",
                why_paragraph: "w",
            },
        )
        .unwrap();

        assert_eq!(read_entry(&output, "[Content_Types].xml"), "<Types/>");
    }

    #[test]
    fn test_substituted_text_is_xml_escaped() {
        let escaped = xml_escape("Research & Development <Platform>");
        assert_eq!(escaped, "Research &amp; Development &lt;Platform&gt;");
    }

    #[test]
    fn test_missing_template_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = render_template(
            &dir.path().join("missing.docx"),
            &dir.path().join("out.docx"),
            &LetterSubstitutions {
                date: "d",
                company_line: "c",
                role_line: "r",
                why_paragraph: "w",
            },
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_sanitize_component() {
        assert_eq!(sanitize_component("Acme, Inc."), "Acme_Inc");
        assert_eq!(sanitize_component("Platform Engineer"), "Platform_Engineer");
        assert_eq!(sanitize_component("C++ / Rust Dev"), "C__Rust_Dev");
    }
}
