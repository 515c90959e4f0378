//! File ingestion: decode uploaded bytes into UTF-8 text.
//!
//! Dispatch is by lowercase file extension. Plain-text extensions decode
//! as-is, `pdf` and `docx` route to binary decoders, everything else is
//! rejected. Decoded content longer than [`MAX_CONTENT_CHARS`] characters
//! is truncated and annotated with a visible marker; truncation always
//! happens after the decoder has run, never inside it.

use std::io::Read;

use thiserror::Error;

/// Maximum decoded content length, in characters.
pub const MAX_CONTENT_CHARS: usize = 50_000;

/// Marker appended to truncated content. Part of the observable contract:
/// the model sees it.
pub const TRUNCATION_MARKER: &str = "\n\n[Content truncated due to size...]";

/// Extensions decoded as plain UTF-8 text.
const TEXT_EXTENSIONS: &[&str] = &[
    "txt", "md", "json", "csv", "js", "jsx", "ts", "tsx", "py", "java", "cpp", "c", "html",
    "css", "xml", "yml", "yaml",
];

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("Unsupported file type. Please upload text, PDF, or DOCX files only.")]
    UnsupportedType,

    #[error("Failed to decode file: {0}")]
    Decode(String),
}

/// Decode a file's bytes into text, dispatching on the file extension.
pub fn extract_text(bytes: &[u8], file_name: &str) -> Result<String, IngestError> {
    let extension = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    let content = if TEXT_EXTENSIONS.contains(&extension.as_str()) {
        String::from_utf8_lossy(bytes).into_owned()
    } else if extension == "pdf" {
        pdf_to_text(bytes)?
    } else if extension == "docx" {
        docx_to_text(bytes)?
    } else {
        return Err(IngestError::UnsupportedType);
    };

    Ok(truncate_with_marker(content))
}

/// Cut content at [`MAX_CONTENT_CHARS`] characters and append the marker.
fn truncate_with_marker(content: String) -> String {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((byte_idx, _)) => {
            let mut truncated = content[..byte_idx].to_string();
            truncated.push_str(TRUNCATION_MARKER);
            truncated
        }
        None => content,
    }
}

/// Extract text from PDF bytes via the Tj/TJ show-text operators.
fn pdf_to_text(bytes: &[u8]) -> Result<String, IngestError> {
    let doc = lopdf::Document::load_mem(bytes)
        .map_err(|e| IngestError::Decode(format!("invalid PDF: {}", e)))?;

    let mut out = String::new();
    for page_id in doc.get_pages().values() {
        let page = doc
            .get_page_content(*page_id)
            .map_err(|e| IngestError::Decode(format!("unreadable PDF page: {}", e)))?;
        let content = lopdf::content::Content::decode(&page)
            .map_err(|e| IngestError::Decode(format!("unreadable PDF content: {}", e)))?;

        for operation in content.operations {
            if operation.operator == "Tj" || operation.operator == "TJ" {
                for operand in &operation.operands {
                    push_pdf_text(operand, &mut out);
                }
                out.push('\n');
            }
        }
    }

    Ok(out)
}

fn push_pdf_text(object: &lopdf::Object, out: &mut String) {
    match object {
        lopdf::Object::String(bytes, _) => {
            if let Ok(text) = std::str::from_utf8(bytes) {
                out.push_str(text);
            }
        }
        // TJ operands are arrays of strings interleaved with kerning numbers.
        lopdf::Object::Array(items) => {
            for item in items {
                push_pdf_text(item, out);
            }
        }
        _ => {}
    }
}

/// Extract text from DOCX bytes: a zip archive whose main document part is
/// `word/document.xml`.
fn docx_to_text(bytes: &[u8]) -> Result<String, IngestError> {
    let cursor = std::io::Cursor::new(bytes);
    let mut archive = zip::ZipArchive::new(cursor)
        .map_err(|e| IngestError::Decode(format!("invalid DOCX archive: {}", e)))?;

    let mut entry = archive
        .by_name("word/document.xml")
        .map_err(|e| IngestError::Decode(format!("missing document part: {}", e)))?;

    let mut xml = String::new();
    entry
        .read_to_string(&mut xml)
        .map_err(|e| IngestError::Decode(format!("unreadable document part: {}", e)))?;

    Ok(xml_to_text(&xml))
}

/// Strip XML markup, keeping paragraph breaks.
fn xml_to_text(xml: &str) -> String {
    // Paragraph ends become newlines before the tags are dropped.
    let xml = xml.replace("</w:p>", "\n");

    let mut text = String::new();
    let mut in_tag = false;
    for c in xml.chars() {
        match c {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => text.push(c),
            _ => {}
        }
    }

    xml_decode(text.trim_end())
}

/// Basic XML entity decoding.
fn xml_decode(s: &str) -> String {
    s.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&apos;", "'")
}
