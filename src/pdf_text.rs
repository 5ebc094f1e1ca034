// src/pdf_text.rs

use lopdf::Document;
use tracing::info;

/// Minimum number of non-whitespace characters we expect from a "real"
/// text PDF. Below this threshold the document is treated as scanned.
const MIN_TEXT_CHARS: usize = 30;

/// Pulls the text layer out of an invoice PDF.
///
/// Extraction failure is fatal for the whole import: an unparseable,
/// scanned or effectively empty document yields a single descriptive
/// error and no partial output.
pub fn extract_text(pdf_bytes: &[u8]) -> Result<String, Box<dyn std::error::Error>> {
    // Structural check first: a scanned document often still "extracts",
    // just into garbage or nothing.
    let doc = Document::load_mem(pdf_bytes).map_err(|e| format!("failed to parse PDF: {e}"))?;
    if looks_like_scanned(&doc) {
        return Err("PDF is scanned/image-only - no text layer to extract".into());
    }

    let text = pdf_extract::extract_text_from_mem(pdf_bytes)
        .map_err(|e| format!("text extraction failed: {e}"))?;

    let meaningful = text.chars().filter(|c| !c.is_whitespace()).count();
    if meaningful < MIN_TEXT_CHARS {
        return Err(format!(
            "extracted only {meaningful} non-whitespace characters - document is likely scanned"
        )
        .into());
    }

    info!(chars = meaningful, "Text extracted successfully");
    Ok(text)
}

/// Heuristic: inspect the page tree for signs that pages are just images
/// with no text operators. A page whose resources carry XObject images but
/// no Font entries is almost certainly a scan.
fn looks_like_scanned(doc: &Document) -> bool {
    let pages = doc.get_pages();
    if pages.is_empty() {
        return false; // can't tell - let text extraction try
    }

    let image_only = pages
        .values()
        .filter(|&&object_id| {
            let Ok(page) = doc.get_object(object_id).and_then(|o| o.as_dict()) else {
                return false;
            };
            page_has_resource(doc, page, b"XObject") && !page_has_resource(doc, page, b"Font")
        })
        .count();

    let total = pages.len();
    let ratio = image_only as f64 / total as f64;
    info!(
        total_pages = total,
        image_only,
        ratio = format!("{ratio:.2}"),
        "Scanned-page analysis"
    );

    // If most pages are image-only, treat the whole PDF as scanned.
    ratio >= 0.8
}

fn page_has_resource(doc: &Document, page: &lopdf::Dictionary, key: &[u8]) -> bool {
    page.get(b"Resources")
        .ok()
        .and_then(|r| doc.dereference(r).ok())
        .and_then(|(_, resolved)| resolved.as_dict().ok())
        .and_then(|res| res.get(key).ok())
        .and_then(|entry| doc.dereference(entry).ok())
        .and_then(|(_, resolved)| resolved.as_dict().ok())
        .is_some_and(|dict| !dict.is_empty())
}
