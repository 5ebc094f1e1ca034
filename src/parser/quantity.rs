// src/parser/quantity.rs

use once_cell::sync::Lazy;
use regex::Regex;
use tracing::debug;

use super::vocab::SizeVocabulary;

/// A located quantity line: its whitespace tokens plus the unit price
/// pulled from the price column. Consumed immediately by the tokenizer.
#[derive(Debug)]
pub struct QuantityRow {
    pub tokens: Vec<String>,
    pub unit_price: f64,
}

// Shape of a quantity line: a run of per-size counts (integer or dash),
// the row total, a unit price with 2-4 fraction digits, and a line total
// with exactly 2 fraction digits. Decimal comma and dot both occur in the
// source documents.
static QUANTITY_LINE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:(?:\d+|-)\s+)+\d+\s+(\d+[.,]\d{2,4})\s+\d+[.,]\d{2}").unwrap()
});

// A token carrying exactly 4 fraction digits is the unit-price column.
static PRICE_TOKEN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+[.,]\d{4}$").unwrap());

/// Searches the lines below a product header for its quantity line.
///
/// The window is `lookahead` lines and deliberately small: in the source
/// layout the quantity line sits within a couple of lines of its header,
/// and a wider net starts swallowing the next product's numbers. A
/// quantity line further away is never found.
pub fn find_quantity_line(
    lines: &[String],
    header_idx: usize,
    lookahead: usize,
) -> Option<QuantityRow> {
    for offset in 1..=lookahead {
        let Some(line) = lines.get(header_idx + offset) else {
            break;
        };
        let Some(caps) = QUANTITY_LINE_RE.captures(line) else {
            continue;
        };
        let unit_price: f64 = caps[1].replace(',', ".").parse().ok()?;
        debug!(offset, unit_price, "Quantity line located");
        return Some(QuantityRow {
            tokens: line.split_whitespace().map(str::to_string).collect(),
            unit_price,
        });
    }
    None
}

/// Maps the quantity line's positional tokens onto the active size columns.
///
/// Walks tokens left to right collecting 1-2 digit integers and literal
/// dashes, stopping at the first price-shaped token or at any integer above
/// `total_cutoff` (per-size counts in this domain never exceed it, so a
/// larger integer is the row total). The last collected token is the
/// "Total" column and is dropped; the rest zip positionally against the
/// vocabulary. A dash is the supplier's explicit no-stock marker: like a
/// zero it produces no entry, but it must parse without complaint.
pub fn tokenize_quantities(
    tokens: &[String],
    vocabulary: SizeVocabulary,
    total_cutoff: u32,
) -> Vec<(&'static str, u32)> {
    let mut candidates: Vec<&str> = Vec::new();
    for token in tokens {
        if PRICE_TOKEN_RE.is_match(token) {
            break;
        }
        if let Ok(n) = token.parse::<u32>() {
            if n > total_cutoff {
                break;
            }
            if token.len() <= 2 {
                candidates.push(token);
            }
            continue;
        }
        if token == "-" {
            candidates.push(token);
        }
    }

    // Trailing candidate is the row total, not a size count.
    candidates.pop();

    let mut sizes = Vec::new();
    for (token, label) in candidates.iter().zip(vocabulary) {
        let Ok(quantity) = token.parse::<u32>() else {
            continue; // dash
        };
        if quantity > 0 {
            sizes.push((*label, quantity));
        }
    }
    sizes
}
