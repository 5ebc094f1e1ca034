// src/parser/mod.rs

mod header;
mod quantity;
mod vocab;

use serde::Serialize;
use tracing::{debug, info, warn};

pub use vocab::SizeVocabulary;

/// Tuning knobs for the table scan.
///
/// Both defaults were calibrated against sample invoices from the one
/// supplier this layout belongs to. If a new document format breaks them,
/// flag it to the product owners instead of quietly widening the numbers.
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// How many lines below a product header are searched for its
    /// quantity line.
    pub lookahead_lines: usize,
    /// Integers above this are taken to be the row total rather than a
    /// per-size count.
    pub total_cutoff: u32,
}

impl Default for ParserOptions {
    fn default() -> Self {
        Self {
            lookahead_lines: 5,
            total_cutoff: 20,
        }
    }
}

/// One size column of a parsed product. Quantity is positive by
/// construction; dash and zero columns never make it this far.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SizeQuantity {
    pub size: &'static str,
    pub quantity: u32,
}

/// A fully parsed product block: header fields, per-size counts in column
/// order, and the unit price from the quantity line.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParsedProduct {
    pub article: String,
    pub color_code: String,
    pub description: String,
    pub sizes: Vec<SizeQuantity>,
    pub price: f64,
}

/// Splits raw document text into trimmed, non-empty lines.
pub fn normalize_lines(text: &str) -> Vec<String> {
    text.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Scans normalized lines for size-column headers and product rows.
///
/// The scan carries exactly two pieces of state: the line index and the
/// active size vocabulary. The vocabulary is owned by this invocation, so
/// repeated or concurrent parses cannot leak into each other. There is no
/// backtracking: a consumed header line is never revisited, whether or not
/// a quantity line turned up for it.
pub fn parse_lines(lines: &[String], opts: &ParserOptions) -> Vec<ParsedProduct> {
    let mut products = Vec::new();
    let mut active_vocab: Option<SizeVocabulary> = None;

    for (i, line) in lines.iter().enumerate() {
        if let Some(vocab) = vocab::detect_size_vocabulary(line) {
            debug!(line = i, columns = vocab.len(), "Size column header recognized");
            active_vocab = Some(vocab);
            continue;
        }

        let Some(product) = header::match_product_header(line) else {
            continue;
        };

        let Some(vocab) = active_vocab else {
            warn!(
                line = i,
                article = %product.article,
                "Product header before any size column header - skipping"
            );
            continue;
        };

        let Some(row) = quantity::find_quantity_line(lines, i, opts.lookahead_lines) else {
            warn!(
                line = i,
                article = %product.article,
                "No quantity line within lookahead window - skipping"
            );
            continue;
        };

        let sizes = quantity::tokenize_quantities(&row.tokens, vocab, opts.total_cutoff);
        if sizes.is_empty() {
            warn!(
                line = i,
                article = %product.article,
                "No valid quantities found - skipping"
            );
            continue;
        }

        info!(
            article = %product.article,
            color = %product.color_code,
            sizes = sizes.len(),
            unit_price = row.unit_price,
            "Parsed product"
        );
        products.push(ParsedProduct {
            article: product.article,
            color_code: product.color_code,
            description: product.description,
            sizes: sizes
                .into_iter()
                .map(|(size, quantity)| SizeQuantity { size, quantity })
                .collect(),
            price: row.unit_price,
        });
    }

    products
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lines(raw: &[&str]) -> Vec<String> {
        raw.iter().map(|l| l.to_string()).collect()
    }

    const SAMPLE: &[&str] = &[
        "3M 6M 9M 12M 18M 24M 36M",
        "1AR11002 P6179 RIB LS T-SHIRT - 100% OGCO",
        "6110 20 91 - (24M - 36M)",
        "1 1 1 1 1 1 6 12.3900 74.340a)",
    ];

    #[test]
    fn sample_block_parses_to_one_product() {
        let products = parse_lines(&lines(SAMPLE), &ParserOptions::default());
        assert_eq!(products.len(), 1);

        let p = &products[0];
        assert_eq!(p.article, "1AR11002");
        assert_eq!(p.color_code, "P6179");
        assert_eq!(p.description, "RIB LS T-SHIRT");
        assert_eq!(p.price, 12.39);
        let expected: Vec<SizeQuantity> = ["3M", "6M", "9M", "12M", "18M", "24M"]
            .iter()
            .map(|&size| SizeQuantity { size, quantity: 1 })
            .collect();
        assert_eq!(p.sizes, expected);
    }

    #[test]
    fn parsing_is_idempotent() {
        let doc = lines(SAMPLE);
        let opts = ParserOptions::default();
        assert_eq!(parse_lines(&doc, &opts), parse_lines(&doc, &opts));
    }

    #[test]
    fn nearest_preceding_vocabulary_wins() {
        let doc = lines(&[
            "3M 6M 9M 12M 18M 24M 36M",
            "3Y 4Y 5Y 6Y 8Y 10Y 12Y 14Y",
            "1AR11002 P6179 RIB LS T-SHIRT",
            "2 1 - 3 10.0000 30.00",
        ]);
        let products = parse_lines(&doc, &ParserOptions::default());
        assert_eq!(products.len(), 1);
        // Year labels, not months: the later header replaced the earlier one.
        assert_eq!(
            products[0].sizes,
            vec![
                SizeQuantity { size: "3Y", quantity: 2 },
                SizeQuantity { size: "4Y", quantity: 1 },
            ]
        );
    }

    #[test]
    fn product_before_any_header_is_skipped() {
        let doc = lines(&[
            "1AR11002 P6179 RIB LS T-SHIRT",
            "1 1 1 1 1 1 6 12.3900 74.34",
        ]);
        assert!(parse_lines(&doc, &ParserOptions::default()).is_empty());
    }

    #[test]
    fn header_without_quantity_line_does_not_derail_later_products() {
        let doc = lines(&[
            "3M 6M 9M 12M 18M 24M 36M",
            "1AR11002 P6179 RIB LS T-SHIRT",
            "noise", "noise", "noise", "noise", "noise",
            "1BR22003 Q7180 SWEATSHIRT",
            "2 2 4 15.0000 60.00",
        ]);
        let products = parse_lines(&doc, &ParserOptions::default());
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].article, "1BR22003");
    }

    #[test]
    fn all_dash_quantity_line_discards_the_product() {
        let doc = lines(&[
            "3M 6M 9M 12M 18M 24M 36M",
            "1AR11002 P6179 RIB LS T-SHIRT",
            "- - - - - - 0 12.3900 0.00",
        ]);
        assert!(parse_lines(&doc, &ParserOptions::default()).is_empty());
    }

    #[test]
    fn emitted_quantities_are_always_positive() {
        let doc = lines(&[
            "3M 6M 9M 12M 18M 24M 36M",
            "1AR11002 P6179 RIB LS T-SHIRT",
            "3 - 0 2 - 1 6 12.3900 74.34",
            "1BR22003 Q7180 SWEATSHIRT",
            "- 4 - - 4 15.0000 60.00",
        ]);
        for product in parse_lines(&doc, &ParserOptions::default()) {
            assert!(!product.sizes.is_empty());
            for sq in &product.sizes {
                assert!(sq.quantity > 0);
            }
        }
    }

    #[test]
    fn normalize_drops_blank_lines_and_trims() {
        let doc = normalize_lines("  a  \n\n\t\nb\r\n  ");
        assert_eq!(doc, vec!["a".to_string(), "b".to_string()]);
    }
}
