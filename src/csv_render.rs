// src/csv_render.rs

use serde::Serialize;

use crate::parser::ParsedProduct;

/// How size labels are written in the rendered rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SizeStyle {
    /// Labels exactly as they appear in the source table ("3M", "6Y", "XL").
    #[default]
    Raw,
    /// Month/year labels spelled out in Dutch ("3 maand", "6 jaar").
    /// Letter sizes pass through unchanged.
    Dutch,
}

pub const CSV_HEADER: &str = "Article,Color,Description,Size,Quantity,Price";

/// One flattened (product, size) pair, ready for rendering or export.
#[derive(Debug, Clone, Serialize)]
pub struct OutputRow {
    pub article: String,
    pub color_code: String,
    pub description: String,
    pub size: String,
    pub quantity: u32,
    pub price: f64,
}

/// Flattens parsed products into one row per size column.
///
/// Quantities are positive by construction upstream, so every row here
/// is a real stock line.
pub fn flatten(products: &[ParsedProduct], style: SizeStyle) -> Vec<OutputRow> {
    let mut rows = Vec::new();
    for product in products {
        for sq in &product.sizes {
            rows.push(OutputRow {
                article: product.article.clone(),
                color_code: product.color_code.clone(),
                description: product.description.clone(),
                size: size_label(sq.size, style),
                quantity: sq.quantity,
                price: product.price,
            });
        }
    }
    rows
}

/// Renders products as delimited text: a fixed header row, then one line
/// per (product, size) pair. The description is always double-quoted and
/// the price carries exactly two decimals.
pub fn render_csv(products: &[ParsedProduct], style: SizeStyle) -> String {
    let mut out = String::from(CSV_HEADER);
    out.push('\n');
    for row in flatten(products, style) {
        out.push_str(&format!(
            "{},{},\"{}\",{},{},{:.2}\n",
            row.article,
            row.color_code,
            row.description.replace('"', "\"\""),
            row.size,
            row.quantity,
            row.price,
        ));
    }
    out
}

/// Presentation-only mapping of a size label. `3M` becomes `3 maand`,
/// `6Y` becomes `6 jaar`; anything else (letter sizes) is untouched.
fn size_label(label: &str, style: SizeStyle) -> String {
    if style == SizeStyle::Raw {
        return label.to_string();
    }
    if let Some(n) = numeric_prefix(label, 'M') {
        return format!("{n} maand");
    }
    if let Some(n) = numeric_prefix(label, 'Y') {
        return format!("{n} jaar");
    }
    label.to_string()
}

fn numeric_prefix(label: &str, suffix: char) -> Option<&str> {
    let n = label.strip_suffix(suffix)?;
    if !n.is_empty() && n.bytes().all(|b| b.is_ascii_digit()) {
        Some(n)
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::SizeQuantity;

    fn sample_product() -> ParsedProduct {
        ParsedProduct {
            article: "1AR11002".to_string(),
            color_code: "P6179".to_string(),
            description: "RIB LS T-SHIRT".to_string(),
            sizes: ["3M", "6M", "9M", "12M", "18M", "24M"]
                .iter()
                .map(|&size| SizeQuantity { size, quantity: 1 })
                .collect(),
            price: 12.39,
        }
    }

    #[test]
    fn csv_header_and_first_row_have_the_expected_shape() {
        let csv = render_csv(&[sample_product()], SizeStyle::Raw);
        let mut lines = csv.lines();
        assert_eq!(lines.next(), Some("Article,Color,Description,Size,Quantity,Price"));
        assert_eq!(lines.next(), Some(r#"1AR11002,P6179,"RIB LS T-SHIRT",3M,1,12.39"#));
        // One line per size column plus the header.
        assert_eq!(csv.lines().count(), 7);
    }

    #[test]
    fn dutch_style_localizes_month_and_year_labels() {
        assert_eq!(size_label("3M", SizeStyle::Dutch), "3 maand");
        assert_eq!(size_label("6Y", SizeStyle::Dutch), "6 jaar");
        assert_eq!(size_label("XL", SizeStyle::Dutch), "XL");
        assert_eq!(size_label("M", SizeStyle::Dutch), "M");
        assert_eq!(size_label("3M", SizeStyle::Raw), "3M");
    }

    #[test]
    fn dutch_style_applies_per_rendered_row() {
        let csv = render_csv(&[sample_product()], SizeStyle::Dutch);
        assert!(csv.contains(r#""RIB LS T-SHIRT",3 maand,1,12.39"#));
    }

    #[test]
    fn embedded_quotes_in_descriptions_are_doubled() {
        let mut product = sample_product();
        product.description = r#"TEE "CLASSIC""#.to_string();
        let csv = render_csv(&[product], SizeStyle::Raw);
        assert!(csv.contains(r#""TEE ""CLASSIC""","#));
    }

    #[test]
    fn price_is_padded_to_two_decimals() {
        let mut product = sample_product();
        product.price = 14.5;
        let csv = render_csv(&[product], SizeStyle::Raw);
        assert!(csv.contains(",14.50\n"));
    }

    #[test]
    fn empty_product_list_renders_header_only() {
        assert_eq!(render_csv(&[], SizeStyle::Raw), format!("{CSV_HEADER}\n"));
    }
}
