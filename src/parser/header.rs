// src/parser/header.rs

use once_cell::sync::Lazy;
use regex::Regex;

/// The article/color/description triple announced by a product header line.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductHeader {
    pub article: String,
    pub color_code: String,
    pub description: String,
}

// Article codes are digit-first alphanumerics of at least 7 characters,
// color codes alphanumerics of at least 4; everything after is description.
static HEADER_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d[A-Za-z0-9]{6,})\s+([A-Za-z0-9]{4,})\s+(\S.*)$").unwrap());

/// Recognizes a product header line, or returns `None` for anything else.
///
/// The raw description may end in a fabric-composition suffix such as
/// `- 100% OGCO`; that suffix is stripped before the header is returned.
pub fn match_product_header(line: &str) -> Option<ProductHeader> {
    let caps = HEADER_RE.captures(line)?;
    Some(ProductHeader {
        article: caps[1].to_string(),
        color_code: caps[2].to_string(),
        description: strip_composition_suffix(caps[3].trim()),
    })
}

/// Cuts the description at the last ` - ` separator when the text after it
/// carries a percentage, then trims any dashes/whitespace left dangling.
/// Descriptions without a percentage-bearing tail are kept verbatim.
fn strip_composition_suffix(description: &str) -> String {
    if let Some(pos) = description.rfind(" - ") {
        let tail = &description[pos + 3..];
        if tail.contains('%') {
            return description[..pos].trim_end_matches(['-', ' ']).to_string();
        }
    }
    description.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_with_composition_suffix_is_cleaned() {
        let header = match_product_header("1AR11002 P6179 RIB LS T-SHIRT - 100% OGCO").unwrap();
        assert_eq!(header.article, "1AR11002");
        assert_eq!(header.color_code, "P6179");
        assert_eq!(header.description, "RIB LS T-SHIRT");
    }

    #[test]
    fn header_without_percentage_keeps_description_verbatim() {
        let header = match_product_header("2BX45120 K0210 HOODED JACKET - NAVY").unwrap();
        assert_eq!(header.description, "HOODED JACKET - NAVY");
    }

    #[test]
    fn only_the_last_separator_is_considered() {
        let header =
            match_product_header("1AR11002 P6179 DRESS - FLORAL - 95% CO 5% EA").unwrap();
        assert_eq!(header.description, "DRESS - FLORAL");
    }

    #[test]
    fn short_or_letter_first_codes_do_not_match() {
        // Article codes must be digit-first and at least 7 characters.
        assert!(match_product_header("6110 20 91 - (24M - 36M)").is_none());
        assert!(match_product_header("AR110023 P6179 SHIRT").is_none());
        assert!(match_product_header("1AR110 P6179 SHIRT").is_none());
    }

    #[test]
    fn color_codes_shorter_than_four_do_not_match() {
        assert!(match_product_header("1AR11002 P61 SHIRT").is_none());
    }
}
