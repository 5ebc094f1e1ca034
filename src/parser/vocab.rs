// src/parser/vocab.rs

/// Ordered size labels for one table block.
///
/// Exactly one vocabulary is active at any point of the scan; a newly
/// recognized column header replaces it wholesale, never merges into it.
pub type SizeVocabulary = &'static [&'static str];

const BABY_LONG: SizeVocabulary = &["3M", "6M", "9M", "12M", "18M", "24M", "36M"];
const BABY_SHORT: SizeVocabulary = &["3M", "6M", "9M", "12M", "18M", "24M"];
const KIDS_YEARS: SizeVocabulary = &["3Y", "4Y", "5Y", "6Y", "8Y", "10Y", "12Y", "14Y"];
const ADULT_LETTERS: SizeVocabulary = &["XS", "S", "M", "L", "XL", "XXL"];

/// Tests a line against the known column-header shapes.
///
/// Rules are ordered and the first match wins. Each rule requires several
/// size tokens to appear as substrings: the baby ranges need `3M`/`6M`/`9M`
/// plus `36M` (long) or `24M` (short), the kids range needs `3Y`/`4Y`/`5Y`,
/// and the adult range needs `XS` plus free-standing `S`, `M` and `L`.
/// A header line that satisfies no rule falls through untouched; that is a
/// known limit of the substring heuristic, not something to paper over by
/// guessing a vocabulary.
pub fn detect_size_vocabulary(line: &str) -> Option<SizeVocabulary> {
    let has = |token: &str| line.contains(token);

    if has("3M") && has("6M") && has("9M") {
        if has("36M") {
            return Some(BABY_LONG);
        }
        if has("24M") {
            return Some(BABY_SHORT);
        }
    }
    if has("3Y") && has("4Y") && has("5Y") {
        return Some(KIDS_YEARS);
    }
    if has("XS") && has(" S ") && has(" M ") && has(" L") {
        return Some(ADULT_LETTERS);
    }
    None
}
