//! Size label extraction from pattern file names.

use crate::config::{LETTER_SIZES, NUMERIC_SIZES};
use regex::Regex;
use std::path::Path;
use std::sync::OnceLock;

/// Extract the size label from a document path.
///
/// Looks for a letter size token (XS..XXXL) first, then a numeric size
/// (2..16), delimited by non-alphanumeric characters or the ends of the
/// file stem. Without a token, the upper-cased stem is used as is.
pub fn size_from_filename(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    size_token(&stem).unwrap_or_else(|| stem.trim().to_uppercase())
}

/// Find a size token in a file stem.
pub fn size_token(stem: &str) -> Option<String> {
    static LETTER_REGEX: OnceLock<Regex> = OnceLock::new();
    static NUMERIC_REGEX: OnceLock<Regex> = OnceLock::new();

    let letter = LETTER_REGEX.get_or_init(|| token_regex(&LETTER_SIZES));
    let numeric = NUMERIC_REGEX.get_or_init(|| token_regex(&NUMERIC_SIZES));

    [letter, numeric]
        .into_iter()
        .find_map(|regex| regex.captures(stem))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().to_uppercase())
}

/// Check if a label is one of the standard letter or numeric sizes.
pub fn is_standard_size(label: &str) -> bool {
    let label = label.trim().to_uppercase();
    LETTER_SIZES.contains(&label.as_str()) || NUMERIC_SIZES.contains(&label.as_str())
}

fn token_regex(tokens: &[&str]) -> Regex {
    let pattern = format!(
        r"(?i)(?:^|[^\p{{L}}\p{{N}}])({})(?:$|[^\p{{L}}\p{{N}}])",
        tokens.join("|")
    );
    Regex::new(&pattern).expect("invalid size regex")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn size(name: &str) -> String {
        size_from_filename(Path::new(name))
    }

    #[test]
    fn test_plain_letter_sizes() {
        assert_eq!(size("patterns/S.pdf"), "S");
        assert_eq!(size("m.pdf"), "M");
        assert_eq!(size("XXXL.pdf"), "XXXL");
        assert_eq!(size("xs.pdf"), "XS");
    }

    #[test]
    fn test_size_inside_name() {
        assert_eq!(size("Camiseta Local XL.pdf"), "XL");
        assert_eq!(size("camiseta_xxl_2024.pdf"), "XXL");
        assert_eq!(size("jersey-L-v2.pdf"), "L");
    }

    #[test]
    fn test_letter_preferred_over_numeric() {
        assert_eq!(size("12 M.pdf"), "M");
    }

    #[test]
    fn test_numeric_sizes() {
        assert_eq!(size("talla 12.pdf"), "12");
        assert_eq!(size("kids_4.pdf"), "4");
        assert_eq!(size("16.pdf"), "16");
    }

    #[test]
    fn test_tokens_must_be_delimited() {
        // "Small" and "2024" contain size letters/digits but are not tokens
        assert_eq!(size("Small.pdf"), "SMALL");
        assert_eq!(size("model2024.pdf"), "MODEL2024");
        assert_eq!(size("size 18.pdf"), "SIZE 18");
    }

    #[test]
    fn test_is_standard_size() {
        assert!(is_standard_size("m"));
        assert!(is_standard_size(" 14 "));
        assert!(!is_standard_size("18"));
        assert!(!is_standard_size("SMALL"));
    }
}
