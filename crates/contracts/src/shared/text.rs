//! Text helpers: search folding, code prefixes, count formatting

use unicode_normalization::UnicodeNormalization;

/// Lowercases and strips combining diacritics (U+0300..U+036F) after
/// canonical decomposition, so "Électricité" and "electricite" compare equal.
pub fn normalize(text: &str) -> String {
    text.nfd()
        .filter(|c| !('\u{0300}'..='\u{036f}').contains(c))
        .collect::<String>()
        .to_lowercase()
}

/// Returns the first `n` characters of `text`, or all of it when shorter
pub fn head(text: &str, n: usize) -> &str {
    match text.char_indices().nth(n) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}

/// Formats a count with a space every three digits, e.g. `12 345`
pub fn format_count(value: f64) -> String {
    let digits = format!("{:.0}", value.abs());
    let mut grouped = String::new();
    for (i, c) in digits.chars().rev().enumerate() {
        if i > 0 && i % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(c);
    }
    let grouped: String = grouped.chars().rev().collect();
    if value < 0.0 && digits != "0" {
        format!("-{}", grouped)
    } else {
        grouped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_accents() {
        assert_eq!(normalize("Électricité"), "electricite");
        assert_eq!(normalize("Façonnage"), "faconnage");
        assert_eq!(normalize("PROGRAMMATION"), "programmation");
    }

    #[test]
    fn test_normalize_keeps_digits() {
        assert_eq!(normalize("6201Z"), "6201z");
    }

    #[test]
    fn test_head() {
        assert_eq!(head("6201Z", 2), "62");
        assert_eq!(head("6201Z", 4), "6201");
        assert_eq!(head("6", 2), "6");
        assert_eq!(head("ééé", 2), "éé");
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(12345.0), "12 345");
        assert_eq!(format_count(1234567.0), "1 234 567");
        assert_eq!(format_count(-1234.0), "-1 234");
    }
}
