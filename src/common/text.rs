//! Case folding and ordering helpers.
//!
//! Every case-insensitive comparison in the crate goes through [`fold`] so
//! filters and search can never disagree about what "equal" means.

use std::cmp::Ordering;
use unicode_normalization::char::is_combining_mark;
use unicode_normalization::UnicodeNormalization;

/// Lowercases a value for case-insensitive comparison.
pub fn fold(value: &str) -> String {
    value.to_lowercase()
}

/// Case-insensitive equality.
pub fn eq_folded(a: &str, b: &str) -> bool {
    fold(a) == fold(b)
}

/// Case-insensitive substring test. `needle` must already be folded.
///
/// An empty haystack never matches, so a check against an absent field is a
/// non-match.
pub fn contains_folded(haystack: &str, folded_needle: &str) -> bool {
    !haystack.is_empty() && fold(haystack).contains(folded_needle)
}

/// True if the folded value contains any of the (lowercase) terms.
pub fn contains_any(haystack: &str, terms: &[&str]) -> bool {
    if haystack.is_empty() {
        return false;
    }
    let folded = fold(haystack);
    terms.iter().any(|term| folded.contains(term))
}

/// Collation key: NFD decomposed, combining marks dropped, lowercased.
fn collation_key(value: &str) -> String {
    value
        .nfd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Locale-style ordering for display names.
///
/// Accents and case are ignored at the primary level. Ties are broken with
/// lowercase before uppercase, then by the raw value so the order is total.
pub fn locale_cmp(a: &str, b: &str) -> Ordering {
    collation_key(a)
        .cmp(&collation_key(b))
        .then_with(|| case_tiebreak(a, b))
        .then_with(|| a.cmp(b))
}

fn case_tiebreak(a: &str, b: &str) -> Ordering {
    for (ca, cb) in a.chars().zip(b.chars()) {
        match (ca.is_lowercase(), cb.is_lowercase()) {
            (true, false) if cb.is_uppercase() => return Ordering::Less,
            (false, true) if ca.is_uppercase() => return Ordering::Greater,
            _ => {}
        }
    }
    Ordering::Equal
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_folded_ignores_case() {
        assert!(contains_folded("Kothrud Taluka", "kothrud"));
        assert!(!contains_folded("", "kothrud"));
    }

    #[test]
    fn contains_any_matches_terms() {
        assert!(contains_any("Shree CHILDREN Hospital", &["children"]));
        assert!(!contains_any("City General", &["clinic", "nursing"]));
    }

    #[test]
    fn locale_cmp_ignores_case_and_accents() {
        assert_eq!(locale_cmp("apollo", "Bharati"), Ordering::Less);
        assert_eq!(locale_cmp("Émile Hospital", "Fortis"), Ordering::Less);
        assert_eq!(locale_cmp("alpha", "Alpha"), Ordering::Less);
        assert_eq!(locale_cmp("Alpha", "Alpha"), Ordering::Equal);
    }

    #[test]
    fn locale_cmp_sorts_names() {
        let mut names = vec!["zeta", "Alpha", "beta", "alpha"];
        names.sort_by(|a, b| locale_cmp(a, b));
        assert_eq!(names, vec!["alpha", "Alpha", "beta", "zeta"]);
    }
}
