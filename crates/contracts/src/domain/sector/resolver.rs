//! Code resolution across granularity levels.
//!
//! The NAF hierarchy is implicit: a code's ancestors are its 2- and 4-character
//! prefixes when those exist as keys in the coarser tables. Every prefix
//! computation goes through this module.

use super::dataset::{Dataset, NafIndexEntry};
use crate::enums::NafLevel;
use crate::shared::text::head;

/// Division (2-char) prefix of a code
pub fn division_of(code: &str) -> &str {
    head(code, 2)
}

/// Sub-class (4-char) prefix of a code
pub fn subclass_of(code: &str) -> &str {
    head(code, 4)
}

/// Finds the entry of `target` level that best matches `code`.
///
/// Exact key first; for naf4 / naf2 the ancestor prefix; otherwise the first
/// key of the target table starting with `code`. Tables iterate in ascending
/// key order, so that last fallback returns the smallest matching descendant.
pub fn resolve(dataset: &Dataset, code: &str, target: NafLevel) -> Option<String> {
    let table = dataset.table(target);
    if table.contains_key(code) {
        return Some(code.to_string());
    }
    match target {
        NafLevel::Naf4 if code.chars().count() >= 4 => {
            let ancestor = subclass_of(code);
            table.contains_key(ancestor).then(|| ancestor.to_string())
        }
        NafLevel::Naf2 => {
            let ancestor = division_of(code);
            table.contains_key(ancestor).then(|| ancestor.to_string())
        }
        _ => table.keys().find(|key| key.starts_with(code)).cloned(),
    }
}

/// Level whose table holds `code` verbatim
pub fn level_of(dataset: &Dataset, code: &str) -> Option<NafLevel> {
    NafLevel::lookup_order()
        .into_iter()
        .find(|level| dataset.contains(*level, code))
}

/// Locates a free-standing code (from a URL or another view).
///
/// Probes naf5, naf4, naf2 with the code as given, then again upper-cased.
/// Returns the level and the spelling that matched.
pub fn locate(dataset: &Dataset, code: &str) -> Option<(NafLevel, String)> {
    if let Some(level) = level_of(dataset, code) {
        return Some((level, code.to_string()));
    }
    let upper = code.to_uppercase();
    level_of(dataset, &upper).map(|level| (level, upper))
}

/// Existing ancestors of a code, coarsest first (breadcrumb without the current code)
pub fn ancestors(dataset: &Dataset, code: &str, level: NafLevel) -> Vec<NafIndexEntry> {
    let candidates: &[NafLevel] = match level {
        NafLevel::Naf5 => &[NafLevel::Naf2, NafLevel::Naf4],
        NafLevel::Naf4 => &[NafLevel::Naf2],
        NafLevel::Naf2 => &[],
    };
    candidates
        .iter()
        .filter_map(|ancestor_level| {
            let ancestor = match ancestor_level {
                NafLevel::Naf2 => division_of(code),
                _ => subclass_of(code),
            };
            dataset
                .record(*ancestor_level, ancestor)
                .map(|record| NafIndexEntry {
                    code: ancestor.to_string(),
                    libelle: record.libelle.clone(),
                    level: *ancestor_level,
                })
        })
        .collect()
}

/// Codes of `level` whose prefix is `code`, in ascending order
pub fn descendants<'a>(
    dataset: &'a Dataset,
    code: &'a str,
    level: NafLevel,
) -> impl Iterator<Item = &'a str> + 'a {
    dataset
        .table(level)
        .keys()
        .filter(move |key| key.starts_with(code))
        .map(String::as_str)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::sector::fixtures;

    #[test]
    fn test_exact_match_is_identity() {
        let dataset = fixtures::at_dataset();
        for code in dataset.by_naf5.keys() {
            assert_eq!(resolve(&dataset, code, NafLevel::Naf5).as_deref(), Some(code.as_str()));
        }
    }

    #[test]
    fn test_naf5_to_naf4_prefix() {
        let dataset = fixtures::at_dataset();
        for code in dataset.by_naf5.keys() {
            let prefix = &code[..4];
            if dataset.contains(NafLevel::Naf4, prefix) {
                assert_eq!(resolve(&dataset, code, NafLevel::Naf4).as_deref(), Some(prefix));
            }
        }
    }

    #[test]
    fn test_widen_to_division() {
        let dataset = fixtures::at_dataset();
        assert_eq!(resolve(&dataset, "6202B", NafLevel::Naf2).as_deref(), Some("62"));
        assert_eq!(resolve(&dataset, "6201", NafLevel::Naf2).as_deref(), Some("62"));
        assert_eq!(resolve(&dataset, "9999X", NafLevel::Naf2), None);
    }

    #[test]
    fn test_naf4_missing_ancestor_is_none() {
        let dataset = fixtures::at_dataset();
        assert_eq!(resolve(&dataset, "4712B", NafLevel::Naf4), None);
    }

    #[test]
    fn test_short_code_to_naf4_falls_back_to_descendant() {
        let dataset = fixtures::at_dataset();
        assert_eq!(resolve(&dataset, "62", NafLevel::Naf4).as_deref(), Some("6201"));
        assert_eq!(resolve(&dataset, "99", NafLevel::Naf4), None);
    }

    #[test]
    fn test_narrow_to_naf5_picks_smallest_descendant() {
        let dataset = fixtures::at_dataset();
        assert_eq!(resolve(&dataset, "6202", NafLevel::Naf5).as_deref(), Some("6202A"));
        assert_eq!(resolve(&dataset, "47", NafLevel::Naf5).as_deref(), Some("4711A"));
        assert_eq!(resolve(&dataset, "48", NafLevel::Naf5), None);
    }

    #[test]
    fn test_resolve_is_repeatable() {
        let dataset = fixtures::at_dataset();
        let first = resolve(&dataset, "47", NafLevel::Naf5);
        assert_eq!(first, resolve(&dataset, "47", NafLevel::Naf5));
    }

    #[test]
    fn test_locate_prefers_exact_then_uppercase() {
        let dataset = fixtures::at_dataset();
        assert_eq!(
            locate(&dataset, "6201Z"),
            Some((NafLevel::Naf5, "6201Z".to_string()))
        );
        assert_eq!(
            locate(&dataset, "6201z"),
            Some((NafLevel::Naf5, "6201Z".to_string()))
        );
        assert_eq!(locate(&dataset, "62"), Some((NafLevel::Naf2, "62".to_string())));
        assert_eq!(locate(&dataset, "invalidcode"), None);
    }

    #[test]
    fn test_ancestors() {
        let dataset = fixtures::at_dataset();
        let chain: Vec<_> = ancestors(&dataset, "6201Z", NafLevel::Naf5)
            .into_iter()
            .map(|e| (e.code, e.level))
            .collect();
        assert_eq!(
            chain,
            vec![
                ("62".to_string(), NafLevel::Naf2),
                ("6201".to_string(), NafLevel::Naf4)
            ]
        );
        assert_eq!(ancestors(&dataset, "4711", NafLevel::Naf4).len(), 1);
        assert!(ancestors(&dataset, "47", NafLevel::Naf2).is_empty());
    }

    #[test]
    fn test_descendants() {
        let dataset = fixtures::at_dataset();
        let children: Vec<_> = descendants(&dataset, "6202", NafLevel::Naf5).collect();
        assert_eq!(children, vec!["6202A", "6202B"]);
    }
}
