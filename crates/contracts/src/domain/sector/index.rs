//! Sector search over the flat `naf_index`

use std::cmp::Ordering;

use super::dataset::{Dataset, NafIndexEntry};
use crate::enums::NafLevel;
use crate::shared::text::normalize;

/// Maximum number of suggestions returned for a non-empty query
pub const MAX_SUGGESTIONS: usize = 25;

/// How a query is interpreted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryKind {
    /// Empty query: browse all divisions
    Browse,
    /// Starts with a digit: code prefix drill-down
    Code,
    /// Anything else: label or code substring
    Text,
}

impl QueryKind {
    pub fn classify(query: &str) -> Self {
        match query.trim().chars().next() {
            None => QueryKind::Browse,
            Some(c) if c.is_ascii_digit() => QueryKind::Code,
            Some(_) => QueryKind::Text,
        }
    }
}

/// Ranked suggestions plus the number of matches before capping
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchResults {
    pub matches: Vec<NafIndexEntry>,
    pub total: usize,
}

impl SearchResults {
    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// True when more matches exist than are shown
    pub fn is_truncated(&self) -> bool {
        self.total > self.matches.len()
    }

    /// Footer text of the suggestion box, e.g. "42 résultats (25 affichés)"
    pub fn summary(&self) -> String {
        if self.total == 0 {
            return String::new();
        }
        let plural = if self.total > 1 { "s" } else { "" };
        if self.is_truncated() {
            format!(
                "{} résultat{} ({} affichés)",
                self.total,
                plural,
                self.matches.len()
            )
        } else {
            format!("{} résultat{}", self.total, plural)
        }
    }
}

/// Searches a dataset.
///
/// `selected` is the code currently open in the view; code searches never
/// offer it again so drilling down only shows children and siblings.
pub fn search(dataset: &Dataset, query: &str, selected: Option<&str>) -> SearchResults {
    match QueryKind::classify(query) {
        QueryKind::Browse => browse_divisions(dataset),
        QueryKind::Code => search_code(dataset, query, selected),
        QueryKind::Text => search_text(dataset, query),
    }
}

fn browse_divisions(dataset: &Dataset) -> SearchResults {
    let matches: Vec<NafIndexEntry> = dataset
        .table(NafLevel::Naf2)
        .iter()
        .map(|(code, record)| NafIndexEntry {
            code: code.clone(),
            libelle: record.libelle.clone(),
            level: NafLevel::Naf2,
        })
        .collect();
    SearchResults {
        total: matches.len(),
        matches,
    }
}

fn search_code(dataset: &Dataset, query: &str, selected: Option<&str>) -> SearchResults {
    let prefix = query.trim().to_uppercase();
    let selected = selected.map(str::to_uppercase);

    let mut found: Vec<(bool, &NafIndexEntry)> = dataset
        .naf_index
        .iter()
        .filter_map(|entry| {
            let code = entry.code.to_uppercase();
            if selected.as_deref() == Some(code.as_str()) || !code.starts_with(&prefix) {
                return None;
            }
            Some((code == prefix, entry))
        })
        .collect();

    found.sort_by(|(a_exact, a), (b_exact, b)| {
        b_exact
            .cmp(a_exact)
            .then_with(|| by_breadth_then_code(a, b))
    });

    capped(found.into_iter().map(|(_, entry)| entry))
}

fn search_text(dataset: &Dataset, query: &str) -> SearchResults {
    let needle = normalize(query.trim());

    let mut found: Vec<(bool, &NafIndexEntry)> = dataset
        .naf_index
        .iter()
        .filter_map(|entry| {
            let libelle = normalize(&entry.libelle);
            if !normalize(&entry.code).contains(&needle) && !libelle.contains(&needle) {
                return None;
            }
            Some((libelle.starts_with(&needle), entry))
        })
        .collect();

    found.sort_by(|(a_starts, a), (b_starts, b)| {
        b_starts
            .cmp(a_starts)
            .then_with(|| by_breadth_then_code(a, b))
    });

    capped(found.into_iter().map(|(_, entry)| entry))
}

/// Broader sectors (shorter codes) first, then by code
fn by_breadth_then_code(a: &NafIndexEntry, b: &NafIndexEntry) -> Ordering {
    a.code
        .chars()
        .count()
        .cmp(&b.code.chars().count())
        .then_with(|| a.code.cmp(&b.code))
}

fn capped<'a>(ranked: impl ExactSizeIterator<Item = &'a NafIndexEntry>) -> SearchResults {
    let total = ranked.len();
    SearchResults {
        matches: ranked.take(MAX_SUGGESTIONS).cloned().collect(),
        total,
    }
}
