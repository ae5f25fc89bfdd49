//! Text filtering and sorting over catalog records.
//!
//! Matching is a case-insensitive substring test against a fixed set of text fields per record
//! type. Category membership is exact but compared in lowercase, so `anti-inflamasi` and
//! `Anti-inflamasi` select the same herbs. Sorting is by display name and stable for ties in
//! either direction.

use crate::catalog::{Condition, Herb, PreparationMethod};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use utoipa::ToSchema;

/// A record that can be found by free text and sorted by name.
pub trait Searchable {
    /// Name used for ordering results.
    fn display_name(&self) -> &str;

    /// Fields the free-text query is matched against.
    fn search_fields(&self) -> Vec<&str>;

    /// Category tags. Records without categories never match a category filter.
    fn categories(&self) -> Vec<&str> {
        Vec::new()
    }
}

impl Searchable for Herb {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.latin_name, &self.description]
    }

    fn categories(&self) -> Vec<&str> {
        self.categories.iter().map(String::as_str).collect()
    }
}

impl Searchable for Condition {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }
}

impl Searchable for PreparationMethod {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn reversed(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// True if `record` matches the free-text `query`. A blank query matches everything.
pub fn matches_query<T: Searchable + ?Sized>(record: &T, query: &str) -> bool {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return true;
    }
    record
        .search_fields()
        .iter()
        .any(|field| field.to_lowercase().contains(&needle))
}

/// True if `record` carries `category`, compared case-insensitively.
pub fn has_category<T: Searchable + ?Sized>(record: &T, category: &str) -> bool {
    let wanted = category.trim().to_lowercase();
    record
        .categories()
        .iter()
        .any(|c| c.to_lowercase() == wanted)
}

/// Sort `records` by display name in place.
pub fn sort_by_name<T: Searchable>(records: &mut [&T], direction: SortDirection) {
    records.sort_by(|a, b| compare_names(*a, *b, direction));
}

fn compare_names<T: Searchable>(a: &T, b: &T, direction: SortDirection) -> Ordering {
    let ordering = a
        .display_name()
        .to_lowercase()
        .cmp(&b.display_name().to_lowercase());
    match direction {
        SortDirection::Asc => ordering,
        SortDirection::Desc => ordering.reverse(),
    }
}

/// Filter `records` by free text and optional category, then sort by name.
///
/// # Arguments
///
/// * `records` - The collection to search.
/// * `query` - Free text; blank keeps every record.
/// * `category` - Exact category tag (case-insensitive); `None` disables the filter.
/// * `direction` - Sort direction on display name.
///
/// # Returns
///
/// The matching records in sorted order. No matches is an empty list, not an error.
pub fn filter_and_sort<'a, T: Searchable>(
    records: &'a [T],
    query: &str,
    category: Option<&str>,
    direction: SortDirection,
) -> Vec<&'a T> {
    let mut hits: Vec<&T> = records
        .iter()
        .filter(|r| matches_query(*r, query))
        .filter(|r| category.map_or(true, |c| has_category(*r, c)))
        .collect();
    sort_by_name(&mut hits, direction);
    hits
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;

    fn names<T: Searchable>(records: &[&T]) -> Vec<String> {
        records.iter().map(|r| r.display_name().to_string()).collect()
    }

    #[test]
    fn empty_query_returns_everything_ascending() {
        let catalog = Catalog::builtin().expect("catalog");
        let hits = filter_and_sort(catalog.herbs(), "", None, SortDirection::Asc);
        assert_eq!(
            names(&hits),
            vec!["Chamomile", "Jahe", "Kunyit", "Peppermint", "Valerian"]
        );
    }

    #[test]
    fn category_filter_is_exact_and_case_insensitive() {
        let catalog = Catalog::builtin().expect("catalog");
        let hits = filter_and_sort(catalog.herbs(), "", Some("Anti-inflamasi"), SortDirection::Asc);
        assert_eq!(names(&hits), vec!["Chamomile", "Jahe", "Kunyit"]);

        let lower = filter_and_sort(catalog.herbs(), "", Some("anti-inflamasi"), SortDirection::Asc);
        assert_eq!(names(&hits), names(&lower));

        let partial = filter_and_sort(catalog.herbs(), "", Some("Anti"), SortDirection::Asc);
        assert!(partial.is_empty());
    }

    #[test]
    fn query_matches_latin_name() {
        let catalog = Catalog::builtin().expect("catalog");
        let hits = filter_and_sort(catalog.herbs(), "ZINGIBER", None, SortDirection::Asc);
        assert_eq!(names(&hits), vec!["Jahe"]);
    }

    #[test]
    fn surrounding_whitespace_is_ignored() {
        let catalog = Catalog::builtin().expect("catalog");
        let padded = filter_and_sort(catalog.herbs(), "  jahe ", None, SortDirection::Asc);
        assert_eq!(names(&padded), vec!["Jahe"]);
        let blank = filter_and_sort(catalog.herbs(), "   ", None, SortDirection::Asc);
        assert_eq!(blank.len(), catalog.herbs().len());
    }

    #[test]
    fn no_match_is_empty() {
        let catalog = Catalog::builtin().expect("catalog");
        assert!(filter_and_sort(catalog.herbs(), "ginseng", None, SortDirection::Asc).is_empty());
    }

    #[test]
    fn descending_reverses_ascending() {
        let catalog = Catalog::builtin().expect("catalog");
        let asc = filter_and_sort(catalog.conditions(), "", None, SortDirection::Asc);
        let mut desc = filter_and_sort(catalog.conditions(), "", None, SortDirection::Desc);
        desc.reverse();
        assert_eq!(names(&asc), names(&desc));
    }

    #[test]
    fn conditions_do_not_match_category_filters() {
        let catalog = Catalog::builtin().expect("catalog");
        assert!(filter_and_sort(catalog.conditions(), "", Some("Relaksasi"), SortDirection::Asc).is_empty());
    }
}
