//! Tag normalization and the tag index.
//!
//! Tag matching, deduplication and sorting are all case-sensitive:
//! "Art" and "art" are two different tags.

use std::collections::BTreeSet;

use crate::domain::{CatalogItem, RawTags};

/// Resolve a raw tag field into a list of strings.
///
/// A real list is returned unchanged (no deduplication). A string is
/// decoded as a JSON array of strings; anything that fails to decode yields
/// an empty list. A missing field yields an empty list. This never fails.
pub fn normalize_tags(raw: &RawTags) -> Vec<String> {
    match raw {
        RawTags::Sequence(tags) => tags.clone(),
        RawTags::Serialized(text) => match serde_json::from_str::<Vec<String>>(text) {
            Ok(tags) => tags,
            Err(e) => {
                tracing::debug!(error = %e, "Ignoring malformed serialized tags");
                Vec::new()
            }
        },
        RawTags::Absent => Vec::new(),
    }
}

/// Sorted, deduplicated union of the tags of every item.
pub fn compute_tag_index(items: &[CatalogItem]) -> Vec<String> {
    items
        .iter()
        .flat_map(|item| item.tags.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

/// Trim a user-entered tag, rejecting blanks.
pub fn clean_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Trim, drop blanks and drop repeats, keeping first-seen order.
pub fn clean_tags<I>(tags: I) -> Vec<String>
where
    I: IntoIterator<Item = String>,
{
    let mut out: Vec<String> = Vec::new();
    for tag in tags {
        if let Some(tag) = clean_tag(&tag) {
            if !out.contains(&tag) {
                out.push(tag);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Category;
    use chrono::Utc;

    fn item(id: &str, tags: &[&str]) -> CatalogItem {
        CatalogItem {
            id: id.to_string(),
            title: format!("Work {id}"),
            category: Category::Inventory,
            tags: tags.iter().map(ToString::to_string).collect(),
            image: None,
            description: None,
            year: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_sequence_is_returned_unchanged() {
        let tags = vec!["b".to_string(), "a".to_string(), "b".to_string()];
        assert_eq!(normalize_tags(&RawTags::Sequence(tags.clone())), tags);
    }

    #[test]
    fn test_serialized_list_is_decoded() {
        let raw = RawTags::Serialized("[\"A\",\"B\"]".to_string());
        assert_eq!(normalize_tags(&raw), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn test_malformed_inputs_yield_empty() {
        for text in ["not json", "", "{\"a\":1}", "42", "\"A\"", "[1,2]", "[\"A\","] {
            let raw = RawTags::Serialized(text.to_string());
            assert!(normalize_tags(&raw).is_empty(), "input {text:?}");
        }
    }

    #[test]
    fn test_absent_yields_empty() {
        assert!(normalize_tags(&RawTags::Absent).is_empty());
    }

    #[test]
    fn test_tag_index_is_sorted_and_unique() {
        let items = vec![
            item("1", &["Urban", "Landscape"]),
            item("2", &["Landscape", "Urban", "Urban"]),
            item("3", &[]),
        ];
        assert_eq!(
            compute_tag_index(&items),
            vec!["Landscape".to_string(), "Urban".to_string()]
        );
    }

    #[test]
    fn test_tag_index_is_case_sensitive() {
        let items = vec![item("1", &["art"]), item("2", &["Art"])];
        assert_eq!(
            compute_tag_index(&items),
            vec!["Art".to_string(), "art".to_string()]
        );
    }

    #[test]
    fn test_tag_index_of_nothing() {
        assert!(compute_tag_index(&[]).is_empty());
    }

    #[test]
    fn test_clean_tags() {
        let cleaned = clean_tags(vec![
            " Urban ".to_string(),
            "   ".to_string(),
            "Urban".to_string(),
            "urban".to_string(),
        ]);
        assert_eq!(cleaned, vec!["Urban".to_string(), "urban".to_string()]);
        assert_eq!(clean_tag("  "), None);
    }
}
