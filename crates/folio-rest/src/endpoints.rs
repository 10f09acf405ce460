//! URL construction helpers for the REST backend.
//!
//! Pure functions so that every call site builds URLs the same way. Filter
//! values go through `query_pairs_mut`, which takes care of encoding.

use folio_core::Category;
use url::Url;

/// Table holding catalog items.
pub const ITEMS_TABLE: &str = "portfolio";

/// Table holding commission timeline entries.
pub const TIMELINE_TABLE: &str = "portfolio_timeline";

const REST_PREFIX: [&str; 2] = ["rest", "v1"];
const STORAGE_PREFIX: [&str; 3] = ["storage", "v1", "object"];

/// Append path segments to the base URL.
fn with_segments<'a>(base: &Url, segments: impl IntoIterator<Item = &'a str>) -> Url {
    let mut url = base.clone();
    url.set_query(None);
    if let Ok(mut path) = url.path_segments_mut() {
        path.pop_if_empty().extend(segments);
    }
    url
}

/// `/rest/v1/<table>`
pub fn table_url(base: &Url, table: &str) -> Url {
    with_segments(base, REST_PREFIX.into_iter().chain([table]))
}

/// All items of a category, newest first.
pub fn items_url(base: &Url, category: Category) -> Url {
    let mut url = table_url(base, ITEMS_TABLE);
    url.query_pairs_mut()
        .append_pair("select", "*")
        .append_pair("category", &format!("eq.{}", category.as_str()))
        .append_pair("order", "created_at.desc");
    url
}

/// One row of `table` by id.
pub fn row_url(base: &Url, table: &str, id: &str) -> Url {
    let mut url = table_url(base, table);
    url.query_pairs_mut()
        .append_pair("select", "*")
        .append_pair("id", &format!("eq.{id}"));
    url
}

/// Timeline entries of one item, in display order.
pub fn timeline_url(base: &Url, item_id: &str) -> Url {
    let mut url = table_url(base, TIMELINE_TABLE);
    url.query_pairs_mut()
        .append_pair("select", "*")
        .append_pair("portfolio_id", &format!("eq.{item_id}"))
        .append_pair("order", "order.asc");
    url
}

/// Upload target for an object.
pub fn upload_url(base: &Url, bucket: &str, path: &str) -> Url {
    with_segments(
        base,
        STORAGE_PREFIX
            .into_iter()
            .chain([bucket])
            .chain(path.split('/')),
    )
}

/// Public download URL for an object.
pub fn public_object_url(base: &Url, bucket: &str, path: &str) -> Url {
    with_segments(
        base,
        STORAGE_PREFIX
            .into_iter()
            .chain(["public", bucket])
            .chain(path.split('/')),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base() -> Url {
        Url::parse("https://abc.supabase.co").unwrap()
    }

    #[test]
    fn test_items_url() {
        let url = items_url(&base(), Category::Commission);
        assert_eq!(
            url.as_str(),
            "https://abc.supabase.co/rest/v1/portfolio?select=*&category=eq.commission&order=created_at.desc"
        );
    }

    #[test]
    fn test_row_url_encodes_id() {
        let url = row_url(&base(), ITEMS_TABLE, "a b&c");
        assert_eq!(url.path(), "/rest/v1/portfolio");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs[1], ("id".to_string(), "eq.a b&c".to_string()));
    }

    #[test]
    fn test_timeline_url() {
        let url = timeline_url(&base(), "7");
        assert_eq!(url.path(), "/rest/v1/portfolio_timeline");
        assert_eq!(
            url.query(),
            Some("select=*&portfolio_id=eq.7&order=order.asc")
        );
    }

    #[test]
    fn test_base_with_path_and_trailing_slash() {
        let base = Url::parse("https://example.com/backend/").unwrap();
        assert_eq!(
            table_url(&base, TIMELINE_TABLE).as_str(),
            "https://example.com/backend/rest/v1/portfolio_timeline"
        );
    }

    #[test]
    fn test_storage_urls() {
        assert_eq!(
            upload_url(&base(), "mark_images", "portfolio/x1.jpg").as_str(),
            "https://abc.supabase.co/storage/v1/object/mark_images/portfolio/x1.jpg"
        );
        assert_eq!(
            public_object_url(&base(), "mark_images", "portfolio/x1.jpg").as_str(),
            "https://abc.supabase.co/storage/v1/object/public/mark_images/portfolio/x1.jpg"
        );
    }
}
