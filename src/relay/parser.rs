//! Tolerant normalization of resolver API responses.
//!
//! The API has shipped (at least) two response shapes over time; this parser
//! accepts the superset and treats the document as untrusted input. Nothing
//! in here returns an error: a malformed document simply yields no items.

use serde_json::Value;

/// One extracted direct-download link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadItem {
    /// Display title, `"Unknown File"` when the API omits it
    pub title: String,
    /// Absolute `http(s)` download URL
    pub url: String,
    /// Human-readable size label, possibly empty
    pub size: String,
}

const DEFAULT_TITLE: &str = "Unknown File";

/// Normalizes an API response document into an ordered item list.
///
/// The document is rejected wholesale (empty vec) when it is not an object
/// or its items field is not an array. Individual items are dropped silently
/// when their download field is missing, non-string, or not an absolute
/// `http(s)` URL; survivors keep their source order.
#[must_use]
pub fn parse(doc: &Value) -> Vec<DownloadItem> {
    let Some(obj) = doc.as_object() else {
        return Vec::new();
    };
    let items_field = obj
        .get("data")
        .filter(|v| !v.is_null())
        .or_else(|| obj.get("items"));
    let Some(arr) = items_field.and_then(Value::as_array) else {
        return Vec::new();
    };
    arr.iter().filter_map(parse_item).collect()
}

fn parse_item(value: &Value) -> Option<DownloadItem> {
    let item = value.as_object()?;

    let url = first_string(item, &["download", "url", "link"])?;
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return None;
    }

    let title = first_string(item, &["title", "name"]).unwrap_or(DEFAULT_TITLE);
    let size = first_string(item, &["size", "filesize"]).unwrap_or("");

    Some(DownloadItem {
        title: title.to_string(),
        url: url.to_string(),
        size: size.to_string(),
    })
}

/// First non-empty string value found under any of `keys`.
fn first_string<'a>(
    item: &'a serde_json::Map<String, Value>,
    keys: &[&str],
) -> Option<&'a str> {
    keys.iter()
        .find_map(|k| item.get(*k).and_then(Value::as_str))
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_primary_schema() {
        let doc = json!({"data": [{"title": "A", "download": "https://x/y", "size": "1MB"}]});
        let items = parse(&doc);
        assert_eq!(
            items,
            vec![DownloadItem {
                title: "A".to_string(),
                url: "https://x/y".to_string(),
                size: "1MB".to_string(),
            }]
        );
    }

    #[test]
    fn test_alternate_schema_with_defaults() {
        let doc = json!({"items": [{"name": "B", "url": "http://z"}]});
        let items = parse(&doc);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].title, "B");
        assert_eq!(items[0].url, "http://z");
        assert_eq!(items[0].size, "");
    }

    #[test]
    fn test_missing_title_defaults() {
        let doc = json!({"data": [{"download": "https://x"}]});
        assert_eq!(parse(&doc)[0].title, "Unknown File");
    }

    #[test]
    fn test_invalid_scheme_dropped() {
        let doc = json!({"data": [{"download": "not-a-url"}]});
        assert!(parse(&doc).is_empty());
    }

    #[test]
    fn test_non_string_download_dropped() {
        let doc = json!({"data": [{"download": 42}, {"download": null}]});
        assert!(parse(&doc).is_empty());
    }

    #[test]
    fn test_document_not_an_object() {
        assert!(parse(&json!("not a document")).is_empty());
        assert!(parse(&json!([1, 2, 3])).is_empty());
        assert!(parse(&json!(null)).is_empty());
    }

    #[test]
    fn test_items_field_not_a_list() {
        assert!(parse(&json!({"data": "not a list"})).is_empty());
        assert!(parse(&json!({"items": {"a": 1}})).is_empty());
    }

    #[test]
    fn test_null_data_falls_back_to_items() {
        let doc = json!({"data": null, "items": [{"name": "C", "link": "https://c"}]});
        let items = parse(&doc);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].url, "https://c");
    }

    #[test]
    fn test_partial_failure_keeps_valid_items_in_order() {
        let doc = json!({"data": [
            {"title": "first", "download": "https://a"},
            {"title": "bad", "download": "ftp://nope"},
            {"title": "second", "link": "http://b"},
            "not even an object"
        ]});
        let items = parse(&doc);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, "first");
        assert_eq!(items[1].title, "second");
    }

    #[test]
    fn test_filesize_alias() {
        let doc = json!({"data": [{"download": "https://x", "filesize": "2 GB"}]});
        assert_eq!(parse(&doc)[0].size, "2 GB");
    }
}
