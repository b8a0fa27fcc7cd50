use serde::{Deserialize, Serialize};

/// One page of the upstream article listing.
///
/// Only the fields the census needs are decoded; everything else in the body is ignored.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ListingPage {
    pub items: Vec<ListingItem>,
    /// Cursor for the next page. Absent on the last page.
    #[serde(default)]
    pub offset: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListingItem {
    pub title: String,
}

/// A title successfully split into character name and universe of origin
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedEntry {
    pub name: String,
    pub origin: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_page_with_extra_fields() {
        let body = r#"{
            "items": [{"id": 1, "title": "Spider-Man (Earth-616)", "url": "/wiki/x", "ns": 0}],
            "basepath": "http://marvel.wikia.com",
            "offset": "Spider-Woman"
        }"#;
        let page: ListingPage = serde_json::from_str(body).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].title, "Spider-Man (Earth-616)");
        assert_eq!(page.offset.as_deref(), Some("Spider-Woman"));
    }

    #[test]
    fn last_page_has_no_offset() {
        let page: ListingPage = serde_json::from_str(r#"{"items": []}"#).unwrap();
        assert!(page.items.is_empty());
        assert!(page.offset.is_none());
    }

    #[test]
    fn body_without_items_is_a_decode_error() {
        let result = serde_json::from_str::<ListingPage>(
            r#"{"exception": {"message": "Not found", "code": 404}}"#,
        );
        assert!(result.is_err());
    }

    #[test]
    fn item_without_title_is_a_decode_error() {
        let result = serde_json::from_str::<ListingPage>(r#"{"items": [{"id": 3}]}"#);
        assert!(result.is_err());
    }
}
