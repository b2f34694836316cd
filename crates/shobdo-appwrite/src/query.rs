use serde_json::{Value, json};

/// One entry of the `queries[]` list, serialized the way the document API
/// expects it.
#[derive(Debug, Clone, PartialEq)]
pub enum Query {
    Search { attribute: String, term: String },
    Limit(usize),
    CursorAfter(String),
}

impl Query {
    pub fn search(attribute: &str, term: &str) -> Self {
        Query::Search {
            attribute: attribute.to_string(),
            term: term.to_string(),
        }
    }

    fn to_json(&self) -> Value {
        match self {
            Query::Search { attribute, term } => json!({
                "method": "search",
                "attribute": attribute,
                "values": [term],
            }),
            Query::Limit(limit) => json!({
                "method": "limit",
                "values": [limit],
            }),
            Query::CursorAfter(id) => json!({
                "method": "cursorAfter",
                "values": [id],
            }),
        }
    }

    pub fn encode(&self) -> String {
        self.to_json().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_search_query() {
        let encoded: Value = serde_json::from_str(&Query::search("korean", "물").encode()).unwrap();
        assert_eq!(encoded["method"], "search");
        assert_eq!(encoded["attribute"], "korean");
        assert_eq!(encoded["values"][0], "물");
    }

    #[test]
    fn test_paging_queries() {
        let limit: Value = serde_json::from_str(&Query::Limit(25).encode()).unwrap();
        assert_eq!(limit["values"][0], 25);

        let cursor: Value =
            serde_json::from_str(&Query::CursorAfter("abc".to_string()).encode()).unwrap();
        assert_eq!(cursor["method"], "cursorAfter");
        assert_eq!(cursor["values"][0], "abc");
    }
}
