use serde::Deserialize;
use utoipa::IntoParams;

/// `search` and `ordering` parameters accepted by every list endpoint.
#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct ListParams {
    /// Case-insensitive search; every whitespace separated term must match
    /// at least one of the resource's search fields.
    pub search: Option<String>,
    /// Comma separated field names, prefix with `-` for descending order.
    /// Unknown fields are ignored.
    pub ordering: Option<String>,
}

impl ListParams {
    pub fn search_patterns(&self) -> Vec<String> {
        self.search
            .as_deref()
            .map(larder_core::search_terms)
            .unwrap_or_default()
            .iter()
            .map(|term| larder_core::like_pattern(term))
            .collect()
    }

    pub fn ordering<F: larder_core::SortField>(&self) -> Vec<larder_core::OrderTerm<F>> {
        self.ordering
            .as_deref()
            .map(larder_core::parse_ordering)
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use larder_core::{Direction, SortField};

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Name,
    }

    impl SortField for Field {
        fn from_name(name: &str) -> Option<Self> {
            (name == "name").then_some(Field::Name)
        }
    }

    #[test]
    fn test_search_patterns() {
        let params = ListParams {
            search: Some("tomato 50%".to_string()),
            ordering: None,
        };
        assert_eq!(params.search_patterns(), vec!["%tomato%", "%50\\%%"]);
        assert!(ListParams::default().search_patterns().is_empty());
    }

    #[test]
    fn test_ordering() {
        let params = ListParams {
            search: None,
            ordering: Some("-name,bogus".to_string()),
        };
        let terms = params.ordering::<Field>();
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].direction, Direction::Desc);
        assert!(ListParams::default().ordering::<Field>().is_empty());
    }
}
