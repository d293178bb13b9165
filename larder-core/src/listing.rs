//! `search` and `ordering` query parameters shared by all list endpoints.
//!
//! `ordering` is a comma separated list of field names, each optionally
//! prefixed with `-` for descending order (`ordering=-published,content`).
//! Unknown field names are ignored. `search` is split into terms on
//! whitespace and commas; a row matches when every term matches at least one
//! of the resource's search fields.

/// Field names a list endpoint allows ordering by.
pub trait SortField: Sized + Copy {
    fn from_name(name: &str) -> Option<Self>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OrderTerm<F> {
    pub field: F,
    pub direction: Direction,
}

pub fn parse_ordering<F: SortField>(raw: &str) -> Vec<OrderTerm<F>> {
    raw.split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .filter_map(|part| {
            let (direction, name) = match part.strip_prefix('-') {
                Some(name) => (Direction::Desc, name),
                None => (Direction::Asc, part),
            };
            F::from_name(name).map(|field| OrderTerm { field, direction })
        })
        .collect()
}

pub fn search_terms(raw: &str) -> Vec<String> {
    raw.split(|c: char| c.is_whitespace() || c == ',')
        .filter(|term| !term.is_empty())
        .map(str::to_string)
        .collect()
}

/// Build an `ILIKE` pattern matching `term` anywhere, with `%` and `_`
/// escaped so they match literally.
pub fn like_pattern(term: &str) -> String {
    let escaped = term
        .replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_");
    format!("%{}%", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Field {
        Title,
        Slug,
    }

    impl SortField for Field {
        fn from_name(name: &str) -> Option<Self> {
            match name {
                "title" => Some(Field::Title),
                "slug" => Some(Field::Slug),
                _ => None,
            }
        }
    }

    #[test]
    fn test_parse_empty_ordering() {
        assert!(parse_ordering::<Field>("").is_empty());
        assert!(parse_ordering::<Field>(" , ").is_empty());
    }

    #[test]
    fn test_parse_ordering_directions() {
        let terms = parse_ordering::<Field>("-title, slug");
        assert_eq!(
            terms,
            vec![
                OrderTerm {
                    field: Field::Title,
                    direction: Direction::Desc
                },
                OrderTerm {
                    field: Field::Slug,
                    direction: Direction::Asc
                },
            ]
        );
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let terms = parse_ordering::<Field>("password,-title");
        assert_eq!(terms.len(), 1);
        assert_eq!(terms[0].field, Field::Title);
    }

    #[test]
    fn test_search_terms() {
        assert_eq!(search_terms("tomato  soup,quick"), vec!["tomato", "soup", "quick"]);
        assert!(search_terms("  ").is_empty());
    }

    #[test]
    fn test_like_pattern_escapes() {
        assert_eq!(like_pattern("soup"), "%soup%");
        assert_eq!(like_pattern("100%_x"), "%100\\%\\_x%");
    }
}
