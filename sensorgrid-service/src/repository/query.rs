//! List query construction
//!
//! Turns optional, untrusted filter inputs into a deterministic pair of SQL
//! statements: a `COUNT(*)`-style statement and a row-selecting statement
//! sharing one WHERE clause. Two rules keep the output injection-safe:
//!
//! - identifiers that user input can influence (the ORDER BY column) pass
//!   through a whitelist and fall back to a fixed default otherwise;
//! - every filter value travels as a bound parameter, including the
//!   wildcard-wrapped search term. LIMIT/OFFSET are formatted inline only
//!   because the pagination resolver has already bounded them.

use uuid::Uuid;

/// Fallback ORDER BY clause when the sort token is absent or not whitelisted
pub const DEFAULT_SORT: &str = "created_at DESC";

/// Resolve a user-supplied sort token into a `column direction` clause
///
/// A `-` prefix selects descending order. Tokens naming a column outside the
/// whitelist are silently ignored in favor of [`DEFAULT_SORT`]; bound
/// parameters cannot cover identifiers, so the whitelist is the sole defense
/// for this clause.
#[must_use]
pub fn resolve_sort(token: &str, whitelist: &[&str]) -> String {
    if !token.is_empty() {
        let (column, direction) = match token.strip_prefix('-') {
            Some(column) => (column, "DESC"),
            None => (token, "ASC"),
        };

        if whitelist.contains(&column) {
            return format!("{column} {direction}");
        }
    }

    DEFAULT_SORT.to_string()
}

/// A value bound positionally into a statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BindValue {
    Text(String),
    Uuid(Uuid),
}

impl From<String> for BindValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<&str> for BindValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<Uuid> for BindValue {
    fn from(value: Uuid) -> Self {
        Self::Uuid(value)
    }
}

/// A conditional SQL fragment plus its bound values
///
/// Fragments use `?` markers which the builder renumbers into `$n`
/// placeholders. Predicates exist only for active filters; an unset filter
/// never reaches the builder, so it cannot restrict results.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Predicate {
    fragment: String,
    values: Vec<BindValue>,
}

impl Predicate {
    /// Substring search over name and description
    ///
    /// Returns `None` for an empty keyword. The wildcards wrap the bound
    /// value, never the SQL text, so `%`, `_`, quotes and comment markers in
    /// the keyword stay literal data.
    #[must_use]
    pub fn search(keyword: &str) -> Option<Self> {
        if keyword.is_empty() {
            return None;
        }

        let wildcarded = format!("%{keyword}%");
        Some(Self {
            fragment: "(name LIKE ? OR description LIKE ?)".to_string(),
            values: vec![BindValue::Text(wildcarded.clone()), BindValue::Text(wildcarded)],
        })
    }

    /// Exact match on a column
    ///
    /// `column` must be a trusted, compile-time identifier; only the value is
    /// user input, and it is bound.
    #[must_use]
    pub fn equals(column: &'static str, value: impl Into<BindValue>) -> Self {
        Self {
            fragment: format!("{column} = ?"),
            values: vec![value.into()],
        }
    }
}

/// The count/data statement pair produced by [`build_list_queries`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQueries {
    pub count_sql: String,
    pub data_sql: String,
    pub binds: Vec<BindValue>,
}

/// Build the count and data statements for a list operation
///
/// Both statements share a WHERE clause joining the active predicates with
/// `AND`; the data statement additionally carries the resolved sort clause
/// and the bounded limit/offset. Bind values are collected positionally in
/// predicate order and apply identically to both statements.
#[must_use]
pub fn build_list_queries(
    count_base: &str,
    select_base: &str,
    predicates: Vec<Predicate>,
    order_by: &str,
    limit: i64,
    offset: i64,
) -> ListQueries {
    let mut where_parts = Vec::with_capacity(predicates.len());
    let mut binds = Vec::new();
    let mut placeholder = 1;

    for predicate in predicates {
        debug_assert_eq!(
            predicate.fragment.matches('?').count(),
            predicate.values.len(),
            "predicate markers must match its bound values"
        );

        let mut fragment = String::with_capacity(predicate.fragment.len() + 4);
        for ch in predicate.fragment.chars() {
            if ch == '?' {
                fragment.push_str(&format!("${placeholder}"));
                placeholder += 1;
            } else {
                fragment.push(ch);
            }
        }

        where_parts.push(fragment);
        binds.extend(predicate.values);
    }

    let where_clause = if where_parts.is_empty() {
        String::new()
    } else {
        format!(" WHERE {}", where_parts.join(" AND "))
    };

    ListQueries {
        count_sql: format!("{count_base}{where_clause}"),
        data_sql: format!(
            "{select_base}{where_clause} ORDER BY {order_by} LIMIT {limit} OFFSET {offset}"
        ),
        binds,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const WHITELIST: &[&str] = &["name", "created_at", "updated_at"];

    #[test]
    fn test_resolve_sort_empty_token_uses_default() {
        assert_eq!(resolve_sort("", WHITELIST), "created_at DESC");
    }

    #[test]
    fn test_resolve_sort_ascending() {
        assert_eq!(resolve_sort("name", WHITELIST), "name ASC");
        assert_eq!(resolve_sort("updated_at", WHITELIST), "updated_at ASC");
    }

    #[test]
    fn test_resolve_sort_descending_prefix() {
        assert_eq!(resolve_sort("-name", WHITELIST), "name DESC");
        assert_eq!(resolve_sort("-created_at", WHITELIST), "created_at DESC");
    }

    #[test]
    fn test_resolve_sort_unknown_column_falls_back() {
        assert_eq!(resolve_sort("price", WHITELIST), "created_at DESC");
        assert_eq!(resolve_sort("-price", WHITELIST), "created_at DESC");
    }

    #[test]
    fn test_resolve_sort_rejects_sql_metacharacters() {
        assert_eq!(
            resolve_sort("name; DROP TABLE devices--", WHITELIST),
            "created_at DESC"
        );
        assert_eq!(resolve_sort("name DESC", WHITELIST), "created_at DESC");
        assert_eq!(resolve_sort("--", WHITELIST), "created_at DESC");
        assert_eq!(resolve_sort("name'", WHITELIST), "created_at DESC");
    }

    #[test]
    fn test_search_predicate_inactive_when_empty() {
        assert_eq!(Predicate::search(""), None);
    }

    #[test]
    fn test_search_predicate_wildcards_the_bind_not_the_sql() {
        let predicate = Predicate::search("rasp").unwrap();
        assert_eq!(predicate.fragment, "(name LIKE ? OR description LIKE ?)");
        assert_eq!(
            predicate.values,
            vec![
                BindValue::Text("%rasp%".to_string()),
                BindValue::Text("%rasp%".to_string()),
            ]
        );
    }

    #[test]
    fn test_search_predicate_keeps_metacharacters_literal() {
        let predicate = Predicate::search("100%_'--").unwrap();
        // The hostile keyword never appears in the SQL text, only in binds.
        assert_eq!(predicate.fragment, "(name LIKE ? OR description LIKE ?)");
        assert_eq!(
            predicate.values[0],
            BindValue::Text("%100%_'--%".to_string())
        );
    }

    #[test]
    fn test_equals_predicate() {
        let id = Uuid::parse_str("d2431891-c5e4-462d-bf9b-7a194d5bebda").unwrap();
        let predicate = Predicate::equals("device_id", id);
        assert_eq!(predicate.fragment, "device_id = ?");
        assert_eq!(predicate.values, vec![BindValue::Uuid(id)]);
    }

    #[test]
    fn test_build_without_predicates() {
        let queries = build_list_queries(
            "SELECT COUNT(id) FROM devices",
            "SELECT id, name FROM devices",
            vec![],
            "created_at DESC",
            10,
            0,
        );
        assert_eq!(queries.count_sql, "SELECT COUNT(id) FROM devices");
        assert_eq!(
            queries.data_sql,
            "SELECT id, name FROM devices ORDER BY created_at DESC LIMIT 10 OFFSET 0"
        );
        assert!(queries.binds.is_empty());
    }

    #[test]
    fn test_build_with_search_shares_where_clause() {
        let queries = build_list_queries(
            "SELECT COUNT(id) FROM devices",
            "SELECT id, name FROM devices",
            vec![Predicate::search("rasp").unwrap()],
            "name DESC",
            10,
            0,
        );
        assert_eq!(
            queries.count_sql,
            "SELECT COUNT(id) FROM devices WHERE (name LIKE $1 OR description LIKE $2)"
        );
        assert_eq!(
            queries.data_sql,
            "SELECT id, name FROM devices WHERE (name LIKE $1 OR description LIKE $2) \
             ORDER BY name DESC LIMIT 10 OFFSET 0"
        );
        assert_eq!(queries.binds.len(), 2);
    }

    #[test]
    fn test_build_joins_predicates_with_and_and_renumbers() {
        let id = Uuid::parse_str("d2431891-c5e4-462d-bf9b-7a194d5bebda").unwrap();
        let queries = build_list_queries(
            "SELECT COUNT(id) FROM sensors",
            "SELECT id, name FROM sensors",
            vec![
                Predicate::search("tank").unwrap(),
                Predicate::equals("device_id", id),
            ],
            "created_at DESC",
            25,
            50,
        );
        assert_eq!(
            queries.count_sql,
            "SELECT COUNT(id) FROM sensors \
             WHERE (name LIKE $1 OR description LIKE $2) AND device_id = $3"
        );
        assert_eq!(
            queries.data_sql,
            "SELECT id, name FROM sensors \
             WHERE (name LIKE $1 OR description LIKE $2) AND device_id = $3 \
             ORDER BY created_at DESC LIMIT 25 OFFSET 50"
        );
        assert_eq!(
            queries.binds,
            vec![
                BindValue::Text("%tank%".to_string()),
                BindValue::Text("%tank%".to_string()),
                BindValue::Uuid(id),
            ]
        );
    }

    #[test]
    fn test_build_equality_only() {
        let id = Uuid::nil();
        let queries = build_list_queries(
            "SELECT COUNT(id) FROM sensors",
            "SELECT id FROM sensors",
            vec![Predicate::equals("device_id", id)],
            "created_at DESC",
            10,
            0,
        );
        assert_eq!(
            queries.count_sql,
            "SELECT COUNT(id) FROM sensors WHERE device_id = $1"
        );
        assert_eq!(queries.binds, vec![BindValue::Uuid(id)]);
    }
}
