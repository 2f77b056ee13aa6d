use serde_json::Value;
use std::cmp::Ordering;

/// A single predicate against one record field. Field names are the JSON
/// keys as stored (camelCase, `Id`).
#[derive(Debug, Clone)]
pub enum Filter {
    /// Exact value equality.
    Eq(String, Value),
    /// Case-insensitive substring match on a string field.
    ContainsCi(String, String),
    /// Case-insensitive substring match on any of the listed string fields.
    AnyContainsCi(Vec<String>, String),
    /// Field >= value (numeric, or lexicographic for strings such as ISO dates).
    Gte(String, Value),
    /// Field <= value.
    Lte(String, Value),
    /// String field starts with the given prefix.
    StartsWith(String, String),
}

/// Projection + filter query against one collection. All filters must hold
/// for a record to match; an empty query matches everything.
#[derive(Debug, Clone, Default)]
pub struct Query {
    fields: Option<Vec<String>>,
    filters: Vec<Filter>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restrict the returned records to the listed fields.
    pub fn fields(mut self, fields: &[&str]) -> Self {
        self.fields = Some(fields.iter().map(|f| f.to_string()).collect());
        self
    }

    pub fn eq(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Eq(field.to_string(), value.into()));
        self
    }

    pub fn contains_ci(mut self, field: &str, needle: &str) -> Self {
        self.filters
            .push(Filter::ContainsCi(field.to_string(), needle.to_string()));
        self
    }

    pub fn any_contains_ci(mut self, fields: &[&str], needle: &str) -> Self {
        self.filters.push(Filter::AnyContainsCi(
            fields.iter().map(|f| f.to_string()).collect(),
            needle.to_string(),
        ));
        self
    }

    pub fn gte(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Gte(field.to_string(), value.into()));
        self
    }

    pub fn lte(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.filters.push(Filter::Lte(field.to_string(), value.into()));
        self
    }

    pub fn starts_with(mut self, field: &str, prefix: &str) -> Self {
        self.filters
            .push(Filter::StartsWith(field.to_string(), prefix.to_string()));
        self
    }

    pub(crate) fn matches(&self, record: &Value) -> bool {
        self.filters.iter().all(|f| filter_matches(f, record))
    }

    /// Apply the field projection, if any, to a matching record.
    pub(crate) fn project(&self, record: &Value) -> Value {
        match (&self.fields, record.as_object()) {
            (Some(fields), Some(obj)) => {
                let mut out = serde_json::Map::new();
                for field in fields {
                    if let Some(v) = obj.get(field) {
                        out.insert(field.clone(), v.clone());
                    }
                }
                Value::Object(out)
            }
            _ => record.clone(),
        }
    }
}

fn filter_matches(filter: &Filter, record: &Value) -> bool {
    match filter {
        Filter::Eq(field, value) => record.get(field) == Some(value),
        Filter::ContainsCi(field, needle) => str_field(record, field)
            .map(|s| s.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false),
        Filter::AnyContainsCi(fields, needle) => {
            let needle = needle.to_lowercase();
            fields.iter().any(|field| {
                str_field(record, field)
                    .map(|s| s.to_lowercase().contains(&needle))
                    .unwrap_or(false)
            })
        }
        Filter::Gte(field, value) => {
            matches!(
                record.get(field).and_then(|v| compare(v, value)),
                Some(Ordering::Greater | Ordering::Equal)
            )
        }
        Filter::Lte(field, value) => {
            matches!(
                record.get(field).and_then(|v| compare(v, value)),
                Some(Ordering::Less | Ordering::Equal)
            )
        }
        Filter::StartsWith(field, prefix) => str_field(record, field)
            .map(|s| s.starts_with(prefix.as_str()))
            .unwrap_or(false),
    }
}

fn str_field<'a>(record: &'a Value, field: &str) -> Option<&'a str> {
    record.get(field).and_then(Value::as_str)
}

/// Strings compare lexicographically (ISO dates order correctly); numbers
/// compare as f64. Mixed types do not compare.
fn compare(a: &Value, b: &Value) -> Option<Ordering> {
    match (a, b) {
        (Value::String(a), Value::String(b)) => Some(a.as_str().cmp(b.as_str())),
        (Value::Number(a), Value::Number(b)) => a.as_f64()?.partial_cmp(&b.as_f64()?),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn eq_matches_exact_values() {
        let q = Query::new().eq("department", "Engineering");
        assert!(q.matches(&json!({ "department": "Engineering" })));
        assert!(!q.matches(&json!({ "department": "Sales" })));
        assert!(!q.matches(&json!({})));
    }

    #[test]
    fn contains_is_case_insensitive() {
        let q = Query::new().contains_ci("role", "ENG");
        assert!(q.matches(&json!({ "role": "Software Engineer" })));
        assert!(!q.matches(&json!({ "role": "Sales Rep" })));
    }

    #[test]
    fn any_contains_matches_across_fields() {
        let q = Query::new().any_contains_ci(&["firstName", "role"], "eng");
        assert!(q.matches(&json!({ "firstName": "Ann", "role": "Engineer" })));
        assert!(!q.matches(&json!({ "firstName": "Ann", "role": "Designer" })));
    }

    #[test]
    fn range_filters_order_iso_dates() {
        let q = Query::new().gte("date", "2026-08-01").lte("date", "2026-08-31");
        assert!(q.matches(&json!({ "date": "2026-08-15" })));
        assert!(!q.matches(&json!({ "date": "2026-07-31" })));
        assert!(!q.matches(&json!({ "date": "2026-09-01" })));
    }

    #[test]
    fn starts_with_matches_date_prefixes() {
        let q = Query::new().starts_with("date", "2026-08-");
        assert!(q.matches(&json!({ "date": "2026-08-15" })));
        assert!(!q.matches(&json!({ "date": "2026-09-01" })));
        // Non-string fields never match.
        assert!(!q.matches(&json!({ "date": 20260815 })));
    }

    #[test]
    fn projection_keeps_only_listed_fields() {
        let q = Query::new().fields(&["Id", "name"]);
        let projected = q.project(&json!({ "Id": 1, "name": "Sales", "managerId": 4 }));
        assert_eq!(projected, json!({ "Id": 1, "name": "Sales" }));
    }
}
