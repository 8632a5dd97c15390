use super::error::FilterError;
use super::filter::validate_column;
use super::types::{FieldSource, FieldValue, FilterValue, Predicate};

pub struct FilterWhere {
    param_values: Vec<FilterValue>,
    param_index: usize,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
        }
    }

    /// Compile predicates into a WHERE body (without the keyword) plus bound values.
    /// Top-level predicates are joined with AND; an empty list yields `1=1`.
    pub fn generate(predicates: &[Predicate], starting_param_index: usize) -> Result<(String, Vec<FilterValue>), FilterError> {
        let mut filter_where = Self::new(starting_param_index);
        let clause = filter_where.build_group(predicates, " AND ", "1=1")?;
        Ok((clause, filter_where.param_values))
    }

    /// True when the record satisfies every predicate.
    pub fn matches(predicates: &[Predicate], record: &dyn FieldSource) -> bool {
        predicates.iter().all(|p| Self::evaluate(p, record))
    }

    fn build_group(&mut self, predicates: &[Predicate], joiner: &str, empty: &str) -> Result<String, FilterError> {
        if predicates.is_empty() {
            return Ok(empty.to_string());
        }
        let mut parts = Vec::with_capacity(predicates.len());
        for predicate in predicates {
            parts.push(self.build_sql_condition(predicate)?);
        }
        Ok(parts.join(joiner))
    }

    fn build_sql_condition(&mut self, predicate: &Predicate) -> Result<String, FilterError> {
        match predicate {
            Predicate::Eq { column, value } => {
                validate_column(column)?;
                Ok(format!("\"{}\" = {}", column, self.param(value.clone())))
            }
            Predicate::Gte { column, value } => {
                validate_column(column)?;
                Ok(format!("\"{}\" >= {}", column, self.param(value.clone())))
            }
            Predicate::Lte { column, value } => {
                validate_column(column)?;
                Ok(format!("\"{}\" <= {}", column, self.param(value.clone())))
            }
            Predicate::ILike { column, needle } => {
                validate_column(column)?;
                Ok(format!("\"{}\" ILIKE {}", column, self.param(FilterValue::Text(like_pattern(needle)))))
            }
            Predicate::JsonILike { column, key, needle } => {
                validate_column(column)?;
                // key is inlined as a literal, so it gets the same check as a column name
                validate_column(key).map_err(|_| FilterError::InvalidOperatorData(format!("Invalid JSON key: {}", key)))?;
                Ok(format!(
                    "\"{}\"->>'{}' ILIKE {}",
                    column,
                    key,
                    self.param(FilterValue::Text(like_pattern(needle)))
                ))
            }
            Predicate::Any(group) => {
                let sql = self.build_group(group, " OR ", "1=0")?;
                Ok(format!("({})", sql))
            }
        }
    }

    fn param(&mut self, value: FilterValue) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }

    fn evaluate(predicate: &Predicate, record: &dyn FieldSource) -> bool {
        match predicate {
            Predicate::Eq { column, value } => field_equals(&record.field(column), value),
            Predicate::Gte { column, value } => {
                matches!(compare_field(&record.field(column), value), Some(o) if o.is_ge())
            }
            Predicate::Lte { column, value } => {
                matches!(compare_field(&record.field(column), value), Some(o) if o.is_le())
            }
            Predicate::ILike { column, needle } => match record.field(column) {
                FieldValue::Text(s) => contains_ignore_case(&s, needle),
                _ => false,
            },
            Predicate::JsonILike { column, key, needle } => match record.field(column) {
                FieldValue::Json(v) => v
                    .get(key)
                    .and_then(|inner| inner.as_str())
                    .map(|s| contains_ignore_case(s, needle))
                    .unwrap_or(false),
                _ => false,
            },
            Predicate::Any(group) => group.iter().any(|p| Self::evaluate(p, record)),
        }
    }
}

/// `%needle%` with LIKE metacharacters escaped (backslash is the default ESCAPE).
fn like_pattern(needle: &str) -> String {
    let mut out = String::with_capacity(needle.len() + 2);
    out.push('%');
    for c in needle.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('%');
    out
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

// NULL never compares equal, same as SQL.
fn field_equals(field: &FieldValue, value: &FilterValue) -> bool {
    match (field, value) {
        (FieldValue::Bool(a), FilterValue::Bool(b)) => a == b,
        (FieldValue::Number(a), FilterValue::Number(b)) => a == b,
        (FieldValue::Text(a), FilterValue::Text(b)) => a == b,
        (FieldValue::Uuid(a), FilterValue::Uuid(b)) => a == b,
        _ => false,
    }
}

fn compare_field(field: &FieldValue, value: &FilterValue) -> Option<std::cmp::Ordering> {
    match (field, value) {
        (FieldValue::Number(a), FilterValue::Number(b)) => a.partial_cmp(b),
        (FieldValue::Text(a), FilterValue::Text(b)) => Some(a.as_str().cmp(b.as_str())),
        _ => None,
    }
}
