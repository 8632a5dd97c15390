use std::cmp::Ordering;

use super::error::FilterError;
use super::filter::validate_column;
use super::types::{FieldSource, FieldValue, FilterOrderInfo, SortDirection};

pub struct FilterOrder;

impl FilterOrder {
    pub fn generate(infos: &[FilterOrderInfo]) -> Result<String, FilterError> {
        if infos.is_empty() {
            return Ok(String::new());
        }
        let mut parts = Vec::with_capacity(infos.len());
        for info in infos {
            validate_column(&info.column)?;
            parts.push(format!("\"{}\" {}", info.column, info.sort.to_sql()));
        }
        Ok(format!("ORDER BY {}", parts.join(", ")))
    }

    /// Compare two records the way PostgreSQL orders them for the same ORDER BY.
    pub fn compare(infos: &[FilterOrderInfo], a: &dyn FieldSource, b: &dyn FieldSource) -> Ordering {
        for info in infos {
            let ord = compare_values(&a.field(&info.column), &b.field(&info.column));
            let ord = match info.sort {
                SortDirection::Asc => ord,
                SortDirection::Desc => ord.reverse(),
            };
            if ord != Ordering::Equal {
                return ord;
            }
        }
        Ordering::Equal
    }
}

// Postgres sorts NULL as larger than any value: last for ASC, first for DESC.
fn compare_values(a: &FieldValue, b: &FieldValue) -> Ordering {
    match (a, b) {
        (FieldValue::Null, FieldValue::Null) => Ordering::Equal,
        (FieldValue::Null, _) => Ordering::Greater,
        (_, FieldValue::Null) => Ordering::Less,
        (FieldValue::Bool(x), FieldValue::Bool(y)) => x.cmp(y),
        (FieldValue::Number(x), FieldValue::Number(y)) => x.partial_cmp(y).unwrap_or(Ordering::Equal),
        (FieldValue::Text(x), FieldValue::Text(y)) => x.cmp(y),
        (FieldValue::Uuid(x), FieldValue::Uuid(y)) => x.cmp(y),
        (FieldValue::Timestamp(x), FieldValue::Timestamp(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}
