use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A bound parameter value. Compiled SQL carries these in placeholder order.
#[derive(Debug, Clone, PartialEq)]
pub enum FilterValue {
    Bool(bool),
    Number(f64),
    Text(String),
    Uuid(Uuid),
}

impl From<bool> for FilterValue {
    fn from(v: bool) -> Self {
        FilterValue::Bool(v)
    }
}

impl From<f64> for FilterValue {
    fn from(v: f64) -> Self {
        FilterValue::Number(v)
    }
}

impl From<&str> for FilterValue {
    fn from(v: &str) -> Self {
        FilterValue::Text(v.to_string())
    }
}

impl From<String> for FilterValue {
    fn from(v: String) -> Self {
        FilterValue::Text(v)
    }
}

impl From<Uuid> for FilterValue {
    fn from(v: Uuid) -> Self {
        FilterValue::Uuid(v)
    }
}

/// A single predicate.
///
/// Predicates are plain data: they compile to parameterised SQL through
/// [`FilterWhere`](super::filter_where::FilterWhere) and evaluate directly
/// against any [`FieldSource`], with the same semantics in both places.
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Eq { column: String, value: FilterValue },
    Gte { column: String, value: FilterValue },
    Lte { column: String, value: FilterValue },
    /// Case-insensitive substring match.
    ILike { column: String, needle: String },
    /// Case-insensitive substring match on a key of a JSON object column.
    JsonILike { column: String, key: String, needle: String },
    Any(Vec<Predicate>),
}

impl Predicate {
    pub fn eq(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Predicate::Eq { column: column.into(), value: value.into() }
    }

    pub fn gte(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Predicate::Gte { column: column.into(), value: value.into() }
    }

    pub fn lte(column: impl Into<String>, value: impl Into<FilterValue>) -> Self {
        Predicate::Lte { column: column.into(), value: value.into() }
    }

    pub fn contains(column: impl Into<String>, needle: impl Into<String>) -> Self {
        Predicate::ILike { column: column.into(), needle: needle.into() }
    }

    pub fn json_contains(column: impl Into<String>, key: impl Into<String>, needle: impl Into<String>) -> Self {
        Predicate::JsonILike { column: column.into(), key: key.into(), needle: needle.into() }
    }

    pub fn any(predicates: Vec<Predicate>) -> Self {
        Predicate::Any(predicates)
    }
}

/// Column value read from an in-memory record.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    Uuid(Uuid),
    Timestamp(DateTime<Utc>),
    Json(serde_json::Value),
}

impl<T: Into<FieldValue>> From<Option<T>> for FieldValue {
    fn from(v: Option<T>) -> Self {
        v.map(Into::into).unwrap_or(FieldValue::Null)
    }
}

impl From<bool> for FieldValue {
    fn from(v: bool) -> Self {
        FieldValue::Bool(v)
    }
}

impl From<f64> for FieldValue {
    fn from(v: f64) -> Self {
        FieldValue::Number(v)
    }
}

impl From<String> for FieldValue {
    fn from(v: String) -> Self {
        FieldValue::Text(v)
    }
}

impl From<&String> for FieldValue {
    fn from(v: &String) -> Self {
        FieldValue::Text(v.clone())
    }
}

impl From<Uuid> for FieldValue {
    fn from(v: Uuid) -> Self {
        FieldValue::Uuid(v)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(v: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(v)
    }
}

/// Records that predicates and orderings can be evaluated against without a database.
pub trait FieldSource {
    /// Value of `column`, or `FieldValue::Null` for unknown columns.
    fn field(&self, column: &str) -> FieldValue;
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn to_sql(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct FilterOrderInfo {
    pub column: String,
    pub sort: SortDirection,
}

impl FilterOrderInfo {
    pub fn desc(column: impl Into<String>) -> Self {
        Self { column: column.into(), sort: SortDirection::Desc }
    }

    pub fn asc(column: impl Into<String>) -> Self {
        Self { column: column.into(), sort: SortDirection::Asc }
    }
}

/// Inclusive row range, `from..=to`, zero-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RowRange {
    pub from: i64,
    pub to: i64,
}

impl RowRange {
    pub fn limit(&self) -> i64 {
        self.to - self.from + 1
    }

    pub fn offset(&self) -> i64 {
        self.from
    }
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<FilterValue>,
}
