use super::error::FilterError;
use super::filter_order::FilterOrder;
use super::filter_where::FilterWhere;
use super::types::{FieldSource, FilterOrderInfo, Predicate, RowRange, SqlResult};

/// A complete read specification: table, predicates, ordering and row range.
///
/// The same `Filter` renders page SQL, count SQL, or runs in memory, so a page
/// query and its count query only differ in the parts they choose to use.
#[derive(Debug, Clone)]
pub struct Filter {
    table_name: String,
    predicates: Vec<Predicate>,
    order_data: Vec<FilterOrderInfo>,
    range: Option<RowRange>,
}

impl Filter {
    pub fn new(table_name: impl Into<String>) -> Result<Self, FilterError> {
        let table_name = table_name.into();
        validate_identifier(&table_name).map_err(FilterError::InvalidTableName)?;
        Ok(Self {
            table_name,
            predicates: vec![],
            order_data: vec![],
            range: None,
        })
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    pub fn predicates(&self) -> &[Predicate] {
        &self.predicates
    }

    pub fn order_data(&self) -> &[FilterOrderInfo] {
        &self.order_data
    }

    pub fn row_range(&self) -> Option<RowRange> {
        self.range
    }

    pub fn where_all(mut self, predicates: Vec<Predicate>) -> Self {
        self.predicates.extend(predicates);
        self
    }

    pub fn order(mut self, order: Vec<FilterOrderInfo>) -> Self {
        self.order_data = order;
        self
    }

    /// Restrict to the inclusive row range `from..=to`.
    pub fn range(mut self, from: i64, to: i64) -> Result<Self, FilterError> {
        if from < 0 {
            return Err(FilterError::InvalidRange("Range start must be non-negative".to_string()));
        }
        if to < from {
            return Err(FilterError::InvalidRange(format!("Range end {} precedes start {}", to, from)));
        }
        self.range = Some(RowRange { from, to });
        Ok(self)
    }

    pub fn to_sql(&self) -> Result<SqlResult, FilterError> {
        let (where_clause, params) = FilterWhere::generate(&self.predicates, 0)?;
        let order_clause = FilterOrder::generate(&self.order_data)?;
        let limit_clause = self.build_limit_clause();

        let query = [
            "SELECT *".to_string(),
            format!("FROM \"{}\"", self.table_name),
            format!("WHERE {}", where_clause),
            order_clause,
            limit_clause,
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        Ok(SqlResult { query, params })
    }

    pub fn to_where_sql(&self) -> Result<SqlResult, FilterError> {
        let (where_clause, params) = FilterWhere::generate(&self.predicates, 0)?;
        Ok(SqlResult { query: where_clause, params })
    }

    /// Count query over the same predicates; ordering and range are ignored.
    pub fn to_count_sql(&self) -> Result<SqlResult, FilterError> {
        let where_result = self.to_where_sql()?;
        let query = format!(
            "SELECT COUNT(*) AS count FROM \"{}\" WHERE {}",
            self.table_name, where_result.query
        );
        Ok(SqlResult { query, params: where_result.params })
    }

    /// Apply predicates, ordering and range to in-memory rows.
    pub fn apply<T: FieldSource + Clone>(&self, rows: &[T]) -> Vec<T> {
        let mut matched: Vec<&T> = rows
            .iter()
            .filter(|row| FilterWhere::matches(&self.predicates, *row))
            .collect();
        if !self.order_data.is_empty() {
            // stable sort keeps insertion order for full ties
            matched.sort_by(|a, b| FilterOrder::compare(&self.order_data, *a, *b));
        }
        let iter = matched.into_iter().cloned();
        match self.range {
            Some(r) => iter.skip(r.offset() as usize).take(r.limit() as usize).collect(),
            None => iter.collect(),
        }
    }

    pub fn count_matching<T: FieldSource>(&self, rows: &[T]) -> i64 {
        rows.iter()
            .filter(|row| FilterWhere::matches(&self.predicates, *row))
            .count() as i64
    }

    fn build_limit_clause(&self) -> String {
        match self.range {
            Some(r) => format!("LIMIT {} OFFSET {}", r.limit(), r.offset()),
            None => String::new(),
        }
    }
}

pub(crate) fn validate_column(name: &str) -> Result<(), FilterError> {
    validate_identifier(name).map_err(FilterError::InvalidColumn)
}

fn validate_identifier(name: &str) -> Result<(), String> {
    let mut chars = name.chars();
    let first = match chars.next() {
        Some(c) => c,
        None => return Err("Identifier cannot be empty".to_string()),
    };
    if !(first.is_ascii_alphabetic() || first == '_') || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(format!("Invalid identifier format: {}", name));
    }
    Ok(())
}
