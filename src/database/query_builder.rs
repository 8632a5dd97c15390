use sqlx::{self, postgres::PgArguments, FromRow, PgPool, Row};

use crate::database::manager::DatabaseError;
use crate::filter::{Filter, FilterValue};

/// Executes a compiled [`Filter`] against a PostgreSQL pool, mapping rows to `T`.
pub struct QueryBuilder<T> {
    filter: Filter,
    _phantom: std::marker::PhantomData<T>,
}

impl<T> QueryBuilder<T>
where
    T: for<'r> FromRow<'r, sqlx::postgres::PgRow> + Send + Unpin,
{
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            _phantom: std::marker::PhantomData,
        }
    }

    pub async fn select_all(&self, pool: &PgPool) -> Result<Vec<T>, DatabaseError> {
        let sql_result = self.filter.to_sql()?;
        tracing::debug!(query = %sql_result.query, params = sql_result.params.len(), "select");
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let rows = q.fetch_all(pool).await?;
        Ok(rows)
    }

    pub async fn select_optional(&self, pool: &PgPool) -> Result<Option<T>, DatabaseError> {
        let sql_result = self.filter.to_sql()?;
        tracing::debug!(query = %sql_result.query, params = sql_result.params.len(), "select one");
        let mut q = sqlx::query_as::<_, T>(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query_as(q, p);
        }
        let row = q.fetch_optional(pool).await?;
        Ok(row)
    }

    pub async fn count(&self, pool: &PgPool) -> Result<i64, DatabaseError> {
        let sql_result = self.filter.to_count_sql()?;
        tracing::debug!(query = %sql_result.query, params = sql_result.params.len(), "count");
        let mut q = sqlx::query(&sql_result.query);
        for p in sql_result.params.iter() {
            q = bind_param_query(q, p);
        }
        let row = q.fetch_one(pool).await?;
        let count: i64 = row.try_get("count")?;
        Ok(count)
    }
}

fn bind_param_query<'q>(
    q: sqlx::query::Query<'q, sqlx::Postgres, PgArguments>,
    v: &'q FilterValue,
) -> sqlx::query::Query<'q, sqlx::Postgres, PgArguments> {
    match v {
        FilterValue::Bool(b) => q.bind(*b),
        FilterValue::Number(n) => q.bind(*n),
        FilterValue::Text(s) => q.bind(s.as_str()),
        FilterValue::Uuid(u) => q.bind(*u),
    }
}

fn bind_param_query_as<'q, O>(
    q: sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>,
    v: &'q FilterValue,
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, PgArguments>
where
    O: for<'r> FromRow<'r, sqlx::postgres::PgRow>,
{
    match v {
        FilterValue::Bool(b) => q.bind(*b),
        FilterValue::Number(n) => q.bind(*n),
        FilterValue::Text(s) => q.bind(s.as_str()),
        FilterValue::Uuid(u) => q.bind(*u),
    }
}
