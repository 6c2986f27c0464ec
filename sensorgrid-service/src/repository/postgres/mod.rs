//! PostgreSQL-backed repository
//!
//! Row structs mirror the table layout and convert into domain entities;
//! enum-valued columns are stored as text and checked on the way out.

mod device;
mod sensor;

use sqlx::PgPool;

use super::query::BindValue;

/// PostgreSQL implementation of the repository traits
#[derive(Clone)]
pub struct PgRepository {
    pool: PgPool,
}

impl PgRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub(crate) fn pool(&self) -> &PgPool {
        &self.pool
    }
}

/// Apply collected bind values to a scalar query in positional order
pub(crate) fn bind_scalar<'q, O>(
    mut query: sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryScalar<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for value in binds {
        query = match value {
            BindValue::Text(text) => query.bind(text),
            BindValue::Uuid(id) => query.bind(id),
        };
    }
    query
}

/// Apply collected bind values to a row query in positional order
pub(crate) fn bind_rows<'q, O>(
    mut query: sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments>,
    binds: &'q [BindValue],
) -> sqlx::query::QueryAs<'q, sqlx::Postgres, O, sqlx::postgres::PgArguments> {
    for value in binds {
        query = match value {
            BindValue::Text(text) => query.bind(text),
            BindValue::Uuid(id) => query.bind(id),
        };
    }
    query
}
