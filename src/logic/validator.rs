//! Validator module for checking physical SQL before it is executed.
use crate::*;
use sqlparser::{ast::Statement, dialect::SQLiteDialect, parser::Parser};
use sqlx::{Executor as _, SqlSafeStr, SqlitePool, sqlite::SqliteStatement};

static SQLITE: SQLiteDialect = SQLiteDialect {};

pub struct Validator {
    pool: SqlitePool,
}

impl Validator {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Check that `sql` is exactly one SQLite query.
    pub fn syntax(sql: &str) -> Result {
        let statements = Parser::parse_sql(&SQLITE, sql)?;
        match statements.as_slice() {
            [Statement::Query(_)] => Ok(()),
            [other] => Err(Error::InvalidPhysical(format!("not a query: {other}"))),
            many => Err(Error::InvalidPhysical(format!(
                "expected one statement, found {}",
                many.len()
            ))),
        }
    }

    /// Prepare `sql` on the pool, resolving its tables and columns.
    pub async fn sql(&self, sql: impl SqlSafeStr) -> Result<SqliteStatement> {
        self.pool.prepare(sql.into_sql_str()).await.map_err(Into::into)
    }
}
