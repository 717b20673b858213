//! Execution boundary.
//!
//! sqlq never opens connections. An [`Executor`] receives the rendered SQL and
//! its arguments and runs them; the statement builders only pick the dialect
//! the executor asks for.

use crate::dialect::Dialect;
use crate::error::QResult;
use crate::value::Value;

/// Something that can run rendered SQL.
///
/// Implemented for `tokio_postgres::Client` and `tokio_postgres::Transaction`
/// with the `postgres` feature.
pub trait Executor: Sync {
    /// Row type produced by queries.
    type Row: Send;

    /// Dialect statements are rendered with before being passed here.
    fn dialect(&self) -> Dialect;

    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = QResult<Vec<Self::Row>>> + Send;

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        args: &[Value],
    ) -> impl std::future::Future<Output = QResult<u64>> + Send;
}

/// Truncate SQL for logging without splitting a character.
#[cfg_attr(not(all(feature = "tracing", feature = "postgres")), allow(dead_code))]
pub(crate) fn truncate_sql(sql: &str, max_len: Option<usize>) -> &str {
    match max_len {
        Some(max) if sql.len() > max => {
            let mut end = max;
            while !sql.is_char_boundary(end) {
                end -= 1;
            }
            &sql[..end]
        }
        _ => sql,
    }
}

#[cfg(feature = "postgres")]
pub(crate) fn params_ref(args: &[Value]) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
    args.iter()
        .map(|v| v as &(dyn tokio_postgres::types::ToSql + Sync))
        .collect()
}

#[cfg(feature = "postgres")]
mod postgres {
    use super::{Executor, params_ref};
    use crate::dialect::Dialect;
    use crate::error::QResult;
    use crate::value::Value;
    use tokio_postgres::Row;

    #[cfg(feature = "tracing")]
    fn log_execution(sql: &str, args: &[Value]) {
        sql_log!(
            debug,
            arg_count = args.len(),
            sql = super::truncate_sql(sql, crate::config::log_sql_max_len()),
            "executing statement"
        );
    }

    #[cfg(not(feature = "tracing"))]
    fn log_execution(_sql: &str, _args: &[Value]) {}

    impl Executor for tokio_postgres::Client {
        type Row = Row;

        fn dialect(&self) -> Dialect {
            Dialect::PostgreSql
        }

        async fn query(&self, sql: &str, args: &[Value]) -> QResult<Vec<Row>> {
            log_execution(sql, args);
            Ok(tokio_postgres::Client::query(self, sql, &params_ref(args)).await?)
        }

        async fn execute(&self, sql: &str, args: &[Value]) -> QResult<u64> {
            log_execution(sql, args);
            Ok(tokio_postgres::Client::execute(self, sql, &params_ref(args)).await?)
        }
    }

    impl Executor for tokio_postgres::Transaction<'_> {
        type Row = Row;

        fn dialect(&self) -> Dialect {
            Dialect::PostgreSql
        }

        async fn query(&self, sql: &str, args: &[Value]) -> QResult<Vec<Row>> {
            log_execution(sql, args);
            Ok(tokio_postgres::Transaction::query(self, sql, &params_ref(args)).await?)
        }

        async fn execute(&self, sql: &str, args: &[Value]) -> QResult<u64> {
            log_execution(sql, args);
            Ok(tokio_postgres::Transaction::execute(self, sql, &params_ref(args)).await?)
        }
    }
}
