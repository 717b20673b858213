//! Trait definitions for statement builders.

use crate::client::Executor;
use crate::config::default_dialect;
use crate::dialect::Dialect;
use crate::error::QResult;
use crate::qb::context::RenderContext;
use crate::qb::prepared::Prepared;
use crate::value::{Value, fmt_args};
use std::fmt;

/// Base trait for all statement builders.
///
/// Implementors only describe how to write themselves; rendering, display and
/// execution are provided on top of that.
pub trait Statement {
    /// Leading keyword used in logs, e.g. `"SELECT"`.
    fn kind(&self) -> &'static str;

    /// Dialect set on the builder itself, if any.
    fn dialect_override(&self) -> Option<Dialect>;

    /// Whether rendering starts in definition mode.
    fn is_mutation(&self) -> bool;

    /// Check builder state before rendering.
    fn validate(&self) -> QResult<()> {
        Ok(())
    }

    /// Append the statement's SQL and bind its values. Only called after
    /// [`Statement::validate`] succeeded.
    fn write(&self, ctx: &mut RenderContext, out: &mut String);

    /// The dialect used by [`Statement::to_sql`]: the builder's own, else the
    /// process default, else `Generic`.
    fn dialect(&self) -> Dialect {
        self.dialect_override().unwrap_or_else(default_dialect)
    }

    /// Render with the builder's dialect.
    fn to_sql(&self) -> QResult<BuiltQuery> {
        self.to_sql_with(self.dialect())
    }

    /// Render with an explicit dialect.
    fn to_sql_with(&self, dialect: Dialect) -> QResult<BuiltQuery> {
        let (sql, args, _) = render(self, dialect)?;
        Ok(BuiltQuery { sql, args })
    }

    /// Render with the builder's dialect, keeping the slots of keyed values.
    fn to_prepared(&self) -> QResult<Prepared> {
        self.to_prepared_with(self.dialect())
    }

    /// Render with an explicit dialect, keeping the slots of keyed values.
    fn to_prepared_with(&self, dialect: Dialect) -> QResult<Prepared> {
        let (sql, args, slots) = render(self, dialect)?;
        Ok(Prepared::new(sql, args, slots))
    }

    /// Dialect-independent `sql [args]` string for logs and tests.
    fn to_display_string(&self) -> String {
        match self.to_sql_with(Dialect::Generic) {
            Ok(q) => q.to_string(),
            Err(e) => format!("<invalid SQL: {e}>"),
        }
    }

    /// Render with the executor's dialect and return all rows.
    fn fetch_all<E: Executor>(
        &self,
        exec: &E,
    ) -> impl std::future::Future<Output = QResult<Vec<E::Row>>> + Send {
        let built = self.to_sql_with(exec.dialect());
        async move {
            let q = built?;
            exec.query(&q.sql, &q.args).await
        }
    }

    /// Render with the executor's dialect and return the affected row count.
    fn execute<E: Executor>(
        &self,
        exec: &E,
    ) -> impl std::future::Future<Output = QResult<u64>> + Send {
        let built = self.to_sql_with(exec.dialect());
        async move {
            let q = built?;
            exec.execute(&q.sql, &q.args).await
        }
    }
}

type Rendered = (String, Vec<Value>, std::collections::HashMap<String, Vec<usize>>);

fn render<S: Statement + ?Sized>(stmt: &S, dialect: Dialect) -> QResult<Rendered> {
    if let Err(e) = stmt.validate() {
        sql_log!(warn, statement = stmt.kind(), dialect = %dialect, error = %e, "render failed");
        return Err(e);
    }
    let mut ctx = if stmt.is_mutation() {
        RenderContext::definition(dialect)
    } else {
        RenderContext::new(dialect)
    };
    let mut sql = String::with_capacity(128);
    stmt.write(&mut ctx, &mut sql);
    let (args, slots) = ctx.into_parts();
    sql_log!(trace, dialect = %dialect, arg_count = args.len(), sql = %sql, "rendered statement");
    Ok((sql, args, slots))
}

/// The result of rendering a statement.
#[derive(Debug, Clone, PartialEq)]
pub struct BuiltQuery {
    pub sql: String,
    pub args: Vec<Value>,
}

impl BuiltQuery {
    /// Create a new built query.
    pub fn new(sql: String, args: Vec<Value>) -> Self {
        Self { sql, args }
    }

    /// Get arguments as references for tokio-postgres.
    #[cfg(feature = "postgres")]
    pub fn params_ref(&self) -> Vec<&(dyn tokio_postgres::types::ToSql + Sync)> {
        crate::client::params_ref(&self.args)
    }
}

impl fmt::Display for BuiltQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.sql.len() + 16);
        out.push_str(&self.sql);
        out.push(' ');
        fmt_args(&self.args, &mut out);
        f.write_str(&out)
    }
}

macro_rules! impl_statement_display {
    ($($ty:ty),*) => {
        $(
            impl std::fmt::Display for $ty {
                fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                    f.write_str(&$crate::qb::Statement::to_display_string(self))
                }
            }
        )*
    };
}

impl_statement_display!(
    crate::qb::Select,
    crate::qb::Insert,
    crate::qb::Update,
    crate::qb::Delete
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn built_query_display() {
        let q = BuiltQuery::new("SELECT ?".into(), vec![Value::from(1)]);
        assert_eq!(q.to_string(), "SELECT ? [1]");
        let q = BuiltQuery::new("SELECT 1".into(), vec![]);
        assert_eq!(q.to_string(), "SELECT 1 []");
    }
}
