//! # sqlq
//!
//! A composable, dialect-aware SQL statement builder.
//!
//! ## Features
//!
//! - **SQL plus arguments**: every render yields SQL text and the positional
//!   values bound to its placeholders, in order
//! - **Dialect at render time**: MySQL, PostgreSQL, SQLite and a generic
//!   dialect for display; the same builder renders for any of them
//! - **Composable**: tables, columns, expressions, CASE, functions and
//!   sub-queries nest freely
//! - **Prepared statements**: keyed values can be rebound without rendering again
//! - **No connection management**: execution goes through the [`client::Executor`]
//!   trait, implemented for `tokio-postgres` behind the `postgres` feature
//!
//! ## Example
//!
//! ```ignore
//! use sqlq::prelude::*;
//!
//! let user = t("user");
//! let q = select()
//!     .column(user.c("id"))
//!     .from(&user)
//!     .where_(eq(user.c("age"), 18))
//!     .to_sql_with(Dialect::PostgreSql)?;
//! assert_eq!(q.sql, r#"SELECT "user"."id" FROM "user" WHERE "user"."age" = $1"#);
//! ```

#[cfg(feature = "tracing")]
macro_rules! sql_log {
    ($level:ident, $($arg:tt)+) => {
        tracing::$level!(target: "sqlq.sql", $($arg)+)
    };
}

#[cfg(not(feature = "tracing"))]
macro_rules! sql_log {
    ($level:ident, $($arg:tt)+) => {
        ()
    };
}

pub mod client;
pub mod config;
pub mod dialect;
pub mod error;
pub mod prelude;
pub mod qb;
pub mod value;

pub use client::Executor;
pub use config::{BuilderConfig, default_dialect, set_default_dialect};
pub use dialect::Dialect;
pub use error::{QError, QResult};
pub use value::Value;

pub use qb::{
    BuiltQuery, Case, Column, Delete, Expr, Insert, Prepared, Select, Statement, Table, Update,
    delete, delete_from, insert, select, update,
};
