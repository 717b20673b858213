//! Query builder (QB): composable expressions, tables and statement builders.
//!
//! Statements are assembled from values, then rendered in a single pass into
//! SQL text plus the positional argument list that goes with it. The dialect is
//! a render-time parameter, so one builder can be rendered for several engines.
//!
//! # Features
//!
//! - **Single-pass rendering**: placeholders and arguments are produced together
//!   and can never drift apart
//! - **Dialect aware**: quoting, `?` vs `$n` placeholders, RETURNING support and
//!   engine-specific functions are chosen at render time
//! - **Definition vs projection**: columns drop their table qualifier and alias
//!   in INSERT/UPDATE targets automatically
//! - **Sub-queries everywhere**: a `Select` works as an expression, a column or
//!   a derived table
//!
//! # Usage
//!
//! ```ignore
//! use sqlq::prelude::*;
//!
//! let user = t("user");
//!
//! // SELECT
//! let q = select()
//!     .column(user.c("id"))
//!     .column(user.c("name"))
//!     .from(&user)
//!     .where_(eq(user.c("age"), 18))
//!     .to_sql_with(Dialect::MySql)?;
//! // SELECT `user`.`id`, `user`.`name` FROM `user` WHERE `user`.`age` = ?   [18]
//!
//! // INSERT
//! let q = insert()
//!     .into_table(&user)
//!     .set(user.c("name"), "alice")
//!     .returning(user.c("id"))
//!     .to_sql_with(Dialect::PostgreSql)?;
//!
//! // UPDATE
//! let q = update(&user)
//!     .set(user.c("status"), "inactive")
//!     .where_(eq(user.c("id"), 7))
//!     .to_sql()?;
//!
//! // DELETE
//! let q = delete_from(&user).where_(eq(user.c("id"), 7)).to_sql()?;
//! ```

mod case;
mod column;
mod context;
mod delete;
mod expr;
mod func;
mod insert;
mod prepared;
mod select;
mod table;
mod traits;
mod update;

pub use case::{Case, case, case_of};
pub use column::{Column, c, c_as};
pub use context::RenderContext;
pub use delete::Delete;
pub use expr::{
    CompareOp, Expr, Fragment, LogicOp, and, eq, gt, gte, in_, in_v, lt, lte, neq, not_in, null,
    or, unsafe_sql, v, v_as,
};
pub use func::{
    Func, Interval, IntervalUnit, add_interval, avg, char_length, count, count_all, days, hours,
    max, min, minutes, months, seconds, sum, years,
};
pub use insert::Insert;
pub use prepared::{ArgsBuilder, Prepared};
pub use select::Select;
pub use table::{Join, JoinKind, Table, t, t_as};
pub use traits::{BuiltQuery, Statement};
pub use update::Update;

/// Create a SELECT builder.
///
/// # Example
/// ```ignore
/// let q = sqlq::qb::select().from(&t("user")).where_(eq(c("id"), 1));
/// ```
pub fn select() -> Select {
    Select::new()
}

/// Create a SELECT builder with a custom leading keyword.
///
/// # Example
/// ```ignore
/// let q = sqlq::qb::select_with("SELECT SQL_NO_CACHE").from(&t("user"));
/// ```
pub fn select_with(beginning: impl Into<String>) -> Select {
    Select::with_beginning(beginning)
}

/// Create an INSERT builder. Set the table with [`Insert::into_table`].
pub fn insert() -> Insert {
    Insert::new()
}

/// Create an INSERT builder with a custom leading keyword, e.g. `REPLACE`.
pub fn insert_with(beginning: impl Into<String>) -> Insert {
    Insert::with_beginning(beginning)
}

/// Create an UPDATE builder for `table`.
pub fn update(table: &Table) -> Update {
    Update::new(table)
}

/// Create an UPDATE builder with a custom leading keyword.
pub fn update_with(table: &Table, beginning: impl Into<String>) -> Update {
    Update::with_beginning(table, beginning)
}

/// Create a DELETE builder. Set the table with [`Delete::from`].
pub fn delete() -> Delete {
    Delete::new()
}

/// Create a DELETE builder for `table`.
pub fn delete_from(table: &Table) -> Delete {
    Delete::new().from(table)
}
