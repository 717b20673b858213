//! Everything needed to build and render statements.
//!
//! ```ignore
//! use sqlq::prelude::*;
//! ```

pub use crate::client::Executor;
pub use crate::dialect::Dialect;
pub use crate::error::{QError, QResult};
pub use crate::qb::{
    BuiltQuery, Case, Column, Delete, Expr, Fragment, Insert, Interval, Prepared, Select,
    Statement, Table, Update, add_interval, and, avg, c, c_as, case, case_of, char_length, count,
    count_all, days, delete, delete_from, eq, gt, gte, hours, in_, in_v, insert, insert_with, lt,
    lte, max, min, minutes, months, neq, not_in, null, or, seconds, select, select_with, sum, t,
    t_as, update, update_with, v, v_as, years,
};
pub use crate::unsafe_sql;
pub use crate::value::Value;
