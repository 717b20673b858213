//! Expression tree for WHERE/HAVING conditions, values and computed columns.
//!
//! Every node renders itself in one pass: it appends its SQL text to the output
//! buffer and binds the values it references, in the same left-to-right order,
//! through the [`RenderContext`].
//!
//! A few degenerate shapes are rewritten into valid SQL instead of failing:
//!
//! - `eq(x, None)` / `neq(x, None)` render `x IS NULL` / `x IS NOT NULL` (and so
//!   do their mirrored forms `eq(None, x)`);
//! - comparisons against a list render `x IN (?,?)`, and against an empty list
//!   render the constant `'IN' = '()'` (or `'IN' != '()'`) since `x IN ()` is
//!   not valid everywhere;
//! - `and([])` / `or([])` render the always-false `('empty' = 'AND')` /
//!   `('empty' = 'OR')`.
//!
//! # Example
//!
//! ```ignore
//! use sqlq::qb::{and, c, eq, gt};
//!
//! let cond = and([eq(c("status"), "active"), gt(c("age"), 18)]);
//! ```

use crate::dialect::Dialect;
use crate::qb::case::Case;
use crate::qb::column::Column;
use crate::qb::context::RenderContext;
use crate::qb::func::Func;
use crate::qb::select::Select;
use crate::value::{Value, fmt_args};
use std::fmt;

/// Expression node.
#[derive(Clone, Debug)]
pub enum Expr {
    /// The literal `NULL`; binds nothing.
    Null,

    /// A bound value, optionally tagged with a key for prepared rebinding.
    Bind { value: Value, key: Option<String> },

    /// A bound list: `(?,?,?)`.
    List(Vec<Value>),

    /// Column reference.
    Column(Column),

    /// Binary comparison: `l op r`.
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// AND/OR group.
    Logic { op: LogicOp, items: Vec<Expr> },

    /// Function call.
    Func(Func),

    /// CASE expression.
    Case(Box<Case>),

    /// Raw SQL fragments, concatenated without escaping.
    Unsafe(Vec<Fragment>),

    /// Parenthesized sub-select.
    Select(Box<Select>),
}

/// Comparison operators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CompareOp {
    Eq,
    Neq,
    Gt,
    Gte,
    Lt,
    Lte,
    In,
    NotIn,
}

impl CompareOp {
    /// Operator with its surrounding spaces.
    fn padded(self) -> &'static str {
        match self {
            CompareOp::Eq => " = ",
            CompareOp::Neq => " != ",
            CompareOp::Gt => " > ",
            CompareOp::Gte => " >= ",
            CompareOp::Lt => " < ",
            CompareOp::Lte => " <= ",
            CompareOp::In => " IN ",
            CompareOp::NotIn => " NOT IN ",
        }
    }
}

/// Logical combinators.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    fn keyword(self) -> &'static str {
        match self {
            LogicOp::And => "AND",
            LogicOp::Or => "OR",
        }
    }

    fn empty(self) -> &'static str {
        match self {
            LogicOp::And => "('empty' = 'AND')",
            LogicOp::Or => "('empty' = 'OR')",
        }
    }
}

/// One piece of a raw SQL fragment.
#[derive(Clone, Debug)]
pub enum Fragment {
    /// Copied verbatim.
    Text(String),
    /// Rendered through the normal protocol.
    Expr(Expr),
    /// `NULL`.
    Null,
}

impl Expr {
    fn compare(op: CompareOp, left: impl Into<Expr>, right: impl Into<Expr>) -> Self {
        Expr::Compare {
            op,
            left: Box::new(left.into()),
            right: Box::new(right.into()),
        }
    }

    /// Check if this is the `NULL` literal.
    pub fn is_null(&self) -> bool {
        matches!(self, Expr::Null)
    }

    /// Use this expression as a column.
    pub fn c(self) -> Column {
        match self {
            Expr::Column(col) => col,
            other => Column::Expr(Box::new(other)),
        }
    }

    /// Use this expression as a column named `alias`.
    pub fn c_as(self, alias: impl Into<String>) -> Column {
        self.c().c_as(alias)
    }

    /// Append this expression's SQL and bind its values.
    pub fn write(&self, ctx: &mut RenderContext, out: &mut String) {
        match self {
            Expr::Null => out.push_str("NULL"),
            Expr::Bind { value, key: None } => ctx.bind(value.clone(), out),
            Expr::Bind {
                value,
                key: Some(key),
            } => ctx.bind_keyed(key, value.clone(), out),
            Expr::List(values) => ctx.bind_list(values, out),
            Expr::Column(col) => col.write_ref(ctx, out),
            Expr::Compare { op, left, right } => write_compare(*op, left, right, ctx, out),
            Expr::Logic { op, items } => write_logic(*op, items, ctx, out),
            Expr::Func(func) => func.write(ctx, out),
            Expr::Case(case) => case.write(ctx, out),
            Expr::Unsafe(parts) => {
                for part in parts {
                    match part {
                        Fragment::Text(text) => out.push_str(text),
                        Fragment::Expr(expr) => expr.write(ctx, out),
                        Fragment::Null => out.push_str("NULL"),
                    }
                }
            }
            Expr::Select(select) => {
                out.push('(');
                select.write_body(ctx, out);
                out.push(')');
            }
        }
    }
}

fn write_compare(
    op: CompareOp,
    left: &Expr,
    right: &Expr,
    ctx: &mut RenderContext,
    out: &mut String,
) {
    match op {
        CompareOp::Eq | CompareOp::Neq => {
            let (left, right) = if left.is_null() {
                (right, left)
            } else {
                (left, right)
            };
            if right.is_null() {
                left.write(ctx, out);
                out.push_str(if op == CompareOp::Eq {
                    " IS NULL"
                } else {
                    " IS NOT NULL"
                });
                return;
            }
            if let Expr::List(values) = right {
                write_in(left, values, op == CompareOp::Neq, ctx, out);
                return;
            }
        }
        CompareOp::In | CompareOp::NotIn => {
            if let Expr::List(values) = right {
                write_in(left, values, op == CompareOp::NotIn, ctx, out);
                return;
            }
        }
        _ => {}
    }
    left.write(ctx, out);
    out.push_str(op.padded());
    right.write(ctx, out);
}

fn write_in(
    left: &Expr,
    values: &[Value],
    negated: bool,
    ctx: &mut RenderContext,
    out: &mut String,
) {
    if values.is_empty() {
        out.push_str(if negated { "'IN' != '()'" } else { "'IN' = '()'" });
        return;
    }
    left.write(ctx, out);
    out.push_str(if negated { " NOT IN " } else { " IN " });
    ctx.bind_list(values, out);
}

/// Render an AND/OR group.
pub(crate) fn write_logic(op: LogicOp, items: &[Expr], ctx: &mut RenderContext, out: &mut String) {
    match items {
        [] => out.push_str(op.empty()),
        [only] => only.write(ctx, out),
        _ => {
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    out.push_str(op.keyword());
                }
                out.push('(');
                item.write(ctx, out);
                out.push(')');
            }
        }
    }
}

/// Format `sql [args]` using the generic dialect.
pub(crate) fn fmt_rendered(
    f: &mut fmt::Formatter<'_>,
    definition: bool,
    write: impl FnOnce(&mut RenderContext, &mut String),
) -> fmt::Result {
    let mut ctx = if definition {
        RenderContext::definition(Dialect::Generic)
    } else {
        RenderContext::new(Dialect::Generic)
    };
    let mut out = String::new();
    write(&mut ctx, &mut out);
    out.push(' ');
    fmt_args(ctx.args(), &mut out);
    f.write_str(&out)
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rendered(f, false, |ctx, out| self.write(ctx, out))
    }
}

// ==================== Constructors ====================

/// `l = r`; `l IS NULL` when either side is `NULL`; `l IN (...)` for a list.
pub fn eq(l: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    Expr::compare(CompareOp::Eq, l, r)
}

/// `l != r`; `l IS NOT NULL` when either side is `NULL`; `l NOT IN (...)` for a list.
pub fn neq(l: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    Expr::compare(CompareOp::Neq, l, r)
}

/// `l > r`
pub fn gt(l: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    Expr::compare(CompareOp::Gt, l, r)
}

/// `l >= r`
pub fn gte(l: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    Expr::compare(CompareOp::Gte, l, r)
}

/// `l < r`
pub fn lt(l: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    Expr::compare(CompareOp::Lt, l, r)
}

/// `l <= r`
pub fn lte(l: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    Expr::compare(CompareOp::Lte, l, r)
}

/// `l IN r`. A list on the right binds each element.
pub fn in_(l: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    Expr::compare(CompareOp::In, l, r)
}

/// `l NOT IN r`. A list on the right binds each element.
pub fn not_in(l: impl Into<Expr>, r: impl Into<Expr>) -> Expr {
    Expr::compare(CompareOp::NotIn, l, r)
}

/// `(a)AND(b)AND(c)`
pub fn and(items: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Logic {
        op: LogicOp::And,
        items: items.into_iter().collect(),
    }
}

/// `(a)OR(b)OR(c)`
pub fn or(items: impl IntoIterator<Item = Expr>) -> Expr {
    Expr::Logic {
        op: LogicOp::Or,
        items: items.into_iter().collect(),
    }
}

/// Bind a value. Unlike the implicit conversion, `v(Value::Null)` binds a NULL
/// argument instead of rendering the `NULL` literal.
pub fn v(value: impl Into<Value>) -> Expr {
    Expr::Bind {
        value: value.into(),
        key: None,
    }
}

/// Bind a value whose slot can be replaced later through [`Prepared`](crate::qb::Prepared).
pub fn v_as(value: impl Into<Value>, key: impl Into<String>) -> Expr {
    Expr::Bind {
        value: value.into(),
        key: Some(key.into()),
    }
}

/// Bind a list: `(?,?,?)`.
pub fn in_v<T: Into<Value>>(values: impl IntoIterator<Item = T>) -> Expr {
    Expr::List(values.into_iter().map(Into::into).collect())
}

/// The `NULL` literal.
pub fn null() -> Expr {
    Expr::Null
}

/// Raw SQL. Text fragments are NOT escaped; wrap external input in [`v`].
///
/// See also the [`unsafe_sql!`](crate::unsafe_sql) macro.
pub fn unsafe_sql(parts: impl IntoIterator<Item = Fragment>) -> Expr {
    Expr::Unsafe(parts.into_iter().collect())
}

/// Build a raw SQL expression from mixed fragments.
///
/// Strings and numbers are copied verbatim; expressions, columns and
/// sub-selects render normally (and still bind their values).
///
/// ```ignore
/// let e = sqlq::unsafe_sql![c("price"), " * ", v(2)];
/// ```
#[macro_export]
macro_rules! unsafe_sql {
    ($($part:expr),* $(,)?) => {
        $crate::qb::unsafe_sql([$($crate::qb::Fragment::from($part)),*])
    };
}

// ==================== Conversions ====================

impl<T: Into<Value>> From<T> for Expr {
    fn from(v: T) -> Self {
        match v.into() {
            Value::Null => Expr::Null,
            value => Expr::Bind { value, key: None },
        }
    }
}

impl<T: Into<Value>> From<Vec<T>> for Expr {
    fn from(values: Vec<T>) -> Self {
        in_v(values)
    }
}

impl<T: Into<Value>, const N: usize> From<[T; N]> for Expr {
    fn from(values: [T; N]) -> Self {
        in_v(values)
    }
}

impl From<Column> for Expr {
    fn from(col: Column) -> Self {
        Expr::Column(col)
    }
}

impl From<&Column> for Expr {
    fn from(col: &Column) -> Self {
        Expr::Column(col.clone())
    }
}

impl From<Func> for Expr {
    fn from(func: Func) -> Self {
        Expr::Func(func)
    }
}

impl From<Case> for Expr {
    fn from(case: Case) -> Self {
        Expr::Case(Box::new(case))
    }
}

impl From<Select> for Expr {
    fn from(select: Select) -> Self {
        Expr::Select(Box::new(select))
    }
}

impl From<&Select> for Expr {
    fn from(select: &Select) -> Self {
        Expr::Select(Box::new(select.clone()))
    }
}

impl From<&str> for Fragment {
    fn from(text: &str) -> Self {
        Fragment::Text(text.to_string())
    }
}

impl From<String> for Fragment {
    fn from(text: String) -> Self {
        Fragment::Text(text)
    }
}

impl From<Expr> for Fragment {
    fn from(expr: Expr) -> Self {
        Fragment::Expr(expr)
    }
}

impl From<Column> for Fragment {
    fn from(col: Column) -> Self {
        Fragment::Expr(Expr::Column(col))
    }
}

impl From<&Column> for Fragment {
    fn from(col: &Column) -> Self {
        Fragment::Expr(Expr::Column(col.clone()))
    }
}

impl From<Select> for Fragment {
    fn from(select: Select) -> Self {
        Fragment::Expr(select.into())
    }
}

impl From<Value> for Fragment {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Fragment::Null,
            other => Fragment::Text(other.to_string()),
        }
    }
}

macro_rules! impl_fragment_number {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Fragment {
                fn from(n: $ty) -> Self {
                    Fragment::Text(n.to_string())
                }
            }
        )*
    };
}

impl_fragment_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);
