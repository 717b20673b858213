//! Aggregate functions and date arithmetic.

use crate::dialect::IntervalStyle;
use crate::qb::context::RenderContext;
use crate::qb::expr::{Expr, Fragment};
use std::fmt::Write;

/// Function call node.
#[derive(Clone, Debug)]
pub enum Func {
    /// `NAME(arg)`
    Call { name: &'static str, arg: Box<Expr> },
    /// The dialect's character-length function.
    CharLength(Box<Expr>),
    /// `value + INTERVAL ...`, spelled per dialect.
    AddInterval {
        value: Box<Expr>,
        intervals: Vec<Interval>,
    },
}

/// Interval unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IntervalUnit {
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
}

impl IntervalUnit {
    fn keyword(self) -> &'static str {
        match self {
            IntervalUnit::Year => "YEAR",
            IntervalUnit::Month => "MONTH",
            IntervalUnit::Day => "DAY",
            IntervalUnit::Hour => "HOUR",
            IntervalUnit::Minute => "MINUTE",
            IntervalUnit::Second => "SECOND",
        }
    }

    fn word(self) -> &'static str {
        match self {
            IntervalUnit::Year => "year",
            IntervalUnit::Month => "month",
            IntervalUnit::Day => "day",
            IntervalUnit::Hour => "hour",
            IntervalUnit::Minute => "minute",
            IntervalUnit::Second => "second",
        }
    }
}

/// An amount of time in one unit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Interval {
    pub value: i64,
    pub unit: IntervalUnit,
}

impl Interval {
    pub fn new(value: i64, unit: IntervalUnit) -> Self {
        Self { value, unit }
    }

    /// `2 days`, `1 hour`
    fn write_words(&self, out: &mut String) {
        let _ = write!(out, "{} {}", self.value, self.unit.word());
        if self.value != 1 {
            out.push('s');
        }
    }
}

pub fn years(n: i64) -> Interval {
    Interval::new(n, IntervalUnit::Year)
}

pub fn months(n: i64) -> Interval {
    Interval::new(n, IntervalUnit::Month)
}

pub fn days(n: i64) -> Interval {
    Interval::new(n, IntervalUnit::Day)
}

pub fn hours(n: i64) -> Interval {
    Interval::new(n, IntervalUnit::Hour)
}

pub fn minutes(n: i64) -> Interval {
    Interval::new(n, IntervalUnit::Minute)
}

pub fn seconds(n: i64) -> Interval {
    Interval::new(n, IntervalUnit::Second)
}

impl Func {
    pub(crate) fn write(&self, ctx: &mut RenderContext, out: &mut String) {
        match self {
            Func::Call { name, arg } => {
                out.push_str(name);
                out.push('(');
                arg.write(ctx, out);
                out.push(')');
            }
            Func::CharLength(arg) => {
                out.push_str(ctx.dialect().char_length_name());
                out.push('(');
                arg.write(ctx, out);
                out.push(')');
            }
            Func::AddInterval { value, intervals } => {
                write_add_interval(value, intervals, ctx, out)
            }
        }
    }
}

fn write_add_interval(
    value: &Expr,
    intervals: &[Interval],
    ctx: &mut RenderContext,
    out: &mut String,
) {
    let style = ctx.dialect().interval_style();
    if style == IntervalStyle::DatetimeModifier {
        out.push_str("DATETIME(");
    }
    value.write(ctx, out);
    // Zero amounts are no-ops.
    for iv in intervals.iter().filter(|iv| iv.value != 0) {
        match style {
            IntervalStyle::Keyword => {
                let _ = write!(out, " + INTERVAL {} {}", iv.value, iv.unit.keyword());
            }
            IntervalStyle::Quoted => {
                out.push_str(" + INTERVAL '");
                iv.write_words(out);
                out.push('\'');
            }
            IntervalStyle::DatetimeModifier => {
                out.push_str(", '");
                iv.write_words(out);
                out.push('\'');
            }
        }
    }
    if style == IntervalStyle::DatetimeModifier {
        out.push(')');
    }
}

fn call(name: &'static str, arg: impl Into<Expr>) -> Expr {
    Expr::Func(Func::Call {
        name,
        arg: Box::new(arg.into()),
    })
}

/// `COUNT(v)`
pub fn count(v: impl Into<Expr>) -> Expr {
    call("COUNT", v)
}

/// `COUNT(*)`
pub fn count_all() -> Expr {
    call("COUNT", Expr::Unsafe(vec![Fragment::Text("*".into())]))
}

/// `SUM(v)`
pub fn sum(v: impl Into<Expr>) -> Expr {
    call("SUM", v)
}

/// `AVG(v)`
pub fn avg(v: impl Into<Expr>) -> Expr {
    call("AVG", v)
}

/// `MIN(v)`
pub fn min(v: impl Into<Expr>) -> Expr {
    call("MIN", v)
}

/// `MAX(v)`
pub fn max(v: impl Into<Expr>) -> Expr {
    call("MAX", v)
}

/// `CHAR_LENGTH(v)`, or `LENGTH(v)` on SQLite.
pub fn char_length(v: impl Into<Expr>) -> Expr {
    Expr::Func(Func::CharLength(Box::new(v.into())))
}

/// Add intervals to a date/time value.
///
/// ```ignore
/// add_interval(c("created_at"), [days(2), hours(1)])
/// // MySQL:      `created_at` + INTERVAL 2 DAY + INTERVAL 1 HOUR
/// // PostgreSQL: "created_at" + INTERVAL '2 days' + INTERVAL '1 hour'
/// // SQLite:     DATETIME("created_at", '2 days', '1 hour')
/// ```
pub fn add_interval(v: impl Into<Expr>, intervals: impl IntoIterator<Item = Interval>) -> Expr {
    Expr::Func(Func::AddInterval {
        value: Box::new(v.into()),
        intervals: intervals.into_iter().collect(),
    })
}
