//! CASE expressions.

use crate::qb::column::Column;
use crate::qb::context::RenderContext;
use crate::qb::expr::{Expr, fmt_rendered};
use std::fmt;

/// `CASE [base] WHEN cond THEN value ... [ELSE value] END`
///
/// Without any WHEN arm a CASE cannot be written, so it renders its ELSE value
/// alone, or `NULL` when there is none.
#[derive(Clone, Debug, Default)]
pub struct Case {
    base: Option<Box<Expr>>,
    arms: Vec<(Expr, Expr)>,
    otherwise: Option<Box<Expr>>,
}

impl Case {
    /// Add `WHEN cond THEN then`.
    pub fn when(mut self, cond: impl Into<Expr>, then: impl Into<Expr>) -> Self {
        self.arms.push((cond.into(), then.into()));
        self
    }

    /// Set `ELSE then`.
    pub fn else_(mut self, then: impl Into<Expr>) -> Self {
        self.otherwise = Some(Box::new(then.into()));
        self
    }

    pub fn c(self) -> Column {
        Expr::from(self).c()
    }

    pub fn c_as(self, alias: impl Into<String>) -> Column {
        Expr::from(self).c_as(alias)
    }

    pub(crate) fn write(&self, ctx: &mut RenderContext, out: &mut String) {
        if self.arms.is_empty() {
            match &self.otherwise {
                Some(e) => e.write(ctx, out),
                None => out.push_str("NULL"),
            }
            return;
        }

        out.push_str("CASE");
        if let Some(base) = &self.base {
            out.push(' ');
            base.write(ctx, out);
        }
        for (cond, then) in &self.arms {
            out.push_str(" WHEN ");
            cond.write(ctx, out);
            out.push_str(" THEN ");
            then.write(ctx, out);
        }
        if let Some(e) = &self.otherwise {
            out.push_str(" ELSE ");
            e.write(ctx, out);
        }
        out.push_str(" END");
    }
}

impl fmt::Display for Case {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rendered(f, false, |ctx, out| self.write(ctx, out))
    }
}

/// Searched CASE: `CASE WHEN cond THEN ... END`.
pub fn case() -> Case {
    Case::default()
}

/// Simple CASE: `CASE base WHEN value THEN ... END`.
pub fn case_of(base: impl Into<Expr>) -> Case {
    Case {
        base: Some(Box::new(base.into())),
        ..Case::default()
    }
}
