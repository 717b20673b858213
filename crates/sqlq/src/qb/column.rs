//! Column references.

use crate::dialect::Dialect;
use crate::qb::context::RenderContext;
use crate::qb::expr::{Expr, fmt_rendered};
use crate::qb::table::Table;
use std::fmt;

/// A column in a select list, a condition, or an assignment target.
///
/// Columns render in two positions:
///
/// - as a *definition* (select list, RETURNING): `"t"."col" AS "alias"`;
/// - as a *reference* (conditions, joins, GROUP BY): `"t"."col"`. The alias is
///   never written here since WHERE and ON cannot see select-list aliases.
///
/// ORDER BY is the exception and refers to an aliased column by its alias.
/// In definition mode (INSERT/UPDATE targets) every form collapses to the bare `"col"`.
#[derive(Clone, Debug)]
pub enum Column {
    /// `"col"`
    Name(String),
    /// `table_ref."col"`
    Qualified { table: Table, name: String },
    /// `inner AS "alias"`
    Aliased { inner: Box<Column>, alias: String },
    /// An expression used as a column.
    Expr(Box<Expr>),
}

/// Identity of an assignment target: the column name with any table qualifier
/// and alias stripped.
#[derive(Clone, Debug, PartialEq, Eq)]
pub(crate) enum ColumnKey {
    Name(String),
    Expr(String),
}

impl Column {
    /// Return this column unchanged; `c()` on a column is idempotent.
    pub fn c(self) -> Column {
        self
    }

    /// Alias this column. An existing alias is replaced, not stacked.
    pub fn c_as(self, alias: impl Into<String>) -> Column {
        let inner = match self {
            Column::Aliased { inner, .. } => inner,
            other => Box::new(other),
        };
        Column::Aliased {
            inner,
            alias: alias.into(),
        }
    }

    /// The alias, if any.
    pub fn alias(&self) -> Option<&str> {
        match self {
            Column::Aliased { alias, .. } => Some(alias),
            _ => None,
        }
    }

    /// Append the reference form.
    pub fn write_ref(&self, ctx: &mut RenderContext, out: &mut String) {
        match self {
            Column::Name(name) => ctx.quote(out, name),
            Column::Qualified { table, name } => {
                if !ctx.is_definition() {
                    table.write_ref(ctx, out);
                    out.push('.');
                }
                ctx.quote(out, name);
            }
            Column::Aliased { inner, .. } => inner.write_ref(ctx, out),
            Column::Expr(expr) => expr.write(ctx, out),
        }
    }

    /// Append the ORDER BY form: the alias of an aliased column, else the reference.
    pub(crate) fn write_order(&self, ctx: &mut RenderContext, out: &mut String) {
        match self {
            Column::Aliased { alias, .. } if !ctx.is_definition() => ctx.quote(out, alias),
            other => other.write_ref(ctx, out),
        }
    }

    /// Append the definition form.
    pub fn write_def(&self, ctx: &mut RenderContext, out: &mut String) {
        match self {
            Column::Aliased { inner, alias } => {
                inner.write_ref(ctx, out);
                if !ctx.is_definition() {
                    out.push_str(" AS ");
                    ctx.quote(out, alias);
                }
            }
            other => other.write_ref(ctx, out),
        }
    }

    pub(crate) fn key(&self) -> ColumnKey {
        match self {
            Column::Name(name) | Column::Qualified { name, .. } => ColumnKey::Name(name.clone()),
            Column::Aliased { inner, .. } => inner.key(),
            Column::Expr(expr) => {
                let mut ctx = RenderContext::definition(Dialect::Generic);
                let mut out = String::new();
                expr.write(&mut ctx, &mut out);
                ColumnKey::Expr(out)
            }
        }
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rendered(f, false, |ctx, out| self.write_def(ctx, out))
    }
}

impl From<&Column> for Column {
    fn from(col: &Column) -> Self {
        col.clone()
    }
}

impl From<Expr> for Column {
    fn from(expr: Expr) -> Self {
        expr.c()
    }
}

/// Create a column reference.
pub fn c(name: impl Into<String>) -> Column {
    Column::Name(name.into())
}

/// Create an aliased column reference.
pub fn c_as(name: impl Into<String>, alias: impl Into<String>) -> Column {
    c(name).c_as(alias)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::table::t;

    fn render(col: &Column, definition: bool, as_def: bool) -> String {
        let mut ctx = if definition {
            RenderContext::definition(Dialect::Generic)
        } else {
            RenderContext::new(Dialect::Generic)
        };
        let mut out = String::new();
        if as_def {
            col.write_def(&mut ctx, &mut out);
        } else {
            col.write_ref(&mut ctx, &mut out);
        }
        out
    }

    #[test]
    fn projection_and_definition_forms() {
        let user = t("user");
        let col = user.c_as("id", "uid");
        assert_eq!(render(&col, false, true), r#""user"."id" AS "uid""#);
        assert_eq!(render(&col, false, false), r#""user"."id""#);
        assert_eq!(render(&col, true, true), r#""id""#);
        assert_eq!(render(&col, true, false), r#""id""#);

        let plain = user.c("name");
        assert_eq!(render(&plain, false, true), r#""user"."name""#);
        assert_eq!(render(&plain, true, true), r#""name""#);
    }

    #[test]
    fn order_form_uses_alias() {
        let col = t("user").c_as("id", "uid");
        let mut ctx = RenderContext::new(Dialect::Generic);
        let mut out = String::new();
        col.write_order(&mut ctx, &mut out);
        assert_eq!(out, r#""uid""#);

        let mut ctx = RenderContext::definition(Dialect::Generic);
        let mut out = String::new();
        col.write_order(&mut ctx, &mut out);
        assert_eq!(out, r#""id""#);
    }

    #[test]
    fn realias_replaces() {
        let col = c("id").c_as("a").c_as("b");
        assert_eq!(render(&col, false, true), r#""id" AS "b""#);
        assert_eq!(col.alias(), Some("b"));
    }

    #[test]
    fn c_is_idempotent() {
        let col = c_as("id", "a");
        assert_eq!(
            render(&col.clone().c().c(), false, true),
            render(&col, false, true)
        );
    }

    #[test]
    fn keys_ignore_qualifier_and_alias() {
        let user = t("user");
        assert_eq!(user.c("id").key(), c("id").key());
        assert_eq!(user.c_as("id", "x").key(), c("id").key());
        assert_ne!(c("id").key(), c("name").key());
    }

    #[test]
    fn display_renders_definition() {
        assert_eq!(c_as("id", "x").to_string(), r#""id" AS "x" []"#);
    }
}
