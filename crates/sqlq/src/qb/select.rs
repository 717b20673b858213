//! SELECT statement builder.

use crate::dialect::Dialect;
use crate::qb::column::Column;
use crate::qb::context::RenderContext;
use crate::qb::expr::{Expr, LogicOp, write_logic};
use crate::qb::table::Table;
use crate::qb::traits::Statement;

/// SELECT statement builder.
///
/// A `Select` can also be used as an expression (`(SELECT ...)`), as a column,
/// or, through [`Select::t`], as a derived table.
#[derive(Clone, Debug)]
pub struct Select {
    dialect: Option<Dialect>,
    /// Leading keyword, `SELECT` unless overridden
    beginning: String,
    columns: Vec<Column>,
    tables: Vec<Table>,
    wheres: Vec<Expr>,
    groups: Vec<Expr>,
    havings: Vec<Expr>,
    orders: Vec<(Expr, bool)>,
    limit: Option<Expr>,
    offset: Option<Expr>,
}

impl Default for Select {
    fn default() -> Self {
        Self::new()
    }
}

impl Select {
    pub fn new() -> Self {
        Self::with_beginning("SELECT")
    }

    /// Start with a custom keyword, e.g. `SELECT SQL_NO_CACHE`.
    pub fn with_beginning(beginning: impl Into<String>) -> Self {
        Self {
            dialect: None,
            beginning: beginning.into(),
            columns: Vec::new(),
            tables: Vec::new(),
            wheres: Vec::new(),
            groups: Vec::new(),
            havings: Vec::new(),
            orders: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    /// Render with `dialect` unless one is passed explicitly.
    pub fn set_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    // ==================== Columns & tables ====================

    /// Append a column to the select list. With no columns, `*` is selected.
    pub fn column(mut self, col: impl Into<Column>) -> Self {
        self.columns.push(col.into());
        self
    }

    /// Append several columns.
    pub fn columns(mut self, cols: impl IntoIterator<Item = Column>) -> Self {
        self.columns.extend(cols);
        self
    }

    /// Append a table to the FROM clause.
    pub fn from(mut self, table: &Table) -> Self {
        self.tables.push(table.clone());
        self
    }

    // ==================== Conditions ====================

    /// Add a WHERE condition; conditions are combined with AND.
    pub fn where_(mut self, cond: Expr) -> Self {
        self.wheres.push(cond);
        self
    }

    /// Add a GROUP BY expression.
    pub fn group_by(mut self, e: impl Into<Expr>) -> Self {
        self.groups.push(e.into());
        self
    }

    /// Add a HAVING condition; conditions are combined with AND.
    pub fn having(mut self, cond: Expr) -> Self {
        self.havings.push(cond);
        self
    }

    // ==================== Ordering & Pagination ====================

    /// Add an ORDER BY entry.
    pub fn order_by(mut self, e: impl Into<Expr>, ascending: bool) -> Self {
        self.orders.push((e.into(), ascending));
        self
    }

    /// Set LIMIT. Plain values are bound; use `unsafe_sql!` for literals.
    pub fn limit(mut self, count: impl Into<Expr>) -> Self {
        self.limit = Some(count.into());
        self
    }

    /// Set OFFSET. Plain values are bound; use `unsafe_sql!` for literals.
    pub fn offset(mut self, start: impl Into<Expr>) -> Self {
        self.offset = Some(start.into());
        self
    }

    // ==================== Conversions ====================

    /// Use this query as a derived table: `(SELECT ...) AS "alias"`.
    pub fn t(self, alias: impl Into<String>) -> Table {
        Table::sub_select(self, alias)
    }

    /// Use this query as a column: `(SELECT ...)`.
    pub fn c(self) -> Column {
        Expr::from(self).c()
    }

    /// Use this query as a column: `(SELECT ...) AS "alias"`.
    pub fn c_as(self, alias: impl Into<String>) -> Column {
        Expr::from(self).c_as(alias)
    }

    // ==================== Build ====================

    /// Write the statement body. Sub-selects always render in projection
    /// mode, even inside INSERT/UPDATE/DELETE.
    pub(crate) fn write_body(&self, ctx: &mut RenderContext, out: &mut String) {
        ctx.with_projection(|ctx| self.write_projection(ctx, out));
    }

    fn write_projection(&self, ctx: &mut RenderContext, out: &mut String) {
        out.push_str(&self.beginning);

        if self.columns.is_empty() {
            out.push_str(" *");
        } else {
            out.push(' ');
            for (i, col) in self.columns.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                col.write_def(ctx, out);
            }
        }

        if !self.tables.is_empty() {
            out.push_str(" FROM ");
            for (i, table) in self.tables.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                table.write_def(ctx, out);
            }
        }

        if !self.wheres.is_empty() {
            out.push_str(" WHERE ");
            write_logic(LogicOp::And, &self.wheres, ctx, out);
        }

        if !self.groups.is_empty() {
            out.push_str(" GROUP BY ");
            for (i, g) in self.groups.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                g.write(ctx, out);
            }
        }

        if !self.havings.is_empty() {
            out.push_str(" HAVING ");
            write_logic(LogicOp::And, &self.havings, ctx, out);
        }

        if !self.orders.is_empty() {
            out.push_str(" ORDER BY ");
            for (i, (e, asc)) in self.orders.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                match e {
                    Expr::Column(col) => col.write_order(ctx, out),
                    other => other.write(ctx, out),
                }
                out.push_str(if *asc { " ASC" } else { " DESC" });
            }
        }

        if let Some(limit) = &self.limit {
            out.push_str(" LIMIT ");
            limit.write(ctx, out);
        }

        if let Some(offset) = &self.offset {
            out.push_str(" OFFSET ");
            offset.write(ctx, out);
        }
    }
}

impl Statement for Select {
    fn kind(&self) -> &'static str {
        "SELECT"
    }

    fn dialect_override(&self) -> Option<Dialect> {
        self.dialect
    }

    fn is_mutation(&self) -> bool {
        false
    }

    fn write(&self, ctx: &mut RenderContext, out: &mut String) {
        self.write_body(ctx, out);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::column::c;
    use crate::qb::expr::{eq, gt};
    use crate::qb::func::count_all;
    use crate::qb::table::t;
    use crate::value::Value;

    #[test]
    fn select_star_without_from() {
        let q = Select::new().to_sql_with(Dialect::Generic).unwrap();
        assert_eq!(q.sql, "SELECT *");
        assert!(q.args.is_empty());
    }

    #[test]
    fn full_clause_order() {
        let user = t("user");
        let q = Select::new()
            .column(user.c("age"))
            .column(count_all().c_as("n"))
            .from(&user)
            .where_(gt(user.c("age"), 10))
            .group_by(user.c("age"))
            .having(gt(count_all(), 1))
            .order_by(user.c("age"), true)
            .order_by(c("n"), false)
            .limit(10)
            .offset(20)
            .to_sql_with(Dialect::PostgreSql)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"SELECT "user"."age", COUNT(*) AS "n" FROM "user" WHERE "user"."age" > $1 GROUP BY "user"."age" HAVING COUNT(*) > $2 ORDER BY "user"."age" ASC, "n" DESC LIMIT $3 OFFSET $4"#
        );
        assert_eq!(
            q.args,
            vec![Value::from(10), Value::from(1), Value::from(10), Value::from(20)]
        );
    }

    #[test]
    fn custom_beginning() {
        let q = Select::with_beginning("SELECT SQL_NO_CACHE")
            .from(&t("user"))
            .to_sql_with(Dialect::MySql)
            .unwrap();
        assert_eq!(q.sql, "SELECT SQL_NO_CACHE * FROM `user`");
    }

    #[test]
    fn multiple_where_conditions_are_anded() {
        let q = Select::new()
            .from(&t("user"))
            .where_(eq(c("a"), 1))
            .where_(eq(c("b"), 2))
            .to_sql_with(Dialect::Generic)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"SELECT * FROM "user" WHERE ("a" = ?)AND("b" = ?)"#
        );
    }

    #[test]
    fn builder_dialect_is_used_by_default() {
        let q = Select::new()
            .set_dialect(Dialect::MySql)
            .column(c("id"))
            .to_sql()
            .unwrap();
        assert_eq!(q.sql, "SELECT `id`");
        // An explicit dialect still wins.
        let q = Select::new()
            .set_dialect(Dialect::MySql)
            .column(c("id"))
            .to_sql_with(Dialect::PostgreSql)
            .unwrap();
        assert_eq!(q.sql, r#"SELECT "id""#);
    }
}
