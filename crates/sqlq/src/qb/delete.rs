//! DELETE statement builder.

use crate::dialect::Dialect;
use crate::error::{QError, QResult};
use crate::qb::context::RenderContext;
use crate::qb::expr::{Expr, LogicOp, write_logic};
use crate::qb::table::Table;
use crate::qb::traits::Statement;

/// DELETE statement builder.
///
/// Without WHERE conditions every row of the table is deleted.
#[derive(Clone, Debug, Default)]
pub struct Delete {
    dialect: Option<Dialect>,
    table: Option<Table>,
    wheres: Vec<Expr>,
}

impl Delete {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Set the target table.
    pub fn from(mut self, table: &Table) -> Self {
        self.table = Some(table.clone());
        self
    }

    /// Add a WHERE condition; conditions are combined with AND.
    pub fn where_(mut self, cond: Expr) -> Self {
        self.wheres.push(cond);
        self
    }
}

impl Statement for Delete {
    fn kind(&self) -> &'static str {
        "DELETE"
    }

    fn dialect_override(&self) -> Option<Dialect> {
        self.dialect
    }

    fn is_mutation(&self) -> bool {
        true
    }

    fn validate(&self) -> QResult<()> {
        if self.table.is_none() {
            return Err(QError::missing_table("DELETE"));
        }
        Ok(())
    }

    fn write(&self, ctx: &mut RenderContext, out: &mut String) {
        out.push_str("DELETE FROM ");
        if let Some(table) = &self.table {
            ctx.set_target(table);
            table.write_def(ctx, out);
        }
        if !self.wheres.is_empty() {
            out.push_str(" WHERE ");
            write_logic(LogicOp::And, &self.wheres, ctx, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::qb::column::c;
    use crate::qb::expr::{eq, in_};
    use crate::qb::select::Select;
    use crate::qb::table::{t, t_as};
    use crate::value::Value;

    #[test]
    fn delete_with_conditions() {
        let user = t_as("user", "u");
        let q = Delete::new()
            .from(&user)
            .where_(eq(user.c("id"), 1))
            .where_(eq(user.c("name"), "x"))
            .to_sql_with(Dialect::PostgreSql)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"DELETE FROM "user" WHERE ("id" = $1)AND("name" = $2)"#
        );
        assert_eq!(q.args, vec![Value::from(1), Value::from("x")]);
    }

    #[test]
    fn delete_all_rows() {
        let q = Delete::new()
            .from(&t("user"))
            .to_sql_with(Dialect::MySql)
            .unwrap();
        assert_eq!(q.sql, "DELETE FROM `user`");
    }

    #[test]
    fn correlated_sub_select_keeps_qualifiers() {
        let user = t("user");
        let banned = t("banned");
        let sub = Select::new()
            .column(banned.c("user_id"))
            .from(&banned)
            .where_(eq(banned.c("active"), true));
        let q = Delete::new()
            .from(&user)
            .where_(in_(user.c("id"), sub))
            .to_sql_with(Dialect::Generic)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"DELETE FROM "user" WHERE "id" IN (SELECT "banned"."user_id" FROM "banned" WHERE "banned"."active" = ?)"#
        );
    }

    #[test]
    fn aliased_target_is_referenced_by_name_in_sub_select() {
        let user = t_as("user", "u");
        let banned = t("banned");
        let sub = Select::new()
            .column(banned.c("user_id"))
            .from(&banned)
            .where_(eq(banned.c("email"), user.c("email")));
        let q = Delete::new()
            .from(&user)
            .where_(in_(user.c("id"), sub))
            .to_sql_with(Dialect::PostgreSql)
            .unwrap();
        assert_eq!(
            q.sql,
            r#"DELETE FROM "user" WHERE "id" IN (SELECT "banned"."user_id" FROM "banned" WHERE "banned"."email" = "user"."email")"#
        );
    }

    #[test]
    fn missing_table_is_an_error() {
        let del = Delete::new().where_(eq(c("id"), 1));
        let err = del.to_sql().unwrap_err();
        assert!(matches!(err, QError::MissingTable { statement: "DELETE" }));
        assert_eq!(
            del.to_string(),
            "<invalid SQL: must set table to generate DELETE statements>"
        );
    }
}
