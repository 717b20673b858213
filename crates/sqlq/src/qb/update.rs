//! UPDATE statement builder.

use crate::dialect::Dialect;
use crate::error::{QError, QResult};
use crate::qb::column::Column;
use crate::qb::context::RenderContext;
use crate::qb::expr::{Expr, LogicOp, write_logic};
use crate::qb::insert::Assignments;
use crate::qb::table::Table;
use crate::qb::traits::Statement;

/// UPDATE statement builder.
#[derive(Clone, Debug)]
pub struct Update {
    dialect: Option<Dialect>,
    beginning: String,
    table: Table,
    sets: Assignments,
    wheres: Vec<Expr>,
}

impl Update {
    pub fn new(table: &Table) -> Self {
        Self::with_beginning(table, "UPDATE")
    }

    /// Start with a custom keyword, e.g. `UPDATE LOW_PRIORITY`.
    pub fn with_beginning(table: &Table, beginning: impl Into<String>) -> Self {
        Self {
            dialect: None,
            beginning: beginning.into(),
            table: table.clone(),
            sets: Assignments::default(),
            wheres: Vec::new(),
        }
    }

    pub fn set_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    // ==================== SET ====================

    /// Assign `value` to `col`, replacing an earlier assignment to the same column.
    pub fn set(mut self, col: impl Into<Column>, value: impl Into<Expr>) -> Self {
        self.sets.set(col.into(), value.into());
        self
    }

    /// Remove the assignment to `col`, if any.
    pub fn unset(mut self, col: impl Into<Column>) -> Self {
        self.sets.unset(&col.into());
        self
    }

    // ==================== WHERE conditions ====================

    /// Add a WHERE condition; conditions are combined with AND.
    pub fn where_(mut self, cond: Expr) -> Self {
        self.wheres.push(cond);
        self
    }
}

impl Statement for Update {
    fn kind(&self) -> &'static str {
        "UPDATE"
    }

    fn dialect_override(&self) -> Option<Dialect> {
        self.dialect
    }

    fn is_mutation(&self) -> bool {
        true
    }

    fn validate(&self) -> QResult<()> {
        if self.sets.is_empty() {
            return Err(QError::missing_assignment("UPDATE"));
        }
        Ok(())
    }

    fn write(&self, ctx: &mut RenderContext, out: &mut String) {
        ctx.set_target(&self.table);
        out.push_str(&self.beginning);
        out.push(' ');
        self.table.write_def(ctx, out);

        out.push_str(" SET ");
        for (i, (col, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            col.write_ref(ctx, out);
            out.push_str(" = ");
            value.write(ctx, out);
        }

        if !self.wheres.is_empty() {
            out.push_str(" WHERE ");
            write_logic(LogicOp::And, &self.wheres, ctx, out);
        }
    }
}
