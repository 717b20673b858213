//! INSERT statement builder.

use crate::dialect::Dialect;
use crate::error::{QError, QResult};
use crate::qb::column::Column;
use crate::qb::context::RenderContext;
use crate::qb::expr::Expr;
use crate::qb::table::Table;
use crate::qb::traits::Statement;

/// Ordered `column = value` list keyed by bare column name.
///
/// Setting a column that is already present replaces it in place, so
/// `t.c("id")` and `c("id")` address the same assignment.
#[derive(Clone, Debug, Default)]
pub(crate) struct Assignments(Vec<(Column, Expr)>);

impl Assignments {
    pub(crate) fn set(&mut self, col: Column, value: Expr) {
        let key = col.key();
        match self.0.iter_mut().find(|(c, _)| c.key() == key) {
            Some(slot) => *slot = (col, value),
            None => self.0.push((col, value)),
        }
    }

    pub(crate) fn unset(&mut self, col: &Column) {
        let key = col.key();
        self.0.retain(|(c, _)| c.key() != key);
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn len(&self) -> usize {
        self.0.len()
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = &(Column, Expr)> {
        self.0.iter()
    }
}

/// INSERT statement builder.
#[derive(Clone, Debug)]
pub struct Insert {
    dialect: Option<Dialect>,
    /// Leading keyword, `INSERT` unless overridden (e.g. `REPLACE`)
    beginning: String,
    table: Option<Table>,
    sets: Assignments,
    returning: Vec<Column>,
}

impl Default for Insert {
    fn default() -> Self {
        Self::new()
    }
}

impl Insert {
    pub fn new() -> Self {
        Self::with_beginning("INSERT")
    }

    /// Start with a custom keyword, e.g. `REPLACE` or `INSERT IGNORE`.
    pub fn with_beginning(beginning: impl Into<String>) -> Self {
        Self {
            dialect: None,
            beginning: beginning.into(),
            table: None,
            sets: Assignments::default(),
            returning: Vec::new(),
        }
    }

    pub fn set_dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Set the target table.
    pub fn into_table(mut self, table: &Table) -> Self {
        self.table = Some(table.clone());
        self
    }

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

    /// Add a RETURNING column. Ignored by dialects without RETURNING.
    pub fn returning(mut self, col: impl Into<Column>) -> Self {
        self.returning.push(col.into());
        self
    }

    /// Number of assignments.
    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

impl Statement for Insert {
    fn kind(&self) -> &'static str {
        "INSERT"
    }

    fn dialect_override(&self) -> Option<Dialect> {
        self.dialect
    }

    fn is_mutation(&self) -> bool {
        true
    }

    fn validate(&self) -> QResult<()> {
        if self.sets.is_empty() {
            return Err(QError::missing_assignment("INSERT"));
        }
        if self.table.is_none() {
            return Err(QError::missing_table("INSERT"));
        }
        Ok(())
    }

    fn write(&self, ctx: &mut RenderContext, out: &mut String) {
        out.push_str(&self.beginning);
        out.push_str(" INTO ");
        if let Some(table) = &self.table {
            table.write_def(ctx, out);
        }

        out.push('(');
        for (i, (col, _)) in self.sets.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            col.write_ref(ctx, out);
        }
        out.push_str(") VALUES (");
        for (i, (_, value)) in self.sets.iter().enumerate() {
            if i > 0 {
                out.push_str(", ");
            }
            value.write(ctx, out);
        }
        out.push(')');

        if !self.returning.is_empty() && ctx.dialect().can_use_returning() {
            out.push_str(" RETURNING ");
            for (i, col) in self.returning.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                col.write_def(ctx, out);
            }
        }
    }
}
