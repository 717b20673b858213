//! Table references and joins.
//!
//! A [`Table`] is a shared handle: cloning it yields the same table, and joins
//! attached through any clone (or through an aliased wrapper) land on the same
//! join list. Identity is by handle, not by name, so two `t("user")` calls
//! produce two distinct tables.
//!
//! ```ignore
//! use sqlq::qb::{eq, select, t};
//!
//! let user = t("user");
//! let post = t_as("post", "p");
//! user.inner_join(&post, [eq(user.c("id"), post.c("user_id"))]);
//! let q = select().from(&user);
//! ```

use crate::qb::column::Column;
use crate::qb::context::RenderContext;
use crate::qb::expr::{Expr, LogicOp, fmt_rendered, write_logic};
use crate::qb::select::Select;
use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

/// Join type.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinKind {
    Inner,
    Left,
    Cross,
}

impl JoinKind {
    pub fn keyword(self) -> &'static str {
        match self {
            JoinKind::Inner => "INNER",
            JoinKind::Left => "LEFT",
            JoinKind::Cross => "CROSS",
        }
    }
}

/// One outgoing join.
#[derive(Clone, Debug)]
pub struct Join {
    kind: JoinKind,
    table: Table,
    conds: Arc<[Expr]>,
}

impl Join {
    pub fn kind(&self) -> JoinKind {
        self.kind
    }

    pub fn table(&self) -> &Table {
        &self.table
    }

    /// Join conditions, combined with AND when rendered.
    pub fn conditions(&self) -> &[Expr] {
        &self.conds
    }

    fn write(&self, ctx: &mut RenderContext, out: &mut String) {
        out.push(' ');
        out.push_str(self.kind.keyword());
        out.push_str(" JOIN ");
        let nested = self.table.join_len() > 0;
        if nested {
            out.push('(');
        }
        self.table.write_def(ctx, out);
        if nested {
            out.push(')');
        }
        if !self.conds.is_empty() {
            out.push_str(" ON ");
            write_logic(LogicOp::And, &self.conds, ctx, out);
        } else if self.needs_condition(ctx) {
            out.push_str(" ON 1 = 1");
        }
    }

    fn needs_condition(&self, ctx: &RenderContext) -> bool {
        let d = ctx.dialect();
        match self.kind {
            JoinKind::Inner => !d.can_use_inner_join_without_condition(),
            JoinKind::Left => !d.can_use_left_join_without_condition(),
            JoinKind::Cross => false,
        }
    }
}

#[derive(Debug)]
enum TableNode {
    Named {
        name: String,
        joins: RwLock<Vec<Join>>,
    },
    Aliased {
        inner: Table,
        alias: String,
    },
    SubSelect {
        select: Box<Select>,
        alias: String,
        joins: RwLock<Vec<Join>>,
    },
}

/// A table, an aliased table, or a sub-select used as a table.
#[derive(Clone, Debug)]
pub struct Table(Arc<TableNode>);

impl Table {
    pub(crate) fn sub_select(select: Select, alias: impl Into<String>) -> Self {
        Table(Arc::new(TableNode::SubSelect {
            select: Box::new(select),
            alias: alias.into(),
            joins: RwLock::new(Vec::new()),
        }))
    }

    /// Column of this table: `"table"."name"`.
    pub fn c(&self, name: impl Into<String>) -> Column {
        Column::Qualified {
            table: self.clone(),
            name: name.into(),
        }
    }

    /// Aliased column of this table: `"table"."name" AS "alias"`.
    pub fn c_as(&self, name: impl Into<String>, alias: impl Into<String>) -> Column {
        self.c(name).c_as(alias)
    }

    /// Append `INNER JOIN target ON conds`.
    pub fn inner_join(&self, target: &Table, conds: impl IntoIterator<Item = Expr>) -> Table {
        self.push_join(JoinKind::Inner, target, conds)
    }

    /// Append `LEFT JOIN target ON conds`.
    pub fn left_join(&self, target: &Table, conds: impl IntoIterator<Item = Expr>) -> Table {
        self.push_join(JoinKind::Left, target, conds)
    }

    /// Append `CROSS JOIN target`.
    pub fn cross_join(&self, target: &Table, conds: impl IntoIterator<Item = Expr>) -> Table {
        self.push_join(JoinKind::Cross, target, conds)
    }

    /// Number of joins attached to this table.
    pub fn join_len(&self) -> usize {
        self.joins()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    /// The `i`-th join, in insertion order.
    pub fn join_at(&self, i: usize) -> Option<Join> {
        self.joins()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(i)
            .cloned()
    }

    /// Whether both handles denote the same table.
    pub fn same_as(&self, other: &Table) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }

    fn push_join(
        &self,
        kind: JoinKind,
        target: &Table,
        conds: impl IntoIterator<Item = Expr>,
    ) -> Table {
        let join = Join {
            kind,
            table: target.clone(),
            conds: conds.into_iter().collect(),
        };
        self.joins()
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(join);
        self.clone()
    }

    fn joins(&self) -> &RwLock<Vec<Join>> {
        match &*self.0 {
            TableNode::Named { joins, .. } | TableNode::SubSelect { joins, .. } => joins,
            TableNode::Aliased { inner, .. } => inner.joins(),
        }
    }

    fn joins_snapshot(&self) -> Vec<Join> {
        self.joins()
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Append the reference form: the alias if there is one, else the name.
    /// The target of an UPDATE/DELETE is declared without its alias, so it is
    /// referenced by name even inside a correlated sub-select.
    pub fn write_ref(&self, ctx: &mut RenderContext, out: &mut String) {
        match &*self.0 {
            TableNode::Named { name, .. } => ctx.quote(out, name),
            TableNode::Aliased { inner, alias } => {
                if ctx.is_definition() || ctx.is_target(self) {
                    inner.write_ref(ctx, out);
                } else {
                    ctx.quote(out, alias);
                }
            }
            TableNode::SubSelect { alias, .. } => ctx.quote(out, alias),
        }
    }

    /// Append the definition form used in FROM: `name AS alias` followed by
    /// every join. In definition mode only the bare name is written.
    pub fn write_def(&self, ctx: &mut RenderContext, out: &mut String) {
        match &*self.0 {
            TableNode::Named { name, .. } => ctx.quote(out, name),
            TableNode::Aliased { inner, alias } => {
                inner.write_ref(ctx, out);
                if ctx.is_definition() {
                    return;
                }
                out.push_str(" AS ");
                ctx.quote(out, alias);
            }
            TableNode::SubSelect { select, alias, .. } => {
                out.push('(');
                select.write_body(ctx, out);
                out.push_str(") AS ");
                ctx.quote(out, alias);
            }
        }
        if ctx.is_definition() {
            return;
        }
        for join in self.joins_snapshot() {
            join.write(ctx, out);
        }
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt_rendered(f, false, |ctx, out| self.write_def(ctx, out))
    }
}

/// Create a table reference.
pub fn t(name: impl Into<String>) -> Table {
    Table(Arc::new(TableNode::Named {
        name: name.into(),
        joins: RwLock::new(Vec::new()),
    }))
}

/// Create an aliased table reference: `"name" AS "alias"`.
pub fn t_as(name: impl Into<String>, alias: impl Into<String>) -> Table {
    Table(Arc::new(TableNode::Aliased {
        inner: t(name),
        alias: alias.into(),
    }))
}
