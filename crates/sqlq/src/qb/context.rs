//! Per-render state.

use crate::dialect::{Dialect, Placeholder};
use crate::qb::table::Table;
use crate::value::Value;
use std::collections::HashMap;

/// Mutable state for a single render pass.
///
/// A context is created by a top-level render call, threaded through every
/// node of the statement tree exactly once, and then consumed. Placeholder
/// numbering and the argument list advance together, so the n-th placeholder
/// in the output always refers to `args[n - 1]`.
#[derive(Debug)]
pub struct RenderContext {
    dialect: Dialect,
    placeholder: Placeholder,
    args: Vec<Value>,
    slots: HashMap<String, Vec<usize>>,
    definition: bool,
    /// Table an UPDATE/DELETE writes to; it is declared without its alias.
    target: Option<Table>,
}

impl RenderContext {
    /// Create a context in projection mode.
    pub fn new(dialect: Dialect) -> Self {
        Self {
            dialect,
            placeholder: dialect.placeholder(),
            args: Vec::new(),
            slots: HashMap::new(),
            definition: false,
            target: None,
        }
    }

    /// Create a context in definition mode (INSERT/UPDATE/DELETE targets).
    pub fn definition(dialect: Dialect) -> Self {
        let mut ctx = Self::new(dialect);
        ctx.definition = true;
        ctx
    }

    pub fn dialect(&self) -> Dialect {
        self.dialect
    }

    /// Whether columns and tables render as bare names.
    pub fn is_definition(&self) -> bool {
        self.definition
    }

    /// Switch the rendering mode, returning the previous one.
    pub fn set_definition(&mut self, definition: bool) -> bool {
        std::mem::replace(&mut self.definition, definition)
    }

    /// Run `f` in projection mode, restoring the current mode afterwards.
    pub fn with_projection<R>(&mut self, f: impl FnOnce(&mut Self) -> R) -> R {
        let prev = self.set_definition(false);
        let r = f(self);
        self.definition = prev;
        r
    }

    /// Record the table a mutation writes to.
    pub(crate) fn set_target(&mut self, table: &Table) {
        self.target = Some(table.clone());
    }

    /// Whether `table` is the mutation target, which is always referenced by name.
    pub(crate) fn is_target(&self, table: &Table) -> bool {
        self.target.as_ref().is_some_and(|t| t.same_as(table))
    }

    /// Append a quoted identifier.
    pub fn quote(&self, out: &mut String, word: &str) {
        self.dialect.quote(out, word);
    }

    /// Bind `value` and append its placeholder.
    pub fn bind(&mut self, value: Value, out: &mut String) {
        self.args.push(value);
        self.placeholder.next(out);
    }

    /// Bind `value` and remember its slot under `key` for later rebinding.
    pub fn bind_keyed(&mut self, key: &str, value: Value, out: &mut String) {
        self.slots
            .entry(key.to_string())
            .or_default()
            .push(self.args.len());
        self.bind(value, out);
    }

    /// Bind every value of a list as `(?,?,?)`; an empty list renders `()`.
    pub fn bind_list(&mut self, values: &[Value], out: &mut String) {
        out.push('(');
        for (i, value) in values.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            self.bind(value.clone(), out);
        }
        out.push(')');
    }

    /// Arguments bound so far.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub(crate) fn into_parts(self) -> (Vec<Value>, HashMap<String, Vec<usize>>) {
        (self.args, self.slots)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_and_placeholders_advance_together() {
        let mut ctx = RenderContext::new(Dialect::PostgreSql);
        let mut out = String::new();
        ctx.bind(Value::from(1), &mut out);
        out.push_str(" AND ");
        ctx.bind_list(&[Value::from(2), Value::from(3)], &mut out);
        assert_eq!(out, "$1 AND ($2,$3)");
        assert_eq!(ctx.args(), &[Value::from(1), Value::from(2), Value::from(3)]);
    }

    #[test]
    fn empty_list_binds_nothing() {
        let mut ctx = RenderContext::new(Dialect::MySql);
        let mut out = String::new();
        ctx.bind_list(&[], &mut out);
        assert_eq!(out, "()");
        assert!(ctx.args().is_empty());
    }

    #[test]
    fn keyed_slots_collect_every_position() {
        let mut ctx = RenderContext::new(Dialect::Generic);
        let mut out = String::new();
        ctx.bind_keyed("id", Value::from(1), &mut out);
        ctx.bind(Value::from("x"), &mut out);
        ctx.bind_keyed("id", Value::from(1), &mut out);
        let (args, slots) = ctx.into_parts();
        assert_eq!(args.len(), 3);
        assert_eq!(slots["id"], vec![0, 2]);
    }

    #[test]
    fn target_is_matched_by_handle() {
        let user = crate::qb::table::t_as("user", "u");
        let mut ctx = RenderContext::definition(Dialect::Generic);
        assert!(!ctx.is_target(&user));
        ctx.set_target(&user);
        assert!(ctx.is_target(&user.clone()));
        assert!(!ctx.is_target(&crate::qb::table::t_as("user", "u")));
    }

    #[test]
    fn projection_scope_restores_mode() {
        let mut ctx = RenderContext::definition(Dialect::Generic);
        let inner = ctx.with_projection(|ctx| ctx.is_definition());
        assert!(!inner);
        assert!(ctx.is_definition());
    }
}
