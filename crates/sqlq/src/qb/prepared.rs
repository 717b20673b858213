//! Reusable rendered statements.
//!
//! Values bound through [`v_as`](crate::qb::v_as) remember where they landed in
//! the argument list. A [`Prepared`] statement keeps those positions, so new
//! argument lists can be produced without rendering the SQL again.
//!
//! ```ignore
//! let user = t("user");
//! let p = select().from(&user).where_(eq(user.c("id"), v_as(0, "id"))).to_prepared()?;
//! let mut args = p.builder();
//! args.set("id", 42)?;
//! client.query(p.sql(), &args.into_args()).await?;
//! ```

use crate::error::{QError, QResult};
use crate::value::Value;
use std::collections::HashMap;

/// SQL text plus its default arguments and the slots of every keyed value.
#[derive(Debug, Clone)]
pub struct Prepared {
    sql: String,
    args: Vec<Value>,
    slots: HashMap<String, Vec<usize>>,
}

impl Prepared {
    pub(crate) fn new(sql: String, args: Vec<Value>, slots: HashMap<String, Vec<usize>>) -> Self {
        Self { sql, args, slots }
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// Arguments as rendered.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Argument positions bound under `key`.
    pub fn slots(&self, key: &str) -> Option<&[usize]> {
        self.slots.get(key).map(Vec::as_slice)
    }

    /// Start a new argument list from the rendered defaults.
    pub fn builder(&self) -> ArgsBuilder<'_> {
        ArgsBuilder {
            prepared: self,
            args: self.args.clone(),
        }
    }
}

/// A copy of a prepared statement's arguments with keyed slots replaceable.
#[derive(Debug, Clone)]
pub struct ArgsBuilder<'a> {
    prepared: &'a Prepared,
    args: Vec<Value>,
}

impl ArgsBuilder<'_> {
    /// Overwrite every slot bound under `key`.
    pub fn set(&mut self, key: &str, value: impl Into<Value>) -> QResult<&mut Self> {
        let slots = self
            .prepared
            .slots
            .get(key)
            .ok_or_else(|| QError::UnknownArgKey(key.to_string()))?;
        let value = value.into();
        for &i in slots {
            self.args[i] = value.clone();
        }
        Ok(self)
    }

    pub fn args(&self) -> &[Value] {
        &self.args
    }

    pub fn into_args(self) -> Vec<Value> {
        self.args
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prepared() -> Prepared {
        let slots = HashMap::from([("id".to_string(), vec![0, 2])]);
        Prepared::new(
            "SELECT ? , ?, ?".into(),
            vec![Value::from(1), Value::from("x"), Value::from(1)],
            slots,
        )
    }

    #[test]
    fn set_overwrites_every_slot() {
        let p = prepared();
        let mut b = p.builder();
        b.set("id", 7).unwrap();
        assert_eq!(
            b.into_args(),
            vec![Value::from(7), Value::from("x"), Value::from(7)]
        );
        // The defaults are untouched.
        assert_eq!(p.args()[0], Value::from(1));
    }

    #[test]
    fn unknown_key_is_an_error() {
        let p = prepared();
        let mut b = p.builder();
        assert!(matches!(b.set("nope", 1), Err(QError::UnknownArgKey(k)) if k == "nope"));
        assert_eq!(b.args(), p.args());
    }

    #[test]
    fn chained_sets() {
        let slots = HashMap::from([("a".to_string(), vec![0]), ("b".to_string(), vec![1])]);
        let p = Prepared::new("?, ?".into(), vec![Value::Null, Value::Null], slots);
        let mut b = p.builder();
        b.set("a", 1).unwrap().set("b", "two").unwrap();
        assert_eq!(b.args(), &[Value::from(1), Value::from("two")]);
        assert_eq!(p.slots("b"), Some(&[1][..]));
        assert_eq!(p.slots("c"), None);
    }
}
