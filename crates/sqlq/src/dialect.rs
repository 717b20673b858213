//! Per-engine rendering rules.
//!
//! A [`Dialect`] is a plain value: it knows how to quote identifiers, which
//! placeholder syntax the engine expects, and which SQL features are available.
//! It holds no render state; the placeholder counter lives in a fresh
//! [`Placeholder`] handed out for each render pass.

use crate::error::{QError, QResult};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt::{self, Write};
use std::str::FromStr;

/// Supported database engines.
///
/// `Generic` is the dialect-independent fallback used for display/debug output:
/// double-quoted identifiers, `?` placeholders and every feature enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize)]
#[serde(try_from = "String")]
pub enum Dialect {
    MySql,
    PostgreSql,
    Sqlite,
    #[default]
    Generic,
}

/// Placeholder syntax of a dialect.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` for every argument.
    Question,
    /// `$1`, `$2`, ... numbered from 1 within one statement.
    Numbered,
}

/// How `value + interval` arithmetic is spelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntervalStyle {
    /// `x + INTERVAL 2 DAY`
    Keyword,
    /// `x + INTERVAL '2 days'`
    Quoted,
    /// `DATETIME(x, '2 days')`
    DatetimeModifier,
}

impl Dialect {
    /// All engine dialects, excluding `Generic`.
    pub const ENGINES: [Dialect; 3] = [Dialect::MySql, Dialect::PostgreSql, Dialect::Sqlite];

    /// Human readable engine name.
    pub fn name(self) -> &'static str {
        match self {
            Dialect::MySql => "MySQL",
            Dialect::PostgreSql => "PostgreSQL",
            Dialect::Sqlite => "SQLite",
            Dialect::Generic => "Generic",
        }
    }

    /// Identifier quote character.
    pub fn quote_char(self) -> char {
        match self {
            Dialect::MySql => '`',
            Dialect::PostgreSql | Dialect::Sqlite | Dialect::Generic => '"',
        }
    }

    /// Append `word` as a quoted identifier, doubling embedded quote characters.
    pub fn quote(self, out: &mut String, word: &str) {
        let q = self.quote_char();
        out.reserve(word.len() + 2);
        out.push(q);
        for ch in word.chars() {
            if ch == q {
                out.push(q);
            }
            out.push(ch);
        }
        out.push(q);
    }

    pub fn placeholder_style(self) -> PlaceholderStyle {
        match self {
            Dialect::PostgreSql => PlaceholderStyle::Numbered,
            Dialect::MySql | Dialect::Sqlite | Dialect::Generic => PlaceholderStyle::Question,
        }
    }

    /// A fresh placeholder generator, counting from 1.
    pub fn placeholder(self) -> Placeholder {
        Placeholder::new(self.placeholder_style())
    }

    pub fn can_use_returning(self) -> bool {
        matches!(self, Dialect::PostgreSql | Dialect::Generic)
    }

    pub fn can_use_inner_join_without_condition(self) -> bool {
        !matches!(self, Dialect::PostgreSql)
    }

    pub fn can_use_left_join_without_condition(self) -> bool {
        matches!(self, Dialect::Sqlite | Dialect::Generic)
    }

    /// Name of the character-length function.
    pub fn char_length_name(self) -> &'static str {
        match self {
            Dialect::Sqlite => "LENGTH",
            Dialect::MySql | Dialect::PostgreSql | Dialect::Generic => "CHAR_LENGTH",
        }
    }

    pub fn interval_style(self) -> IntervalStyle {
        match self {
            Dialect::MySql | Dialect::Generic => IntervalStyle::Keyword,
            Dialect::PostgreSql => IntervalStyle::Quoted,
            Dialect::Sqlite => IntervalStyle::DatetimeModifier,
        }
    }
}

impl fmt::Display for Dialect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dialect {
    type Err = QError;

    fn from_str(s: &str) -> QResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "mysql" => Ok(Dialect::MySql),
            "postgres" | "postgresql" | "pg" => Ok(Dialect::PostgreSql),
            "sqlite" | "sqlite3" => Ok(Dialect::Sqlite),
            "generic" | "fake" => Ok(Dialect::Generic),
            _ => Err(QError::UnknownDialect(s.to_string())),
        }
    }
}

impl TryFrom<String> for Dialect {
    type Error = QError;

    fn try_from(s: String) -> QResult<Self> {
        s.parse()
    }
}

impl Serialize for Dialect {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.name())
    }
}

/// Placeholder generator scoped to a single render pass.
#[derive(Debug, Clone)]
pub struct Placeholder {
    style: PlaceholderStyle,
    count: usize,
}

impl Placeholder {
    pub fn new(style: PlaceholderStyle) -> Self {
        Self { style, count: 0 }
    }

    /// Append the next placeholder marker.
    pub fn next(&mut self, out: &mut String) {
        self.count += 1;
        match self.style {
            PlaceholderStyle::Question => out.push('?'),
            PlaceholderStyle::Numbered => {
                let _ = write!(out, "${}", self.count);
            }
        }
    }

    /// Number of placeholders emitted so far.
    pub fn count(&self) -> usize {
        self.count
    }
}
