//! Builder configuration.
//!
//! The process-wide default dialect is set at most once, typically at startup,
//! and read by every render call that was not given an explicit dialect.
//! When it was never set, rendering falls back to [`Dialect::Generic`].

use crate::dialect::Dialect;
use crate::error::{QError, QResult};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

static DEFAULT_DIALECT: OnceLock<Dialect> = OnceLock::new();
static LOG_SQL_MAX_LEN: OnceLock<Option<usize>> = OnceLock::new();

/// Default truncation for logged SQL (in bytes).
pub const DEFAULT_LOG_SQL_MAX_LEN: usize = 200;

/// Set the process-wide default dialect. Fails if it was already set.
pub fn set_default_dialect(dialect: Dialect) -> QResult<()> {
    DEFAULT_DIALECT
        .set(dialect)
        .map_err(|_| QError::DefaultDialectAlreadySet)?;
    #[cfg(feature = "tracing")]
    tracing::info!(target: "sqlq.config", dialect = %dialect, "default dialect set");
    Ok(())
}

/// The process-wide default dialect, or `Generic` when unset.
pub fn default_dialect() -> Dialect {
    DEFAULT_DIALECT.get().copied().unwrap_or(Dialect::Generic)
}

/// Maximum SQL length emitted in execution logs. `None` disables truncation.
pub fn log_sql_max_len() -> Option<usize> {
    LOG_SQL_MAX_LEN
        .get()
        .copied()
        .unwrap_or(Some(DEFAULT_LOG_SQL_MAX_LEN))
}

/// Serializable builder configuration.
///
/// ```ignore
/// let cfg = sqlq::config::BuilderConfig::from_json(r#"{"dialect": "postgresql"}"#)?;
/// cfg.install()?;
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BuilderConfig {
    /// Dialect used when a statement is rendered without one.
    pub dialect: Option<Dialect>,
    /// Truncate SQL in execution logs to this many bytes.
    pub log_sql_max_len: Option<usize>,
}

impl BuilderConfig {
    /// Create a new configuration with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the default dialect.
    pub fn dialect(mut self, dialect: Dialect) -> Self {
        self.dialect = Some(dialect);
        self
    }

    /// Set the logged SQL truncation length.
    pub fn log_sql_max_len(mut self, len: usize) -> Self {
        self.log_sql_max_len = Some(len);
        self
    }

    /// Parse a JSON document.
    pub fn from_json(json: &str) -> QResult<Self> {
        serde_json::from_str(json).map_err(|e| QError::config(e.to_string()))
    }

    /// Read `SQLQ_DIALECT` and `SQLQ_LOG_SQL_MAX_LEN` from the environment.
    pub fn from_env() -> QResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> QResult<Self> {
        let dialect = lookup("SQLQ_DIALECT")
            .filter(|s| !s.trim().is_empty())
            .map(|s| s.parse::<Dialect>())
            .transpose()?;
        let log_sql_max_len = lookup("SQLQ_LOG_SQL_MAX_LEN")
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                s.trim()
                    .parse::<usize>()
                    .map_err(|e| QError::config(format!("SQLQ_LOG_SQL_MAX_LEN: {e}")))
            })
            .transpose()?;
        Ok(Self {
            dialect,
            log_sql_max_len,
        })
    }

    /// Apply this configuration process-wide.
    ///
    /// Both settings are set-once. If either one is already set, nothing is
    /// applied and [`QError::DefaultDialectAlreadySet`] or
    /// [`QError::LogSqlMaxLenAlreadySet`] is returned.
    pub fn install(&self) -> QResult<()> {
        if self.dialect.is_some() && DEFAULT_DIALECT.get().is_some() {
            return Err(QError::DefaultDialectAlreadySet);
        }
        if self.log_sql_max_len.is_some() && LOG_SQL_MAX_LEN.get().is_some() {
            return Err(QError::LogSqlMaxLenAlreadySet);
        }
        if let Some(len) = self.log_sql_max_len {
            LOG_SQL_MAX_LEN
                .set(Some(len))
                .map_err(|_| QError::LogSqlMaxLenAlreadySet)?;
        }
        if let Some(dialect) = self.dialect {
            set_default_dialect(dialect)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    #[test]
    fn from_json() {
        let cfg = BuilderConfig::from_json(r#"{"dialect": "mysql", "log_sql_max_len": 64}"#)
            .unwrap();
        assert_eq!(cfg, BuilderConfig::new().dialect(Dialect::MySql).log_sql_max_len(64));

        let cfg = BuilderConfig::from_json("{}").unwrap();
        assert_eq!(cfg, BuilderConfig::default());

        assert!(matches!(
            BuilderConfig::from_json(r#"{"dialect": "oracle"}"#),
            Err(QError::Config(_))
        ));
        assert!(BuilderConfig::from_json(r#"{"unknown": 1}"#).is_err());
    }

    #[test]
    fn from_lookup() {
        let env: HashMap<&str, &str> =
            [("SQLQ_DIALECT", "sqlite"), ("SQLQ_LOG_SQL_MAX_LEN", " 80 ")].into();
        let cfg = BuilderConfig::from_lookup(|k| env.get(k).map(|v| v.to_string())).unwrap();
        assert_eq!(cfg.dialect, Some(Dialect::Sqlite));
        assert_eq!(cfg.log_sql_max_len, Some(80));

        let cfg = BuilderConfig::from_lookup(|_| None).unwrap();
        assert_eq!(cfg, BuilderConfig::default());

        let bad = BuilderConfig::from_lookup(|k| (k == "SQLQ_LOG_SQL_MAX_LEN").then(|| "x".into()));
        assert!(matches!(bad, Err(QError::Config(_))));
    }

    #[test]
    fn round_trips_through_json() {
        let cfg = BuilderConfig::new().dialect(Dialect::PostgreSql);
        let json = serde_json::to_string(&cfg).unwrap();
        assert_eq!(BuilderConfig::from_json(&json).unwrap(), cfg);
    }
}
