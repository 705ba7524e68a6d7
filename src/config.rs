//! Database connection settings.
//!
//! The connection string is taken as-is from `--dsn` / `DATABASE_URL` when
//! given (URL or libpq `key=value` form). Otherwise it is assembled from the
//! standard libpq environment variables:
//! - PGHOST (default: localhost)
//! - PGPORT (default: 5432)
//! - PGUSER (default: $USER)
//! - PGPASSWORD (default: empty)
//! - PGDATABASE (default: same as PGUSER)
//! - PGSSLMODE (default: driver default, `prefer`)
//!
//! Nothing here is validated beyond quoting; the driver reports malformed
//! settings when the collector parses them.

use std::time::Duration;

pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_STATEMENT_TIMEOUT: Duration = Duration::from_secs(5);
pub const DEFAULT_POOL_SIZE: u32 = 2;

/// Application name reported to the server when the DSN does not set one.
pub const APPLICATION_NAME: &str = "pgdash";

#[derive(Clone, Debug, PartialEq)]
pub struct DbConfig {
    pub dsn: String,
    /// Applied to every dial, pooled or not.
    pub connect_timeout: Duration,
    /// How long an operation waits for a pooled connection.
    pub acquire_timeout: Duration,
    /// Server-side `statement_timeout` set on every pooled connection.
    pub statement_timeout: Duration,
    pub pool_size: u32,
    pub accept_invalid_certs: bool,
}

impl DbConfig {
    pub fn new(dsn: impl Into<String>) -> Self {
        Self {
            dsn: dsn.into(),
            connect_timeout: DEFAULT_CONNECT_TIMEOUT,
            acquire_timeout: DEFAULT_ACQUIRE_TIMEOUT,
            statement_timeout: DEFAULT_STATEMENT_TIMEOUT,
            pool_size: DEFAULT_POOL_SIZE,
            accept_invalid_certs: false,
        }
    }

    /// Uses `dsn` when present and non-blank, libpq environment variables otherwise.
    pub fn resolve(dsn: Option<String>) -> Self {
        match dsn {
            Some(dsn) if !dsn.trim().is_empty() => Self::new(dsn),
            _ => Self::from_env(),
        }
    }

    /// Builds the connection string from libpq environment variables.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`DbConfig::from_env`] with an injectable variable source.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str| lookup(key).filter(|v| !v.is_empty());

        let user = var("PGUSER").or_else(|| var("USER"));
        let host = var("PGHOST").unwrap_or_else(|| "localhost".to_string());
        let port = var("PGPORT").unwrap_or_else(|| "5432".to_string());
        let database = var("PGDATABASE").or_else(|| user.clone());

        let mut parts = vec![
            format!("host={}", quote_conninfo_value(&host)),
            format!("port={}", quote_conninfo_value(&port)),
        ];
        if let Some(user) = &user {
            parts.push(format!("user={}", quote_conninfo_value(user)));
        }
        if let Some(password) = var("PGPASSWORD") {
            parts.push(format!("password={}", quote_conninfo_value(&password)));
        }
        if let Some(database) = &database {
            parts.push(format!("dbname={}", quote_conninfo_value(database)));
        }
        if let Some(sslmode) = var("PGSSLMODE") {
            parts.push(format!("sslmode={}", quote_conninfo_value(&sslmode)));
        }

        Self::new(parts.join(" "))
    }

    pub fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    pub fn with_acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = timeout;
        self
    }

    pub fn with_statement_timeout(mut self, timeout: Duration) -> Self {
        self.statement_timeout = timeout;
        self
    }

    /// Pool size is at least one connection.
    pub fn with_pool_size(mut self, size: u32) -> Self {
        self.pool_size = size.max(1);
        self
    }

    pub fn with_accept_invalid_certs(mut self, accept: bool) -> Self {
        self.accept_invalid_certs = accept;
        self
    }
}

/// Quotes a libpq `key=value` value when it contains spaces, quotes or
/// backslashes (or is empty).
fn quote_conninfo_value(value: &str) -> String {
    let needs_quotes = value.is_empty()
        || value
            .chars()
            .any(|c| c.is_whitespace() || c == '\'' || c == '\\');
    if !needs_quotes {
        return value.to_string();
    }
    let escaped = value.replace('\\', "\\\\").replace('\'', "\\'");
    format!("'{}'", escaped)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn from_lookup_uses_defaults_and_user_fallback() {
        let cfg = DbConfig::from_lookup(lookup(&[("USER", "alice")]));
        assert_eq!(
            cfg.dsn,
            "host=localhost port=5432 user=alice dbname=alice"
        );
        assert_eq!(cfg.pool_size, DEFAULT_POOL_SIZE);
        assert_eq!(cfg.statement_timeout, DEFAULT_STATEMENT_TIMEOUT);
    }

    #[test]
    fn from_lookup_prefers_pg_variables() {
        let cfg = DbConfig::from_lookup(lookup(&[
            ("USER", "alice"),
            ("PGUSER", "app"),
            ("PGHOST", "db.internal"),
            ("PGPORT", "6432"),
            ("PGPASSWORD", "secret"),
            ("PGDATABASE", "orders"),
            ("PGSSLMODE", "require"),
        ]));
        assert_eq!(
            cfg.dsn,
            "host=db.internal port=6432 user=app password=secret dbname=orders sslmode=require"
        );
    }

    #[test]
    fn from_lookup_omits_user_when_unknown() {
        let cfg = DbConfig::from_lookup(lookup(&[]));
        assert_eq!(cfg.dsn, "host=localhost port=5432");
    }

    #[test]
    fn password_with_spaces_and_quotes_is_quoted() {
        let cfg = DbConfig::from_lookup(lookup(&[
            ("PGUSER", "app"),
            ("PGPASSWORD", "it's a \\secret"),
        ]));
        assert!(cfg.dsn.contains(r"password='it\'s a \\secret'"));
    }

    #[test]
    fn resolve_ignores_blank_dsn() {
        let cfg = DbConfig::resolve(Some("postgres://u@h/db".to_string()));
        assert_eq!(cfg.dsn, "postgres://u@h/db");
        let cfg = DbConfig::resolve(Some("   ".to_string()));
        assert!(cfg.dsn.starts_with("host="));
    }

    #[test]
    fn pool_size_has_a_floor_of_one() {
        let cfg = DbConfig::new("host=x").with_pool_size(0);
        assert_eq!(cfg.pool_size, 1);
    }
}
