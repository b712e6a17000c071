use crate::{store::PoolConfig, Error, PostgreSQL, Result, StatementCacheConfig};

/// Connection settings for a [`Store`](crate::Store).
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// `postgresql://`, `postgres://` or `jdbc:postgresql://` URL.
    pub url: String,

    /// Overrides the user named in the URL.
    pub username: Option<String>,

    /// Overrides the password named in the URL.
    pub password: Option<String>,

    pub pool: PoolConfig,

    pub statement_cache: StatementCacheConfig,

    /// Worker threads of the store's runtime. Defaults to one per core.
    pub worker_threads: Option<usize>,
}

impl StoreConfig {
    pub const URL_VAR: &'static str = "POSTGRES_URL";
    pub const USERNAME_VAR: &'static str = "POSTGRES_USERNAME";
    pub const PASSWORD_VAR: &'static str = "POSTGRES_PASSWORD";

    pub fn new(
        url: impl Into<String>,
        username: impl Into<String>,
        password: impl Into<String>,
    ) -> StoreConfig {
        StoreConfig {
            url: url.into(),
            username: Some(username.into()),
            password: Some(password.into()),
            pool: PoolConfig::default(),
            statement_cache: StatementCacheConfig::default(),
            worker_threads: None,
        }
    }

    /// Reads `POSTGRES_URL`, `POSTGRES_USERNAME` and `POSTGRES_PASSWORD`.
    pub fn from_env() -> Result<StoreConfig> {
        StoreConfig::from_lookup(|name| std::env::var(name).ok())
    }

    /// Like [`from_env`](Self::from_env), reading variables through `lookup`.
    ///
    /// The URL is required; username and password fall back to the URL.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<StoreConfig> {
        let Some(url) = lookup(Self::URL_VAR).filter(|url| !url.is_empty()) else {
            return Err(Error::invalid_configuration(format!(
                "environment variable `{}` is not set",
                Self::URL_VAR
            )));
        };

        Ok(StoreConfig {
            url,
            username: lookup(Self::USERNAME_VAR),
            password: lookup(Self::PASSWORD_VAR),
            pool: PoolConfig::default(),
            statement_cache: StatementCacheConfig::default(),
            worker_threads: None,
        })
    }

    /// Builds the PostgreSQL driver described by this configuration.
    pub fn driver(&self) -> Result<PostgreSQL> {
        Ok(PostgreSQL::new(&self.url)?
            .credentials(self.username.as_deref(), self.password.as_deref())
            .statement_cache(self.statement_cache.clone()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn reads_all_variables() {
        let config = StoreConfig::from_lookup(lookup(&[
            ("POSTGRES_URL", "postgresql://localhost/app"),
            ("POSTGRES_USERNAME", "app"),
            ("POSTGRES_PASSWORD", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.url, "postgresql://localhost/app");
        assert_eq!(config.username.as_deref(), Some("app"));
        assert_eq!(config.password.as_deref(), Some("secret"));
        assert_eq!(config.statement_cache, StatementCacheConfig::default());
    }

    #[test]
    fn url_is_required() {
        let err = StoreConfig::from_lookup(lookup(&[("POSTGRES_USERNAME", "app")])).unwrap_err();
        assert!(err.is_invalid_configuration());
        assert!(err.to_string().contains("POSTGRES_URL"));
    }

    #[test]
    fn statement_cache_defaults() {
        let cache = StatementCacheConfig::default();
        assert!(cache.enabled);
        assert_eq!(cache.size, 250);
        assert_eq!(cache.sql_limit, 2048);
    }

    #[test]
    fn driver_rejects_bad_url() {
        let config = StoreConfig::new("mysql://localhost/app", "app", "secret");
        assert!(config.driver().unwrap_err().is_invalid_connection_url());
    }

    #[test]
    fn driver_applies_credentials() {
        let config = StoreConfig::new("jdbc:postgresql://localhost:5432/app", "app", "secret");
        let driver = config.driver().unwrap();
        assert_eq!(driver.config().get_user(), Some("app"));
    }
}
