use anyhow::{Context, Result};

const DEFAULT_MAX_CONNECTIONS: u32 = 5;

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// When unset, scores are kept in process memory
    pub database_url: Option<String>,
    pub database_max_connections: u32,
    pub api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        Ok(Self {
            host: lookup("HOST").context("Cannot load HOST env variable")?,
            port: lookup("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: lookup("DATABASE_URL").filter(|url| !url.trim().is_empty()),
            database_max_connections: match lookup("DATABASE_MAX_CONNECTIONS") {
                Some(value) => value
                    .parse()
                    .context("DATABASE_MAX_CONNECTIONS must be a number")?,
                None => DEFAULT_MAX_CONNECTIONS,
            },
            api_keys: lookup("API_KEYS").unwrap_or_default(),
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = config(&[("HOST", "127.0.0.1"), ("PORT", "8080")]).unwrap();
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.database_url, None);
        assert_eq!(config.database_max_connections, DEFAULT_MAX_CONNECTIONS);
        assert!(config.api_keys.is_empty());
    }

    #[test]
    fn test_blank_database_url_is_ignored() {
        let config = config(&[("HOST", "0.0.0.0"), ("PORT", "80"), ("DATABASE_URL", " ")]).unwrap();
        assert_eq!(config.database_url, None);
    }

    #[test]
    fn test_port_must_be_numeric() {
        assert!(config(&[("HOST", "0.0.0.0"), ("PORT", "eighty")]).is_err());
    }

    #[test]
    fn test_host_is_required() {
        assert!(config(&[("PORT", "8080")]).is_err());
    }
}
