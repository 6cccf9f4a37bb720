use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct Config {
    pub host: String,
    pub port: u16,
    /// Postgres connection string. Without one the server keeps pitches in
    /// memory.
    pub database_url: Option<String>,
    pub api_keys: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            host: std::env::var("HOST").context("Cannot load HOST env variable")?,
            port: std::env::var("PORT")
                .context("Cannot load PORT env variable")?
                .parse()
                .context("PORT must be a number")?,
            database_url: std::env::var("DATABASE_URL")
                .ok()
                .filter(|url| !url.trim().is_empty()),
            api_keys: std::env::var("API_KEYS").unwrap_or_default(),
        })
    }

    /// Database URL with credentials stripped, for logging.
    pub fn redacted_database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .map(|url| url.split('@').next_back().unwrap_or("unknown"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(database_url: Option<&str>) -> Config {
        Config {
            host: "127.0.0.1".into(),
            port: 8080,
            database_url: database_url.map(String::from),
            api_keys: String::new(),
        }
    }

    #[test]
    fn test_redacted_database_url_hides_credentials() {
        let config = config(Some("postgres://user:secret@db:5432/pitchbook"));
        assert_eq!(config.redacted_database_url(), Some("db:5432/pitchbook"));
    }

    #[test]
    fn test_redacted_database_url_without_database() {
        assert_eq!(config(None).redacted_database_url(), None);
    }
}
