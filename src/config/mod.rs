use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub environment: Environment,
    pub search: SearchConfig,
    pub database: DatabaseConfig,
    pub api: ApiConfig,
    pub security: SecurityConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Environment {
    Development,
    Staging,
    Production,
}

/// What to do when the count query fails after the page query succeeded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CountFailurePolicy {
    /// Log and report a total of zero.
    Lenient,
    /// Fail the whole request.
    Strict,
}

/// How malformed query parameters (non-numeric ranges, unknown enum values, bad paging) are handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamPolicy {
    /// Ignore the bad value and carry on with defaults.
    Lenient,
    /// Reject the request with a validation error.
    Strict,
}

impl FromStr for CountFailurePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(CountFailurePolicy::Lenient),
            "strict" => Ok(CountFailurePolicy::Strict),
            other => Err(format!("unknown count failure policy: {}", other)),
        }
    }
}

impl FromStr for ParamPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "lenient" => Ok(ParamPolicy::Lenient),
            "strict" => Ok(ParamPolicy::Strict),
            other => Err(format!("unknown parameter policy: {}", other)),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Page size for the public search when `limit` is absent
    pub default_limit: i64,
    /// Hard cap for the public search
    pub max_limit: i64,
    /// Page size for a sponsor's own listings when `limit` is absent
    pub sponsor_default_limit: i64,
    /// Hard cap for a sponsor's own listings
    pub sponsor_max_limit: i64,
    pub count_failure: CountFailurePolicy,
    pub params: ParamPolicy,
    pub debug_logging: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub max_connections: u32,
    pub connection_timeout: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SecurityConfig {
    pub cors_origins: Vec<String>,
    #[serde(skip_serializing)]
    pub jwt_secret: String,
    pub jwt_expiry_hours: u64,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            default_limit: 10,
            max_limit: 50,
            sponsor_default_limit: 20,
            sponsor_max_limit: 50,
            count_failure: CountFailurePolicy::Lenient,
            params: ParamPolicy::Strict,
            debug_logging: false,
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let environment = match env::var("APP_ENV").as_deref() {
            Ok("production") | Ok("prod") => Environment::Production,
            Ok("staging") | Ok("stage") => Environment::Staging,
            _ => Environment::Development,
        };

        // Set defaults based on environment, then override with specific env vars
        match environment {
            Environment::Production => Self::production(),
            Environment::Staging => Self::staging(),
            Environment::Development => Self::development(),
        }
        .with_env_overrides()
    }

    fn with_env_overrides(mut self) -> Self {
        // Search overrides
        if let Ok(v) = env::var("SEARCH_DEFAULT_LIMIT") {
            self.search.default_limit = v.parse().unwrap_or(self.search.default_limit);
        }
        if let Ok(v) = env::var("SEARCH_MAX_LIMIT") {
            self.search.max_limit = v.parse().unwrap_or(self.search.max_limit);
        }
        if let Ok(v) = env::var("SEARCH_SPONSOR_DEFAULT_LIMIT") {
            self.search.sponsor_default_limit = v.parse().unwrap_or(self.search.sponsor_default_limit);
        }
        if let Ok(v) = env::var("SEARCH_SPONSOR_MAX_LIMIT") {
            self.search.sponsor_max_limit = v.parse().unwrap_or(self.search.sponsor_max_limit);
        }
        if let Ok(v) = env::var("SEARCH_COUNT_FAILURE") {
            self.search.count_failure = v.parse().unwrap_or(self.search.count_failure);
        }
        if let Ok(v) = env::var("SEARCH_PARAM_POLICY") {
            self.search.params = v.parse().unwrap_or(self.search.params);
        }
        if let Ok(v) = env::var("SEARCH_DEBUG_LOGGING") {
            self.search.debug_logging = v.parse().unwrap_or(self.search.debug_logging);
        }

        // Database overrides
        if let Ok(v) = env::var("DATABASE_MAX_CONNECTIONS") {
            self.database.max_connections = v.parse().unwrap_or(self.database.max_connections);
        }
        if let Ok(v) = env::var("DATABASE_CONNECTION_TIMEOUT") {
            self.database.connection_timeout = v.parse().unwrap_or(self.database.connection_timeout);
        }

        // API overrides
        if let Some(v) = env::var("API_PORT").ok().or_else(|| env::var("PORT").ok()) {
            self.api.port = v.parse().unwrap_or(self.api.port);
        }

        // Security overrides
        if let Ok(v) = env::var("SECURITY_CORS_ORIGINS") {
            self.security.cors_origins = v
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect();
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            self.security.jwt_secret = v;
        }
        if let Ok(v) = env::var("SECURITY_JWT_EXPIRY_HOURS") {
            self.security.jwt_expiry_hours = v.parse().unwrap_or(self.security.jwt_expiry_hours);
        }

        self
    }

    fn development() -> Self {
        Self {
            environment: Environment::Development,
            search: SearchConfig {
                debug_logging: true,
                ..SearchConfig::default()
            },
            database: DatabaseConfig {
                max_connections: 10,
                connection_timeout: 30,
            },
            api: ApiConfig {
                port: 3000,
            },
            security: SecurityConfig {
                cors_origins: vec!["http://localhost:3000".to_string(), "http://localhost:5173".to_string()],
                jwt_secret: "development-only-secret".to_string(),
                jwt_expiry_hours: 24 * 7, // 1 week
            },
        }
    }

    fn staging() -> Self {
        Self {
            environment: Environment::Staging,
            search: SearchConfig::default(),
            database: DatabaseConfig {
                max_connections: 20,
                connection_timeout: 10,
            },
            api: ApiConfig {
                port: 3000,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://staging.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 24,
            },
        }
    }

    fn production() -> Self {
        Self {
            environment: Environment::Production,
            search: SearchConfig::default(),
            database: DatabaseConfig {
                max_connections: 50,
                connection_timeout: 5,
            },
            api: ApiConfig {
                port: 3000,
            },
            security: SecurityConfig {
                cors_origins: vec!["https://app.example.com".to_string()],
                jwt_secret: String::new(),
                jwt_expiry_hours: 4,
            },
        }
    }
}

// Global singleton config - initialized once at startup
pub static CONFIG: Lazy<AppConfig> = Lazy::new(AppConfig::from_env);

// Convenience function for accessing config
pub fn config() -> &'static AppConfig {
    &CONFIG
}

#[macro_export]
macro_rules! is_production {
    () => {
        matches!($crate::config::CONFIG.environment, $crate::config::Environment::Production)
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_development_config() {
        let config = AppConfig::development();
        assert!(config.search.debug_logging);
        assert_eq!(config.search.default_limit, 10);
        assert_eq!(config.search.max_limit, 50);
        assert!(!config.security.jwt_secret.is_empty());
    }

    #[test]
    fn test_default_production_config() {
        let config = AppConfig::production();
        assert!(!config.search.debug_logging);
        assert_eq!(config.search.sponsor_default_limit, 20);
        assert_eq!(config.search.sponsor_max_limit, 50);
        assert_eq!(config.search.count_failure, CountFailurePolicy::Lenient);
        assert_eq!(config.search.params, ParamPolicy::Strict);
        // production must be given a secret explicitly
        assert!(config.security.jwt_secret.is_empty());
    }

    #[test]
    fn parses_policies_case_insensitively() {
        assert_eq!("STRICT".parse::<CountFailurePolicy>().unwrap(), CountFailurePolicy::Strict);
        assert_eq!("lenient".parse::<ParamPolicy>().unwrap(), ParamPolicy::Lenient);
        assert!("sometimes".parse::<ParamPolicy>().is_err());
    }
}
