// Application configuration loaded from the environment

use std::str::FromStr;

use argon2::Params;

/// Errors raised while reading configuration
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} must be set in environment")]
    Missing(&'static str),

    #[error("Invalid value '{value}' for {key}")]
    Invalid { key: &'static str, value: String },
}

/// Top-level service configuration
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub database_max_connections: u32,
    pub host: String,
    pub port: u16,
    pub jwt: JwtConfig,
    pub password: PasswordConfig,
}

/// JWT signing settings
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    /// Access token lifetime in seconds
    pub expires_in_secs: i64,
}

/// Argon2 work factor
#[derive(Debug, Clone)]
pub struct PasswordConfig {
    pub memory_kib: u32,
    pub iterations: u32,
    pub parallelism: u32,
}

impl Default for PasswordConfig {
    fn default() -> Self {
        Self {
            memory_kib: 19_456,
            iterations: 2,
            parallelism: 1,
        }
    }
}

impl PasswordConfig {
    /// Argon2 parameters for this work factor, rejecting combinations argon2 refuses
    pub fn params(&self) -> Result<Params, ConfigError> {
        Params::new(self.memory_kib, self.iterations, self.parallelism, None).map_err(|e| {
            let (key, value) = match e {
                argon2::Error::TimeTooSmall => ("PASSWORD_HASH_ITERATIONS", self.iterations),
                argon2::Error::ThreadsTooFew | argon2::Error::ThreadsTooMany => {
                    ("PASSWORD_HASH_PARALLELISM", self.parallelism)
                }
                _ => ("PASSWORD_HASH_MEMORY_KIB", self.memory_kib),
            };
            ConfigError::Invalid {
                key,
                value: value.to_string(),
            }
        })
    }
}

impl Config {
    /// Build the configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = PasswordConfig::default();
        let password = PasswordConfig {
            memory_kib: parsed(&lookup, "PASSWORD_HASH_MEMORY_KIB", defaults.memory_kib)?,
            iterations: parsed(&lookup, "PASSWORD_HASH_ITERATIONS", defaults.iterations)?,
            parallelism: parsed(&lookup, "PASSWORD_HASH_PARALLELISM", defaults.parallelism)?,
        };
        password.params()?;

        Ok(Self {
            database_url: required(&lookup, "DATABASE_URL")?,
            database_max_connections: parsed(&lookup, "DATABASE_MAX_CONNECTIONS", 5)?,
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port: parsed(&lookup, "PORT", 8080)?,
            jwt: JwtConfig {
                secret: required(&lookup, "JWT_SECRET")?,
                expires_in_secs: parsed(&lookup, "JWT_EXPIRES_IN_SECS", 3600)?,
            },
            password,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn required<F>(lookup: &F, key: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .filter(|value| !value.is_empty())
        .ok_or(ConfigError::Missing(key))
}

fn parsed<F, T>(lookup: &F, key: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_apply_when_optional_values_missing() {
        let config = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://localhost/auth"),
            ("JWT_SECRET", "secret"),
        ]))
        .unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.jwt.expires_in_secs, 3600);
        assert_eq!(config.password.memory_kib, 19_456);
        assert_eq!(config.bind_address(), "0.0.0.0:8080");
    }

    #[test]
    fn missing_secret_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[("DATABASE_URL", "postgres://x")]));
        assert!(matches!(result, Err(ConfigError::Missing("JWT_SECRET"))));
    }

    #[test]
    fn unparsable_port_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "secret"),
            ("PORT", "eighty"),
        ]));
        assert!(matches!(result, Err(ConfigError::Invalid { key: "PORT", .. })));
    }

    #[test]
    fn zero_hash_iterations_are_rejected_at_load() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "secret"),
            ("PASSWORD_HASH_ITERATIONS", "0"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "PASSWORD_HASH_ITERATIONS", .. })
        ));
    }

    #[test]
    fn too_little_hash_memory_is_rejected_at_load() {
        let result = Config::from_lookup(lookup_from(&[
            ("DATABASE_URL", "postgres://x"),
            ("JWT_SECRET", "secret"),
            ("PASSWORD_HASH_MEMORY_KIB", "1"),
        ]));
        assert!(matches!(
            result,
            Err(ConfigError::Invalid { key: "PASSWORD_HASH_MEMORY_KIB", .. })
        ));
    }

    #[test]
    fn default_work_factor_is_valid() {
        assert!(PasswordConfig::default().params().is_ok());
    }
}
