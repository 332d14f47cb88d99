use crate::error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;

/// Used when neither `ADMIN_PASSWORD` nor `ADMIN_PASSWORD_HASH` is configured.
/// Startup logs a warning whenever this fallback is active.
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";

/// Session signing key used when `JWT_SECRET` is not configured.
pub const DEFAULT_JWT_SECRET: &str = "change-me-in-production";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub jwt: JwtConfig,
    #[serde(default)]
    pub admin: AdminConfig,
    #[serde(default)]
    pub cors: CorsConfig,
    #[serde(default)]
    pub realtime: RealtimeConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    pub secret: String,
    pub session_expires_in: i64, // seconds
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AdminConfig {
    #[serde(default)]
    pub password: Option<String>,
    /// bcrypt hash; takes precedence over `password`
    #[serde(default)]
    pub password_hash: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct CorsConfig {
    /// Empty list allows any origin.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RealtimeConfig {
    pub channel_capacity: usize,
}

impl Default for RealtimeConfig {
    fn default() -> Self {
        Self {
            channel_capacity: 64,
        }
    }
}

/// How the admin password is checked.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AdminSecret {
    Plain(String),
    Bcrypt(String),
}

impl AdminConfig {
    pub fn secret(&self) -> AdminSecret {
        if let Some(hash) = self.password_hash.as_ref().filter(|h| !h.is_empty()) {
            return AdminSecret::Bcrypt(hash.clone());
        }
        match self.password.as_ref().filter(|p| !p.is_empty()) {
            Some(p) => AdminSecret::Plain(p.clone()),
            None => AdminSecret::Plain(DEFAULT_ADMIN_PASSWORD.to_string()),
        }
    }

    pub fn uses_default_password(&self) -> bool {
        self.secret() == AdminSecret::Plain(DEFAULT_ADMIN_PASSWORD.to_string())
    }
}

impl JwtConfig {
    /// Anyone who knows the built-in key can sign a session token.
    pub fn uses_default_secret(&self) -> bool {
        self.secret.is_empty() || self.secret == DEFAULT_JWT_SECRET
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}

impl Config {
    pub fn from_toml() -> Result<Self, Box<dyn std::error::Error>> {
        let config_path = env::var("CONFIG_PATH").unwrap_or_else(|_| "config.toml".to_string());
        use std::io::ErrorKind;

        // without a config file everything comes from the environment
        let config_result = std::fs::read_to_string(&config_path);

        let mut config: Config = match config_result {
            Ok(config_str) => {
                toml::from_str(&config_str)
                    .map_err(|e| format!("Failed to parse config file: {e}"))?
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                fn get_env(name: &str) -> Option<String> {
                    env::var(name).ok()
                }
                fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
                    env::var(name)
                        .ok()
                        .and_then(|v| v.parse::<T>().ok())
                        .unwrap_or(default)
                }

                let database_url = get_env("DATABASE_URL")
                    .ok_or("DATABASE_URL is not set and no config.toml was found")?;

                Config {
                    server: ServerConfig {
                        host: get_env("SERVER_HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
                        port: get_env_parse("SERVER_PORT", 8080u16),
                    },
                    database: DatabaseConfig {
                        url: database_url,
                        max_connections: get_env_parse("DB_MAX_CONNECTIONS", 10u32),
                    },
                    jwt: JwtConfig {
                        secret: get_env("JWT_SECRET")
                            .unwrap_or_else(|| DEFAULT_JWT_SECRET.to_string()),
                        session_expires_in: get_env_parse("ADMIN_SESSION_EXPIRES_IN", 43_200i64),
                    },
                    admin: AdminConfig {
                        password: get_env("ADMIN_PASSWORD"),
                        password_hash: get_env("ADMIN_PASSWORD_HASH"),
                    },
                    cors: CorsConfig {
                        allowed_origins: get_env("CORS_ALLOWED_ORIGINS")
                            .map(|v| parse_origins(&v))
                            .unwrap_or_default(),
                    },
                    realtime: RealtimeConfig {
                        channel_capacity: get_env_parse("REALTIME_CHANNEL_CAPACITY", 64usize),
                    },
                }
            }
            Err(e) => {
                return Err(format!("Failed to read config file {config_path}: {e}").into());
            }
        };

        // environment always wins over the file
        if let Ok(v) = env::var("SERVER_HOST") {
            config.server.host = v;
        }
        if let Ok(v) = env::var("SERVER_PORT")
            && let Ok(p) = v.parse()
        {
            config.server.port = p;
        }
        if let Ok(v) = env::var("DATABASE_URL") {
            config.database.url = v;
        }
        if let Ok(v) = env::var("DB_MAX_CONNECTIONS")
            && let Ok(mc) = v.parse()
        {
            config.database.max_connections = mc;
        }
        if let Ok(v) = env::var("JWT_SECRET") {
            config.jwt.secret = v;
        }
        if let Ok(v) = env::var("ADMIN_SESSION_EXPIRES_IN")
            && let Ok(n) = v.parse()
        {
            config.jwt.session_expires_in = n;
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD") {
            config.admin.password = Some(v);
        }
        if let Ok(v) = env::var("ADMIN_PASSWORD_HASH") {
            config.admin.password_hash = Some(v);
        }
        if let Ok(v) = env::var("CORS_ALLOWED_ORIGINS") {
            config.cors.allowed_origins = parse_origins(&v);
        }
        if let Ok(v) = env::var("REALTIME_CHANNEL_CAPACITY")
            && let Ok(n) = v.parse()
        {
            config.realtime.channel_capacity = n;
        }

        Ok(config)
    }

    /// A private admin password is pointless while sessions are signed with
    /// the built-in key, so that combination is refused.
    pub fn ensure_session_secret(&self) -> AppResult<()> {
        if self.jwt.uses_default_secret() && !self.admin.uses_default_password() {
            return Err(AppError::ConfigError(
                "JWT_SECRET must be set when an admin password is configured".to_string(),
            ));
        }
        Ok(())
    }
}
