//! Application configuration structs
//!
//! Loads configuration from environment variables (and a `.env` file when present).

use std::env;
use std::str::FromStr;

/// Main application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app: AppSettings,
    pub api: ServerConfig,
    pub store: StoreBackend,
    /// Required when `store` is Postgres
    pub database: Option<DatabaseConfig>,
    /// Pub/sub fan-out of notifications is skipped without Redis
    pub redis: Option<RedisConfig>,
    pub jwt: JwtConfig,
    pub rate_limit: RateLimitConfig,
    pub cors: CorsConfig,
    pub snowflake: SnowflakeConfig,
    pub certificate: CertificateConfig,
}

/// General application settings
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub name: String,
    pub env: Environment,
}

/// Environment type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl Environment {
    #[must_use]
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }
}

impl FromStr for Environment {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Ok(Self::Production),
            "staging" => Ok(Self::Staging),
            "development" | "dev" => Ok(Self::Development),
            _ => Err(()),
        }
    }
}

/// Entity store backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local store, for demos and tests
    Memory,
}

/// HTTP server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    #[must_use]
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Database configuration
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub run_migrations: bool,
}

/// Redis configuration
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub url: String,
    pub max_connections: u32,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub token_expiry: i64,
}

/// Rate limiting configuration
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    pub requests_per_second: u32,
    pub burst: u32,
}

/// CORS configuration
#[derive(Debug, Clone, Default)]
pub struct CorsConfig {
    pub allowed_origins: Vec<String>,
}

/// Snowflake ID generator configuration
#[derive(Debug, Clone, Default)]
pub struct SnowflakeConfig {
    pub node_id: u16,
}

/// Certificate issuing policy
#[derive(Debug, Clone, PartialEq)]
pub struct CertificateConfig {
    /// Score recorded when completion carries no quiz result
    pub default_score: f64,
    pub max_score: f64,
    pub default_grade: String,
    /// Issuing authority for certificates minted by completion
    pub issued_by: String,
    /// Issuing authority for certificates minted by the enrollment backfill
    pub backfill_issued_by: String,
    /// `None` issues certificates that never expire
    pub validity_years: Option<u32>,
}

impl Default for CertificateConfig {
    fn default() -> Self {
        Self {
            default_score: default_certificate_score(),
            max_score: default_certificate_max_score(),
            default_grade: default_certificate_grade(),
            issued_by: default_certificate_issuer(),
            backfill_issued_by: default_backfill_issuer(),
            validity_years: Some(default_certificate_validity_years()),
        }
    }
}

// Default value functions
fn default_app_name() -> String {
    "skillsync-lms".to_string()
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_max_connections() -> u32 {
    20
}

fn default_min_connections() -> u32 {
    5
}

fn default_redis_max_connections() -> u32 {
    10
}

fn default_token_expiry() -> i64 {
    3600 // 1 hour
}

fn default_requests_per_second() -> u32 {
    10
}

fn default_burst() -> u32 {
    50
}

fn default_certificate_score() -> f64 {
    95.0
}

fn default_certificate_max_score() -> f64 {
    100.0
}

fn default_certificate_grade() -> String {
    "A".to_string()
}

fn default_certificate_issuer() -> String {
    "SkillSync - Sasken Technologies".to_string()
}

fn default_backfill_issuer() -> String {
    "SkillSync System".to_string()
}

fn default_certificate_validity_years() -> u32 {
    2
}

/// Upper bound on `CERTIFICATE_VALIDITY_YEARS`
const MAX_CERTIFICATE_VALIDITY_YEARS: u32 = 100;

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    /// Returns an error if required environment variables are missing or invalid
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary key lookup
    ///
    /// # Errors
    /// Returns an error if required variables are missing or invalid
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let vars = Vars(&lookup);

        let store = match vars.get("LMS_STORE").as_deref().map(str::to_lowercase).as_deref() {
            None | Some("postgres" | "postgresql") => StoreBackend::Postgres,
            Some("memory") => StoreBackend::Memory,
            Some(other) => return Err(ConfigError::InvalidValue("LMS_STORE", other.to_string())),
        };

        let database = match vars.get("DATABASE_URL") {
            Some(url) => Some(DatabaseConfig {
                url,
                max_connections: vars
                    .parse("DATABASE_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_max_connections),
                min_connections: vars
                    .parse("DATABASE_MIN_CONNECTIONS")?
                    .unwrap_or_else(default_min_connections),
                run_migrations: vars.parse("DATABASE_RUN_MIGRATIONS")?.unwrap_or(true),
            }),
            None if store == StoreBackend::Postgres => {
                return Err(ConfigError::MissingVar("DATABASE_URL"))
            }
            None => None,
        };

        let redis = match vars.get("REDIS_URL") {
            Some(url) => Some(RedisConfig {
                url,
                max_connections: vars
                    .parse("REDIS_MAX_CONNECTIONS")?
                    .unwrap_or_else(default_redis_max_connections),
            }),
            None => None,
        };

        let certificate = CertificateConfig {
            default_score: vars
                .parse("CERTIFICATE_DEFAULT_SCORE")?
                .unwrap_or_else(default_certificate_score),
            max_score: vars
                .parse("CERTIFICATE_MAX_SCORE")?
                .unwrap_or_else(default_certificate_max_score),
            default_grade: vars
                .get("CERTIFICATE_DEFAULT_GRADE")
                .unwrap_or_else(default_certificate_grade),
            issued_by: vars
                .get("CERTIFICATE_ISSUER")
                .unwrap_or_else(default_certificate_issuer),
            backfill_issued_by: vars
                .get("CERTIFICATE_BACKFILL_ISSUER")
                .unwrap_or_else(default_backfill_issuer),
            validity_years: match vars.parse::<u32>("CERTIFICATE_VALIDITY_YEARS")? {
                Some(0) => None,
                Some(years) if years > MAX_CERTIFICATE_VALIDITY_YEARS => {
                    return Err(ConfigError::InvalidValue(
                        "CERTIFICATE_VALIDITY_YEARS",
                        years.to_string(),
                    ))
                }
                Some(years) => Some(years),
                None => Some(default_certificate_validity_years()),
            },
        };
        if certificate.max_score <= 0.0 || certificate.default_score > certificate.max_score {
            return Err(ConfigError::InvalidValue(
                "CERTIFICATE_DEFAULT_SCORE",
                format!(
                    "{} out of {}",
                    certificate.default_score, certificate.max_score
                ),
            ));
        }

        let node_id: u16 = vars.parse("WORKER_ID")?.unwrap_or(0);
        if node_id >= 1024 {
            return Err(ConfigError::InvalidValue("WORKER_ID", node_id.to_string()));
        }

        Ok(Self {
            app: AppSettings {
                name: vars.get("APP_NAME").unwrap_or_else(default_app_name),
                env: vars
                    .get("APP_ENV")
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_default(),
            },
            api: ServerConfig {
                host: vars.get("API_HOST").unwrap_or_else(default_host),
                port: vars.parse("API_PORT")?.unwrap_or_else(default_port),
            },
            store,
            database,
            redis,
            jwt: JwtConfig {
                secret: vars.get("JWT_SECRET").ok_or(ConfigError::MissingVar("JWT_SECRET"))?,
                token_expiry: vars
                    .parse("JWT_TOKEN_EXPIRY")?
                    .unwrap_or_else(default_token_expiry),
            },
            rate_limit: RateLimitConfig {
                requests_per_second: vars
                    .parse("RATE_LIMIT_REQUESTS_PER_SECOND")?
                    .unwrap_or_else(default_requests_per_second),
                burst: vars.parse("RATE_LIMIT_BURST")?.unwrap_or_else(default_burst),
            },
            cors: CorsConfig {
                allowed_origins: vars
                    .get("CORS_ALLOWED_ORIGINS")
                    .map(|s| {
                        s.split(',')
                            .map(str::trim)
                            .filter(|o| !o.is_empty())
                            .map(String::from)
                            .collect()
                    })
                    .unwrap_or_default(),
            },
            snowflake: SnowflakeConfig { node_id },
            certificate,
        })
    }
}

struct Vars<'a, F>(&'a F);

impl<F> Vars<'_, F>
where
    F: Fn(&str) -> Option<String>,
{
    fn get(&self, key: &str) -> Option<String> {
        (self.0)(key).filter(|v| !v.trim().is_empty())
    }

    fn parse<T: FromStr>(&self, key: &'static str) -> Result<Option<T>, ConfigError> {
        self.get(key)
            .map(|raw| {
                raw.trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidValue(key, raw))
            })
            .transpose()
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingVar(&'static str),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(&'static str, String),
}
