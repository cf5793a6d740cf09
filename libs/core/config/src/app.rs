use crate::{env_or_default, ConfigError, FromEnv};
use secrecy::SecretString;

/// Process-wide application configuration, read once at startup.
///
/// Holds the pieces the backend consumes directly: the signing secret the web
/// layer uses for session cookies, the storage location, and the sender
/// credentials used to seed the initial Settings row. The SMTP endpoint lives
/// with the mailer in the notifications domain.
#[derive(Clone, Debug)]
pub struct AppConfig {
    /// Signing secret for the (external) web layer.
    pub secret_key: SecretString,
    /// Storage location handed to the (external) storage engine.
    pub database_url: String,
    /// Seed values for the lazily created Settings row.
    pub default_sender: SenderSeed,
}

/// Default sender identity used only to seed the initial Settings row.
#[derive(Clone, Debug)]
pub struct SenderSeed {
    pub email: String,
    pub password: SecretString,
}

impl FromEnv for AppConfig {
    /// Reads from environment variables:
    /// - SECRET_KEY: defaults to "devkey" (dev only; set explicitly in prod)
    /// - DATABASE_URL: defaults to "sqlite://law_office.db"
    /// - EMAIL_USER / EMAIL_PASS: default empty, notifications stay disabled
    ///   until real credentials are saved in Settings
    fn from_env() -> Result<Self, ConfigError> {
        Ok(Self {
            secret_key: SecretString::from(env_or_default("SECRET_KEY", "devkey")),
            database_url: env_or_default("DATABASE_URL", "sqlite://law_office.db"),
            default_sender: SenderSeed {
                email: env_or_default("EMAIL_USER", ""),
                password: SecretString::from(env_or_default("EMAIL_PASS", "")),
            },
        })
    }
}
