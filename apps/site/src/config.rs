use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use serde::Serialize;

use crate::theme::Theme;

/// Development-only fallbacks for the CMS admin secrets.
const DEV_ADMIN_JWT_SECRET: &str = "dev-admin-jwt-secret";
const DEV_API_TOKEN_SALT: &str = "dev-api-token-salt";
const DEV_TRANSFER_TOKEN_SALT: &str = "dev-transfer-token-salt";

/// Application configuration loaded from environment variables.
/// Every key has a development default; only malformed values fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub cms_url: String,
    pub cms_api_token: Option<String>,
    pub media_base_url: String,
    pub port: u16,
    pub rust_log: String,
    pub contact_reset: Duration,
    pub default_theme: Theme,
    pub admin: AdminSecrets,
    pub flags: FeatureFlags,
}

/// Secrets handed through to the content system's admin panel.
/// Never interpreted here.
#[derive(Clone)]
pub struct AdminSecrets {
    pub jwt_secret: String,
    pub api_token_salt: String,
    pub transfer_token_salt: String,
}

impl std::fmt::Debug for AdminSecrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminSecrets").finish_non_exhaustive()
    }
}

impl AdminSecrets {
    /// True when any secret still carries its development fallback.
    pub fn uses_dev_defaults(&self) -> bool {
        self.jwt_secret == DEV_ADMIN_JWT_SECRET
            || self.api_token_salt == DEV_API_TOKEN_SALT
            || self.transfer_token_salt == DEV_TRANSFER_TOKEN_SALT
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct FeatureFlags {
    pub nps: bool,
    pub promote_ee: bool,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let cms_url = env_or("CMS_URL", "http://localhost:1337");
        let media_base_url = std::env::var("MEDIA_BASE_URL").unwrap_or_else(|_| cms_url.clone());

        let admin = AdminSecrets {
            jwt_secret: env_or("ADMIN_JWT_SECRET", DEV_ADMIN_JWT_SECRET),
            api_token_salt: env_or("API_TOKEN_SALT", DEV_API_TOKEN_SALT),
            transfer_token_salt: env_or("TRANSFER_TOKEN_SALT", DEV_TRANSFER_TOKEN_SALT),
        };
        Ok(Config {
            cms_url,
            cms_api_token: std::env::var("CMS_API_TOKEN")
                .ok()
                .filter(|token| !token.trim().is_empty()),
            media_base_url,
            port: env_or("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: env_or("RUST_LOG", "info"),
            contact_reset: Duration::from_secs(
                env_or("CONTACT_RESET_SECS", "5")
                    .parse::<u64>()
                    .context("CONTACT_RESET_SECS must be a whole number of seconds")?,
            ),
            default_theme: env_or("DEFAULT_THEME", "light")
                .parse::<Theme>()
                .map_err(|e| anyhow!("DEFAULT_THEME must be 'light' or 'dark': {e}"))?,
            admin,
            flags: FeatureFlags {
                nps: parse_flag("FLAG_NPS", true)?,
                promote_ee: parse_flag("FLAG_PROMOTE_EE", true)?,
            },
        })
    }
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_flag(key: &str, default: bool) -> Result<bool> {
    match std::env::var(key) {
        Ok(raw) => parse_bool(&raw).with_context(|| format!("{key} must be true or false")),
        Err(_) => Ok(default),
    }
}

fn parse_bool(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "1" | "yes" | "on" => Some(true),
        "false" | "0" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bool_accepts_common_spellings() {
        assert_eq!(parse_bool("TRUE"), Some(true));
        assert_eq!(parse_bool(" off "), Some(false));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_dev_secrets_detected() {
        let secrets = AdminSecrets {
            jwt_secret: "real".to_string(),
            api_token_salt: DEV_API_TOKEN_SALT.to_string(),
            transfer_token_salt: "real".to_string(),
        };
        assert!(secrets.uses_dev_defaults());
    }

    #[test]
    fn test_secrets_not_printed_in_debug() {
        let secrets = AdminSecrets {
            jwt_secret: "hunter2".to_string(),
            api_token_salt: "salt".to_string(),
            transfer_token_salt: "salt".to_string(),
        };
        assert!(!format!("{secrets:?}").contains("hunter2"));
    }
}
