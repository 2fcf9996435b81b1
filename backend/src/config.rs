//! Process configuration, read once from `CERTIFY_*` environment variables.

use log::warn;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

/// SHA-256 of the stock admin password. Override with `CERTIFY_ADMIN_PASSWORD_SHA256`.
const DEFAULT_ADMIN_DIGEST: &str =
    "03ac674216f3e15c761ee1a5e255f067953623c8b388b4459e13f978d7c846f4";
/// SHA-256 of the stock user password. Override with `CERTIFY_USER_PASSWORD_SHA256`.
const DEFAULT_USER_DIGEST: &str =
    "e606e38b0d8c19b24cf0ee3808183162ea7cd63ff7912dbb22b5e803286b4446";

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub json_limit: usize,
    /// Directory holding the TTF families used by the layout PDF.
    pub fonts_dir: PathBuf,
    /// Company printed on templates created without one.
    pub company_name: String,
    pub pdf_creator: String,
    pub extraction_delay: Duration,
    pub detection_delay: Duration,
    /// Pause between each background-removal progress stage.
    pub background_step_delay: Duration,
    pub admin_username: String,
    pub admin_password_sha256: String,
    pub user_username: String,
    pub user_password_sha256: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8080,
            json_limit: 10 * 1024 * 1024,
            fonts_dir: PathBuf::from("./fonts"),
            company_name: "Atlantic Safety Foundation".to_string(),
            pdf_creator: "Certificate Generator".to_string(),
            extraction_delay: Duration::from_millis(3000),
            detection_delay: Duration::from_millis(3000),
            background_step_delay: Duration::from_millis(800),
            admin_username: "admin".to_string(),
            admin_password_sha256: DEFAULT_ADMIN_DIGEST.to_string(),
            user_username: "user".to_string(),
            user_password_sha256: DEFAULT_USER_DIGEST.to_string(),
        }
    }
}

impl AppConfig {
    pub fn from_env() -> Self {
        let defaults = AppConfig::default();
        Self {
            host: env_or("CERTIFY_HOST", defaults.host),
            port: parse_env("CERTIFY_PORT", defaults.port),
            json_limit: parse_env("CERTIFY_JSON_LIMIT", defaults.json_limit),
            fonts_dir: std::env::var("CERTIFY_FONTS_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.fonts_dir),
            company_name: env_or("CERTIFY_COMPANY_NAME", defaults.company_name),
            pdf_creator: env_or("CERTIFY_PDF_CREATOR", defaults.pdf_creator),
            extraction_delay: millis_env("CERTIFY_EXTRACTION_DELAY_MS", defaults.extraction_delay),
            detection_delay: millis_env("CERTIFY_DETECTION_DELAY_MS", defaults.detection_delay),
            background_step_delay: millis_env(
                "CERTIFY_BACKGROUND_STEP_DELAY_MS",
                defaults.background_step_delay,
            ),
            admin_username: env_or("CERTIFY_ADMIN_USERNAME", defaults.admin_username),
            admin_password_sha256: env_or(
                "CERTIFY_ADMIN_PASSWORD_SHA256",
                defaults.admin_password_sha256,
            )
            .to_ascii_lowercase(),
            user_username: env_or("CERTIFY_USER_USERNAME", defaults.user_username),
            user_password_sha256: env_or(
                "CERTIFY_USER_PASSWORD_SHA256",
                defaults.user_password_sha256,
            )
            .to_ascii_lowercase(),
        }
    }

    /// Same as the defaults but with every mock delay set to zero.
    #[cfg(test)]
    pub fn for_tests() -> Self {
        Self {
            extraction_delay: Duration::ZERO,
            detection_delay: Duration::ZERO,
            background_step_delay: Duration::ZERO,
            ..AppConfig::default()
        }
    }

    pub fn url(&self) -> String {
        format!("http://{}:{}", self.host, self.port)
    }
}

fn env_or(key: &str, default: String) -> String {
    match std::env::var(key) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => default,
    }
}

fn parse_env<T: FromStr + Copy + std::fmt::Display>(key: &str, default: T) -> T {
    match std::env::var(key) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            warn!("Ignoring {}={:?}: not a valid value, using {}", key, raw, default);
            default
        }),
        Err(_) => default,
    }
}

fn millis_env(key: &str, default: Duration) -> Duration {
    let millis = parse_env(key, default.as_millis() as u64);
    Duration::from_millis(millis)
}
