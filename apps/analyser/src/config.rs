use std::path::PathBuf;

use anyhow::{Context, Result};

const DEFAULT_PORT: u16 = 8080;
const DEFAULT_KEYWORDS_DIR: &str = "data/keywords";
const DEFAULT_CATEGORY: &str = "fallback";
const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Directories searched, in order, for `keywords_{category}.json`.
    pub keywords_dirs: Vec<PathBuf>,
    /// Category used when a request does not name one.
    pub default_category: String,
    pub max_upload_bytes: usize,
    /// AI-assisted extraction is disabled when unset.
    pub anthropic_api_key: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            port: parse_env("PORT", DEFAULT_PORT)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            keywords_dirs: split_dirs(
                &std::env::var("KEYWORDS_DIR").unwrap_or_else(|_| DEFAULT_KEYWORDS_DIR.to_string()),
            ),
            default_category: std::env::var("DEFAULT_CATEGORY")
                .unwrap_or_else(|_| DEFAULT_CATEGORY.to_string()),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            anthropic_api_key: std::env::var("ANTHROPIC_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
        })
    }
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        Err(_) => Ok(default),
    }
}

/// `KEYWORDS_DIR` may list several directories separated by `:`.
fn split_dirs(raw: &str) -> Vec<PathBuf> {
    raw.split(':')
        .map(str::trim)
        .filter(|dir| !dir.is_empty())
        .map(PathBuf::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_dirs() {
        assert_eq!(
            split_dirs("data/keywords: /etc/analyser/keywords:"),
            vec![
                PathBuf::from("data/keywords"),
                PathBuf::from("/etc/analyser/keywords")
            ]
        );
        assert!(split_dirs("").is_empty());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let port: u16 = parse_env("ANALYSER_TEST_UNSET_PORT_VAR", 9000).unwrap();
        assert_eq!(port, 9000);
    }
}
