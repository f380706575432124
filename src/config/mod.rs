use std::time::Duration;

use crate::errors::{MarketError, MarketResult};

/// Terms that keep a product out of the feed when none are configured
pub const DEFAULT_EXCLUDED_TERMS: &[&str] = &[
    "innerwear",
    "lingerie",
    "briefs",
    "boxers",
    "nightwear",
    "loungewear",
];

const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub api_url: Option<String>,
    pub api_key: Option<String>,
    pub table: String,
    pub catalog_path: Option<String>,
    pub db_path: String,
    pub excluded_terms: Vec<String>,
    pub request_timeout: Duration,
}

impl Config {
    /// Get the directory where the executable is located
    fn exe_dir() -> Option<std::path::PathBuf> {
        std::env::current_exe()
            .ok()
            .and_then(|p| p.parent().map(|p| p.to_path_buf()))
    }

    pub fn from_env() -> MarketResult<Self> {
        let exe_dir = Self::exe_dir();

        // Try to load .env from executable's directory first
        if let Some(ref dir) = exe_dir {
            let env_path = dir.join(".env");
            if env_path.exists() {
                dotenvy::from_path(&env_path).ok();
            }
        }
        // Fall back to current directory
        dotenvy::dotenv().ok();

        let api_url = non_empty_var("MARKETFEED_API_URL");
        let api_key = non_empty_var("MARKETFEED_API_KEY");
        let catalog_path = non_empty_var("MARKETFEED_CATALOG_PATH");

        let table = non_empty_var("MARKETFEED_TABLE").unwrap_or_else(|| "products".to_string());

        // Default db_path is relative to executable directory
        let db_path = std::env::var("MARKETFEED_DB_PATH").unwrap_or_else(|_| {
            exe_dir
                .map(|d| d.join("marketfeed.db").to_string_lossy().into_owned())
                .unwrap_or_else(|| "./marketfeed.db".to_string())
        });

        let excluded_terms = match std::env::var("MARKETFEED_EXCLUDED_TERMS") {
            Ok(raw) => parse_terms(&raw),
            Err(_) => DEFAULT_EXCLUDED_TERMS.iter().map(|t| t.to_string()).collect(),
        };

        let request_timeout = match non_empty_var("MARKETFEED_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    MarketError::Config(format!("MARKETFEED_TIMEOUT_SECS is not a number: {}", raw))
                })?;
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        Ok(Self {
            api_url,
            api_key,
            table,
            catalog_path,
            db_path,
            excluded_terms,
            request_timeout,
        })
    }
}

fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|v| !v.trim().is_empty())
}

/// Split a comma-separated term list, dropping blanks
fn parse_terms(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|t| t.trim())
        .filter(|t| !t.is_empty())
        .map(|t| t.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_terms_trims_and_skips_blanks() {
        let terms = parse_terms(" innerwear, ,Briefs ,");
        assert_eq!(terms, vec!["innerwear", "Briefs"]);
    }

    #[test]
    fn test_parse_terms_empty() {
        assert!(parse_terms("").is_empty());
    }
}
