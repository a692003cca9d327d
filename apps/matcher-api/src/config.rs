use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::info;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Application configuration loaded from environment variables.
/// Startup fails if `GOOGLE_API_KEY` is missing or a numeric variable does not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub google_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    /// Attempts per LLM call. 1 means a failed call is reported, not retried.
    pub llm_max_attempts: u32,
    pub llm_timeout_secs: u64,
    pub input_dir: PathBuf,
    pub output_dir: PathBuf,
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a config from an arbitrary key lookup (the process environment in production).
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str, default: &str| lookup(key).unwrap_or_else(|| default.to_string());

        let max_upload_mb: usize = var("MAX_UPLOAD_MB", "20")
            .parse()
            .context("MAX_UPLOAD_MB must be a whole number of megabytes")?;

        Ok(Config {
            google_api_key: lookup("GOOGLE_API_KEY")
                .filter(|k| !k.trim().is_empty())
                .context("Required environment variable 'GOOGLE_API_KEY' is not set")?,
            gemini_model: var("GEMINI_MODEL", DEFAULT_MODEL),
            gemini_base_url: var("GEMINI_BASE_URL", DEFAULT_BASE_URL),
            llm_max_attempts: var("LLM_MAX_ATTEMPTS", "1")
                .parse::<u32>()
                .context("LLM_MAX_ATTEMPTS must be a positive integer")?
                .max(1),
            llm_timeout_secs: var("LLM_TIMEOUT_SECS", "120")
                .parse()
                .context("LLM_TIMEOUT_SECS must be a number of seconds")?,
            input_dir: PathBuf::from(var("INPUT_DIR", "input")),
            output_dir: PathBuf::from(var("OUTPUT_DIR", "output")),
            max_upload_bytes: max_upload_mb * 1024 * 1024,
            port: var("PORT", "8080")
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: var("RUST_LOG", "info"),
        })
    }

    /// Creates the staging and output directories. Safe to call repeatedly.
    pub fn prepare_directories(&self) -> Result<()> {
        for dir in [&self.input_dir, &self.output_dir] {
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create directory {}", dir.display()))?;
        }
        info!(
            "Directories ready: input={}, output={}",
            self.input_dir.display(),
            self.output_dir.display()
        );
        Ok(())
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
    fn test_defaults_applied_when_only_key_is_set() {
        let config = Config::from_lookup(lookup_from(&[("GOOGLE_API_KEY", "k")])).unwrap();
        assert_eq!(config.google_api_key, "k");
        assert_eq!(config.gemini_model, "gemini-2.5-flash");
        assert_eq!(config.llm_max_attempts, 1);
        assert_eq!(config.input_dir, PathBuf::from("input"));
        assert_eq!(config.output_dir, PathBuf::from("output"));
        assert_eq!(config.max_upload_bytes, 20 * 1024 * 1024);
        assert_eq!(config.port, 8080);
    }

    #[test]
    fn test_missing_api_key_is_an_error() {
        let err = Config::from_lookup(lookup_from(&[])).unwrap_err();
        assert!(err.to_string().contains("GOOGLE_API_KEY"));

        assert!(Config::from_lookup(lookup_from(&[("GOOGLE_API_KEY", "  ")])).is_err());
    }

    #[test]
    fn test_invalid_port_is_an_error() {
        let result = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", "k"),
            ("PORT", "not-a-port"),
        ]));
        assert!(result.is_err());
    }

    #[test]
    fn test_zero_attempts_is_clamped_to_one() {
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", "k"),
            ("LLM_MAX_ATTEMPTS", "0"),
        ]))
        .unwrap();
        assert_eq!(config.llm_max_attempts, 1);
    }

    #[test]
    fn test_prepare_directories_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let config = Config::from_lookup(lookup_from(&[
            ("GOOGLE_API_KEY", "k"),
            ("INPUT_DIR", tmp.path().join("in").to_str().unwrap()),
            ("OUTPUT_DIR", tmp.path().join("nested/out").to_str().unwrap()),
        ]))
        .unwrap();

        config.prepare_directories().unwrap();
        config.prepare_directories().unwrap();
        assert!(config.input_dir.is_dir());
        assert!(config.output_dir.is_dir());
    }
}
