//! Runtime configuration.
//!
//! Every setting resolves with the same priority:
//! 1. Explicit value (command-line flag)
//! 2. Environment variable
//! 3. Built-in default, where one exists

use std::env;
use std::path::PathBuf;

use crate::error::{GscError, GscResult};

pub const CREDENTIALS_ENV: &str = "GSC_CREDENTIALS_PATH";
pub const SITE_URL_ENV: &str = "GSC_SITE_URL";
pub const API_URL_ENV: &str = "GSC_API_URL";
pub const ACCESS_TOKEN_ENV: &str = "GSC_ACCESS_TOKEN";

pub const DEFAULT_API_URL: &str = "https://searchconsole.googleapis.com";

/// Resolved settings shared by the CLI and the MCP server.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub credentials_path: Option<PathBuf>,
    pub site_url: Option<String>,
    pub api_url: String,
    /// Pre-issued OAuth token; skips the service-account exchange when set.
    pub access_token: Option<String>,
}

impl Config {
    pub fn resolve(
        credentials_path: Option<PathBuf>,
        site_url: Option<String>,
        api_url: Option<String>,
    ) -> Self {
        let credentials_path = credentials_path
            .or_else(|| non_empty_env(CREDENTIALS_ENV).map(PathBuf::from));
        let site_url = site_url
            .filter(|s| !s.trim().is_empty())
            .or_else(|| non_empty_env(SITE_URL_ENV));
        let api_url = api_url
            .or_else(|| non_empty_env(API_URL_ENV))
            .unwrap_or_else(|| DEFAULT_API_URL.to_string());

        Self {
            credentials_path,
            site_url,
            api_url: api_url.trim_end_matches('/').to_string(),
            access_token: non_empty_env(ACCESS_TOKEN_ENV),
        }
    }

    /// Credentials path, or an error explaining how to set one.
    pub fn require_credentials(&self) -> GscResult<&PathBuf> {
        self.credentials_path
            .as_ref()
            .ok_or(GscError::MissingCredentials)
    }
}

fn non_empty_env(key: &str) -> Option<String> {
    env::var(key).ok().filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    fn clear_env() {
        // SAFETY: tests touching the environment are serialized
        unsafe {
            env::remove_var(CREDENTIALS_ENV);
            env::remove_var(SITE_URL_ENV);
            env::remove_var(API_URL_ENV);
            env::remove_var(ACCESS_TOKEN_ENV);
        }
    }

    #[test]
    #[serial]
    fn test_explicit_values_win() {
        clear_env();
        unsafe {
            env::set_var(SITE_URL_ENV, "sc-domain:env.example");
        }

        let config = Config::resolve(
            Some(PathBuf::from("/keys/sa.json")),
            Some("sc-domain:flag.example".to_string()),
            Some("http://localhost:9999/".to_string()),
        );

        assert_eq!(config.credentials_path, Some(PathBuf::from("/keys/sa.json")));
        assert_eq!(config.site_url.as_deref(), Some("sc-domain:flag.example"));
        assert_eq!(config.api_url, "http://localhost:9999");
        clear_env();
    }

    #[test]
    #[serial]
    fn test_env_fallback() {
        clear_env();
        unsafe {
            env::set_var(CREDENTIALS_ENV, "/etc/gsc/key.json");
            env::set_var(SITE_URL_ENV, "https://www.example.com/");
        }

        let config = Config::resolve(None, None, None);

        assert_eq!(
            config.credentials_path,
            Some(PathBuf::from("/etc/gsc/key.json"))
        );
        assert_eq!(config.site_url.as_deref(), Some("https://www.example.com/"));
        assert_eq!(config.api_url, DEFAULT_API_URL);
        clear_env();
    }

    #[test]
    #[serial]
    fn test_blank_values_are_ignored() {
        clear_env();
        unsafe {
            env::set_var(SITE_URL_ENV, "   ");
        }

        let config = Config::resolve(None, Some(String::new()), None);

        assert!(config.site_url.is_none());
        assert!(matches!(
            config.require_credentials(),
            Err(GscError::MissingCredentials)
        ));
        clear_env();
    }
}
