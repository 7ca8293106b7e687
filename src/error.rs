//! Error types for Search Console operations.
//!
//! Uses miette for diagnostic output and thiserror for derive macros.
//! Both front ends share this type: the CLI prints it as a diagnostic,
//! the MCP layer converts it into structured tool errors.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Error, Diagnostic, Debug)]
pub enum GscError {
    #[error("No service account credentials configured")]
    #[diagnostic(
        code(gsc::auth::missing_credentials),
        help(
            "Pass --credentials /path/to/key.json or set GSC_CREDENTIALS_PATH to your service account JSON key."
        )
    )]
    MissingCredentials,

    #[error("Failed to read credentials file {path}")]
    #[diagnostic(code(gsc::auth::credentials_unreadable))]
    CredentialsUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid service account key: {message}")]
    #[diagnostic(
        code(gsc::auth::invalid_key),
        help("Download a fresh JSON key for the service account from the Cloud console.")
    )]
    InvalidKey { message: String },

    #[error("Token exchange failed: {message}")]
    #[diagnostic(
        code(gsc::auth::token_exchange),
        help("Check that the service account exists and its key has not been revoked.")
    )]
    TokenExchange { message: String },

    #[error("Failed to connect to the Search Console API")]
    #[diagnostic(
        code(gsc::client::connection_failed),
        help("Check network access, or GSC_API_URL if you point the client at another endpoint.")
    )]
    ConnectionFailed {
        #[source]
        source: reqwest::Error,
    },

    #[error("Search Console API error ({status}): {message}")]
    #[diagnostic(code(gsc::client::api_error))]
    Api { status: u16, message: String },

    #[error("Invalid response from the Search Console API: {message}")]
    #[diagnostic(code(gsc::client::invalid_response))]
    InvalidResponse { message: String },

    #[error("No site URL provided")]
    #[diagnostic(
        code(gsc::config::missing_site_url),
        help("Use --site-url or set GSC_SITE_URL (e.g. sc-domain:example.com).")
    )]
    MissingSiteUrl,

    #[error("Invalid argument: {message}")]
    #[diagnostic(code(gsc::report::invalid_argument))]
    InvalidArgument { message: String },

    #[error("MCP transport error: {message}")]
    #[diagnostic(code(gsc::mcp::transport))]
    Transport { message: String },
}

impl GscError {
    pub fn invalid_argument(message: impl Into<String>) -> Self {
        GscError::InvalidArgument {
            message: message.into(),
        }
    }

    /// Stable diagnostic code, used as structured error data by the MCP layer.
    pub fn code_str(&self) -> String {
        self.code()
            .map(|c| c.to_string())
            .unwrap_or_else(|| "gsc::unknown".to_string())
    }

    /// Whether the caller can fix this by changing its arguments.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            GscError::MissingSiteUrl | GscError::InvalidArgument { .. }
        )
    }
}

impl From<reqwest::Error> for GscError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            GscError::ConnectionFailed { source: e }
        } else {
            GscError::InvalidResponse {
                message: e.to_string(),
            }
        }
    }
}

impl From<serde_json::Error> for GscError {
    fn from(e: serde_json::Error) -> Self {
        GscError::InvalidResponse {
            message: e.to_string(),
        }
    }
}

pub type GscResult<T> = Result<T, GscError>;
