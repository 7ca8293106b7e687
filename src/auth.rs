//! Service-account authentication.
//!
//! Loads a Google service-account JSON key, signs an RS256 assertion and
//! exchanges it for a short-lived OAuth access token. Tokens are cached
//! until shortly before they expire.

use std::future::Future;
use std::path::Path;
use std::time::{Duration, Instant};

use chrono::Utc;
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::debug;

use crate::config::Config;
use crate::error::{GscError, GscResult};

/// Read-only Search Console scope.
pub const SCOPE: &str = "https://www.googleapis.com/auth/webmasters.readonly";
pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";

const GRANT_TYPE: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const ASSERTION_LIFETIME_SECS: i64 = 3600;
const REFRESH_MARGIN: Duration = Duration::from_secs(60);

/// Source of bearer tokens for API requests.
pub trait Authenticator: Send + Sync + 'static {
    fn access_token(&self) -> impl Future<Output = GscResult<String>> + Send;
}

/// Fields of a service-account key file that the token exchange needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default)]
    pub token_uri: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
}

impl ServiceAccountKey {
    pub fn from_file(path: &Path) -> GscResult<Self> {
        let raw = std::fs::read_to_string(path).map_err(|source| {
            GscError::CredentialsUnreadable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> GscResult<Self> {
        let key: Self = serde_json::from_str(raw).map_err(|e| GscError::InvalidKey {
            message: e.to_string(),
        })?;
        if key.client_email.trim().is_empty() {
            return Err(GscError::InvalidKey {
                message: "client_email is empty".to_string(),
            });
        }
        if !key.private_key.contains("PRIVATE KEY") {
            return Err(GscError::InvalidKey {
                message: "private_key is not a PEM encoded key".to_string(),
            });
        }
        Ok(key)
    }

    pub fn token_uri(&self) -> &str {
        self.token_uri.as_deref().unwrap_or(DEFAULT_TOKEN_URI)
    }
}

#[derive(Debug, Serialize)]
struct Claims<'a> {
    iss: &'a str,
    scope: &'a str,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct TokenErrorResponse {
    error: String,
    #[serde(default)]
    error_description: Option<String>,
}

struct CachedToken {
    token: String,
    expires_at: Instant,
}

/// Holds one token and refreshes it through a caller-supplied fetch.
#[derive(Default)]
pub struct TokenCache {
    slot: Mutex<Option<CachedToken>>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Return the cached token, or run `fetch` for a fresh `(token, lifetime)`.
    pub async fn get_or_refresh<F, Fut>(&self, fetch: F) -> GscResult<String>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = GscResult<(String, Duration)>>,
    {
        let mut slot = self.slot.lock().await;
        if let Some(cached) = slot.as_ref()
            && Instant::now() + REFRESH_MARGIN < cached.expires_at
        {
            return Ok(cached.token.clone());
        }

        let (token, lifetime) = fetch().await?;
        *slot = Some(CachedToken {
            token: token.clone(),
            expires_at: Instant::now() + lifetime,
        });
        Ok(token)
    }
}

/// Exchanges a signed service-account assertion for access tokens.
pub struct ServiceAccountAuth {
    key: ServiceAccountKey,
    encoding_key: EncodingKey,
    http: Client,
    cache: TokenCache,
}

impl ServiceAccountAuth {
    pub fn new(key: ServiceAccountKey, http: Client) -> GscResult<Self> {
        let encoding_key =
            EncodingKey::from_rsa_pem(key.private_key.as_bytes()).map_err(|e| {
                GscError::InvalidKey {
                    message: e.to_string(),
                }
            })?;

        Ok(Self {
            key,
            encoding_key,
            http,
            cache: TokenCache::new(),
        })
    }

    pub fn from_file(path: &Path, http: Client) -> GscResult<Self> {
        Self::new(ServiceAccountKey::from_file(path)?, http)
    }

    pub fn client_email(&self) -> &str {
        &self.key.client_email
    }

    fn sign_assertion(&self) -> GscResult<String> {
        let iat = Utc::now().timestamp();
        let claims = Claims {
            iss: &self.key.client_email,
            scope: SCOPE,
            aud: self.key.token_uri(),
            iat,
            exp: iat + ASSERTION_LIFETIME_SECS,
        };

        let mut header = Header::new(Algorithm::RS256);
        header.kid = self.key.private_key_id.clone();

        jsonwebtoken::encode(&header, &claims, &self.encoding_key).map_err(|e| {
            GscError::InvalidKey {
                message: e.to_string(),
            }
        })
    }

    async fn fetch_token(&self) -> GscResult<(String, Duration)> {
        let assertion = self.sign_assertion()?;
        debug!(client_email = %self.key.client_email, "requesting access token");
        exchange_assertion(&self.http, self.key.token_uri(), &assertion).await
    }
}

impl Authenticator for ServiceAccountAuth {
    async fn access_token(&self) -> GscResult<String> {
        self.cache.get_or_refresh(|| self.fetch_token()).await
    }
}

/// POST a signed assertion to the token endpoint.
///
/// Returns the access token and its lifetime.
pub async fn exchange_assertion(
    http: &Client,
    token_uri: &str,
    assertion: &str,
) -> GscResult<(String, Duration)> {
    let response = http
        .post(token_uri)
        .form(&[("grant_type", GRANT_TYPE), ("assertion", assertion)])
        .send()
        .await?;

    let status = response.status();
    let body = response.text().await?;

    if !status.is_success() {
        let message = match serde_json::from_str::<TokenErrorResponse>(&body) {
            Ok(err) => match err.error_description {
                Some(desc) => format!("{}: {}", err.error, desc),
                None => err.error,
            },
            Err(_) => format!("HTTP {}: {}", status.as_u16(), body.trim()),
        };
        return Err(GscError::TokenExchange { message });
    }

    let token: TokenResponse =
        serde_json::from_str(&body).map_err(|e| GscError::TokenExchange {
            message: format!("unexpected token response: {}", e),
        })?;

    let lifetime = Duration::from_secs(token.expires_in.unwrap_or(ASSERTION_LIFETIME_SECS as u64));
    Ok((token.access_token, lifetime))
}

/// A fixed, pre-issued bearer token.
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl Authenticator for StaticToken {
    async fn access_token(&self) -> GscResult<String> {
        Ok(self.0.clone())
    }
}

/// Credentials picked from configuration at startup.
pub enum Credentials {
    ServiceAccount(Box<ServiceAccountAuth>),
    Static(StaticToken),
}

impl Credentials {
    /// A pre-issued access token takes precedence over the key file.
    pub fn from_config(config: &Config, http: Client) -> GscResult<Self> {
        if let Some(token) = &config.access_token {
            debug!("using pre-issued access token");
            return Ok(Credentials::Static(StaticToken::new(token.clone())));
        }

        let path = config.require_credentials()?;
        let auth = ServiceAccountAuth::from_file(path, http)?;
        debug!(client_email = %auth.client_email(), "loaded service account key");
        Ok(Credentials::ServiceAccount(Box::new(auth)))
    }
}

impl Authenticator for Credentials {
    async fn access_token(&self) -> GscResult<String> {
        match self {
            Credentials::ServiceAccount(auth) => auth.access_token().await,
            Credentials::Static(token) => token.access_token().await,
        }
    }
}

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;
