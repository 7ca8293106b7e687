//! Search Console API client.
//!
//! Wraps the four endpoints the reports use. Authentication is delegated
//! to an [`Authenticator`], so the client is generic over how tokens are
//! obtained (service account in production, a fixed token in tests).

pub mod models;

use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::auth::Authenticator;
use crate::error::{GscError, GscResult};
use crate::request::{InspectRequest, SearchAnalyticsRequest};

pub use models::{
    ApiRow, DetectedItem, IndexStatusResult, InspectionResult, RichResultsResult, SiteEntry,
    Sitemap, SitemapContent,
};
use models::{
    GoogleErrorEnvelope, InspectUrlResponse, SearchAnalyticsResponse, SitemapsListResponse,
    SitesListResponse,
};

/// Typed client for the Search Console REST API.
pub struct SearchConsoleClient<A: Authenticator> {
    base_url: String,
    http: Client,
    auth: A,
}

impl<A: Authenticator> SearchConsoleClient<A> {
    pub fn new(base_url: impl Into<String>, http: Client, auth: A) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            auth,
        }
    }

    /// List every property the credentials can see.
    pub async fn list_sites(&self) -> GscResult<Vec<SiteEntry>> {
        let url = self.endpoint(&["webmasters", "v3", "sites"])?;
        let response: SitesListResponse = self.send(self.http.get(url)).await?;
        Ok(response.site_entry)
    }

    /// Run a search analytics query for a property.
    pub async fn query_search_analytics(
        &self,
        site_url: &str,
        request: &SearchAnalyticsRequest,
    ) -> GscResult<Vec<ApiRow>> {
        let url = self.endpoint(&[
            "webmasters",
            "v3",
            "sites",
            site_url,
            "searchAnalytics",
            "query",
        ])?;
        let response: SearchAnalyticsResponse =
            self.send(self.http.post(url).json(request)).await?;
        Ok(response.rows)
    }

    /// List sitemaps submitted for a property.
    pub async fn list_sitemaps(&self, site_url: &str) -> GscResult<Vec<Sitemap>> {
        let url = self.endpoint(&["webmasters", "v3", "sites", site_url, "sitemaps"])?;
        let response: SitemapsListResponse = self.send(self.http.get(url)).await?;
        Ok(response.sitemap)
    }

    /// Inspect the index status of one URL within a property.
    pub async fn inspect_url(
        &self,
        site_url: &str,
        page_url: &str,
    ) -> GscResult<Option<InspectionResult>> {
        let url = self.endpoint(&["v1", "urlInspection", "index:inspect"])?;
        let body = InspectRequest {
            inspection_url: page_url.to_string(),
            site_url: site_url.to_string(),
        };
        let response: InspectUrlResponse = self.send(self.http.post(url).json(&body)).await?;
        Ok(response.inspection_result)
    }

    /// Build an endpoint URL, percent-encoding each segment.
    ///
    /// Site URLs such as `https://example.com/` must travel as one segment.
    fn endpoint(&self, segments: &[&str]) -> GscResult<Url> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            GscError::invalid_argument(format!("invalid API URL '{}': {}", self.base_url, e))
        })?;
        url.path_segments_mut()
            .map_err(|_| {
                GscError::invalid_argument(format!(
                    "API URL '{}' cannot take a path",
                    self.base_url
                ))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> GscResult<T> {
        let token = self.auth.access_token().await?;
        let request = request.bearer_auth(token).build()?;
        debug!(method = %request.method(), url = %request.url(), "calling Search Console");

        let response = self.http.execute(request).await?;
        Self::handle_response(response).await
    }

    /// Handle API response with standardized error handling
    ///
    /// Returns the deserialized response body on success,
    /// or a GscError::Api carrying Google's error message otherwise.
    pub async fn handle_response<T: DeserializeOwned>(response: Response) -> GscResult<T> {
        let status = response.status();
        debug!(status = status.as_u16(), "Search Console responded");

        if status.is_success() {
            let body = response.text().await?;
            if body.trim().is_empty() {
                return serde_json::from_str("{}").map_err(GscError::from);
            }
            return serde_json::from_str(&body).map_err(GscError::from);
        }

        let error_text = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        let message = serde_json::from_str::<GoogleErrorEnvelope>(&error_text)
            .map(|e| e.error.message)
            .ok()
            .filter(|m| !m.is_empty())
            .unwrap_or(error_text);

        Err(GscError::Api {
            status: status.as_u16(),
            message,
        })
    }
}
