//! Response payloads of the Search Console endpoints we call.
//!
//! Only the fields the reports read are modelled. Everything is defaulted
//! because the API omits empty fields rather than sending nulls.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SiteEntry {
    #[serde(default)]
    pub site_url: String,
    #[serde(default)]
    pub permission_level: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct SitesListResponse {
    #[serde(default)]
    pub site_entry: Vec<SiteEntry>,
}

/// One row of a search analytics response.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiRow {
    #[serde(default)]
    pub keys: Vec<String>,
    #[serde(default)]
    pub clicks: f64,
    #[serde(default)]
    pub impressions: f64,
    #[serde(default)]
    pub ctr: f64,
    #[serde(default)]
    pub position: f64,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchAnalyticsResponse {
    #[serde(default)]
    pub rows: Vec<ApiRow>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sitemap {
    #[serde(default)]
    pub path: Option<String>,
    #[serde(default)]
    pub last_submitted: Option<String>,
    #[serde(default)]
    pub last_downloaded: Option<String>,
    #[serde(default)]
    pub is_pending: Option<bool>,
    #[serde(default)]
    pub is_sitemaps_index: Option<bool>,
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
    pub warnings: Option<i64>,
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
    pub errors: Option<i64>,
    #[serde(default)]
    pub contents: Vec<SitemapContent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SitemapContent {
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
    pub submitted: Option<i64>,
    #[serde(default, deserialize_with = "crate::serde_utils::lenient_i64")]
    pub indexed: Option<i64>,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SitemapsListResponse {
    #[serde(default)]
    pub sitemap: Vec<Sitemap>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct InspectUrlResponse {
    #[serde(default)]
    pub inspection_result: Option<InspectionResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectionResult {
    #[serde(default)]
    pub inspection_result_link: Option<String>,
    #[serde(default)]
    pub index_status_result: Option<IndexStatusResult>,
    #[serde(default)]
    pub rich_results_result: Option<RichResultsResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexStatusResult {
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub coverage_state: Option<String>,
    #[serde(default)]
    pub robots_txt_state: Option<String>,
    #[serde(default)]
    pub indexing_state: Option<String>,
    #[serde(default)]
    pub page_fetch_state: Option<String>,
    #[serde(default)]
    pub crawled_as: Option<String>,
    #[serde(default)]
    pub google_canonical: Option<String>,
    #[serde(default)]
    pub user_canonical: Option<String>,
    #[serde(default)]
    pub last_crawl_time: Option<String>,
    #[serde(default)]
    pub referring_urls: Vec<String>,
    #[serde(default)]
    pub sitemap: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RichResultsResult {
    #[serde(default)]
    pub verdict: Option<String>,
    #[serde(default)]
    pub detected_items: Vec<DetectedItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetectedItem {
    #[serde(default)]
    pub rich_result_type: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleErrorEnvelope {
    pub error: GoogleError,
}

#[derive(Debug, Deserialize)]
pub(crate) struct GoogleError {
    #[serde(default)]
    pub message: String,
}
