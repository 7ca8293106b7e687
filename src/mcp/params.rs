//! Parameter types for the MCP tools.
//!
//! Every tool takes an optional `site_url`; a blank value falls back to the
//! server's default property.

use rmcp::{schemars, schemars::JsonSchema};
use serde::{Deserialize, Serialize};

use crate::reports::ReportOptions;
use crate::request::{DEFAULT_DAYS, DEFAULT_LIMIT};

fn default_days() -> u32 {
    DEFAULT_DAYS
}

fn default_limit() -> u32 {
    DEFAULT_LIMIT
}

fn default_dimensions() -> String {
    "query".to_string()
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchParams {
    #[schemars(description = "Number of days to look back (default: 28)")]
    #[serde(default = "default_days")]
    pub days: u32,
    #[schemars(description = "Start date YYYY-MM-DD (overrides days)")]
    pub start: Option<String>,
    #[schemars(description = "End date YYYY-MM-DD (default: today)")]
    pub end: Option<String>,
    #[schemars(description = "Maximum rows to return (default: 20)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[schemars(
        description = "Comma-separated dimensions: query, page, country, device, date, searchAppearance (default: query)"
    )]
    #[serde(default = "default_dimensions")]
    pub dimensions: String,
    #[schemars(description = "Property, e.g. sc-domain:example.com (default: configured site)")]
    #[serde(default)]
    pub site_url: String,
}

impl Default for SearchParams {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            start: None,
            end: None,
            limit: DEFAULT_LIMIT,
            dimensions: default_dimensions(),
            site_url: String::new(),
        }
    }
}

impl From<SearchParams> for ReportOptions {
    fn from(p: SearchParams) -> Self {
        ReportOptions {
            site_url: Some(p.site_url),
            days: Some(p.days),
            start: p.start,
            end: p.end,
            limit: Some(p.limit),
            dimensions: Some(p.dimensions),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PagesParams {
    #[schemars(description = "Number of days to look back (default: 28)")]
    #[serde(default = "default_days")]
    pub days: u32,
    #[schemars(description = "Start date YYYY-MM-DD (overrides days)")]
    pub start: Option<String>,
    #[schemars(description = "End date YYYY-MM-DD (default: today)")]
    pub end: Option<String>,
    #[schemars(description = "Maximum pages to return (default: 20)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[schemars(description = "Property, e.g. sc-domain:example.com (default: configured site)")]
    #[serde(default)]
    pub site_url: String,
}

impl Default for PagesParams {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            start: None,
            end: None,
            limit: DEFAULT_LIMIT,
            site_url: String::new(),
        }
    }
}

impl From<PagesParams> for ReportOptions {
    fn from(p: PagesParams) -> Self {
        ReportOptions {
            site_url: Some(p.site_url),
            days: Some(p.days),
            start: p.start,
            end: p.end,
            limit: Some(p.limit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PerformanceParams {
    #[schemars(description = "Number of days to look back (default: 28)")]
    #[serde(default = "default_days")]
    pub days: u32,
    #[schemars(description = "Start date YYYY-MM-DD (overrides days)")]
    pub start: Option<String>,
    #[schemars(description = "End date YYYY-MM-DD (default: today)")]
    pub end: Option<String>,
    #[schemars(description = "Property, e.g. sc-domain:example.com (default: configured site)")]
    #[serde(default)]
    pub site_url: String,
}

impl Default for PerformanceParams {
    fn default() -> Self {
        Self {
            days: DEFAULT_DAYS,
            start: None,
            end: None,
            site_url: String::new(),
        }
    }
}

impl From<PerformanceParams> for ReportOptions {
    fn from(p: PerformanceParams) -> Self {
        ReportOptions {
            site_url: Some(p.site_url),
            days: Some(p.days),
            start: p.start,
            end: p.end,
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct PageQueriesParams {
    #[schemars(description = "Full URL of the page, e.g. https://example.com/blog/post")]
    pub page_url: String,
    #[schemars(description = "Number of days to look back (default: 28)")]
    #[serde(default = "default_days")]
    pub days: u32,
    #[schemars(description = "Start date YYYY-MM-DD (overrides days)")]
    pub start: Option<String>,
    #[schemars(description = "End date YYYY-MM-DD (default: today)")]
    pub end: Option<String>,
    #[schemars(description = "Maximum queries to return (default: 20)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[schemars(description = "Property, e.g. sc-domain:example.com (default: configured site)")]
    #[serde(default)]
    pub site_url: String,
}

impl From<PageQueriesParams> for ReportOptions {
    fn from(p: PageQueriesParams) -> Self {
        ReportOptions {
            site_url: Some(p.site_url),
            page_url: Some(p.page_url),
            days: Some(p.days),
            start: p.start,
            end: p.end,
            limit: Some(p.limit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CompareParams {
    #[schemars(description = "Period 1 start date YYYY-MM-DD")]
    pub p1_start: String,
    #[schemars(description = "Period 1 end date YYYY-MM-DD")]
    pub p1_end: String,
    #[schemars(description = "Period 2 start date YYYY-MM-DD")]
    pub p2_start: String,
    #[schemars(description = "Period 2 end date YYYY-MM-DD")]
    pub p2_end: String,
    #[schemars(description = "Comma-separated dimensions to compare on (default: query)")]
    #[serde(default = "default_dimensions")]
    pub dimensions: String,
    #[schemars(description = "Maximum rows to return, largest click changes first (default: 20)")]
    #[serde(default = "default_limit")]
    pub limit: u32,
    #[schemars(description = "Property, e.g. sc-domain:example.com (default: configured site)")]
    #[serde(default)]
    pub site_url: String,
}

impl From<CompareParams> for ReportOptions {
    fn from(p: CompareParams) -> Self {
        ReportOptions {
            site_url: Some(p.site_url),
            p1_start: Some(p.p1_start),
            p1_end: Some(p.p1_end),
            p2_start: Some(p.p2_start),
            p2_end: Some(p.p2_end),
            dimensions: Some(p.dimensions),
            limit: Some(p.limit),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct InspectParams {
    #[schemars(description = "Full URL to inspect")]
    pub page_url: String,
    #[schemars(description = "Property, e.g. sc-domain:example.com (default: configured site)")]
    #[serde(default)]
    pub site_url: String,
}

impl From<InspectParams> for ReportOptions {
    fn from(p: InspectParams) -> Self {
        ReportOptions {
            site_url: Some(p.site_url),
            page_url: Some(p.page_url),
            ..Default::default()
        }
    }
}

#[derive(Debug, Default, Serialize, Deserialize, JsonSchema)]
pub struct SitemapsParams {
    #[schemars(description = "Property, e.g. sc-domain:example.com (default: configured site)")]
    #[serde(default)]
    pub site_url: String,
}

impl From<SitemapsParams> for ReportOptions {
    fn from(p: SitemapsParams) -> Self {
        ReportOptions {
            site_url: Some(p.site_url),
            ..Default::default()
        }
    }
}

#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct IndexingParams {
    #[schemars(description = "Comma-separated list of URLs to check (max 10)")]
    pub urls: String,
    #[schemars(description = "Property, e.g. sc-domain:example.com (default: configured site)")]
    #[serde(default)]
    pub site_url: String,
}

impl From<IndexingParams> for ReportOptions {
    fn from(p: IndexingParams) -> Self {
        ReportOptions {
            site_url: Some(p.site_url),
            urls: Some(p.urls),
            ..Default::default()
        }
    }
}
