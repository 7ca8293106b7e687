//! MCP server exposing one tool per report.
//!
//! Tools return the report as pretty-printed JSON text. Report failures
//! become tool errors carrying the diagnostic code as structured data.

use std::sync::Arc;

use rmcp::{
    ErrorData as McpError, ServerHandler,
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::*,
    tool, tool_handler, tool_router,
};
use serde_json::json;
use tracing::warn;

use crate::auth::Authenticator;
use crate::client::SearchConsoleClient;
use crate::error::GscError;
use crate::reports::{ReportKind, ReportOptions, run_report};

use super::params::*;

/// Search Console MCP server.
///
/// Generic over `A: Authenticator`; every session shares one client.
pub struct GscMcpServer<A: Authenticator> {
    client: Arc<SearchConsoleClient<A>>,
    default_site: Option<Arc<str>>,
    tool_router: ToolRouter<Self>,
}

impl<A: Authenticator> Clone for GscMcpServer<A> {
    fn clone(&self) -> Self {
        Self {
            client: Arc::clone(&self.client),
            default_site: self.default_site.clone(),
            tool_router: self.tool_router.clone(),
        }
    }
}

#[tool_router]
impl<A: Authenticator> GscMcpServer<A> {
    pub fn new(client: impl Into<Arc<SearchConsoleClient<A>>>, default_site: Option<String>) -> Self {
        Self {
            client: client.into(),
            default_site: default_site.map(Arc::from),
            tool_router: Self::tool_router(),
        }
    }

    /// Get the tool router for this handler
    pub fn router(&self) -> &ToolRouter<Self> {
        &self.tool_router
    }

    #[tool(description = "List all Search Console properties the service account can access.")]
    pub async fn gsc_properties(&self) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::Properties, ReportOptions::default())
            .await
    }

    #[tool(
        description = "Top search queries with clicks, impressions, CTR and position. Dimensions may combine query, page, country, device, date and searchAppearance."
    )]
    pub async fn gsc_search(
        &self,
        Parameters(params): Parameters<SearchParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::Search, params.into()).await
    }

    #[tool(description = "Top pages by clicks with impressions, CTR and position.")]
    pub async fn gsc_pages(
        &self,
        Parameters(params): Parameters<PagesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::Pages, params.into()).await
    }

    #[tool(description = "Performance overview: period totals plus a daily trend.")]
    pub async fn gsc_performance(
        &self,
        Parameters(params): Parameters<PerformanceParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::Performance, params.into()).await
    }

    #[tool(description = "Search queries driving traffic to one specific page.")]
    pub async fn gsc_page_queries(
        &self,
        Parameters(params): Parameters<PageQueriesParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::PageQueries, params.into()).await
    }

    #[tool(
        description = "Compare two date periods key by key. Rows are sorted by absolute click change, largest first."
    )]
    pub async fn gsc_compare(
        &self,
        Parameters(params): Parameters<CompareParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::Compare, params.into()).await
    }

    #[tool(
        description = "Inspect a URL: index status, coverage, crawl details, canonicals and rich results."
    )]
    pub async fn gsc_inspect(
        &self,
        Parameters(params): Parameters<InspectParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::Inspect, params.into()).await
    }

    #[tool(description = "List submitted sitemaps with download time, URL count and errors.")]
    pub async fn gsc_sitemaps(
        &self,
        Parameters(params): Parameters<SitemapsParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::Sitemaps, params.into()).await
    }

    #[tool(
        description = "Check indexing status for up to 10 URLs. Reports indexed, not indexed, robots-blocked and fetch issues."
    )]
    pub async fn gsc_indexing(
        &self,
        Parameters(params): Parameters<IndexingParams>,
    ) -> Result<CallToolResult, McpError> {
        self.run(ReportKind::Indexing, params.into()).await
    }
}

impl<A: Authenticator> GscMcpServer<A> {
    async fn run(
        &self,
        kind: ReportKind,
        options: ReportOptions,
    ) -> Result<CallToolResult, McpError> {
        let report = run_report(&*self.client, self.default_site.as_deref(), kind, &options)
            .await
            .map_err(|e| {
                warn!(tool = kind.tool_name(), error = %e, "tool call failed");
                map_report_error(e)
            })?;

        let content = serde_json::to_string_pretty(&report).map_err(|e| {
            McpError::internal_error(
                "serialization_error",
                Some(json!({"error": e.to_string()})),
            )
        })?;

        Ok(CallToolResult::success(vec![Content::text(content)]))
    }
}

/// Caller mistakes become `invalid_params`, everything else `internal_error`.
pub(crate) fn map_report_error(e: GscError) -> McpError {
    let data = Some(json!({"code": e.code_str()}));
    if e.is_caller_error() {
        McpError::invalid_params(e.to_string(), data)
    } else {
        McpError::internal_error(e.to_string(), data)
    }
}

#[tool_handler]
impl<A: Authenticator> ServerHandler for GscMcpServer<A> {
    fn get_info(&self) -> ServerInfo {
        ServerInfo::new(ServerCapabilities::builder().enable_tools().build()).with_instructions(
            "Google Search Console reports: properties, search analytics, pages, \
             performance, period comparison, URL inspection, sitemaps and batch \
             indexing checks. Pass site_url or rely on the configured default.",
        )
    }
}
