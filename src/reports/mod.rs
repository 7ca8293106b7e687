//! Report functions and the name-to-report dispatch table.
//!
//! Each report calls the API once or a few times and returns a serializable
//! result. Both front ends go through [`run_report`]: the CLI renders the
//! result as text, the MCP server returns it as structured JSON.

mod analytics;
mod inspection;
mod sites;

use std::fmt;
use std::str::FromStr;

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::auth::Authenticator;
use crate::client::{ApiRow, SearchConsoleClient};
use crate::error::{GscError, GscResult};
use crate::format::{Render, Tabular, format_count, format_ctr, format_position, truncate_with_ellipsis};
use crate::request::{DEFAULT_DAYS, DEFAULT_LIMIT, DateRange, parse_dimensions, parse_url_list};

pub use analytics::{
    CompareReport, ComparisonRow, PerformanceReport, SearchReport, compare, page_queries, pages,
    performance, search,
};
pub use inspection::{
    IndexingReport, IndexingSummary, InspectionReport, UrlIndexStatus, indexing, inspect,
};
pub use sites::{PropertiesReport, SitemapsReport, properties, sitemaps};

/// Display width for dimension keys in analytics tables.
pub(crate) const KEY_WIDTH: usize = 80;
/// Display width for dimension keys in comparison tables.
pub(crate) const COMPARE_KEY_WIDTH: usize = 60;

/// Every report the tool can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReportKind {
    Properties,
    Search,
    Pages,
    Performance,
    PageQueries,
    Compare,
    Inspect,
    Sitemaps,
    Indexing,
}

impl ReportKind {
    pub const ALL: [ReportKind; 9] = [
        ReportKind::Properties,
        ReportKind::Search,
        ReportKind::Pages,
        ReportKind::Performance,
        ReportKind::PageQueries,
        ReportKind::Compare,
        ReportKind::Inspect,
        ReportKind::Sitemaps,
        ReportKind::Indexing,
    ];

    /// Report name as used on the command line.
    pub fn name(self) -> &'static str {
        match self {
            ReportKind::Properties => "properties",
            ReportKind::Search => "search",
            ReportKind::Pages => "pages",
            ReportKind::Performance => "performance",
            ReportKind::PageQueries => "page-queries",
            ReportKind::Compare => "compare",
            ReportKind::Inspect => "inspect",
            ReportKind::Sitemaps => "sitemaps",
            ReportKind::Indexing => "indexing",
        }
    }

    /// MCP tool name exposing this report.
    pub fn tool_name(self) -> &'static str {
        match self {
            ReportKind::Properties => "gsc_properties",
            ReportKind::Search => "gsc_search",
            ReportKind::Pages => "gsc_pages",
            ReportKind::Performance => "gsc_performance",
            ReportKind::PageQueries => "gsc_page_queries",
            ReportKind::Compare => "gsc_compare",
            ReportKind::Inspect => "gsc_inspect",
            ReportKind::Sitemaps => "gsc_sitemaps",
            ReportKind::Indexing => "gsc_indexing",
        }
    }

    /// Whether the report is scoped to a single property.
    pub fn needs_site(self) -> bool {
        !matches!(self, ReportKind::Properties)
    }
}

impl fmt::Display for ReportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ReportKind {
    type Err = GscError;

    /// Accepts the report name or the MCP tool name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        ReportKind::ALL
            .into_iter()
            .find(|k| k.name() == s || k.tool_name() == s)
            .ok_or_else(|| {
                GscError::invalid_argument(format!(
                    "unknown report '{}' (expected one of: {})",
                    s,
                    ReportKind::ALL.map(ReportKind::name).join(", ")
                ))
            })
    }
}

/// Options bag shared by every report; each report reads what it needs.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReportOptions {
    pub site_url: Option<String>,
    pub days: Option<u32>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub limit: Option<u32>,
    pub dimensions: Option<String>,
    pub page_url: Option<String>,
    pub urls: Option<String>,
    pub p1_start: Option<String>,
    pub p1_end: Option<String>,
    pub p2_start: Option<String>,
    pub p2_end: Option<String>,
}

impl ReportOptions {
    fn range(&self, today: NaiveDate) -> GscResult<DateRange> {
        DateRange::resolve(
            self.days.unwrap_or(DEFAULT_DAYS),
            self.start.as_deref(),
            self.end.as_deref(),
            today,
        )
    }

    fn limit(&self) -> u32 {
        self.limit.unwrap_or(DEFAULT_LIMIT)
    }

    fn require_page_url(&self, kind: ReportKind) -> GscResult<&str> {
        non_blank(self.page_url.as_deref()).ok_or_else(|| {
            GscError::invalid_argument(format!("page URL is required for the {} report", kind))
        })
    }
}

/// Result of any report.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Report {
    Properties(PropertiesReport),
    Search(SearchReport),
    Performance(PerformanceReport),
    Compare(CompareReport),
    Inspection(InspectionReport),
    Sitemaps(SitemapsReport),
    Indexing(IndexingReport),
}

impl Render for Report {
    fn tabular(&self) -> Tabular {
        match self {
            Report::Properties(r) => r.tabular(),
            Report::Search(r) => r.tabular(),
            Report::Performance(r) => r.tabular(),
            Report::Compare(r) => r.tabular(),
            Report::Inspection(r) => r.tabular(),
            Report::Sitemaps(r) => r.tabular(),
            Report::Indexing(r) => r.tabular(),
        }
    }

    fn render_table(&self) -> String {
        match self {
            Report::Properties(r) => r.render_table(),
            Report::Search(r) => r.render_table(),
            Report::Performance(r) => r.render_table(),
            Report::Compare(r) => r.render_table(),
            Report::Inspection(r) => r.render_table(),
            Report::Sitemaps(r) => r.render_table(),
            Report::Indexing(r) => r.render_table(),
        }
    }
}

/// Pick the site a report runs against: per-call value first, then the default.
pub fn resolve_site(explicit: Option<&str>, default: Option<&str>) -> GscResult<String> {
    non_blank(explicit)
        .or_else(|| non_blank(default))
        .map(str::to_string)
        .ok_or(GscError::MissingSiteUrl)
}

/// Run a report by kind, using today's local date for lookback ranges.
pub async fn run_report<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    default_site: Option<&str>,
    kind: ReportKind,
    options: &ReportOptions,
) -> GscResult<Report> {
    run_report_on(client, default_site, kind, options, Local::now().date_naive()).await
}

/// Run a report by kind with an explicit "today".
pub async fn run_report_on<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    default_site: Option<&str>,
    kind: ReportKind,
    options: &ReportOptions,
    today: NaiveDate,
) -> GscResult<Report> {
    let site = if kind.needs_site() {
        resolve_site(options.site_url.as_deref(), default_site)?
    } else {
        String::new()
    };
    info!(report = %kind, site = %site, "running report");

    let report = match kind {
        ReportKind::Properties => Report::Properties(properties(client).await?),
        ReportKind::Search => {
            let dims = parse_dimensions(options.dimensions.as_deref())?;
            Report::Search(
                search(client, &site, options.range(today)?, dims, options.limit()).await?,
            )
        }
        ReportKind::Pages => {
            Report::Search(pages(client, &site, options.range(today)?, options.limit()).await?)
        }
        ReportKind::Performance => {
            Report::Performance(performance(client, &site, options.range(today)?).await?)
        }
        ReportKind::PageQueries => {
            let page_url = options.require_page_url(kind)?;
            Report::Search(
                page_queries(
                    client,
                    &site,
                    page_url,
                    options.range(today)?,
                    options.limit(),
                )
                .await?,
            )
        }
        ReportKind::Compare => {
            let (p1, p2) = compare_periods(options)?;
            let dims = parse_dimensions(options.dimensions.as_deref())?;
            Report::Compare(compare(client, &site, p1, p2, dims, options.limit()).await?)
        }
        ReportKind::Inspect => {
            let page_url = options.require_page_url(kind)?;
            Report::Inspection(inspect(client, &site, page_url).await?)
        }
        ReportKind::Sitemaps => Report::Sitemaps(sitemaps(client, &site).await?),
        ReportKind::Indexing => {
            let urls = parse_url_list(options.urls.as_deref().unwrap_or_default());
            Report::Indexing(indexing(client, &site, &urls).await?)
        }
    };
    Ok(report)
}

fn compare_periods(options: &ReportOptions) -> GscResult<(DateRange, DateRange)> {
    match (
        non_blank(options.p1_start.as_deref()),
        non_blank(options.p1_end.as_deref()),
        non_blank(options.p2_start.as_deref()),
        non_blank(options.p2_end.as_deref()),
    ) {
        (Some(p1s), Some(p1e), Some(p2s), Some(p2e)) => {
            Ok((DateRange::parse(p1s, p1e)?, DateRange::parse(p2s, p2e)?))
        }
        _ => Err(GscError::invalid_argument(
            "p1 start, p1 end, p2 start and p2 end are all required for compare",
        )),
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Clicks, impressions, CTR and position cells for one row.
pub(crate) fn metric_cells(row: &ApiRow) -> Vec<String> {
    vec![
        format_count(row.clicks),
        format_count(row.impressions),
        format_ctr(row.ctr),
        format_position(row.position),
    ]
}

/// Dimension keys followed by the metric cells.
pub(crate) fn keyed_metric_cells(row: &ApiRow, key_count: usize) -> Vec<String> {
    let mut cells: Vec<String> = (0..key_count)
        .map(|i| {
            row.keys
                .get(i)
                .map(|k| truncate_with_ellipsis(k, KEY_WIDTH))
                .unwrap_or_default()
        })
        .collect();
    cells.extend(metric_cells(row));
    cells
}
