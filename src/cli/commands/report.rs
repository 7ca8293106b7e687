use clap::{Args, Subcommand};

use crate::auth::Authenticator;
use crate::client::SearchConsoleClient;
use crate::error::GscResult;
use crate::format::{OutputFormat, Render};
use crate::reports::{ReportKind, ReportOptions, run_report};
use crate::request::{DEFAULT_DAYS, DEFAULT_LIMIT};

/// Lookback window shared by the date-range reports
#[derive(Args, Debug, Clone, PartialEq, Eq)]
pub struct RangeArgs {
    /// Number of days to look back
    #[arg(long, default_value_t = DEFAULT_DAYS)]
    pub days: u32,
    /// Start date YYYY-MM-DD (overrides --days)
    #[arg(long)]
    pub start: Option<String>,
    /// End date YYYY-MM-DD (default: today)
    #[arg(long)]
    pub end: Option<String>,
}

/// One subcommand per report; the subcommand name is the report name.
#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum ReportCommand {
    /// List all accessible properties
    Properties,
    /// Top search queries (or any dimension combination)
    Search {
        #[command(flatten)]
        range: RangeArgs,
        /// Maximum rows to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
        /// Comma-separated dimensions (query, page, country, device, date, searchAppearance)
        #[arg(long, default_value = "query")]
        dimensions: String,
    },
    /// Top pages by clicks
    Pages {
        #[command(flatten)]
        range: RangeArgs,
        /// Maximum rows to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Totals plus daily trend
    Performance {
        #[command(flatten)]
        range: RangeArgs,
    },
    /// Queries driving traffic to one page
    PageQueries {
        /// Full URL of the page
        #[arg(long)]
        page_url: String,
        #[command(flatten)]
        range: RangeArgs,
        /// Maximum rows to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Compare two date periods
    Compare {
        /// Period 1 start date YYYY-MM-DD
        #[arg(long)]
        p1_start: String,
        /// Period 1 end date YYYY-MM-DD
        #[arg(long)]
        p1_end: String,
        /// Period 2 start date YYYY-MM-DD
        #[arg(long)]
        p2_start: String,
        /// Period 2 end date YYYY-MM-DD
        #[arg(long)]
        p2_end: String,
        /// Comma-separated dimensions to compare on
        #[arg(long, default_value = "query")]
        dimensions: String,
        /// Maximum rows to return
        #[arg(long, default_value_t = DEFAULT_LIMIT)]
        limit: u32,
    },
    /// Inspect a URL's index status
    Inspect {
        /// Full URL to inspect
        #[arg(long)]
        page_url: String,
    },
    /// List submitted sitemaps
    Sitemaps,
    /// Check indexing for up to 10 URLs
    Indexing {
        /// Comma-separated list of URLs
        #[arg(long)]
        urls: String,
    },
}

impl ReportCommand {
    pub fn kind(&self) -> ReportKind {
        match self {
            ReportCommand::Properties => ReportKind::Properties,
            ReportCommand::Search { .. } => ReportKind::Search,
            ReportCommand::Pages { .. } => ReportKind::Pages,
            ReportCommand::Performance { .. } => ReportKind::Performance,
            ReportCommand::PageQueries { .. } => ReportKind::PageQueries,
            ReportCommand::Compare { .. } => ReportKind::Compare,
            ReportCommand::Inspect { .. } => ReportKind::Inspect,
            ReportCommand::Sitemaps => ReportKind::Sitemaps,
            ReportCommand::Indexing { .. } => ReportKind::Indexing,
        }
    }

    /// Options bag for the dispatch table. The site comes from the global flag.
    pub fn into_options(self) -> ReportOptions {
        fn ranged(range: RangeArgs) -> ReportOptions {
            ReportOptions {
                days: Some(range.days),
                start: range.start,
                end: range.end,
                ..Default::default()
            }
        }

        match self {
            ReportCommand::Properties | ReportCommand::Sitemaps => ReportOptions::default(),
            ReportCommand::Search {
                range,
                limit,
                dimensions,
            } => ReportOptions {
                limit: Some(limit),
                dimensions: Some(dimensions),
                ..ranged(range)
            },
            ReportCommand::Pages { range, limit } => ReportOptions {
                limit: Some(limit),
                ..ranged(range)
            },
            ReportCommand::Performance { range } => ranged(range),
            ReportCommand::PageQueries {
                page_url,
                range,
                limit,
            } => ReportOptions {
                page_url: Some(page_url),
                limit: Some(limit),
                ..ranged(range)
            },
            ReportCommand::Compare {
                p1_start,
                p1_end,
                p2_start,
                p2_end,
                dimensions,
                limit,
            } => ReportOptions {
                p1_start: Some(p1_start),
                p1_end: Some(p1_end),
                p2_start: Some(p2_start),
                p2_end: Some(p2_end),
                dimensions: Some(dimensions),
                limit: Some(limit),
                ..Default::default()
            },
            ReportCommand::Inspect { page_url } => ReportOptions {
                page_url: Some(page_url),
                ..Default::default()
            },
            ReportCommand::Indexing { urls } => ReportOptions {
                urls: Some(urls),
                ..Default::default()
            },
        }
    }
}

/// Run one report and render it for the terminal.
pub async fn execute<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: Option<&str>,
    command: ReportCommand,
    output: OutputFormat,
) -> GscResult<String> {
    let kind = command.kind();
    let report = run_report(client, site_url, kind, &command.into_options()).await?;
    Ok(report.render(output))
}
