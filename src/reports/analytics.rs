//! Search analytics reports: top queries, top pages, page queries,
//! performance overview and period comparison.

use std::collections::{HashMap, HashSet};

use serde::Serialize;

use crate::auth::Authenticator;
use crate::client::{ApiRow, SearchConsoleClient};
use crate::error::GscResult;
use crate::format::{
    RULE, Render, Tabular, capitalize, format_count, format_ctr, format_position, format_signed,
    format_table, group_thousands, labelled, truncate_with_ellipsis,
};
use crate::request::{COMPARE_ROW_LIMIT, DateRange, SearchAnalyticsRequest};

use super::{COMPARE_KEY_WIDTH, ReportKind, keyed_metric_cells};

const METRIC_HEADERS: [&str; 4] = ["Clicks", "Impressions", "CTR", "Position"];
const TOTALS_WIDTH: usize = 19;

/// Rows keyed by one or more dimensions (search, pages, page-queries).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchReport {
    pub report: ReportKind,
    pub site_url: String,
    pub range: DateRange,
    pub dimensions: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub page_url: Option<String>,
    pub rows: Vec<ApiRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Render for SearchReport {
    fn tabular(&self) -> Tabular {
        let mut data = Tabular::new(
            self.dimensions
                .iter()
                .map(|d| capitalize(d))
                .chain(METRIC_HEADERS.iter().map(|h| h.to_string())),
        );
        for row in &self.rows {
            data.push(keyed_metric_cells(row, self.dimensions.len()));
        }
        data
    }

    fn render_table(&self) -> String {
        match &self.message {
            Some(message) => message.clone(),
            None => format_table(&self.tabular()),
        }
    }
}

/// Top queries (or any dimension combination).
pub async fn search<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: &str,
    range: DateRange,
    dimensions: Vec<String>,
    limit: u32,
) -> GscResult<SearchReport> {
    let request = SearchAnalyticsRequest::new(&range)
        .dimensions(dimensions.iter().cloned())
        .row_limit(limit);
    let rows = client.query_search_analytics(site_url, &request).await?;

    let message = rows.is_empty().then(|| {
        format!("No search data found for {} ({}).", site_url, range)
    });
    Ok(SearchReport {
        report: ReportKind::Search,
        site_url: site_url.to_string(),
        range,
        dimensions,
        page_url: None,
        rows,
        message,
    })
}

/// Top pages by clicks.
pub async fn pages<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: &str,
    range: DateRange,
    limit: u32,
) -> GscResult<SearchReport> {
    let request = SearchAnalyticsRequest::new(&range)
        .dimensions(["page"])
        .row_limit(limit);
    let rows = client.query_search_analytics(site_url, &request).await?;

    let message = rows
        .is_empty()
        .then(|| format!("No page data found for {} ({}).", site_url, range));
    Ok(SearchReport {
        report: ReportKind::Pages,
        site_url: site_url.to_string(),
        range,
        dimensions: vec!["page".to_string()],
        page_url: None,
        rows,
        message,
    })
}

/// Queries driving traffic to one page.
pub async fn page_queries<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: &str,
    page_url: &str,
    range: DateRange,
    limit: u32,
) -> GscResult<SearchReport> {
    let request = SearchAnalyticsRequest::new(&range)
        .dimensions(["query"])
        .page_filter(page_url)
        .row_limit(limit);
    let rows = client.query_search_analytics(site_url, &request).await?;

    let message = rows
        .is_empty()
        .then(|| format!("No search data found for page {}.", page_url));
    Ok(SearchReport {
        report: ReportKind::PageQueries,
        site_url: site_url.to_string(),
        range,
        dimensions: vec!["query".to_string()],
        page_url: Some(page_url.to_string()),
        rows,
        message,
    })
}

/// Totals for the period plus a per-day trend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PerformanceReport {
    pub report: ReportKind,
    pub site_url: String,
    pub range: DateRange,
    pub totals: Option<ApiRow>,
    pub daily: Vec<ApiRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Render for PerformanceReport {
    fn tabular(&self) -> Tabular {
        let mut data = Tabular::new(
            std::iter::once("Date").chain(METRIC_HEADERS.iter().copied()),
        );
        for row in &self.daily {
            data.push(keyed_metric_cells(row, 1));
        }
        data
    }

    fn render_table(&self) -> String {
        let mut lines = vec![
            format!(
                "Performance Overview for {} ({}):",
                self.site_url, self.range
            ),
            RULE.to_string(),
        ];

        let Some(totals) = &self.totals else {
            lines.push(
                self.message
                    .clone()
                    .unwrap_or_else(|| "No data available for the selected period.".to_string()),
            );
            return lines.join("\n");
        };

        lines.push(labelled(
            "Total Clicks",
            group_thousands(totals.clicks),
            TOTALS_WIDTH,
        ));
        lines.push(labelled(
            "Total Impressions",
            group_thousands(totals.impressions),
            TOTALS_WIDTH,
        ));
        lines.push(labelled("Average CTR", format_ctr(totals.ctr), TOTALS_WIDTH));
        lines.push(labelled(
            "Average Position",
            format_position(totals.position),
            TOTALS_WIDTH,
        ));

        if !self.daily.is_empty() {
            lines.push(String::new());
            lines.push(format_table(&self.tabular()));
        }
        lines.join("\n")
    }
}

/// Performance overview: one totals query, then a daily breakdown.
///
/// The daily query is skipped when the totals query returns nothing.
pub async fn performance<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: &str,
    range: DateRange,
) -> GscResult<PerformanceReport> {
    let totals_request = SearchAnalyticsRequest::new(&range)
        .dimensions(Vec::<String>::new())
        .row_limit(1);
    let totals = client
        .query_search_analytics(site_url, &totals_request)
        .await?
        .into_iter()
        .next();

    let mut report = PerformanceReport {
        report: ReportKind::Performance,
        site_url: site_url.to_string(),
        range,
        totals: None,
        daily: Vec::new(),
        message: None,
    };

    let Some(totals) = totals else {
        report.message = Some("No data available for the selected period.".to_string());
        return Ok(report);
    };
    report.totals = Some(totals);

    let daily_request = SearchAnalyticsRequest::new(&range)
        .dimensions(["date"])
        .row_limit(range.day_count());
    let mut daily = client
        .query_search_analytics(site_url, &daily_request)
        .await?;
    daily.sort_by(|a, b| a.keys.first().cmp(&b.keys.first()));
    report.daily = daily;

    Ok(report)
}

/// One key's clicks and position in both periods.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComparisonRow {
    pub keys: Vec<String>,
    pub p1_clicks: f64,
    pub p2_clicks: f64,
    pub change: i64,
    pub p1_position: f64,
    pub p2_position: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompareReport {
    pub report: ReportKind,
    pub site_url: String,
    pub period1: DateRange,
    pub period2: DateRange,
    pub dimensions: Vec<String>,
    pub rows: Vec<ComparisonRow>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl Render for CompareReport {
    fn tabular(&self) -> Tabular {
        let mut data = Tabular::new(
            self.dimensions.iter().map(|d| capitalize(d)).chain(
                ["P1 Clicks", "P2 Clicks", "Change", "P1 Pos", "P2 Pos"]
                    .iter()
                    .map(|h| h.to_string()),
            ),
        );
        for row in &self.rows {
            let mut cells: Vec<String> = (0..self.dimensions.len())
                .map(|i| {
                    row.keys
                        .get(i)
                        .map(|k| truncate_with_ellipsis(k, COMPARE_KEY_WIDTH))
                        .unwrap_or_default()
                })
                .collect();
            cells.extend([
                format_count(row.p1_clicks),
                format_count(row.p2_clicks),
                format_signed(row.change),
                format_position(row.p1_position),
                format_position(row.p2_position),
            ]);
            data.push(cells);
        }
        data
    }

    fn render_table(&self) -> String {
        if let Some(message) = &self.message {
            return message.clone();
        }
        format!(
            "Comparison for {}\nPeriod 1: {}\nPeriod 2: {}\n\n{}",
            self.site_url,
            self.period1,
            self.period2,
            format_table(&self.tabular())
        )
    }
}

/// Compare two periods key by key, largest click swings first.
pub async fn compare<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: &str,
    period1: DateRange,
    period2: DateRange,
    dimensions: Vec<String>,
    limit: u32,
) -> GscResult<CompareReport> {
    let fetch = |range: DateRange| {
        let request = SearchAnalyticsRequest::new(&range)
            .dimensions(dimensions.iter().cloned())
            .row_limit(COMPARE_ROW_LIMIT);
        async move { client.query_search_analytics(site_url, &request).await }
    };

    let p1_rows = fetch(period1).await?;
    let p2_rows = fetch(period2).await?;

    let message = (p1_rows.is_empty() && p2_rows.is_empty())
        .then(|| "No data found for either period.".to_string());
    let mut rows = merge_periods(p1_rows, p2_rows);
    rows.truncate(limit as usize);

    Ok(CompareReport {
        report: ReportKind::Compare,
        site_url: site_url.to_string(),
        period1,
        period2,
        dimensions,
        rows,
        message,
    })
}

/// Join both periods on their key tuple; a key missing from one side counts as zero.
///
/// Sorted by absolute click change, descending, then by key.
pub(crate) fn merge_periods(p1_rows: Vec<ApiRow>, p2_rows: Vec<ApiRow>) -> Vec<ComparisonRow> {
    let keys: HashSet<Vec<String>> = p1_rows
        .iter()
        .chain(p2_rows.iter())
        .map(|r| r.keys.clone())
        .collect();

    let p1: HashMap<Vec<String>, ApiRow> = p1_rows.into_iter().map(|r| (r.keys.clone(), r)).collect();
    let p2: HashMap<Vec<String>, ApiRow> = p2_rows.into_iter().map(|r| (r.keys.clone(), r)).collect();
    let zero = ApiRow::default();

    let mut rows: Vec<ComparisonRow> = keys
        .into_iter()
        .map(|keys| {
            let a = p1.get(&keys).unwrap_or(&zero);
            let b = p2.get(&keys).unwrap_or(&zero);
            ComparisonRow {
                change: (b.clicks - a.clicks).round() as i64,
                p1_clicks: a.clicks,
                p2_clicks: b.clicks,
                p1_position: a.position,
                p2_position: b.position,
                keys,
            }
        })
        .collect();

    rows.sort_by(|a, b| {
        b.change
            .abs()
            .cmp(&a.change.abs())
            .then_with(|| a.keys.cmp(&b.keys))
    });
    rows
}
