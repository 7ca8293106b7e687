//! URL inspection reports: single-URL detail and batch indexing checks.

use serde::Serialize;
use tracing::warn;

use crate::auth::Authenticator;
use crate::client::{IndexStatusResult, InspectionResult, SearchConsoleClient};
use crate::error::{GscError, GscResult};
use crate::format::{RULE, Render, Tabular, format_timestamp, labelled};
use crate::request::MAX_BATCH_URLS;

use super::ReportKind;

const LABEL_WIDTH: usize = 15;
const SUMMARY_WIDTH: usize = 16;
const MAX_REFERRING_URLS: usize = 5;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct InspectionReport {
    pub report: ReportKind,
    pub site_url: String,
    pub page_url: String,
    pub result: Option<InspectionResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl InspectionReport {
    fn index_status(&self) -> Option<&IndexStatusResult> {
        self.result
            .as_ref()
            .and_then(|r| r.index_status_result.as_ref())
    }

    pub fn verdict(&self) -> &str {
        self.index_status()
            .and_then(|s| s.verdict.as_deref())
            .unwrap_or("UNKNOWN")
    }
}

/// Labelled index status fields, in display order, skipping absent ones.
fn index_fields(status: &IndexStatusResult) -> Vec<(&'static str, String)> {
    let fields = [
        ("Coverage", &status.coverage_state),
        ("Page Fetch", &status.page_fetch_state),
        ("Robots.txt", &status.robots_txt_state),
        ("Indexing", &status.indexing_state),
        ("Crawled As", &status.crawled_as),
        ("Google Canonical", &status.google_canonical),
        ("User Canonical", &status.user_canonical),
    ];

    let mut out: Vec<(&'static str, String)> = fields
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| (label, v.clone())))
        .collect();
    if let Some(crawled) = &status.last_crawl_time {
        out.push(("Last Crawled", format_timestamp(crawled)));
    }
    out
}

impl Render for InspectionReport {
    fn tabular(&self) -> Tabular {
        let mut data = Tabular::new(["Field", "Value"]);
        let Some(result) = &self.result else {
            return data;
        };

        data.push(vec!["Verdict".to_string(), self.verdict().to_string()]);
        if let Some(link) = &result.inspection_result_link {
            data.push(vec!["GSC Link".to_string(), link.clone()]);
        }
        if let Some(status) = &result.index_status_result {
            for (label, value) in index_fields(status) {
                data.push(vec![label.to_string(), value]);
            }
            for url in status.referring_urls.iter().take(MAX_REFERRING_URLS) {
                data.push(vec!["Referring URL".to_string(), url.clone()]);
            }
        }
        if let Some(rich) = &result.rich_results_result {
            data.push(vec![
                "Rich Results".to_string(),
                rich.verdict.clone().unwrap_or_else(|| "UNKNOWN".to_string()),
            ]);
            for item in &rich.detected_items {
                data.push(vec![
                    "Rich Result Type".to_string(),
                    item.rich_result_type
                        .clone()
                        .unwrap_or_else(|| "Unknown".to_string()),
                ]);
            }
        }
        data
    }

    fn render_table(&self) -> String {
        let Some(result) = &self.result else {
            return self
                .message
                .clone()
                .unwrap_or_else(|| format!("No inspection data for {}.", self.page_url));
        };

        let mut lines = vec![format!("URL Inspection: {}", self.page_url), RULE.to_string()];

        if let Some(link) = &result.inspection_result_link {
            lines.push(format!("GSC Link: {}", link));
        }
        lines.push(labelled("Verdict", self.verdict(), LABEL_WIDTH));

        if let Some(status) = &result.index_status_result {
            for (label, value) in index_fields(status) {
                lines.push(labelled(label, value, LABEL_WIDTH));
            }
            if !status.referring_urls.is_empty() {
                lines.push("\nReferring URLs:".to_string());
                for url in status.referring_urls.iter().take(MAX_REFERRING_URLS) {
                    lines.push(format!("  - {}", url));
                }
            }
        }

        if let Some(rich) = &result.rich_results_result {
            lines.push(format!(
                "\n{}",
                labelled(
                    "Rich Results",
                    rich.verdict.as_deref().unwrap_or("UNKNOWN"),
                    LABEL_WIDTH
                )
            ));
            for item in &rich.detected_items {
                lines.push(format!(
                    "  - {}",
                    item.rich_result_type.as_deref().unwrap_or("Unknown")
                ));
            }
        }

        lines.join("\n")
    }
}

/// Index status, crawl details, canonicals and rich results for one URL.
pub async fn inspect<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: &str,
    page_url: &str,
) -> GscResult<InspectionReport> {
    let result = client.inspect_url(site_url, page_url).await?;
    let message = result
        .is_none()
        .then(|| format!("No inspection data for {}.", page_url));
    Ok(InspectionReport {
        report: ReportKind::Inspect,
        site_url: site_url.to_string(),
        page_url: page_url.to_string(),
        result,
        message,
    })
}

/// Indexing outcome for one URL of a batch.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UrlIndexStatus {
    pub url: String,
    pub indexed: bool,
    pub verdict: Option<String>,
    pub coverage: Option<String>,
    pub robots_blocked: bool,
    /// Page fetch state when it is not `SUCCESSFUL`.
    pub fetch_issue: Option<String>,
    pub error: Option<String>,
}

impl UrlIndexStatus {
    /// Why the URL counts as not indexed, or `None` when it is indexed.
    pub fn not_indexed_reason(&self) -> Option<String> {
        if self.indexed {
            return None;
        }
        Some(match (&self.error, &self.verdict) {
            (Some(err), _) => format!("Error: {}", err),
            (None, None) => "no data".to_string(),
            (None, Some(_)) => self
                .coverage
                .clone()
                .unwrap_or_else(|| "Unknown".to_string()),
        })
    }

    fn from_result(url: &str, result: Option<InspectionResult>) -> Self {
        let Some(result) = result else {
            return Self {
                url: url.to_string(),
                ..Default::default()
            };
        };

        let status = result.index_status_result.unwrap_or_default();
        let verdict = status
            .verdict
            .clone()
            .unwrap_or_else(|| "UNKNOWN".to_string());
        let coverage = status
            .coverage_state
            .clone()
            .unwrap_or_else(|| "Unknown".to_string());
        let coverage_lower = coverage.to_lowercase();

        let indexed = verdict == "PASS"
            && !coverage_lower.contains("not indexed")
            && !coverage_lower.contains("excluded");

        let fetch_issue = status
            .page_fetch_state
            .clone()
            .filter(|state| state != "SUCCESSFUL");

        Self {
            url: url.to_string(),
            indexed,
            verdict: Some(verdict),
            coverage: Some(coverage),
            robots_blocked: status.robots_txt_state.as_deref() == Some("BLOCKED"),
            fetch_issue,
            error: None,
        }
    }

    fn from_error(url: &str, error: &GscError) -> Self {
        Self {
            url: url.to_string(),
            error: Some(error.to_string()),
            ..Default::default()
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexingSummary {
    pub checked: usize,
    pub indexed: usize,
    pub not_indexed: usize,
    pub robots_blocked: usize,
    pub fetch_issues: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndexingReport {
    pub report: ReportKind,
    pub site_url: String,
    pub summary: IndexingSummary,
    pub results: Vec<UrlIndexStatus>,
}

impl IndexingReport {
    fn new(site_url: &str, results: Vec<UrlIndexStatus>) -> Self {
        let summary = IndexingSummary {
            checked: results.len(),
            indexed: results.iter().filter(|r| r.indexed).count(),
            not_indexed: results.iter().filter(|r| !r.indexed).count(),
            robots_blocked: results.iter().filter(|r| r.robots_blocked).count(),
            fetch_issues: results.iter().filter(|r| r.fetch_issue.is_some()).count(),
        };
        Self {
            report: ReportKind::Indexing,
            site_url: site_url.to_string(),
            summary,
            results,
        }
    }
}

impl Render for IndexingReport {
    fn tabular(&self) -> Tabular {
        let mut data = Tabular::new(["URL", "Status", "Detail", "Robots Blocked", "Fetch Issue"]);
        for r in &self.results {
            data.push(vec![
                r.url.clone(),
                if r.indexed { "Indexed" } else { "Not indexed" }.to_string(),
                r.not_indexed_reason().unwrap_or_default(),
                if r.robots_blocked { "yes" } else { "no" }.to_string(),
                r.fetch_issue.clone().unwrap_or_default(),
            ]);
        }
        data
    }

    fn render_table(&self) -> String {
        let s = &self.summary;
        let mut lines = vec![
            format!("Indexing Report for {}", self.site_url),
            RULE.to_string(),
            labelled("Checked", s.checked, SUMMARY_WIDTH),
            labelled("Indexed", s.indexed, SUMMARY_WIDTH),
            labelled("Not indexed", s.not_indexed, SUMMARY_WIDTH),
            labelled("Robots blocked", s.robots_blocked, SUMMARY_WIDTH),
            labelled("Fetch issues", s.fetch_issues, SUMMARY_WIDTH),
        ];

        let not_indexed: Vec<String> = self
            .results
            .iter()
            .filter_map(|r| r.not_indexed_reason().map(|why| format!("{} - {}", r.url, why)))
            .collect();
        let robots_blocked: Vec<String> = self
            .results
            .iter()
            .filter(|r| r.robots_blocked)
            .map(|r| r.url.clone())
            .collect();
        let fetch_issues: Vec<String> = self
            .results
            .iter()
            .filter_map(|r| {
                r.fetch_issue
                    .as_ref()
                    .map(|state| format!("{} - {}", r.url, state))
            })
            .collect();

        for (label, items) in [
            ("Not Indexed", not_indexed),
            ("Robots Blocked", robots_blocked),
            ("Fetch Issues", fetch_issues),
        ] {
            if items.is_empty() {
                continue;
            }
            lines.push(format!("\n{}:", label));
            lines.extend(items.into_iter().map(|item| format!("  - {}", item)));
        }

        lines.join("\n")
    }
}

/// Inspect up to ten URLs one after another and summarize their index state.
///
/// A failed inspection is recorded against its URL; the batch carries on.
pub async fn indexing<A: Authenticator>(
    client: &SearchConsoleClient<A>,
    site_url: &str,
    urls: &[String],
) -> GscResult<IndexingReport> {
    if urls.is_empty() {
        return Err(GscError::invalid_argument(
            "at least one URL is required (comma-separated list of URLs to check)",
        ));
    }
    if urls.len() > MAX_BATCH_URLS {
        return Err(GscError::invalid_argument(format!(
            "at most {} URLs per batch to stay within the inspection quota (got {})",
            MAX_BATCH_URLS,
            urls.len()
        )));
    }

    let mut results = Vec::with_capacity(urls.len());
    for url in urls {
        let status = match client.inspect_url(site_url, url).await {
            Ok(result) => UrlIndexStatus::from_result(url, result),
            Err(e) => {
                warn!(url = %url, error = %e, "inspection failed");
                UrlIndexStatus::from_error(url, &e)
            }
        };
        results.push(status);
    }

    Ok(IndexingReport::new(site_url, results))
}
