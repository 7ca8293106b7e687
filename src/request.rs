//! Request building.
//!
//! Turns report options (lookback days, explicit dates, dimension lists,
//! row limits, page filters) into the request bodies the API expects.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{GscError, GscResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const DEFAULT_DAYS: u32 = 28;
pub const DEFAULT_LIMIT: u32 = 20;
/// Largest `rowLimit` the API accepts.
pub const MAX_ROW_LIMIT: u32 = 25_000;
/// Row limit used for each period of a comparison.
pub const COMPARE_ROW_LIMIT: u32 = 1_000;
/// URL inspection quota guard for batch checks.
pub const MAX_BATCH_URLS: usize = 10;

pub const DIMENSIONS: &[&str] = &[
    "query",
    "page",
    "country",
    "device",
    "date",
    "searchAppearance",
];

/// Inclusive date range sent as `startDate`/`endDate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// End defaults to `today`, start defaults to `today - days`.
    ///
    /// An explicit start overrides the lookback; the lookback is always
    /// counted from today, not from an explicit end.
    pub fn resolve(
        days: u32,
        start: Option<&str>,
        end: Option<&str>,
        today: NaiveDate,
    ) -> GscResult<Self> {
        let end = match end {
            Some(e) => parse_date(e)?,
            None => today,
        };
        let start = match start {
            Some(s) => parse_date(s)?,
            None => today
                .checked_sub_days(Days::new(u64::from(days)))
                .ok_or_else(|| {
                    GscError::invalid_argument(format!("days value {} is out of range", days))
                })?,
        };
        Self::new(start, end)
    }

    pub fn new(start: NaiveDate, end: NaiveDate) -> GscResult<Self> {
        if start > end {
            return Err(GscError::invalid_argument(format!(
                "start date {} is after end date {}",
                start.format(DATE_FORMAT),
                end.format(DATE_FORMAT)
            )));
        }
        Ok(Self { start, end })
    }

    pub fn parse(start: &str, end: &str) -> GscResult<Self> {
        Self::new(parse_date(start)?, parse_date(end)?)
    }

    /// Number of calendar days covered, both ends included.
    pub fn day_count(&self) -> u32 {
        ((self.end - self.start).num_days() + 1) as u32
    }

    pub fn start_str(&self) -> String {
        self.start.format(DATE_FORMAT).to_string()
    }

    pub fn end_str(&self) -> String {
        self.end.format(DATE_FORMAT).to_string()
    }
}

impl std::fmt::Display for DateRange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} to {}", self.start_str(), self.end_str())
    }
}

pub fn parse_date(value: &str) -> GscResult<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).map_err(|_| {
        GscError::invalid_argument(format!("invalid date '{}', expected YYYY-MM-DD", value))
    })
}

/// Parse a comma-separated dimension list, defaulting to `query`.
pub fn parse_dimensions(value: Option<&str>) -> GscResult<Vec<String>> {
    let dims: Vec<String> = value
        .unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|d| !d.is_empty())
        .map(str::to_string)
        .collect();

    if dims.is_empty() {
        return Ok(vec!["query".to_string()]);
    }

    if let Some(bad) = dims.iter().find(|d| !DIMENSIONS.contains(&d.as_str())) {
        return Err(GscError::invalid_argument(format!(
            "unknown dimension '{}' (expected one of: {})",
            bad,
            DIMENSIONS.join(", ")
        )));
    }
    Ok(dims)
}

/// Parse a comma-separated URL list, dropping blanks.
pub fn parse_url_list(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|u| !u.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn clamp_row_limit(limit: u32) -> u32 {
    limit.clamp(1, MAX_ROW_LIMIT)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DimensionFilter {
    pub dimension: String,
    pub operator: String,
    pub expression: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DimensionFilterGroup {
    pub filters: Vec<DimensionFilter>,
}

/// Body of `searchAnalytics/query`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchAnalyticsRequest {
    pub start_date: String,
    pub end_date: String,
    pub dimensions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub dimension_filter_groups: Vec<DimensionFilterGroup>,
    pub row_limit: u32,
}

impl SearchAnalyticsRequest {
    pub fn new(range: &DateRange) -> Self {
        Self {
            start_date: range.start_str(),
            end_date: range.end_str(),
            dimensions: Vec::new(),
            dimension_filter_groups: Vec::new(),
            row_limit: DEFAULT_LIMIT,
        }
    }

    pub fn dimensions<I, S>(mut self, dims: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dimensions = dims.into_iter().map(Into::into).collect();
        self
    }

    pub fn row_limit(mut self, limit: u32) -> Self {
        self.row_limit = clamp_row_limit(limit);
        self
    }

    /// Restrict rows to a single page URL.
    pub fn page_filter(mut self, page_url: &str) -> Self {
        self.dimension_filter_groups.push(DimensionFilterGroup {
            filters: vec![DimensionFilter {
                dimension: "page".to_string(),
                operator: "equals".to_string(),
                expression: page_url.to_string(),
            }],
        });
        self
    }
}

/// Body of `urlInspection/index:inspect`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InspectRequest {
    pub inspection_url: String,
    pub site_url: String,
}

#[cfg(test)]
#[path = "request_test.rs"]
mod request_test;
