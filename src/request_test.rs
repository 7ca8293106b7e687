use crate::error::GscError;
use crate::request::*;
use chrono::NaiveDate;
use serde_json::json;

fn day(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, DATE_FORMAT).unwrap()
}

#[test]
fn test_resolve_defaults_to_lookback_from_today() {
    let range = DateRange::resolve(28, None, None, day("2024-03-29")).unwrap();
    assert_eq!(range.start_str(), "2024-03-01");
    assert_eq!(range.end_str(), "2024-03-29");
    assert_eq!(range.day_count(), 29);
    assert_eq!(range.to_string(), "2024-03-01 to 2024-03-29");
}

#[test]
fn test_resolve_explicit_dates_override_days() {
    let range = DateRange::resolve(
        90,
        Some("2024-01-01"),
        Some("2024-01-07"),
        day("2024-06-01"),
    )
    .unwrap();
    assert_eq!(range.start, day("2024-01-01"));
    assert_eq!(range.end, day("2024-01-07"));
    assert_eq!(range.day_count(), 7);
}

#[test]
fn test_resolve_rejects_bad_dates() {
    let err = DateRange::resolve(28, Some("01/02/2024"), None, day("2024-06-01")).unwrap_err();
    assert!(matches!(err, GscError::InvalidArgument { .. }));
    assert!(err.to_string().contains("01/02/2024"));

    let err = DateRange::parse("2024-02-10", "2024-02-01").unwrap_err();
    assert!(err.to_string().contains("after end date"));
}

#[test]
fn test_resolve_rejects_lookback_past_calendar_start() {
    let err = DateRange::resolve(u32::MAX, None, None, day("2024-06-28")).unwrap_err();
    assert!(matches!(err, GscError::InvalidArgument { .. }));
    assert!(err.to_string().contains("4294967295"));

    // An explicit start never touches the lookback
    let range = DateRange::resolve(u32::MAX, Some("2024-06-01"), None, day("2024-06-28")).unwrap();
    assert_eq!(range.day_count(), 28);
}

#[test]
fn test_parse_dimensions() {
    assert_eq!(parse_dimensions(None).unwrap(), vec!["query"]);
    assert_eq!(parse_dimensions(Some(" , ")).unwrap(), vec!["query"]);
    assert_eq!(
        parse_dimensions(Some("query, page ,device")).unwrap(),
        vec!["query", "page", "device"]
    );
    assert_eq!(
        parse_dimensions(Some("searchAppearance")).unwrap(),
        vec!["searchAppearance"]
    );

    let err = parse_dimensions(Some("query,browser")).unwrap_err();
    assert!(err.to_string().contains("browser"));
}

#[test]
fn test_parse_url_list_drops_blanks() {
    let urls = parse_url_list(" https://a.example/ ,,https://b.example/x, ");
    assert_eq!(urls, vec!["https://a.example/", "https://b.example/x"]);
    assert!(parse_url_list(" , ").is_empty());
}

#[test]
fn test_search_request_body_shape() {
    let range = DateRange::parse("2024-05-01", "2024-05-28").unwrap();
    let request = SearchAnalyticsRequest::new(&range)
        .dimensions(["query"])
        .row_limit(50)
        .page_filter("https://example.com/blog/");

    let body = serde_json::to_value(&request).unwrap();
    assert_eq!(
        body,
        json!({
            "startDate": "2024-05-01",
            "endDate": "2024-05-28",
            "dimensions": ["query"],
            "dimensionFilterGroups": [{
                "filters": [{
                    "dimension": "page",
                    "operator": "equals",
                    "expression": "https://example.com/blog/"
                }]
            }],
            "rowLimit": 50
        })
    );
}

#[test]
fn test_totals_request_has_empty_dimensions_and_no_filters() {
    let range = DateRange::parse("2024-05-01", "2024-05-28").unwrap();
    let body = serde_json::to_value(SearchAnalyticsRequest::new(&range).row_limit(1)).unwrap();
    assert_eq!(body["dimensions"], json!([]));
    assert_eq!(body["rowLimit"], 1);
    assert!(body.get("dimensionFilterGroups").is_none());
}

#[test]
fn test_row_limit_is_clamped() {
    assert_eq!(clamp_row_limit(0), 1);
    assert_eq!(clamp_row_limit(100_000), MAX_ROW_LIMIT);
    assert_eq!(clamp_row_limit(20), 20);
}
