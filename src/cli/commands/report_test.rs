use serde_json::{Value, json};

use crate::cli::commands::report::*;
use crate::error::GscError;
use crate::format::OutputFormat;
use crate::test_support::{MockVendor, api_row};

// =============================================================================
// Integration Tests - CLI report commands against a mock API server
// =============================================================================

const SITE: &str = "sc-domain:example.com";

fn search_command() -> ReportCommand {
    ReportCommand::Search {
        range: RangeArgs {
            days: 28,
            start: Some("2024-06-01".to_string()),
            end: Some("2024-06-28".to_string()),
        },
        limit: 20,
        dimensions: "query".to_string(),
    }
}

async fn vendor_with_rows() -> MockVendor {
    MockVendor::builder()
        .search_response(json!({"rows": [
            api_row(&["rust, the language"], 12.0, 400.0, 0.03, 5.26),
            api_row(&["cargo"], 3.0, 90.0, 0.0333, 8.0)
        ]}))
        .spawn()
        .await
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_table_output() {
    let vendor = vendor_with_rows().await;

    let output = execute(&vendor.client(), Some(SITE), search_command(), OutputFormat::Table)
        .await
        .unwrap();

    assert!(output.contains("Query"));
    assert!(output.contains("Impressions"));
    assert!(output.contains("rust, the language"));
    assert!(output.contains("3.00%"));
    assert!(output.ends_with("Total rows: 2"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_csv_output_quotes_fields() {
    let vendor = vendor_with_rows().await;

    let output = execute(&vendor.client(), Some(SITE), search_command(), OutputFormat::Csv)
        .await
        .unwrap();

    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines[0], "Query,Clicks,Impressions,CTR,Position");
    assert_eq!(lines[1], "\"rust, the language\",12,400,3.00%,5.3");
    assert_eq!(lines[2], "cargo,3,90,3.33%,8.0");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_search_json_output_is_structured() {
    let vendor = vendor_with_rows().await;

    let output = execute(&vendor.client(), Some(SITE), search_command(), OutputFormat::Json)
        .await
        .unwrap();
    let json: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["report"], "search");
    assert_eq!(json["range"]["start"], "2024-06-01");
    assert_eq!(json["rows"][1]["impressions"], 90.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_empty_result_prints_message() {
    let vendor = MockVendor::builder().spawn().await;

    let output = execute(
        &vendor.client(),
        Some(SITE),
        ReportCommand::Pages {
            range: RangeArgs {
                days: 7,
                start: Some("2024-06-01".to_string()),
                end: Some("2024-06-07".to_string()),
            },
            limit: 10,
        },
        OutputFormat::Table,
    )
    .await
    .unwrap();

    assert_eq!(
        output,
        "No page data found for sc-domain:example.com (2024-06-01 to 2024-06-07)."
    );
}

#[tokio::test(flavor = "multi_thread")]
async fn test_missing_site_propagates() {
    let vendor = MockVendor::builder().spawn().await;

    let err = execute(
        &vendor.client(),
        None,
        ReportCommand::Sitemaps,
        OutputFormat::Table,
    )
    .await
    .unwrap_err();

    assert!(matches!(err, GscError::MissingSiteUrl));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_properties_needs_no_site() {
    let vendor = MockVendor::builder()
        .sites(json!({"siteEntry": [
            {"siteUrl": "sc-domain:example.com", "permissionLevel": "siteOwner"}
        ]}))
        .spawn()
        .await;

    let output = execute(
        &vendor.client(),
        None,
        ReportCommand::Properties,
        OutputFormat::Csv,
    )
    .await
    .unwrap();

    assert_eq!(output, "siteUrl,permissionLevel\nsc-domain:example.com,siteOwner");
}

#[tokio::test(flavor = "multi_thread")]
async fn test_inspect_json_output() {
    let vendor = MockVendor::builder()
        .inspection(
            "https://example.com/",
            json!({"inspectionResult": {"indexStatusResult": {"verdict": "PASS"}}}),
        )
        .spawn()
        .await;

    let output = execute(
        &vendor.client(),
        Some(SITE),
        ReportCommand::Inspect {
            page_url: "https://example.com/".to_string(),
        },
        OutputFormat::Json,
    )
    .await
    .unwrap();
    let json: Value = serde_json::from_str(&output).unwrap();

    assert_eq!(json["report"], "inspect");
    assert_eq!(json["result"]["indexStatusResult"]["verdict"], "PASS");
    assert_eq!(vendor.requests()[0].body["siteUrl"], SITE);
}
