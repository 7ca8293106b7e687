use crate::format::*;

fn sample() -> Tabular {
    let mut data = Tabular::new(["Query", "Clicks"]);
    data.push(vec!["rust async".to_string(), "42".to_string()]);
    data.push(vec!["tokio, select".to_string(), "7".to_string()]);
    data
}

#[test]
fn test_format_table_empty() {
    let data = Tabular::new(["Query", "Clicks"]);
    assert_eq!(format_table(&data), "No data found.");
}

#[test]
fn test_format_table_contains_cells_and_total() {
    let output = format_table(&sample());
    assert!(output.contains("Query"));
    assert!(output.contains("rust async"));
    assert!(output.contains("tokio, select"));
    assert!(output.ends_with("\n\nTotal rows: 2"));
}

#[test]
fn test_format_csv_quotes_when_needed() {
    let mut data = sample();
    data.push(vec!["say \"hi\"".to_string(), "1".to_string()]);

    let csv = format_csv(&data);
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines[0], "Query,Clicks");
    assert_eq!(lines[1], "rust async,42");
    assert_eq!(lines[2], "\"tokio, select\",7");
    assert_eq!(lines[3], "\"say \"\"hi\"\"\",1");
}

#[test]
fn test_format_csv_headers_only() {
    let data = Tabular::new(["Path", "Errors"]);
    assert_eq!(format_csv(&data), "Path,Errors");
}

#[test]
fn test_metric_formatting() {
    assert_eq!(format_ctr(0.0543), "5.43%");
    assert_eq!(format_ctr(0.0), "0.00%");
    assert_eq!(format_position(3.14159), "3.1");
    assert_eq!(format_count(42.0), "42");
    assert_eq!(format_count(2.5), "2.5");
}

#[test]
fn test_group_thousands() {
    assert_eq!(group_thousands(0.0), "0");
    assert_eq!(group_thousands(999.0), "999");
    assert_eq!(group_thousands(1000.0), "1,000");
    assert_eq!(group_thousands(1234567.0), "1,234,567");
    assert_eq!(group_thousands(-45000.0), "-45,000");
}

#[test]
fn test_format_signed() {
    assert_eq!(format_signed(12), "+12");
    assert_eq!(format_signed(-3), "-3");
    assert_eq!(format_signed(0), "+0");
}

#[test]
fn test_capitalize() {
    assert_eq!(capitalize("query"), "Query");
    assert_eq!(capitalize("searchAppearance"), "Searchappearance");
    assert_eq!(capitalize(""), "");
}

#[test]
fn test_format_timestamp() {
    assert_eq!(format_timestamp("2024-05-02T13:45:10Z"), "2024-05-02 13:45");
    assert_eq!(
        format_timestamp("2024-05-02T13:45:10.123+02:00"),
        "2024-05-02 13:45"
    );
    assert_eq!(format_timestamp("yesterday"), "yesterday");
}

#[test]
fn test_truncate_with_ellipsis() {
    assert_eq!(truncate_with_ellipsis("hello", 10), "hello");
    assert_eq!(truncate_with_ellipsis("hello", 5), "hello");
    assert_eq!(
        truncate_with_ellipsis("hello world this is a long string", 10),
        "hello w..."
    );
    assert_eq!(truncate_with_ellipsis("hello 世界", 7), "hell...");
}

#[test]
fn test_labelled_pads_label() {
    assert_eq!(labelled("Coverage", "Indexed", 15), "Coverage:      Indexed");
    assert_eq!(labelled("Robots.txt", "ALLOWED", 15), "Robots.txt:    ALLOWED");
    assert_eq!(
        labelled("Google Canonical", "https://example.com/", 15),
        "Google Canonical: https://example.com/"
    );
}

#[test]
fn test_output_format_value_enum() {
    use clap::ValueEnum;
    assert_eq!(
        OutputFormat::from_str("csv", true).unwrap(),
        OutputFormat::Csv
    );
    assert_eq!(OutputFormat::default(), OutputFormat::Table);
}

struct Unserializable;

impl serde::Serialize for Unserializable {
    fn serialize<S: serde::Serializer>(&self, _serializer: S) -> Result<S::Ok, S::Error> {
        Err(serde::ser::Error::custom("bad \"value\" in row"))
    }
}

impl Render for Unserializable {
    fn tabular(&self) -> Tabular {
        Tabular::new(["Query"])
    }
}

#[test]
fn test_render_json_failure_is_valid_json() {
    let output = Unserializable.render(OutputFormat::Json);
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();
    assert_eq!(json["error"], "bad \"value\" in row");
}
