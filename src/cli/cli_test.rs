use clap::Parser;

use super::*;
use crate::reports::{ReportKind, ReportOptions};

fn parse(args: &[&str]) -> Cli {
    Cli::try_parse_from(std::iter::once("gsc").chain(args.iter().copied()))
        .expect("arguments should parse")
}

fn report(cli: Cli) -> ReportCommand {
    match cli.command {
        Commands::Report(command) => command,
        Commands::Mcp(_) => panic!("expected a report subcommand"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = parse(&[
        "sitemaps",
        "--site-url",
        "sc-domain:example.com",
        "--output",
        "csv",
        "--credentials",
        "/tmp/key.json",
        "-vv",
    ]);

    assert_eq!(cli.site_url.as_deref(), Some("sc-domain:example.com"));
    assert_eq!(cli.output, OutputFormat::Csv);
    assert_eq!(cli.credentials, Some(PathBuf::from("/tmp/key.json")));
    assert_eq!(cli.verbose, 2);
    assert_eq!(report(cli), ReportCommand::Sitemaps);
}

#[test]
fn test_search_defaults() {
    let command = report(parse(&["search"]));
    assert_eq!(command.kind(), ReportKind::Search);
    assert_eq!(
        command.into_options(),
        ReportOptions {
            days: Some(28),
            limit: Some(20),
            dimensions: Some("query".to_string()),
            ..Default::default()
        }
    );
}

#[test]
fn test_page_queries_options() {
    let command = report(parse(&[
        "page-queries",
        "--page-url",
        "https://example.com/guide",
        "--start",
        "2024-06-01",
        "--end",
        "2024-06-10",
        "--limit",
        "50",
    ]));

    assert_eq!(command.kind(), ReportKind::PageQueries);
    let options = command.into_options();
    assert_eq!(options.page_url.as_deref(), Some("https://example.com/guide"));
    assert_eq!(options.start.as_deref(), Some("2024-06-01"));
    assert_eq!(options.end.as_deref(), Some("2024-06-10"));
    assert_eq!(options.limit, Some(50));
}

#[test]
fn test_required_flags_enforced() {
    assert!(Cli::try_parse_from(["gsc", "page-queries"]).is_err());
    assert!(Cli::try_parse_from(["gsc", "inspect"]).is_err());
    assert!(Cli::try_parse_from(["gsc", "indexing"]).is_err());
    assert!(
        Cli::try_parse_from(["gsc", "compare", "--p1-start", "2024-05-01", "--p1-end", "2024-05-31"])
            .is_err()
    );
    assert!(Cli::try_parse_from(["gsc"]).is_err());
}

#[test]
fn test_unknown_output_format_rejected() {
    assert!(Cli::try_parse_from(["gsc", "properties", "--output", "xml"]).is_err());
}

#[test]
fn test_subcommand_names_match_report_names() {
    for kind in ReportKind::ALL {
        let args: Vec<&str> = match kind {
            ReportKind::PageQueries | ReportKind::Inspect => {
                vec![kind.name(), "--page-url", "https://example.com/"]
            }
            ReportKind::Compare => vec![
                kind.name(),
                "--p1-start",
                "2024-05-01",
                "--p1-end",
                "2024-05-31",
                "--p2-start",
                "2024-06-01",
                "--p2-end",
                "2024-06-30",
            ],
            ReportKind::Indexing => vec![kind.name(), "--urls", "https://example.com/"],
            _ => vec![kind.name()],
        };
        assert_eq!(report(parse(&args)).kind(), kind);
    }
}

#[test]
fn test_mcp_defaults() {
    let cli = parse(&["mcp"]);
    let Commands::Mcp(args) = cli.command else {
        panic!("expected mcp subcommand");
    };
    assert!(!args.http);
    assert_eq!(args.host.to_string(), "127.0.0.1");
    assert_eq!(args.port, 3737);

    let cli = parse(&["mcp", "--http", "--host", "0.0.0.0", "--port", "8080"]);
    let Commands::Mcp(args) = cli.command else {
        panic!("expected mcp subcommand");
    };
    assert!(args.http);
    assert_eq!(args.port, 8080);
}

#[test]
fn test_default_filter_levels() {
    assert_eq!(default_filter(0), "search_console=warn");
    assert_eq!(default_filter(1), "search_console=info");
    assert!(default_filter(2).starts_with("search_console=debug"));
    assert!(default_filter(5).starts_with("search_console=trace"));
}
