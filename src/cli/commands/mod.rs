pub mod mcp;
pub mod report;

#[cfg(test)]
#[path = "report_test.rs"]
mod report_test;
