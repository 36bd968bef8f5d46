//! Output formatting for CLI results.

use colored::Colorize;
use rackpower_core::{HostStatus, Report};

/// Output formatter trait
pub trait OutputFormatter {
    /// Format a status summary
    fn format_status(&self, status: &HostStatus) -> String;

    /// Format an error
    fn format_error(&self, error: &str) -> String;
}

/// Plain-text formatter (the summary-line contract).
pub struct TextOutput;

impl OutputFormatter for TextOutput {
    fn format_status(&self, status: &HostStatus) -> String {
        status.to_string()
    }

    fn format_error(&self, error: &str) -> String {
        error.to_string()
    }
}

/// JSON formatter for `--json`.
pub struct JsonOutput;

impl OutputFormatter for JsonOutput {
    fn format_status(&self, status: &HostStatus) -> String {
        serde_json::to_string_pretty(status).unwrap_or_else(|e| {
            serde_json::json!({ "error": e.to_string() }).to_string()
        })
    }

    fn format_error(&self, error: &str) -> String {
        serde_json::json!({ "error": error }).to_string()
    }
}

/// Get the appropriate formatter based on JSON flag
pub fn get_formatter(json: bool) -> Box<dyn OutputFormatter> {
    if json {
        Box::new(JsonOutput)
    } else {
        Box::new(TextOutput)
    }
}

/// How a progress line should be rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum LineKind {
    Success,
    Failure,
    Plain,
}

fn classify_line(message: &str) -> LineKind {
    if message.starts_with("Success") {
        LineKind::Success
    } else if message.starts_with("Error") || message.starts_with("Cannot") {
        LineKind::Failure
    } else {
        LineKind::Plain
    }
}

/// Report sink printing progress lines to stdout, with Success/Error lines
/// colored when attached to a terminal.
#[derive(Debug, Default)]
pub struct ConsoleReport;

impl Report for ConsoleReport {
    fn line(&mut self, message: &str) {
        match classify_line(message) {
            LineKind::Success => println!("{}", message.green()),
            LineKind::Failure => println!("{}", message.red()),
            LineKind::Plain => println!("{}", message),
        }
    }
}
