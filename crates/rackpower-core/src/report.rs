//! Reporting sink for progress and summary lines.
//!
//! Operations emit human-readable lines while they run; routing them through
//! a sink keeps the orchestrator printable to stdout in the CLI and
//! capturable in tests.

/// Line-oriented report sink.
pub trait Report {
    fn line(&mut self, message: &str);
}

/// Prints report lines to stdout, the tool's sole reporting channel.
#[derive(Debug, Default)]
pub struct StdoutReport;

impl Report for StdoutReport {
    fn line(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Collects report lines for assertions.
#[derive(Debug, Default)]
pub struct Capture {
    pub lines: Vec<String>,
}

impl Report for Capture {
    fn line(&mut self, message: &str) {
        self.lines.push(message.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capture_collects_lines() {
        let mut capture = Capture::default();
        capture.line("one");
        capture.line("two");
        assert_eq!(capture.lines, vec!["one", "two"]);
    }
}
