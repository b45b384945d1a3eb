//! Reporters: where submission outcomes are shown.

use std::io::Write;
use std::sync::Mutex;

use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

use crate::error::ValidationError;

/// Presentation interface for the submission handler. Exactly one method
/// is called per submission outcome.
pub trait Reporter: Send + Sync {
    fn on_validation_error(&self, err: &ValidationError);
    fn on_success(&self, output: &str);
    fn on_failure(&self, message: &str, detail: Option<&str>);
}

/// Prediction to stdout, everything else to stderr. Each stream is colored
/// on its own switch.
pub struct ConsoleReporter {
    pub stdout_color: bool,
    pub stderr_color: bool,
}

impl ConsoleReporter {
    /// Colors each stream only when it is a terminal.
    pub fn detect(no_color: bool) -> Self {
        Self {
            stdout_color: !no_color && std::io::stdout().is_terminal(),
            stderr_color: !no_color && std::io::stderr().is_terminal(),
        }
    }

    fn eprint(&self, text: &str, color: &str) {
        let _ = writeln!(std::io::stderr().lock(), "{}", paint(text, color, self.stderr_color));
    }
}

fn paint(text: &str, color: &str, enabled: bool) -> String {
    if !enabled {
        return text.to_string();
    }
    match color {
        "green" => text.green().to_string(),
        "yellow" => text.yellow().to_string(),
        "red" => text.red().to_string(),
        _ => text.to_string(),
    }
}

impl Reporter for ConsoleReporter {
    fn on_validation_error(&self, err: &ValidationError) {
        self.eprint(&err.to_string(), "yellow");
    }

    fn on_success(&self, output: &str) {
        println!("{}", paint(output, "green", self.stdout_color));
    }

    fn on_failure(&self, message: &str, detail: Option<&str>) {
        self.eprint(message, "red");
        if let Some(d) = detail {
            self.eprint(&format!("  ({})", d), "");
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Report {
    Validation(String),
    Success(String),
    Failure { message: String, detail: Option<String> },
}

/// Keeps every report in memory, in call order.
#[derive(Debug, Default)]
pub struct Recorder {
    reports: Mutex<Vec<Report>>,
}

impl Recorder {
    pub fn reports(&self) -> Vec<Report> {
        self.reports.lock().map(|r| r.clone()).unwrap_or_default()
    }

    fn push(&self, report: Report) {
        if let Ok(mut r) = self.reports.lock() {
            r.push(report);
        }
    }
}

impl Reporter for Recorder {
    fn on_validation_error(&self, err: &ValidationError) {
        self.push(Report::Validation(err.to_string()));
    }

    fn on_success(&self, output: &str) {
        self.push(Report::Success(output.to_string()));
    }

    fn on_failure(&self, message: &str, detail: Option<&str>) {
        self.push(Report::Failure { message: message.to_string(), detail: detail.map(str::to_string) });
    }
}

impl<R: Reporter + ?Sized> Reporter for std::sync::Arc<R> {
    fn on_validation_error(&self, err: &ValidationError) {
        (**self).on_validation_error(err)
    }

    fn on_success(&self, output: &str) {
        (**self).on_success(output)
    }

    fn on_failure(&self, message: &str, detail: Option<&str>) {
        (**self).on_failure(message, detail)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paint_respects_switch() {
        assert_eq!(paint("42", "green", false), "42");
        let colored = paint("42", "green", true);
        assert!(colored.contains("42"));
        assert!(colored.starts_with("\u{1b}["));
        assert_eq!(paint("plain", "", true), "plain");
    }

    #[test]
    fn test_streams_colored_independently() {
        let reporter = ConsoleReporter { stdout_color: false, stderr_color: true };
        assert_eq!(paint("x", "red", reporter.stdout_color), "x");
        assert_ne!(paint("x", "red", reporter.stderr_color), "x");

        let off = ConsoleReporter::detect(true);
        assert!(!off.stdout_color && !off.stderr_color);
    }

    #[test]
    fn test_recorder_keeps_order() {
        let rec = Recorder::default();
        rec.on_validation_error(&ValidationError { field: "a".into() });
        rec.on_success("42");
        rec.on_failure("boom", Some("detail"));
        assert_eq!(
            rec.reports(),
            vec![
                Report::Validation(crate::error::VALIDATION_MESSAGE.into()),
                Report::Success("42".into()),
                Report::Failure { message: "boom".into(), detail: Some("detail".into()) },
            ]
        );
    }
}
