//! Output formatting for the CLI.

use console::{style, StyledObject};
use indicatif::{ProgressBar, ProgressStyle};

/// Output handler for CLI messages.
///
/// In JSON mode every human-oriented message is suppressed and only
/// [`json`](Self::json) payloads (and errors) are written.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    fn line(&self, marker: StyledObject<&str>, msg: &str) {
        if !self.json {
            println!("{} {}", marker, msg);
        }
    }

    pub fn info(&self, msg: &str) {
        self.line(style("ℹ").blue(), msg);
    }

    /// Confirmations, including cart notifications.
    pub fn success(&self, msg: &str) {
        self.line(style("✓").green(), msg);
    }

    /// Warnings go to stderr.
    pub fn warn(&self, msg: &str) {
        if !self.json {
            eprintln!("{} {}", style("⚠").yellow(), msg);
        }
    }

    /// Errors are written in JSON mode too, as `{"error": ...}`.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
        } else {
            eprintln!("{} {}", style("✗").red(), style(msg).red());
        }
    }

    /// Only shown with `--verbose`.
    pub fn debug(&self, msg: &str) {
        if self.verbose && !self.json {
            eprintln!("{} {}", style("→").dim(), style(msg).dim());
        }
    }

    pub fn header(&self, msg: &str) {
        if !self.json {
            println!("\n{}", style(msg).bold().underlined());
        }
    }

    /// Print a JSON payload to stdout.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    pub fn kv(&self, key: &str, value: &str) {
        if !self.json {
            println!("  {}: {}", style(key).dim(), value);
        }
    }

    /// Print one table row, each column padded or cut to its width.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", truncate(col, *width), width = width))
            .collect();
        println!("  {}", formatted.join("  ").trim_end());
    }

    /// Spinner shown while the catalog request is outstanding. Hidden in
    /// JSON mode.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Status badge for catalog fetch states.
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "loaded" => style(status).green().to_string(),
        "loading" => style(status).yellow().to_string(),
        "failed" => style(status).red().to_string(),
        "not-started" => style(status).dim().to_string(),
        _ => status.to_string(),
    }
}

/// Cut `text` to at most `width` characters, marking the cut with `…`.
pub fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let kept: String = text.chars().take(width.saturating_sub(1)).collect();
    format!("{}…", kept)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Apple iPhone13", 20), "Apple iPhone13");
        assert_eq!(truncate("Apple iPhone13", 8), "Apple i…");
        assert_eq!(truncate("", 0), "");
    }

    #[test]
    fn test_status_badge_keeps_text() {
        console::set_colors_enabled(false);
        assert_eq!(status_badge("failed"), "failed");
        assert_eq!(status_badge("unknown"), "unknown");
    }
}
