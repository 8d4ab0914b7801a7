use colored::Colorize;
use indicatif::{ProgressBar, ProgressDrawTarget, ProgressStyle};

/// Template of the batch progress bar
pub const PROGRESS_TEMPLATE: &str =
    "Puppet Progress |{bar:40.cyan}| {percent}% || {pos}/{len} Chunks";

/// Display utilities for the CLI interface
#[derive(Debug, Clone, Copy)]
pub struct DisplayHelper {
    pub use_color: bool,
    pub show_progress: bool,
}

impl DisplayHelper {
    /// Create a new DisplayHelper
    pub fn new(use_color: bool, show_progress: bool) -> Self {
        Self {
            use_color,
            show_progress,
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "✓".green().bold(), message.green());
        } else {
            println!("[SUCCESS] {}", message);
        }
    }

    /// Print an info message
    pub fn info(&self, message: &str) {
        if self.use_color {
            println!("{} {}", "::".blue().bold(), message);
        } else {
            println!("[INFO] {}", message);
        }
    }

    /// Print a section header
    pub fn section_header(&self, title: &str) {
        if self.use_color {
            println!("\n{}", title.bold().underline());
        } else {
            println!("\n=== {} ===", title);
        }
    }

    /// Create the bar used while a batch runs
    pub fn create_progress_bar(&self) -> ProgressBar {
        let pb = if self.show_progress {
            ProgressBar::new(0)
        } else {
            ProgressBar::with_draw_target(Some(0), ProgressDrawTarget::hidden())
        };

        let style = match ProgressStyle::with_template(PROGRESS_TEMPLATE) {
            Ok(style) => style.progress_chars("█░"),
            Err(e) => {
                tracing::debug!("Invalid progress template: {}", e);
                ProgressStyle::default_bar()
            }
        };
        pb.set_style(style);

        pb
    }

    /// Print a table-like structure
    pub fn print_table(&self, headers: &[&str], rows: &[Vec<String>]) {
        let lines = format_table(headers, rows);
        for (i, line) in lines.iter().enumerate() {
            if i == 0 && self.use_color {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }

    /// Print a list with bullets
    pub fn print_list(&self, items: &[&str]) {
        for item in items {
            if self.use_color {
                println!("  {} {}", "•".blue(), item);
            } else {
                println!("  - {}", item);
            }
        }
    }
}

/// Lay out a table as plain lines: header, separator, then one line per row.
///
/// Returns nothing when there are no rows.
pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> Vec<String> {
    if rows.is_empty() {
        return Vec::new();
    }

    let mut col_widths = headers
        .iter()
        .map(|h| h.chars().count())
        .collect::<Vec<_>>();
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            if i < col_widths.len() {
                col_widths[i] = col_widths[i].max(cell.chars().count());
            }
        }
    }

    let render = |cells: Vec<&str>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = col_widths.get(i).copied().unwrap_or(0);
                format!("{:<width$}", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 2);
    lines.push(render(headers.to_vec()));
    lines.push(
        col_widths
            .iter()
            .map(|w| "-".repeat(*w))
            .collect::<Vec<_>>()
            .join("  "),
    );
    for row in rows {
        lines.push(render(row.iter().map(String::as_str).collect()));
    }
    lines
}

/// Helper functions for common display patterns
pub mod helpers {
    use super::*;

    /// Create a display helper with color detection
    pub fn auto_display(no_color: bool) -> DisplayHelper {
        let use_color =
            !no_color && atty::is(atty::Stream::Stdout) && std::env::var("NO_COLOR").is_err();
        let show_progress = atty::is(atty::Stream::Stderr);
        DisplayHelper::new(use_color, show_progress)
    }
}
