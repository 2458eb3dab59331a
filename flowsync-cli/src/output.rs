//! Output formatting for CLI

use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use comfy_table::{modifiers::UTF8_ROUND_CORNERS, presets::UTF8_FULL, Cell, Color, Table};
use flowsync_core::PaginationInfo;
use flowsync_query::{Notification, NotificationKind, NotificationSink};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::time::Duration;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, Default, ValueEnum, PartialEq, Eq)]
pub enum OutputFormat {
    /// Table format (default)
    #[default]
    Table,
    /// JSON format
    Json,
    /// YAML format
    Yaml,
    /// Compact format (single line per item)
    Compact,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Table => write!(f, "table"),
            Self::Json => write!(f, "json"),
            Self::Yaml => write!(f, "yaml"),
            Self::Compact => write!(f, "compact"),
        }
    }
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        <Self as ValueEnum>::from_str(s, true)
    }
}

/// One page of a board, as written in JSON and YAML output.
#[derive(Debug, Serialize)]
struct PageOutput<'a, T> {
    items: &'a [T],
    pagination: Option<&'a PaginationInfo>,
}

/// Output writer that handles different formats
pub struct OutputWriter {
    format: OutputFormat,
}

impl OutputWriter {
    /// Create a new output writer
    pub fn new(format: OutputFormat, color: bool) -> Self {
        if !color {
            colored::control::set_override(false);
        }
        Self { format }
    }

    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Write a single item
    pub fn write<T: Serialize + TableDisplay>(&self, item: &T) -> Result<()> {
        match self.format {
            OutputFormat::Table => item.display_single(),
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(item)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(item)?),
            OutputFormat::Compact => item.display_compact(),
        }
        Ok(())
    }

    /// Write one page of a board with its pagination footer
    pub fn write_page<T: Serialize + TableDisplay>(
        &self,
        items: &[T],
        pagination: Option<&PaginationInfo>,
        headers: &[&str],
    ) -> Result<()> {
        let page = PageOutput { items, pagination };

        match self.format {
            OutputFormat::Table => {
                if items.is_empty() {
                    println!("{}", "No items found.".dimmed());
                } else {
                    let mut table = Table::new();
                    table.load_preset(UTF8_FULL);
                    table.apply_modifier(UTF8_ROUND_CORNERS);
                    table.set_header(
                        headers
                            .iter()
                            .map(|h| Cell::new(h).fg(Color::Cyan))
                            .collect::<Vec<_>>(),
                    );
                    for item in items {
                        table.add_row(item.to_row());
                    }
                    println!("{table}");
                }
                println!("\n{}", pagination_footer(items.len(), pagination));
            }
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&page)?),
            OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&page)?),
            OutputFormat::Compact => {
                for item in items {
                    item.display_compact();
                }
            }
        }
        Ok(())
    }

    /// Write a success message
    pub fn success(&self, message: &str) {
        if self.format == OutputFormat::Table {
            println!("{} {}", "✓".green(), message);
        } else {
            eprintln!("{}", message);
        }
    }

    /// Write an error message
    pub fn error(&self, message: &str) {
        if self.format == OutputFormat::Table {
            eprintln!("{} {}", "✗".red(), message);
        } else {
            eprintln!("Error: {}", message);
        }
    }

    /// Write an info message
    pub fn info(&self, message: &str) {
        if self.format == OutputFormat::Table {
            println!("{} {}", "ℹ".blue(), message);
        } else {
            eprintln!("{}", message);
        }
    }

    /// Start a spinner for long operations
    pub fn spinner(&self, message: &str) -> Option<ProgressBar> {
        if self.format != OutputFormat::Table {
            return None;
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::with_template("{spinner:.green} {msg}") {
            pb.set_style(style);
        }
        pb.set_message(message.to_string());
        pb.enable_steady_tick(Duration::from_millis(100));
        Some(pb)
    }
}

/// "Page 2 of 10 (95 items)", or just the item count when the server sent no metadata.
pub fn pagination_footer(shown: usize, pagination: Option<&PaginationInfo>) -> String {
    match pagination {
        Some(p) => {
            let mut footer = format!(
                "{} {} of {} ({} item(s))",
                "Page".bold(),
                p.current_page.to_string().green(),
                p.total_pages.max(1),
                p.total_count
            );
            if !p.is_in_range() {
                footer.push_str(&format!(" - last page is {}", p.clamp_page()));
            }
            footer
        }
        None => format!("{} {} item(s)", "Shown:".bold(), shown.to_string().green()),
    }
}

/// Trait for displaying items in a table
pub trait TableDisplay {
    /// Convert item to a table row
    fn to_row(&self) -> Vec<Cell>;

    /// Display a single item in detail
    fn display_single(&self);

    /// Display in compact format
    fn display_compact(&self);
}

/// Print a key-value pair in detail format
pub fn print_field(key: &str, value: &str) {
    println!("  {}: {}", key.cyan(), value);
}

/// Print an optional key-value pair
pub fn print_optional_field(key: &str, value: Option<&str>) {
    if let Some(v) = value {
        print_field(key, v);
    }
}

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", title.bold().underline());
}

/// Status badge with color
pub fn status_badge(status: &str) -> String {
    match status.to_lowercase().as_str() {
        "in_progress" | "in progress" | "active" => status.blue().to_string(),
        "completed" | "delivered" => status.green().to_string(),
        "paused" | "maintenance" | "contract" => status.yellow().to_string(),
        "deleted" | "inactive" | "withdrawn" => status.dimmed().to_string(),
        _ => status.to_string(),
    }
}

/// Prints engine notifications to stderr so stdout stays machine-readable.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleSink;

impl ConsoleSink {
    pub fn render(notification: &Notification) -> String {
        match notification.kind {
            NotificationKind::Success => format!(
                "{} {}: {}",
                "✓".green(),
                notification.title.bold(),
                notification.description
            ),
            NotificationKind::Error => format!(
                "{} {}: {}",
                "✗".red(),
                notification.title.bold(),
                notification.description
            ),
        }
    }
}

impl NotificationSink for ConsoleSink {
    fn show(&self, notification: Notification) {
        eprintln!("{}", Self::render(&notification));
    }
}
