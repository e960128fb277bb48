//! Table observer for pretty-printing aggregation results.
//!
//! This module provides [`TableObserver`], which renders a [`CountMap`] or a
//! [`LayoutReport`] as a formatted ASCII table using the `tabled` crate.
//!
//! # Feature Flag
//!
//! This module requires the `table` feature:
//!
//! ```toml
//! [dependencies]
//! cachelayout = { version = "0.1", features = ["table"] }
//! ```
//!
//! # Examples
//!
//! ```rust,ignore
//! use cachelayout::count::country_count;
//! use cachelayout::observers::table::{TableObserver, TableStyle};
//!
//! let counts = country_count(&users);
//! let observer = TableObserver::new().with_style(TableStyle::Rounded).with_total(true);
//! println!("{}", observer.render(&counts));
//! // ╭─────────┬────────╮
//! // │ Country │ Active │
//! // ├─────────┼────────┤
//! // │ AD      │ 2000   │
//! // │ BB      │ 2000   │
//! // │ CA      │ 2000   │
//! // │ DK      │ 2000   │
//! // ╰─────────┴────────╯
//! // Total active: 8000
//! ```

use std::io::Write;

use tabled::{settings::Style, Table, Tabled};

use crate::count::CountMap;
use crate::layout::LayoutReport;
use crate::observers::Result;

/// Available table styles for rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TableStyle {
    /// ASCII table with simple characters: +, -, |
    Ascii,
    /// Modern rounded corners (default)
    #[default]
    Rounded,
    /// Sharp corners with box-drawing characters
    Sharp,
    /// Modern style with clean lines
    Modern,
    /// GitHub-flavored Markdown table
    Markdown,
    /// Dots for borders
    Dots,
    /// No borders, just spacing
    Blank,
}

/// Configuration for the table observer.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// The style to use for rendering.
    pub style: TableStyle,
    /// Whether to show the header row.
    pub show_header: bool,
    /// Custom title for the table (optional).
    pub title: Option<String>,
    /// Whether to print a `Total active: N` line below count tables.
    pub show_total: bool,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            style: TableStyle::default(),
            show_header: true,
            title: None,
            show_total: false,
        }
    }
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Country")]
    country: String,
    #[tabled(rename = "Active")]
    count: u64,
}

#[derive(Tabled)]
struct LayoutRow {
    #[tabled(rename = "Record")]
    name: String,
    #[tabled(rename = "Icon")]
    kind: String,
    #[tabled(rename = "Size (B)")]
    size: usize,
    #[tabled(rename = "Align")]
    align: usize,
    #[tabled(rename = "Lines/record")]
    lines: usize,
    #[tabled(rename = "Scan (B)")]
    scan_bytes: String,
    #[tabled(rename = "Scan lines")]
    scan_lines: String,
}

/// An observer that renders aggregation results as a formatted table.
///
/// # Examples
///
/// ```rust,ignore
/// use cachelayout::layout::LayoutReport;
/// use cachelayout::observers::table::{TableObserver, TableStyle};
///
/// let observer = TableObserver::new()
///     .with_style(TableStyle::Markdown)
///     .with_title("Record layouts");
/// println!("{}", observer.render_layout(&LayoutReport::for_records(10_000)));
/// ```
#[derive(Debug, Clone, Default)]
pub struct TableObserver {
    config: TableConfig,
}

impl TableObserver {
    /// Creates a new table observer with default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new table observer with the specified configuration.
    pub fn with_config(config: TableConfig) -> Self {
        Self { config }
    }

    /// Sets the table style.
    pub fn with_style(mut self, style: TableStyle) -> Self {
        self.config.style = style;
        self
    }

    /// Sets whether to show the header row.
    pub fn with_header(mut self, show: bool) -> Self {
        self.config.show_header = show;
        self
    }

    /// Sets an optional title for the table.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.config.title = Some(title.into());
        self
    }

    /// Sets whether count tables are followed by a `Total active: N` line.
    pub fn with_total(mut self, show: bool) -> Self {
        self.config.show_total = show;
        self
    }

    /// Returns the current configuration.
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    fn apply_style(&self, table: &mut Table) {
        match self.config.style {
            TableStyle::Ascii => {
                table.with(Style::ascii());
            }
            TableStyle::Rounded => {
                table.with(Style::rounded());
            }
            TableStyle::Sharp => {
                table.with(Style::sharp());
            }
            TableStyle::Modern => {
                table.with(Style::modern());
            }
            TableStyle::Markdown => {
                table.with(Style::markdown());
            }
            TableStyle::Dots => {
                table.with(Style::dots());
            }
            TableStyle::Blank => {
                table.with(Style::blank());
            }
        }
    }

    fn finish(&self, mut table: Table) -> String {
        self.apply_style(&mut table);

        if !self.config.show_header {
            table.with(tabled::settings::Remove::row(
                tabled::settings::object::Rows::first(),
            ));
        }

        if let Some(ref title) = self.config.title {
            format!("{}\n{}", title, table)
        } else {
            table.to_string()
        }
    }

    /// Renders per-country counts, sorted by country.
    pub fn render(&self, counts: &CountMap) -> String {
        // labels are printed verbatim: any string is a valid country
        let rows: Vec<CountRow> = counts
            .sorted()
            .into_iter()
            .map(|(country, count)| CountRow {
                country: country.to_string(),
                count,
            })
            .collect();

        let table = self.finish(Table::new(&rows));
        if self.config.show_total {
            format!("{}\nTotal active: {}", table, counts.total())
        } else {
            table
        }
    }

    /// Renders a layout comparison.
    pub fn render_layout(&self, report: &LayoutReport) -> String {
        let rows: Vec<LayoutRow> = report
            .entries
            .iter()
            .map(|e| LayoutRow {
                name: e.layout.name.clone(),
                kind: e.kind.to_string(),
                size: e.layout.size,
                align: e.layout.align,
                lines: e.layout.cache_lines,
                scan_bytes: e.scan.map(|s| s.bytes.to_string()).unwrap_or_default(),
                scan_lines: e.scan.map(|s| s.cache_lines.to_string()).unwrap_or_default(),
            })
            .collect();

        self.finish(Table::new(&rows))
    }

    /// Renders `counts` to `writer`, followed by a newline.
    pub fn write_to<W: Write>(&self, counts: &CountMap, mut writer: W) -> Result<()> {
        writeln!(writer, "{}", self.render(counts))?;
        Ok(())
    }
}
