use chrono::{DateTime, Utc};
use serde::Serialize;
use snippetbox_storage::Snippet;

use crate::cli::OutputFormat;

const TITLE_WIDTH: usize = 40;

/// Trait for types that can be displayed in table format
pub trait TableDisplay {
    fn headers() -> Vec<&'static str>;
    fn row(&self) -> Vec<String>;
}

impl TableDisplay for Snippet {
    fn headers() -> Vec<&'static str> {
        vec!["ID", "TITLE", "CREATED", "EXPIRES"]
    }

    fn row(&self) -> Vec<String> {
        vec![
            self.id.to_string(),
            truncate(&self.title, TITLE_WIDTH),
            format_time(&self.created),
            format_time(&self.expires),
        ]
    }
}

fn format_time(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Truncate on a char boundary, marking the cut with "..."
fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        return s.to_string();
    }
    let kept: String = s.chars().take(max_chars.saturating_sub(3)).collect();
    format!("{}...", kept)
}

/// Print items in the specified format
pub fn print_items<T>(items: &[T], format: OutputFormat)
where
    T: TableDisplay + Serialize,
{
    match format {
        OutputFormat::Table => print_table(items),
        OutputFormat::Json => print_json(items),
    }
}

/// Print one snippet including its content
pub fn print_snippet(snippet: &Snippet, format: OutputFormat) {
    match format {
        OutputFormat::Table => {
            print_table(std::slice::from_ref(snippet));
            println!();
            println!("{}", snippet.content);
        }
        OutputFormat::Json => match serde_json::to_string_pretty(snippet) {
            Ok(json) => println!("{}", json),
            Err(e) => eprintln!("Error serializing to JSON: {}", e),
        },
    }
}

fn print_table<T: TableDisplay>(items: &[T]) {
    if items.is_empty() {
        return;
    }
    for line in render_table(items) {
        println!("{}", line);
    }
}

fn render_table<T: TableDisplay>(items: &[T]) -> Vec<String> {
    let headers = T::headers();
    let rows: Vec<Vec<String>> = items.iter().map(|i| i.row()).collect();

    // Column widths in chars, not bytes
    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in &rows {
        for (i, cell) in row.iter().enumerate() {
            if i < widths.len() {
                widths[i] = widths[i].max(cell.chars().count());
            }
        }
    }

    let render_row = |cells: Vec<String>| -> String {
        cells
            .iter()
            .enumerate()
            .map(|(i, cell)| {
                let width = widths.get(i).copied().unwrap_or(0);
                format!("{:width$}", cell, width = width)
            })
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut lines = Vec::with_capacity(rows.len() + 1);
    lines.push(render_row(headers.iter().map(|h| h.to_string()).collect()));
    for row in rows {
        lines.push(render_row(row));
    }
    lines
}

fn print_json<T: Serialize>(items: &[T]) {
    match serde_json::to_string_pretty(items) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Error serializing to JSON: {}", e),
    }
}
