//! Plain-text rendering of derived views for the CLI binaries.
//!
//! Everything here takes the core's plain data structures and produces
//! strings; nothing in the core modules formats text.

use crate::catalog::ContentRecord;
use crate::stats::{CrossTab, DurationStats, UNKNOWN};
use std::collections::BTreeMap;
use std::fmt::Display;
use std::fmt::Write;

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

fn two_column(title: &str, rows: &[(String, usize)]) -> String {
    let width = rows.iter().map(|(label, _)| label.len()).max().unwrap_or(0);
    let mut out = format!("{title}\n");
    for (label, count) in rows {
        let _ = writeln!(out, "{label:<width$}  {count}");
    }
    out
}

/// Full breakdown in key order.
pub fn count_table<K: Display>(title: &str, counts: &BTreeMap<K, usize>) -> String {
    let rows: Vec<(String, usize)> = counts.iter().map(|(k, v)| (k.to_string(), *v)).collect();
    two_column(title, &rows)
}

/// The first `n` entries of a ranked breakdown.
pub fn top_table<K: Display>(title: &str, ranked: &[(K, usize)], n: usize) -> String {
    let rows: Vec<(String, usize)> = ranked
        .iter()
        .take(n)
        .map(|(k, v)| (k.to_string(), *v))
        .collect();
    two_column(title, &rows)
}

/// Pivot table over all columns of the cross-tab.
pub fn pivot_table<R, C>(title: &str, tab: &CrossTab<R, C>) -> String
where
    R: Ord + Clone + Display,
    C: Ord + Clone + Display,
{
    let cols: Vec<C> = tab.cols().into_iter().collect();
    pivot_table_with_cols(title, tab, &cols)
}

/// Pivot table restricted to the given columns (rows stay complete; missing
/// cells render as zero).
pub fn pivot_table_with_cols<R, C>(title: &str, tab: &CrossTab<R, C>, cols: &[C]) -> String
where
    R: Ord + Clone + Display,
    C: Ord + Clone + Display,
{
    let rows: Vec<R> = tab.rows().into_iter().collect();
    let row_labels: Vec<String> = rows.iter().map(|r| r.to_string()).collect();
    let row_width = row_labels.iter().map(String::len).max().unwrap_or(0);
    let col_labels: Vec<String> = cols.iter().map(|c| c.to_string()).collect();
    let col_widths: Vec<usize> = col_labels.iter().map(|l| l.len().max(5)).collect();

    let mut out = format!("{title}\n");
    let mut header = format!("{:<row_width$}", "");
    for (label, width) in col_labels.iter().zip(&col_widths) {
        let _ = write!(header, "  {label:>width$}");
    }
    out.push_str(header.trim_end());
    out.push('\n');

    for (row, label) in rows.iter().zip(&row_labels) {
        let _ = write!(out, "{label:<row_width$}");
        for (col, width) in cols.iter().zip(&col_widths) {
            let count = tab.get(row, col);
            let _ = write!(out, "  {count:>width$}");
        }
        out.push('\n');
    }
    out
}

pub fn duration_summary(label: &str, unit: &str, stats: &DurationStats) -> String {
    format!(
        "{label}: min {} {unit}, max {} {unit}, mean {:.1} {unit}, median {:.1} {unit}",
        stats.min, stats.max, stats.mean, stats.median
    )
}

fn preview(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        text.to_owned()
    } else {
        let cut: String = text.chars().take(max_chars).collect();
        format!("{cut}...")
    }
}

/// One numbered search/recommendation result, in the shape the dashboard
/// prints.
pub fn record_block(index: usize, record: &ContentRecord) -> String {
    let genres = if record.genres.is_empty() {
        UNKNOWN.to_owned()
    } else {
        record.genres.join(", ")
    };
    let rating = record.rating.as_deref().unwrap_or(UNKNOWN);
    let mut out = format!(
        "{index}. {} ({})\n   Type: {}\n   Genres: {genres}\n   Rating: {rating}",
        record.title, record.release_year, record.content_type
    );
    if let Some(description) = &record.description {
        let _ = write!(
            out,
            "\n   {}",
            preview(description, DESCRIPTION_PREVIEW_CHARS)
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, RawRow};
    use crate::stats;

    fn row(pairs: &[(&str, &str)]) -> RawRow {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    fn sample_catalog() -> Catalog {
        Catalog::build(vec![
            row(&[
                ("show_id", "s1"),
                ("type", "Movie"),
                ("title", "Alpha"),
                ("release_year", "2019"),
                ("listed_in", "Drama"),
            ]),
            row(&[
                ("show_id", "s2"),
                ("type", "TV Show"),
                ("title", "Beta"),
                ("release_year", "2020"),
                ("listed_in", "Comedy"),
            ]),
        ])
        .unwrap()
    }

    #[test]
    fn count_table_lists_keys_in_order() {
        let counts = stats::count_by_year(&sample_catalog());
        let table = count_table("By year", &counts);
        let lines: Vec<&str> = table.lines().collect();
        assert_eq!(lines[0], "By year");
        assert!(lines[1].starts_with("2019"));
        assert!(lines[2].starts_with("2020"));
    }

    #[test]
    fn pivot_table_renders_zero_cells() {
        let tab = stats::type_by_year(&sample_catalog());
        let table = pivot_table("Types by year", &tab);
        let lines: Vec<&str> = table.lines().collect();
        assert!(lines[1].contains("Movie"));
        assert!(lines[1].contains("TV Show"));
        // 2019 has one movie and zero TV shows.
        assert!(lines[2].starts_with("2019"));
        assert!(lines[2].contains('0'));
    }

    #[test]
    fn record_block_shows_unknown_rating() {
        let catalog = sample_catalog();
        let block = record_block(1, catalog.get("s1").unwrap());
        assert!(block.starts_with("1. Alpha (2019)"));
        assert!(block.contains("Rating: Unknown"));
    }

    #[test]
    fn long_descriptions_are_previewed() {
        let text = "x".repeat(150);
        assert_eq!(preview(&text, 100).chars().count(), 103);
        assert_eq!(preview("short", 100), "short");
    }
}
