//! Delimited-text reader for the raw catalog dump.
//!
//! The dump is a comma-delimited file with a header row; cells may be quoted
//! to carry embedded commas, newlines, and doubled quotes. This is the data
//! source collaborator: it only produces raw field mappings, all typing
//! happens in [`Catalog::build`](super::Catalog::build).

use super::RawRow;
use anyhow::{bail, Result};

/// Parses delimited text into one [`RawRow`] per data line, keyed by the
/// header names.
pub fn parse_delimited(text: &str) -> Result<Vec<RawRow>> {
    let mut lines = split_records(text).into_iter();
    let header = match lines.next() {
        Some(header) => header,
        None => return Ok(vec![]),
    };

    let mut rows = Vec::new();
    for (i, cells) in lines.enumerate() {
        if cells.len() != header.len() {
            bail!(
                "row {}: expected {} fields, got {}",
                i + 1,
                header.len(),
                cells.len()
            );
        }
        rows.push(header.iter().cloned().zip(cells).collect());
    }
    Ok(rows)
}

/// Splits the whole text into records of cells, honoring quoting. A record
/// ends at a newline outside quotes; a `""` inside a quoted cell is a literal
/// quote.
fn split_records(text: &str) -> Vec<Vec<String>> {
    let mut records: Vec<Vec<String>> = Vec::new();
    let mut cells: Vec<String> = Vec::new();
    let mut cell = String::new();
    let mut in_quotes = false;
    let mut saw_any = false;

    let mut chars = text.chars().peekable();
    while let Some(c) = chars.next() {
        if in_quotes {
            match c {
                '"' if chars.peek() == Some(&'"') => {
                    chars.next();
                    cell.push('"');
                }
                '"' => in_quotes = false,
                _ => cell.push(c),
            }
            continue;
        }
        match c {
            '"' => {
                in_quotes = true;
                saw_any = true;
            }
            ',' => {
                cells.push(std::mem::take(&mut cell));
                saw_any = true;
            }
            '\r' => {}
            '\n' => {
                if saw_any || !cell.is_empty() {
                    cells.push(std::mem::take(&mut cell));
                    records.push(std::mem::take(&mut cells));
                }
                saw_any = false;
            }
            _ => {
                cell.push(c);
                saw_any = true;
            }
        }
    }
    // Final record without a trailing newline.
    if saw_any || !cell.is_empty() {
        cells.push(cell);
        records.push(cells);
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_header_and_rows() {
        let rows = parse_delimited("id,title\ns1,Alpha\ns2,Beta\n").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0]["id"], "s1");
        assert_eq!(rows[1]["title"], "Beta");
    }

    #[test]
    fn quoted_cells_keep_commas_and_quotes() {
        let rows = parse_delimited("id,cast\ns1,\"Kim, Lia\"\ns2,\"the \"\"duo\"\"\"\n").unwrap();
        assert_eq!(rows[0]["cast"], "Kim, Lia");
        assert_eq!(rows[1]["cast"], "the \"duo\"");
    }

    #[test]
    fn quoted_cells_keep_newlines() {
        let rows = parse_delimited("id,description\ns1,\"line one\nline two\"\n").unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0]["description"], "line one\nline two");
    }

    #[test]
    fn handles_crlf_and_missing_final_newline() {
        let rows = parse_delimited("id,title\r\ns1,Alpha\r\ns2,Beta").unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1]["id"], "s2");
    }

    #[test]
    fn empty_trailing_cell_is_kept() {
        let rows = parse_delimited("id,title,rating\ns1,Alpha,\n").unwrap();
        assert_eq!(rows[0]["rating"], "");
    }

    #[test]
    fn field_count_mismatch_fails() {
        let err = parse_delimited("id,title\ns1,Alpha,extra\n").unwrap_err();
        assert!(err.to_string().contains("expected 2 fields"));
    }

    #[test]
    fn empty_input_yields_no_rows() {
        assert!(parse_delimited("").unwrap().is_empty());
        assert!(parse_delimited("id,title\n").unwrap().is_empty());
    }
}
