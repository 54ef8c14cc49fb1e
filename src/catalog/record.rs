use crate::error::{CatalogError, CatalogResult};
use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;

/// One raw input row, keyed by the source header names. Empty cells count as
/// absent fields.
pub type RawRow = HashMap<String, String>;

/// Source format of the `date_added` column, e.g. "September 9, 2019".
const DATE_ADDED_FORMAT: &str = "%B %d, %Y";

/// Accepted range for `release_year`.
const RELEASE_YEAR_RANGE: std::ops::RangeInclusive<u16> = 1880..=2100;

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub enum ContentType {
    Movie,
    TvShow,
}

impl ContentType {
    pub fn parse(s: &str) -> Option<ContentType> {
        match s {
            "Movie" => Some(ContentType::Movie),
            "TV Show" => Some(ContentType::TvShow),
            _ => None,
        }
    }
}

impl fmt::Display for ContentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ContentType::Movie => write!(f, "Movie"),
            ContentType::TvShow => write!(f, "TV Show"),
        }
    }
}

/// Runtime of a title in its native unit. Movies are measured in minutes, TV
/// shows in seasons; the variant carries the unit so the two are never
/// compared directly.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub enum Duration {
    Minutes(u32),
    Seasons(u32),
}

impl Duration {
    pub fn value(&self) -> u32 {
        match self {
            Duration::Minutes(v) | Duration::Seasons(v) => *v,
        }
    }
}

/// One row of the catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ContentRecord {
    pub id: String,
    pub content_type: ContentType,
    pub title: String,
    pub director: Option<String>,
    pub cast: Vec<String>,
    pub countries: Vec<String>,
    pub date_added: Option<NaiveDate>,
    pub release_year: u16,
    pub rating: Option<String>,
    pub duration: Option<Duration>,
    pub genres: Vec<String>,
    pub description: Option<String>,
}

fn field<'a>(row: &'a RawRow, name: &str) -> Option<&'a str> {
    row.get(name).map(|v| v.trim()).filter(|v| !v.is_empty())
}

fn required<'a>(row: &'a RawRow, name: &'static str, row_num: usize) -> CatalogResult<&'a str> {
    field(row, name).ok_or(CatalogError::MalformedRecord {
        row: row_num,
        field: name,
        reason: "field is required".to_owned(),
    })
}

fn malformed(row_num: usize, name: &'static str, reason: String) -> CatalogError {
    CatalogError::MalformedRecord {
        row: row_num,
        field: name,
        reason,
    }
}

/// Splits a multi-valued cell ("United States, India") into trimmed parts.
fn split_list(s: &str) -> Vec<String> {
    s.split(',')
        .map(|part| part.trim().to_owned())
        .filter(|part| !part.is_empty())
        .collect()
}

/// Parses raw rows into [`ContentRecord`]s. Holds the compiled duration
/// pattern so it is built once per load, not once per row.
pub(crate) struct RowParser {
    duration_re: Regex,
}

impl RowParser {
    pub fn new() -> RowParser {
        RowParser {
            duration_re: Regex::new(r"^(\d+)\s+(min|Season|Seasons)$")
                .expect("Invalid Regex, this should be fixed at runtime."),
        }
    }

    pub fn parse(&self, row: &RawRow, row_num: usize) -> CatalogResult<ContentRecord> {
        let id = required(row, "show_id", row_num)?.to_owned();

        let type_str = required(row, "type", row_num)?;
        let content_type = ContentType::parse(type_str).ok_or_else(|| {
            malformed(
                row_num,
                "type",
                format!("unrecognized content type \"{type_str}\""),
            )
        })?;

        let title = required(row, "title", row_num)?.to_owned();

        let year_str = required(row, "release_year", row_num)?;
        let release_year: u16 = year_str
            .parse()
            .map_err(|_| malformed(row_num, "release_year", format!("not a year: \"{year_str}\"")))?;
        if !RELEASE_YEAR_RANGE.contains(&release_year) {
            return Err(malformed(
                row_num,
                "release_year",
                format!("{release_year} is outside the plausible range"),
            ));
        }

        let date_added = match field(row, "date_added") {
            None => None,
            Some(s) => Some(
                NaiveDate::parse_from_str(s, DATE_ADDED_FORMAT)
                    .map_err(|err| malformed(row_num, "date_added", err.to_string()))?,
            ),
        };

        let duration = match field(row, "duration") {
            None => None,
            Some(s) => Some(self.parse_duration(s, content_type, row_num)?),
        };

        Ok(ContentRecord {
            id,
            content_type,
            title,
            director: field(row, "director").map(str::to_owned),
            cast: field(row, "cast").map(split_list).unwrap_or_default(),
            countries: field(row, "country").map(split_list).unwrap_or_default(),
            date_added,
            release_year,
            rating: field(row, "rating").map(str::to_owned),
            duration,
            genres: field(row, "listed_in").map(split_list).unwrap_or_default(),
            description: field(row, "description").map(str::to_owned),
        })
    }

    fn parse_duration(
        &self,
        s: &str,
        content_type: ContentType,
        row_num: usize,
    ) -> CatalogResult<Duration> {
        let captures = self
            .duration_re
            .captures(s)
            .ok_or_else(|| malformed(row_num, "duration", format!("unparsable duration \"{s}\"")))?;
        let value: u32 = captures[1]
            .parse()
            .map_err(|_| malformed(row_num, "duration", format!("duration overflow in \"{s}\"")))?;

        // The unit in the cell must agree with the record's content type.
        match (&captures[2], content_type) {
            ("min", ContentType::Movie) => Ok(Duration::Minutes(value)),
            ("Season" | "Seasons", ContentType::TvShow) => Ok(Duration::Seasons(value)),
            (unit, _) => Err(malformed(
                row_num,
                "duration",
                format!("unit \"{unit}\" does not match content type {content_type}"),
            )),
        }
    }
}
