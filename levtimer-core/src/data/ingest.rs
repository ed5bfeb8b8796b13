//! CSV bar ingestion.
//!
//! Turns a `date,open,high,low,close,volume`-style document into a date-sorted
//! close series. Columns are located by (case-insensitive) header name, so
//! column order is free. Rows with too few columns or a bad close are skipped;
//! a bad date fails the whole parse because ordering depends on it.

use chrono::NaiveDate;
use thiserror::Error;
use tracing::debug;

use crate::domain::Bar;

/// Date format accepted in the `date` column.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("invalid date '{value}' on line {line}")]
    InvalidDate { line: u64, value: String },
}

/// Positions of the required columns in the header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ColumnIndex {
    date: usize,
    close: usize,
}

impl ColumnIndex {
    fn locate(headers: &csv::StringRecord) -> Option<Self> {
        let find = |name: &str| {
            headers.iter().position(|h| {
                h.trim_start_matches('\u{feff}')
                    .trim()
                    .eq_ignore_ascii_case(name)
            })
        };
        Some(Self {
            date: find("date")?,
            close: find("close")?,
        })
    }

    fn width(&self) -> usize {
        self.date.max(self.close) + 1
    }
}

/// Parse CSV text into bars sorted ascending by date.
///
/// Returns an empty vector when the header lacks a `date` or `close` column.
/// Duplicate dates are kept (stable sort preserves their source order).
pub fn parse_bars(text: &str) -> Result<Vec<Bar>, ParseError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let columns = match reader.headers() {
        Ok(headers) => match ColumnIndex::locate(headers) {
            Some(columns) => columns,
            None => {
                debug!(header = ?headers, "csv header lacks date/close column");
                return Ok(Vec::new());
            }
        },
        Err(e) => {
            debug!(error = %e, "unreadable csv header");
            return Ok(Vec::new());
        }
    };

    let mut bars = Vec::new();
    for record in reader.records() {
        let record = match record {
            Ok(r) => r,
            Err(e) => {
                debug!(error = %e, "skipping unreadable csv row");
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        if record.len() < columns.width() {
            debug!(line, fields = record.len(), "skipping short row");
            continue;
        }

        let close = match record[columns.close].parse::<f64>() {
            Ok(c) if Bar::is_valid_close(c) => c,
            _ => {
                debug!(line, close = &record[columns.close], "skipping row with bad close");
                continue;
            }
        };

        let raw_date = &record[columns.date];
        let date = NaiveDate::parse_from_str(raw_date, DATE_FORMAT).map_err(|_| {
            ParseError::InvalidDate {
                line,
                value: raw_date.to_string(),
            }
        })?;

        bars.push(Bar::new(date, close));
    }

    bars.sort_by_key(|b| b.date);
    Ok(bars)
}
