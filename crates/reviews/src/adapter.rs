use crate::{RawRow, ReviewBatch};
use thiserror::Error;

pub const REVIEW_COLUMN: &str = "Review";

/// One way of reading an upload as a table of reviews.
pub trait ParseStrategy: Send + Sync {
    fn name(&self) -> &'static str;
    fn parse(&self, data: &[u8]) -> Result<Vec<RawRow>, String>;
}

/// First record is a header that must name a `Review` column.
pub struct HeaderedCsv;

/// No header; the whole table is the `Review` column.
pub struct HeaderlessCsv;

impl ParseStrategy for HeaderedCsv {
    fn name(&self) -> &'static str {
        "headered"
    }

    fn parse(&self, data: &[u8]) -> Result<Vec<RawRow>, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .from_reader(data);

        let headers = reader.headers().map_err(|e| e.to_string())?.clone();
        if headers.is_empty() {
            return Err("no header row".to_string());
        }
        let column = headers
            .iter()
            .position(|h| clean_cell(h) == REVIEW_COLUMN)
            .ok_or_else(|| format!("header row has no {REVIEW_COLUMN:?} column"))?;
        let width = headers.len();
        let review_is_last = column + 1 == width;

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| e.to_string())?;
            let text = if record.len() > width {
                // extra fields can only belong to a trailing review column
                if !review_is_last {
                    let line = record.position().map_or(0, |p| p.line());
                    return Err(format!(
                        "row {line} has {} fields, header has {width}",
                        record.len()
                    ));
                }
                Some(record.iter().skip(column).collect::<Vec<_>>().join(","))
            } else if width == 1 {
                Some(rejoin(&record))
            } else {
                record.get(column).map(str::to_string)
            };
            rows.push(RawRow {
                line: record.position().map(|p| p.line()),
                text,
            });
        }
        Ok(rows)
    }
}

impl ParseStrategy for HeaderlessCsv {
    fn name(&self) -> &'static str {
        "headerless"
    }

    fn parse(&self, data: &[u8]) -> Result<Vec<RawRow>, String> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(data);

        let mut rows = Vec::new();
        for record in reader.records() {
            let record = record.map_err(|e| e.to_string())?;
            let mut text = rejoin(&record);
            if rows.is_empty() {
                text = text.trim_start_matches('\u{feff}').to_string();
            }
            rows.push(RawRow {
                line: record.position().map(|p| p.line()),
                text: Some(text),
            });
        }
        Ok(rows)
    }
}

/// A one-column row that the reader split on unquoted commas is put back together.
fn rejoin(record: &csv::StringRecord) -> String {
    record.iter().collect::<Vec<_>>().join(",")
}

fn clean_cell(cell: &str) -> &str {
    cell.trim_start_matches('\u{feff}').trim()
}

#[derive(Clone, Debug, PartialEq)]
pub struct StrategyFailure {
    pub strategy: &'static str,
    pub reason: String,
}

#[derive(Debug, Error, PartialEq)]
#[error("upload is not a readable review table ({})", describe(.attempts))]
pub struct ParseError {
    pub attempts: Vec<StrategyFailure>,
}

impl ParseError {
    /// What the user should upload instead.
    pub fn expected_format(&self) -> &'static str {
        "Expected a CSV file with a header row containing a \"Review\" column, \
         or a single column of reviews with no header."
    }
}

fn describe(attempts: &[StrategyFailure]) -> String {
    attempts
        .iter()
        .map(|a| format!("{}: {}", a.strategy, a.reason))
        .collect::<Vec<_>>()
        .join("; ")
}

#[derive(Clone, Debug, PartialEq)]
pub struct ParsedUpload {
    pub strategy: &'static str,
    pub batch: ReviewBatch,
}

/// Tries each strategy in order; the first one that succeeds wins.
pub struct TableAdapter {
    strategies: Vec<Box<dyn ParseStrategy>>,
}

impl Default for TableAdapter {
    fn default() -> Self {
        let strategies: Vec<Box<dyn ParseStrategy>> = vec![Box::new(HeaderedCsv), Box::new(HeaderlessCsv)];
        Self::new(strategies)
    }
}

impl TableAdapter {
    pub fn new(strategies: Vec<Box<dyn ParseStrategy>>) -> Self {
        Self { strategies }
    }

    pub fn parse(&self, data: &[u8]) -> Result<ParsedUpload, ParseError> {
        let mut attempts = Vec::new();
        for strategy in &self.strategies {
            match strategy.parse(data) {
                Ok(rows) => {
                    return Ok(ParsedUpload {
                        strategy: strategy.name(),
                        batch: ReviewBatch::from_rows(rows),
                    })
                }
                Err(reason) => attempts.push(StrategyFailure {
                    strategy: strategy.name(),
                    reason,
                }),
            }
        }
        Err(ParseError { attempts })
    }
}
