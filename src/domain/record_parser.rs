//! Trade file parser.
//!
//! The first non-blank line is the header; the columns `symbol`, `qty`,
//! `price` and `slippage` are located by case-insensitive name, in any
//! order. Every later line is split on commas with no quoting. Rows whose
//! value count differs from the header's are skipped.

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::debug;

use crate::domain::error::SlippageLabError;
use crate::domain::trade_record::TradeRecord;

/// Header positions of the recognized columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ColumnIndex {
    pub symbol: Option<usize>,
    pub qty: Option<usize>,
    pub price: Option<usize>,
    pub slippage: Option<usize>,
    pub width: usize,
}

impl ColumnIndex {
    pub fn from_header(header: &StringRecord) -> Self {
        let names: Vec<String> = header.iter().map(|h| h.trim().to_lowercase()).collect();
        let find = |name: &str| names.iter().position(|h| h == name);
        Self {
            symbol: find("symbol"),
            qty: find("qty"),
            price: find("price"),
            slippage: find("slippage"),
            width: names.len(),
        }
    }

    /// Columns the header does not provide.
    pub fn missing(&self) -> Vec<&'static str> {
        [
            ("symbol", self.symbol),
            ("qty", self.qty),
            ("price", self.price),
            ("slippage", self.slippage),
        ]
        .into_iter()
        .filter(|(_, idx)| idx.is_none())
        .map(|(name, _)| name)
        .collect()
    }
}

/// Parse raw file content into records, preserving input row order.
pub fn parse(content: &str) -> Result<Vec<TradeRecord>, SlippageLabError> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .trim(Trim::All)
        .from_reader(content.as_bytes());

    let header = rdr.headers().map_err(csv_error)?.clone();
    if header.is_empty() {
        return Ok(Vec::new());
    }
    let columns = ColumnIndex::from_header(&header);
    let missing = columns.missing();
    if !missing.is_empty() {
        debug!(?missing, "header lacks recognized columns");
    }

    let mut records = Vec::new();
    let mut skipped = 0usize;

    for result in rdr.records() {
        let row = result.map_err(csv_error)?;
        let line = row.position().map(|p| p.line() as usize).unwrap_or(0);

        if row.len() != columns.width {
            debug!(line, values = row.len(), expected = columns.width, "skipping row");
            skipped += 1;
            continue;
        }

        records.push(build_record(&row, &columns, line));
    }

    debug!(records = records.len(), skipped, "parsed trade file");
    Ok(records)
}

fn build_record(row: &StringRecord, columns: &ColumnIndex, line: usize) -> TradeRecord {
    let cell = |idx: Option<usize>| idx.and_then(|i| row.get(i)).map(str::to_string);

    TradeRecord {
        line,
        symbol: cell(columns.symbol),
        quantity: columns
            .qty
            .and_then(|i| row.get(i))
            .and_then(parse_quantity),
        price: cell(columns.price),
        slippage: cell(columns.slippage),
    }
}

/// Leading integer of `value`: optional sign then digits, rest ignored.
/// `100.0` reads as 100; `abc` and a bare sign read as absent.
pub fn parse_quantity(value: &str) -> Option<i64> {
    let value = value.trim_start();
    let sign_len = usize::from(value.starts_with(['+', '-']));
    let digits = value[sign_len..]
        .find(|c: char| !c.is_ascii_digit())
        .map_or(value.len(), |end| sign_len + end);
    if digits == sign_len {
        return None;
    }
    value[..digits].parse().ok()
}

fn csv_error(err: csv::Error) -> SlippageLabError {
    SlippageLabError::Read {
        path: "<input>".to_string(),
        reason: format!("CSV parse error: {}", err),
    }
}
