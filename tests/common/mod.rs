#![allow(dead_code)]

use slippagelab::domain::error::SlippageLabError;
use slippagelab::ports::trade_source_port::TradeSourcePort;
use std::io::Write;

pub const HEADER: &str = "symbol,qty,price,slippage";

/// In-memory trade source returning fixed content or a fixed failure.
pub struct MockTradeSource {
    pub name: String,
    pub content: Option<String>,
    pub error: Option<String>,
}

impl MockTradeSource {
    pub fn with_content(content: &str) -> Self {
        Self {
            name: "mock.csv".to_string(),
            content: Some(content.to_string()),
            error: None,
        }
    }

    pub fn with_error(reason: &str) -> Self {
        Self {
            name: "mock.csv".to_string(),
            content: None,
            error: Some(reason.to_string()),
        }
    }
}

impl TradeSourcePort for MockTradeSource {
    fn name(&self) -> String {
        self.name.clone()
    }

    fn read_content(&self) -> Result<String, SlippageLabError> {
        if let Some(reason) = &self.error {
            return Err(SlippageLabError::Read {
                path: self.name.clone(),
                reason: reason.clone(),
            });
        }
        Ok(self.content.clone().unwrap_or_default())
    }
}

/// Build a CSV body with the standard header.
pub fn csv(rows: &[&str]) -> String {
    let mut out = String::from(HEADER);
    for row in rows {
        out.push('\n');
        out.push_str(row);
    }
    out.push('\n');
    out
}

pub fn write_temp_file(suffix: &str, content: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
    file.write_all(content.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

pub fn write_temp_ini(content: &str) -> tempfile::NamedTempFile {
    write_temp_file(".ini", content)
}

pub fn write_temp_csv(content: &str) -> tempfile::NamedTempFile {
    write_temp_file(".csv", content)
}
