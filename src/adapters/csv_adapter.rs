//! CSV file source adapter.

use crate::domain::error::SlippageLabError;
use crate::ports::trade_source_port::TradeSourcePort;
use std::fs;
use std::path::PathBuf;

pub struct CsvFileAdapter {
    path: PathBuf,
    max_bytes: u64,
}

impl CsvFileAdapter {
    pub fn new(path: PathBuf, max_bytes: u64) -> Self {
        Self { path, max_bytes }
    }

    fn read_error(&self, reason: impl std::fmt::Display) -> SlippageLabError {
        SlippageLabError::Read {
            path: self.path.display().to_string(),
            reason: reason.to_string(),
        }
    }
}

impl TradeSourcePort for CsvFileAdapter {
    fn name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.path.display().to_string())
    }

    fn read_content(&self) -> Result<String, SlippageLabError> {
        let meta = fs::metadata(&self.path).map_err(|e| self.read_error(e))?;
        if !meta.is_file() {
            return Err(self.read_error("not a regular file"));
        }
        if meta.len() > self.max_bytes {
            return Err(SlippageLabError::TooLarge {
                path: self.path.display().to_string(),
                size: meta.len(),
                limit: self.max_bytes,
            });
        }

        let bytes = fs::read(&self.path).map_err(|e| self.read_error(e))?;
        String::from_utf8(bytes).map_err(|_| self.read_error("file is not valid UTF-8"))
    }
}
