//! Upload page session.
//!
//! Each read gets a ticket. Starting a new read supersedes the one in
//! flight: only the outcome carrying the latest ticket is applied, so a
//! slow first file can never overwrite a second one dropped after it.
//! A failed read clears any previous analysis.

use tracing::{debug, warn};

use crate::domain::app_state::AppState;
use crate::domain::error::SlippageLabError;
use crate::domain::record_parser;
use crate::domain::savings::UploadAnalysis;
use crate::domain::trade_record::TradeRecord;

/// Message shown for any failed upload.
pub const PROCESSING_ERROR: &str = "error processing file";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct ReadTicket(u64);

#[derive(Debug, Clone, PartialEq)]
pub enum SessionState {
    Idle,
    Reading { ticket: ReadTicket },
    Ready {
        records: Vec<TradeRecord>,
        analysis: UploadAnalysis,
    },
    Failed { message: String },
}

#[derive(Debug)]
pub struct UploadSession {
    state: SessionState,
    latest: u64,
}

impl Default for UploadSession {
    fn default() -> Self {
        Self::new()
    }
}

impl UploadSession {
    pub fn new() -> Self {
        Self {
            state: SessionState::Idle,
            latest: 0,
        }
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn is_busy(&self) -> bool {
        matches!(self.state, SessionState::Reading { .. })
    }

    pub fn analysis(&self) -> Option<&UploadAnalysis> {
        match &self.state {
            SessionState::Ready { analysis, .. } => Some(analysis),
            _ => None,
        }
    }

    pub fn records(&self) -> Option<&[TradeRecord]> {
        match &self.state {
            SessionState::Ready { records, .. } => Some(records),
            _ => None,
        }
    }

    /// Start a read, superseding any read still in flight.
    pub fn begin_read(&mut self) -> ReadTicket {
        if let SessionState::Reading { ticket } = self.state {
            debug!(?ticket, "superseding in-flight read");
        }
        self.latest += 1;
        let ticket = ReadTicket(self.latest);
        self.state = SessionState::Reading { ticket };
        ticket
    }

    /// Apply a finished read. Returns false when `ticket` is stale and the
    /// outcome was discarded.
    pub fn complete(
        &mut self,
        ticket: ReadTicket,
        outcome: Result<String, SlippageLabError>,
        app: &mut AppState,
    ) -> bool {
        if ticket.0 != self.latest || !self.is_busy() {
            debug!(?ticket, latest = self.latest, "discarding stale read");
            return false;
        }

        match outcome.and_then(|content| record_parser::parse(&content)) {
            Ok(records) => {
                let analysis = UploadAnalysis::compute(&records);
                debug!(
                    total = analysis.total_count,
                    valid = analysis.valid_count,
                    "upload analysed"
                );
                self.state = SessionState::Ready { records, analysis };
                app.set_has_upload(true);
            }
            Err(e) => {
                warn!(error = %e, "upload failed");
                self.state = SessionState::Failed {
                    message: PROCESSING_ERROR.to_string(),
                };
                app.set_has_upload(false);
            }
        }
        true
    }

    /// Drop results and return to idle; an in-flight read becomes stale.
    pub fn reset(&mut self, app: &mut AppState) {
        self.latest += 1;
        self.state = SessionState::Idle;
        app.set_has_upload(false);
    }
}
