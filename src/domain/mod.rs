//! Core domain types and logic.

pub mod trade_record;
pub mod record_parser;
pub mod savings;
pub mod explorer;
pub mod session;
pub mod app_state;
pub mod settings;
pub mod sample;
pub mod error;
