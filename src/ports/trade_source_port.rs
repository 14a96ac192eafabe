//! Trade file source port.

use crate::domain::error::SlippageLabError;

/// Supplies the complete text of an uploaded trade file.
pub trait TradeSourcePort {
    /// Human-readable name of the source, used in messages.
    fn name(&self) -> String;

    /// Read the whole content. No partial content is ever returned.
    fn read_content(&self) -> Result<String, SlippageLabError>;
}
