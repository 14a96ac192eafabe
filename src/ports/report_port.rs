//! Report generation port.

use crate::domain::error::SlippageLabError;
use crate::domain::explorer::{ExplorerSavings, SliderParameters};
use crate::domain::savings::UploadAnalysis;

/// Port for writing savings reports.
pub trait ReportPort {
    fn write_analysis(
        &self,
        analysis: &UploadAnalysis,
        source: &str,
        output_path: &str,
    ) -> Result<(), SlippageLabError>;

    fn write_explorer(
        &self,
        params: &SliderParameters,
        savings: &ExplorerSavings,
        output_path: &str,
    ) -> Result<(), SlippageLabError>;
}
