//! JSON report adapter implementing ReportPort.

use serde::Serialize;
use std::fs;

use crate::domain::error::SlippageLabError;
use crate::domain::explorer::{self, ExplorerMonth, ExplorerSavings, SliderParameters};
use crate::domain::savings::UploadAnalysis;
use crate::ports::report_port::ReportPort;

#[derive(Serialize)]
struct AnalysisDocument<'a> {
    source: &'a str,
    currency: &'a str,
    #[serde(flatten)]
    analysis: &'a UploadAnalysis,
}

#[derive(Serialize)]
struct ExplorerDocument<'a> {
    currency: &'a str,
    inputs: &'a SliderParameters,
    #[serde(flatten)]
    savings: &'a ExplorerSavings,
    comparison: Vec<ExplorerMonth>,
}

pub struct JsonReportAdapter {
    currency: String,
}

impl JsonReportAdapter {
    pub fn new(currency: impl Into<String>) -> Self {
        Self {
            currency: currency.into(),
        }
    }

    pub fn analysis_json(
        &self,
        analysis: &UploadAnalysis,
        source: &str,
    ) -> Result<String, SlippageLabError> {
        to_json(&AnalysisDocument {
            source,
            currency: &self.currency,
            analysis,
        })
    }

    pub fn explorer_json(
        &self,
        params: &SliderParameters,
        savings: &ExplorerSavings,
    ) -> Result<String, SlippageLabError> {
        to_json(&ExplorerDocument {
            currency: &self.currency,
            inputs: params,
            savings,
            comparison: explorer::monthly_comparison(savings),
        })
    }
}

fn to_json<T: Serialize>(doc: &T) -> Result<String, SlippageLabError> {
    serde_json::to_string_pretty(doc).map_err(|e| SlippageLabError::Report {
        reason: format!("failed to serialize report: {}", e),
    })
}

fn write_output(output_path: &str, content: &str) -> Result<(), SlippageLabError> {
    fs::write(output_path, content).map_err(|e| SlippageLabError::Report {
        reason: format!("failed to write {}: {}", output_path, e),
    })
}

impl ReportPort for JsonReportAdapter {
    fn write_analysis(
        &self,
        analysis: &UploadAnalysis,
        source: &str,
        output_path: &str,
    ) -> Result<(), SlippageLabError> {
        write_output(output_path, &self.analysis_json(analysis, source)?)
    }

    fn write_explorer(
        &self,
        params: &SliderParameters,
        savings: &ExplorerSavings,
        output_path: &str,
    ) -> Result<(), SlippageLabError> {
        write_output(output_path, &self.explorer_json(params, savings)?)
    }
}
