//! Typst savings report generation.
//!
//! Reads a Typst template (either the built-in default or a custom file via
//! `template_path`), resolves all `{{PLACEHOLDER}}` markers using helpers
//! from `tables` and `chart`, and writes the final `.typ` file.

pub mod chart;
pub mod default_template;
pub mod tables;

use chrono::NaiveDate;
use std::fs;
use std::path::PathBuf;

use crate::domain::error::SlippageLabError;
use crate::domain::explorer::{self, ExplorerSavings, SliderParameters};
use crate::domain::savings::UploadAnalysis;
use crate::ports::report_port::ReportPort;

use chart::BarPair;

/// Context for resolving upload report placeholders.
pub struct AnalysisContext<'a> {
    pub analysis: &'a UploadAnalysis,
    pub source: &'a str,
    pub currency: &'a str,
    pub generated: NaiveDate,
}

/// Context for resolving explorer report placeholders.
pub struct ExplorerContext<'a> {
    pub params: &'a SliderParameters,
    pub savings: &'a ExplorerSavings,
    pub currency: &'a str,
    pub generated: NaiveDate,
}

pub fn resolve_analysis(template: &str, ctx: &AnalysisContext) -> String {
    let a = ctx.analysis;
    let pairs: Vec<BarPair> = a
        .comparison
        .iter()
        .map(|m| BarPair {
            label: m.month,
            manual: m.manual_loss,
            algo: m.algo_loss,
        })
        .collect();

    template
        .replace("{{GENERATED}}", &ctx.generated.format("%Y-%m-%d").to_string())
        .replace("{{SUMMARY_TABLE}}", &tables::format_summary(a, ctx.source))
        .replace("{{SLIPPAGE_BREAKDOWN}}", &tables::format_slippage_breakdown(a))
        .replace(
            "{{PROJECTIONS_TABLE}}",
            &tables::format_projections(&a.projections, ctx.currency),
        )
        .replace(
            "{{COMPARISON_CHART}}",
            &chart::format_comparison_chart(&pairs, ctx.currency),
        )
        .replace(
            "{{TRADE_TABLE}}",
            &tables::format_trade_table(&a.breakdown, ctx.currency),
        )
}

pub fn resolve_explorer(template: &str, ctx: &ExplorerContext) -> String {
    let series = explorer::monthly_comparison(ctx.savings);
    let pairs: Vec<BarPair> = series
        .iter()
        .map(|m| BarPair {
            label: m.month,
            manual: m.manual_loss,
            algo: m.algo_loss,
        })
        .collect();

    template
        .replace("{{GENERATED}}", &ctx.generated.format("%Y-%m-%d").to_string())
        .replace(
            "{{INPUTS_TABLE}}",
            &tables::format_explorer_inputs(ctx.params, ctx.currency),
        )
        .replace(
            "{{EXPLORER_SAVINGS}}",
            &tables::format_explorer_savings(ctx.savings, ctx.currency),
        )
        .replace(
            "{{COMPARISON_CHART}}",
            &chart::format_comparison_chart(&pairs, ctx.currency),
        )
}

pub struct TypstReportAdapter {
    currency: String,
    template_path: Option<PathBuf>,
    generated: NaiveDate,
}

impl TypstReportAdapter {
    pub fn new(currency: impl Into<String>, generated: NaiveDate) -> Self {
        Self {
            currency: currency.into(),
            template_path: None,
            generated,
        }
    }

    /// Use a custom template file instead of the built-in one.
    pub fn with_template(mut self, path: PathBuf) -> Self {
        self.template_path = Some(path);
        self
    }

    fn load_template(&self, default: fn() -> String) -> Result<String, SlippageLabError> {
        match &self.template_path {
            Some(path) => fs::read_to_string(path).map_err(|e| SlippageLabError::Report {
                reason: format!("failed to read template {}: {}", path.display(), e),
            }),
            None => Ok(default()),
        }
    }
}

fn write_output(output_path: &str, content: &str) -> Result<(), SlippageLabError> {
    fs::write(output_path, content).map_err(|e| SlippageLabError::Report {
        reason: format!("failed to write {}: {}", output_path, e),
    })
}

impl ReportPort for TypstReportAdapter {
    fn write_analysis(
        &self,
        analysis: &UploadAnalysis,
        source: &str,
        output_path: &str,
    ) -> Result<(), SlippageLabError> {
        let template = self.load_template(default_template::analysis_template)?;
        let ctx = AnalysisContext {
            analysis,
            source,
            currency: &self.currency,
            generated: self.generated,
        };
        write_output(output_path, &resolve_analysis(&template, &ctx))
    }

    fn write_explorer(
        &self,
        params: &SliderParameters,
        savings: &ExplorerSavings,
        output_path: &str,
    ) -> Result<(), SlippageLabError> {
        let template = self.load_template(default_template::explorer_template)?;
        let ctx = ExplorerContext {
            params,
            savings,
            currency: &self.currency,
            generated: self.generated,
        };
        write_output(output_path, &resolve_explorer(&template, &ctx))
    }
}
