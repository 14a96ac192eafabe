//! Typed settings read through [`ConfigPort`], validated before use.

use crate::domain::app_state::Theme;
use crate::domain::error::SlippageLabError;
use crate::domain::explorer::SliderParameters;
use crate::ports::config_port::ConfigPort;

/// Upload size advertised to users.
pub const DEFAULT_MAX_UPLOAD_BYTES: i64 = 10 * 1024 * 1024;
pub const DEFAULT_CURRENCY: &str = "₹";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportFormat {
    Typst,
    Json,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "typst" => Ok(ReportFormat::Typst),
            "json" => Ok(ReportFormat::Json),
            other => Err(format!("unknown report format '{other}' (expected typst or json)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub max_upload_bytes: u64,
    pub currency: String,
    pub report_format: ReportFormat,
    pub explorer_defaults: SliderParameters,
    pub theme: Theme,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES as u64,
            currency: DEFAULT_CURRENCY.to_string(),
            report_format: ReportFormat::Typst,
            explorer_defaults: SliderParameters::default(),
            theme: Theme::Light,
        }
    }
}

impl Settings {
    pub fn from_config(config: &dyn ConfigPort) -> Result<Self, SlippageLabError> {
        let max_upload_bytes = config
            .get_int("upload", "max_bytes")
            .map_err(|e| SlippageLabError::invalid("upload", "max_bytes", e))?
            .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES);
        if max_upload_bytes <= 0 {
            return Err(SlippageLabError::invalid(
                "upload",
                "max_bytes",
                "max_bytes must be positive",
            ));
        }

        let currency = config
            .get_string("report", "currency")
            .unwrap_or_else(|| DEFAULT_CURRENCY.to_string());
        if currency.trim().is_empty() {
            return Err(SlippageLabError::invalid(
                "report",
                "currency",
                "currency must not be empty",
            ));
        }

        let report_format = match config.get_string("report", "format") {
            Some(s) => s
                .parse()
                .map_err(|e: String| SlippageLabError::invalid("report", "format", e))?,
            None => ReportFormat::Typst,
        };

        let theme = match config.get_string("ui", "theme") {
            Some(s) => s
                .parse()
                .map_err(|e: String| SlippageLabError::invalid("ui", "theme", e))?,
            None => Theme::Light,
        };

        let defaults = SliderParameters::default();
        let explorer_defaults = SliderParameters {
            current_slippage_pct: explorer_value(
                config,
                "slippage_pct",
                defaults.current_slippage_pct,
            )?,
            trades_per_month: explorer_value(config, "trades_per_month", defaults.trades_per_month)?,
            avg_trade_size: explorer_value(config, "avg_trade_size", defaults.avg_trade_size)?,
        };

        Ok(Self {
            max_upload_bytes: max_upload_bytes as u64,
            currency: currency.trim().to_string(),
            report_format,
            explorer_defaults,
            theme,
        })
    }
}

fn explorer_value(config: &dyn ConfigPort, key: &str, default: f64) -> Result<f64, SlippageLabError> {
    let value = config
        .get_double("explorer", key)
        .map_err(|e| SlippageLabError::invalid("explorer", key, e))?
        .unwrap_or(default);
    if !value.is_finite() || value < 0.0 {
        return Err(SlippageLabError::invalid(
            "explorer",
            key,
            format!("{key} must be a non-negative number"),
        ));
    }
    Ok(value)
}
