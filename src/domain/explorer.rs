//! Slider-driven savings explorer.
//!
//! Every output is floored at zero, so a slippage at or below the
//! optimized baseline shows no savings rather than a negative figure.
//! Inputs are never range-checked here; [`SliderRange`] belongs to the
//! input controls.

use serde::Serialize;

use crate::domain::savings::COMPARISON_MONTHS;

/// 0.2% as a fraction.
const OPTIMIZED_SLIPPAGE_FRACTION: f64 = 0.002;

const MONTHLY_GROWTH: f64 = 0.1;
const ALGO_LOSS_FRACTION: f64 = 0.15;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SliderParameters {
    pub current_slippage_pct: f64,
    pub trades_per_month: f64,
    pub avg_trade_size: f64,
}

impl Default for SliderParameters {
    fn default() -> Self {
        Self {
            current_slippage_pct: 1.2,
            trades_per_month: 10.0,
            avg_trade_size: 25_000.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SliderRange {
    pub min: f64,
    pub max: f64,
    pub step: f64,
}

pub const SLIPPAGE_RANGE: SliderRange = SliderRange {
    min: 0.2,
    max: 3.0,
    step: 0.1,
};

pub const TRADES_RANGE: SliderRange = SliderRange {
    min: 10.0,
    max: 2000.0,
    step: 10.0,
};

pub const TRADE_SIZE_RANGE: SliderRange = SliderRange {
    min: 5_000.0,
    max: 100_000.0,
    step: 1_000.0,
};

impl SliderRange {
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }

    /// Clamp into range and round to the nearest step from `min`.
    pub fn snap(&self, value: f64) -> f64 {
        if value.is_nan() {
            return self.min;
        }
        let clamped = value.clamp(self.min, self.max);
        let steps = ((clamped - self.min) / self.step).round();
        // avoid 0.30000000000000004 style artefacts in displayed values
        let snapped = self.min + steps * self.step;
        let scale = 1.0 / self.step.min(1.0);
        ((snapped * scale).round() / scale).min(self.max)
    }
}

impl SliderParameters {
    pub fn snapped(&self) -> Self {
        Self {
            current_slippage_pct: SLIPPAGE_RANGE.snap(self.current_slippage_pct),
            trades_per_month: TRADES_RANGE.snap(self.trades_per_month),
            avg_trade_size: TRADE_SIZE_RANGE.snap(self.avg_trade_size),
        }
    }

    pub fn in_range(&self) -> bool {
        SLIPPAGE_RANGE.contains(self.current_slippage_pct)
            && TRADES_RANGE.contains(self.trades_per_month)
            && TRADE_SIZE_RANGE.contains(self.avg_trade_size)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerSavings {
    pub monthly: f64,
    pub six_month: f64,
    pub yearly: f64,
    pub efficiency_pct: f64,
}

impl ExplorerSavings {
    pub fn compute(params: &SliderParameters) -> Self {
        let current = params.current_slippage_pct / 100.0;
        let reduction = current - OPTIMIZED_SLIPPAGE_FRACTION;

        let monthly = floor_zero(reduction * params.trades_per_month * params.avg_trade_size);

        Self {
            monthly,
            six_month: monthly * 6.0,
            yearly: monthly * 12.0,
            efficiency_pct: floor_zero(reduction / current * 100.0),
        }
    }
}

/// One bar pair of the explorer's six-month chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExplorerMonth {
    pub month: &'static str,
    pub manual_loss: f64,
    pub algo_loss: f64,
}

pub fn monthly_comparison(savings: &ExplorerSavings) -> Vec<ExplorerMonth> {
    COMPARISON_MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let manual_loss = savings.monthly * (1.0 + i as f64 * MONTHLY_GROWTH) / 6.0;
            ExplorerMonth {
                month: *month,
                manual_loss,
                algo_loss: manual_loss * ALGO_LOSS_FRACTION,
            }
        })
        .collect()
}

/// NaN also maps to zero.
fn floor_zero(value: f64) -> f64 {
    if value > 0.0 { value } else { 0.0 }
}
