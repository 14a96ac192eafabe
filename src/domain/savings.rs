//! Savings calculator for uploaded trades.
//!
//! Per-trade savings are rounded before they are summed, so the monthly
//! total always equals the sum of the rows shown in the breakdown.

use serde::Serialize;

use crate::domain::trade_record::{TradeRecord, TradeRow, ValidTrade};

/// Slippage percentage achievable with automated execution.
pub const OPTIMIZED_SLIPPAGE_PCT: f64 = 0.2;

/// Shown as the average slippage when no trade is valid.
pub const DEFAULT_AVERAGE_SLIPPAGE_PCT: f64 = 1.0;

/// Shown as the improvement when no trade is valid.
pub const DEFAULT_IMPROVEMENT_PCT: f64 = 80.0;

pub const COMPARISON_MONTHS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];

/// Monthly loss growth applied across the comparison series.
const MONTHLY_GROWTH: f64 = 0.1;

/// Fraction of the manual loss remaining after optimization.
const ALGO_LOSS_FRACTION: f64 = 0.2;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TradeSavings {
    pub line: usize,
    pub symbol: String,
    pub quantity: i64,
    pub price: f64,
    pub current_slippage_pct: f64,
    pub optimized_slippage_pct: f64,
    pub savings: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Projections {
    pub monthly: i64,
    pub quarter: i64,
    pub half_year: i64,
    pub year: i64,
}

impl Projections {
    pub fn from_monthly(monthly: i64) -> Self {
        Self {
            monthly,
            quarter: monthly.saturating_mul(3),
            half_year: monthly.saturating_mul(6),
            year: monthly.saturating_mul(12),
        }
    }
}

/// One bar pair of the six-month manual vs. optimized comparison.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthComparison {
    pub month: &'static str,
    pub manual_loss: f64,
    pub algo_loss: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UploadAnalysis {
    pub breakdown: Vec<TradeSavings>,
    pub projections: Projections,
    pub average_slippage_pct: f64,
    pub optimized_slippage_pct: f64,
    pub improvement_pct: f64,
    pub valid_count: usize,
    pub total_count: usize,
    pub comparison: Vec<MonthComparison>,
}

impl UploadAnalysis {
    pub fn compute(records: &[TradeRecord]) -> Self {
        let valid: Vec<(usize, ValidTrade)> = records
            .iter()
            .filter_map(|rec| match rec.classify() {
                TradeRow::Valid(trade) => Some((rec.line, trade)),
                TradeRow::Invalid { .. } => None,
            })
            .collect();

        let breakdown: Vec<TradeSavings> = valid
            .iter()
            .map(|(line, trade)| TradeSavings {
                line: *line,
                symbol: trade.symbol.clone(),
                quantity: trade.quantity,
                price: trade.price,
                current_slippage_pct: trade.slippage_pct,
                optimized_slippage_pct: OPTIMIZED_SLIPPAGE_PCT,
                savings: trade_savings(trade),
            })
            .collect();

        let monthly = total_savings(breakdown.iter().map(|t| t.savings));
        let trades: Vec<&ValidTrade> = valid.iter().map(|(_, t)| t).collect();
        let average = average_slippage(&trades);

        Self {
            breakdown,
            projections: Projections::from_monthly(monthly),
            average_slippage_pct: average.unwrap_or(DEFAULT_AVERAGE_SLIPPAGE_PCT),
            optimized_slippage_pct: OPTIMIZED_SLIPPAGE_PCT,
            improvement_pct: average
                .map(improvement_pct)
                .unwrap_or(DEFAULT_IMPROVEMENT_PCT),
            valid_count: valid.len(),
            total_count: records.len(),
            comparison: monthly_comparison(monthly),
        }
    }

    pub fn invalid_count(&self) -> usize {
        self.total_count - self.valid_count
    }
}

/// `round(((slippage - 0.2) / 100) * qty * price)`, half away from zero.
pub fn trade_savings(trade: &ValidTrade) -> i64 {
    let exact = ((trade.slippage_pct - OPTIMIZED_SLIPPAGE_PCT) / 100.0)
        * trade.quantity as f64
        * trade.price;
    exact.round() as i64
}

fn total_savings(values: impl Iterator<Item = i64>) -> i64 {
    values.fold(0i64, |acc, v| acc.saturating_add(v))
}

/// Mean slippage over valid trades; `None` when there are none.
pub fn average_slippage(trades: &[&ValidTrade]) -> Option<f64> {
    if trades.is_empty() {
        return None;
    }
    let sum: f64 = trades.iter().map(|t| t.slippage_pct).sum();
    Some(sum / trades.len() as f64)
}

/// `(avg - 0.2) / avg * 100`; 0 when the average is zero.
pub fn improvement_pct(average_slippage_pct: f64) -> f64 {
    let pct = (average_slippage_pct - OPTIMIZED_SLIPPAGE_PCT) / average_slippage_pct * 100.0;
    if pct.is_finite() { pct } else { 0.0 }
}

pub fn monthly_comparison(monthly: i64) -> Vec<MonthComparison> {
    COMPARISON_MONTHS
        .iter()
        .enumerate()
        .map(|(i, month)| {
            let manual_loss = monthly as f64 * (1.0 + i as f64 * MONTHLY_GROWTH);
            MonthComparison {
                month: *month,
                manual_loss,
                algo_loss: (manual_loss * ALGO_LOSS_FRACTION).round(),
            }
        })
        .collect()
}
