//! Table formatting for reports.
//!
//! Provides functions to generate Typst markup for:
//! - Upload summary and slippage breakdown
//! - Savings projections
//! - Per-trade savings table
//! - Explorer inputs and outputs

use crate::domain::explorer::{ExplorerSavings, SliderParameters};
use crate::domain::savings::{Projections, TradeSavings, UploadAnalysis};

/// Escape characters with markup meaning in Typst content blocks.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        if matches!(
            c,
            '\\' | '#' | '[' | ']' | '$' | '*' | '_' | '@' | '<' | '>' | '`' | '~' | '=' | '/'
        ) {
            out.push('\\');
        }
        out.push(c);
    }
    out
}

/// Whole-unit amount with thousands separators, e.g. `₹1,593` or `-₹100`.
pub fn format_amount(value: f64, currency: &str) -> String {
    plain_amount(value, &escape(currency))
}

/// Same as [`format_amount`] without Typst escaping, for console output.
pub fn plain_amount(value: f64, currency: &str) -> String {
    let rounded = value.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());
    format!("{}{}{}", sign, currency, group_thousands(&digits))
}

fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

pub fn format_summary(analysis: &UploadAnalysis, source: &str) -> String {
    let mut output = String::new();
    output.push_str("#table(\n");
    output.push_str("  columns: 2,\n");
    output.push_str("  [*Property*], [*Value*],\n");
    output.push_str(&format!("  [Source], [{}],\n", escape(source)));
    output.push_str(&format!("  [Rows parsed], [{}],\n", analysis.total_count));
    output.push_str(&format!("  [Trades processed], [{}],\n", analysis.valid_count));
    output.push_str(&format!("  [Rows excluded], [{}],\n", analysis.invalid_count()));
    output.push_str(")\n\n");
    output
}

pub fn format_slippage_breakdown(analysis: &UploadAnalysis) -> String {
    let mut output = String::new();
    output.push_str("#table(\n");
    output.push_str("  columns: 3,\n");
    output.push_str("  [*Current Average*], [*Optimized Target*], [*Improvement*],\n");
    output.push_str(&format!(
        "  text(fill: red, [{:.2}%]), text(fill: green, [{:.1}%]), [{:.0}%],\n",
        analysis.average_slippage_pct,
        analysis.optimized_slippage_pct,
        analysis.improvement_pct
    ));
    output.push_str(")\n\n");
    output
}

pub fn format_projections(projections: &Projections, currency: &str) -> String {
    let mut output = String::new();
    output.push_str("#table(\n");
    output.push_str("  columns: 4,\n");
    output.push_str("  [*Monthly*], [*3 Months*], [*6 Months*], [*12 Months*],\n");
    output.push_str(&format!(
        "  [{}], [{}], [{}], [{}],\n",
        format_amount(projections.monthly as f64, currency),
        format_amount(projections.quarter as f64, currency),
        format_amount(projections.half_year as f64, currency),
        format_amount(projections.year as f64, currency),
    ));
    output.push_str(")\n\n");
    output
}

pub fn format_trade_table(trades: &[TradeSavings], currency: &str) -> String {
    if trades.is_empty() {
        return "_No valid trades in the uploaded file._\n\n".to_string();
    }

    let mut output = String::new();
    output.push_str("#table(\n");
    output.push_str("  columns: 6,\n");
    output.push_str("  align: (left, right, right, right, right, right),\n");
    output.push_str("  [*Symbol*], [*Qty*], [*Price*], [*Current*], [*Optimized*], [*Savings*],\n");

    for trade in trades {
        let color = if trade.savings >= 0 { "green" } else { "red" };
        output.push_str(&format!(
            "  [{}], [{}], [{:.2}], [{:.2}%], [{:.1}%], text(fill: {}, [{}]),\n",
            escape(&trade.symbol),
            trade.quantity,
            trade.price,
            trade.current_slippage_pct,
            trade.optimized_slippage_pct,
            color,
            format_amount(trade.savings as f64, currency),
        ));
    }

    output.push_str(")\n\n");
    output
}

pub fn format_explorer_inputs(params: &SliderParameters, currency: &str) -> String {
    let mut output = String::new();
    output.push_str("#table(\n");
    output.push_str("  columns: 2,\n");
    output.push_str("  [*Input*], [*Value*],\n");
    output.push_str(&format!(
        "  [Current slippage], [{:.1}%],\n",
        params.current_slippage_pct
    ));
    output.push_str(&format!(
        "  [Trades per month], [{:.0}],\n",
        params.trades_per_month
    ));
    output.push_str(&format!(
        "  [Average trade size], [{}],\n",
        format_amount(params.avg_trade_size, currency)
    ));
    output.push_str(")\n\n");
    output
}

pub fn format_explorer_savings(savings: &ExplorerSavings, currency: &str) -> String {
    let mut output = String::new();
    output.push_str("#table(\n");
    output.push_str("  columns: 4,\n");
    output.push_str("  [*Monthly*], [*6 Months*], [*12 Months*], [*Efficiency*],\n");
    output.push_str(&format!(
        "  [{}], [{}], [{}], [{:.1}%],\n",
        format_amount(savings.monthly, currency),
        format_amount(savings.six_month, currency),
        format_amount(savings.yearly, currency),
        savings.efficiency_pct,
    ));
    output.push_str(")\n\n");
    output
}
