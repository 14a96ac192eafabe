//! Manual vs. optimized loss bar chart for reports.

use super::tables::format_amount;

/// Bar length for the largest value in the series.
const MAX_BAR_PT: f64 = 300.0;
const MIN_BAR_PT: f64 = 4.0;

/// One labelled pair of bars.
pub struct BarPair<'a> {
    pub label: &'a str,
    pub manual: f64,
    pub algo: f64,
}

pub fn format_comparison_chart(pairs: &[BarPair], currency: &str) -> String {
    if pairs.is_empty() {
        return "_No comparison data available._\n\n".to_string();
    }

    let max = pairs
        .iter()
        .flat_map(|p| [p.manual, p.algo])
        .fold(0.0_f64, f64::max);

    if max <= 0.0 {
        return "_No slippage loss to compare._\n\n".to_string();
    }

    let mut output = String::new();
    output.push_str("#figure(\n");
    output.push_str("  grid(\n");
    output.push_str("    columns: (auto, auto),\n");
    output.push_str("    row-gutter: 4pt,\n");
    output.push_str("    column-gutter: 8pt,\n");

    for pair in pairs {
        output.push_str(&format!(
            "    [{}], stack(dir: ttb, spacing: 2pt, {}, {}),\n",
            pair.label,
            bar(pair.manual, max, "red", currency),
            bar(pair.algo, max, "green", currency),
        ));
    }

    output.push_str("  ),\n");
    output.push_str("  caption: [Slippage loss: manual (red) vs. optimized (green)]\n");
    output.push_str(")\n\n");
    output
}

fn bar(value: f64, max: f64, color: &str, currency: &str) -> String {
    let width = (value.max(0.0) / max * MAX_BAR_PT).max(MIN_BAR_PT);
    format!(
        "stack(dir: ltr, spacing: 4pt, rect(width: {:.1}pt, height: 8pt, fill: {}), text(size: 7pt, [{}]))",
        width,
        color,
        format_amount(value, currency)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs() -> Vec<BarPair<'static>> {
        vec![
            BarPair {
                label: "Jan",
                manual: 1000.0,
                algo: 200.0,
            },
            BarPair {
                label: "Feb",
                manual: 1100.0,
                algo: 220.0,
            },
        ]
    }

    #[test]
    fn empty_series() {
        assert!(format_comparison_chart(&[], "₹").contains("No comparison data"));
    }

    #[test]
    fn zero_series() {
        let zero = vec![BarPair {
            label: "Jan",
            manual: 0.0,
            algo: 0.0,
        }];
        assert!(format_comparison_chart(&zero, "₹").contains("No slippage loss"));
    }

    #[test]
    fn largest_bar_has_full_width() {
        let result = format_comparison_chart(&pairs(), "₹");
        assert!(result.contains("#figure("));
        assert!(result.contains("[Jan]"));
        assert!(result.contains("rect(width: 300.0pt, height: 8pt, fill: red)"));
        assert!(result.contains("[₹1,100]"));
    }

    #[test]
    fn small_bars_have_minimum_width() {
        let tiny = vec![
            BarPair {
                label: "Jan",
                manual: 1_000_000.0,
                algo: 1.0,
            },
        ];
        let result = format_comparison_chart(&tiny, "₹");
        assert!(result.contains("rect(width: 4.0pt, height: 8pt, fill: green)"));
    }
}
