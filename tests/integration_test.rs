//! End-to-end tests of the upload and explorer pipelines.
//!
//! Tests cover:
//! - Worked examples for per-row savings, slider math, and row exclusion
//! - Upload session flow through a mock trade source
//! - Report port invocation with a recording mock
//! - Property tests for aggregation and slider invariants

mod common;

use approx::assert_relative_eq;
use common::*;
use proptest::prelude::*;
use slippagelab::cli;
use slippagelab::domain::app_state::{AppState, StateChange};
use slippagelab::domain::error::SlippageLabError;
use slippagelab::domain::explorer::{ExplorerSavings, SliderParameters};
use slippagelab::domain::record_parser;
use slippagelab::domain::sample::SAMPLE_CSV;
use slippagelab::domain::savings::{
    DEFAULT_AVERAGE_SLIPPAGE_PCT, DEFAULT_IMPROVEMENT_PCT, UploadAnalysis,
};
use slippagelab::ports::report_port::ReportPort;
use std::cell::RefCell;
use std::rc::Rc;

mod worked_examples {
    use super::*;

    #[test]
    fn single_row_savings() {
        let records = record_parser::parse(&csv(&["RELIANCE,100,2450.5,0.85%"])).unwrap();
        let analysis = UploadAnalysis::compute(&records);

        assert_eq!(analysis.breakdown.len(), 1);
        assert_eq!(analysis.breakdown[0].savings, 1593);
        assert_eq!(analysis.projections.monthly, 1593);
        assert_eq!(analysis.projections.quarter, 4779);
        assert_eq!(analysis.projections.half_year, 9558);
        assert_eq!(analysis.projections.year, 19116);
    }

    #[test]
    fn default_slider_scenario() {
        let savings = ExplorerSavings::compute(&SliderParameters {
            current_slippage_pct: 1.2,
            trades_per_month: 10.0,
            avg_trade_size: 25_000.0,
        });

        assert_relative_eq!(savings.monthly, 2500.0, epsilon = 1e-6);
        assert_relative_eq!(savings.six_month, 15_000.0, epsilon = 1e-6);
        assert_relative_eq!(savings.yearly, 30_000.0, epsilon = 1e-6);
        assert_relative_eq!(savings.efficiency_pct, 83.333_333, epsilon = 1e-4);
    }

    #[test]
    fn short_row_is_dropped_entirely() {
        let records =
            record_parser::parse(&csv(&["AAA,10,100", "BBB,10,100,1.0%"])).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(records[0].symbol.as_deref(), Some("BBB"));
    }

    #[test]
    fn unparseable_qty_is_kept_but_excluded() {
        let records = record_parser::parse(&csv(&[
            "AAA,abc,100,1.0%",
            "RELIANCE,100,2450.5,0.85%",
        ]))
        .unwrap();
        let analysis = UploadAnalysis::compute(&records);

        assert_eq!(records.len(), 2);
        assert!(records[0].quantity.is_none());
        assert_eq!(analysis.total_count, 2);
        assert_eq!(analysis.valid_count, 1);
        assert_eq!(analysis.projections.monthly, 1593);
    }

    #[test]
    fn spreadsheet_style_qty_counts() {
        let records = record_parser::parse(&csv(&["RELIANCE,100.0,2450.5,0.85%"])).unwrap();
        let analysis = UploadAnalysis::compute(&records);

        assert_eq!(records[0].quantity, Some(100));
        assert_eq!(analysis.valid_count, 1);
        assert_eq!(analysis.projections.monthly, 1593);
    }

    #[test]
    fn empty_trade_set_uses_fallbacks() {
        let analysis = UploadAnalysis::compute(&[]);

        assert_eq!(analysis.projections.monthly, 0);
        assert_eq!(analysis.average_slippage_pct, DEFAULT_AVERAGE_SLIPPAGE_PCT);
        assert_eq!(analysis.improvement_pct, DEFAULT_IMPROVEMENT_PCT);
        assert!(analysis.comparison.iter().all(|m| m.manual_loss == 0.0));
    }

    #[test]
    fn sample_file_is_fully_valid() {
        let records = record_parser::parse(SAMPLE_CSV).unwrap();
        let analysis = UploadAnalysis::compute(&records);

        assert!(analysis.valid_count > 0);
        assert_eq!(analysis.valid_count, analysis.total_count);
        assert!(analysis.projections.monthly > 0);
    }
}

mod upload_flow {
    use super::*;

    #[test]
    fn successful_read_marks_upload_present() {
        let source = MockTradeSource::with_content(&csv(&["RELIANCE,100,2450.5,0.85%"]));
        let mut app = AppState::default();
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        app.subscribe(move |change| sink.borrow_mut().push(*change));

        let (records, analysis) = cli::analyze_source(&source, &mut app).unwrap();

        assert_eq!(records.len(), 1);
        assert_eq!(analysis.projections.monthly, 1593);
        assert!(app.has_upload());
        assert_eq!(*seen.borrow(), vec![StateChange::UploadPresence(true)]);
    }

    #[test]
    fn failed_read_propagates_source_error() {
        let source = MockTradeSource::with_error("disk on fire");
        let mut app = AppState::default();
        app.set_has_upload(true);

        let err = cli::analyze_source(&source, &mut app).unwrap_err();

        assert!(matches!(err, SlippageLabError::Read { .. }));
        assert!(err.to_string().contains("disk on fire"));
        assert!(!app.has_upload());
    }

    #[test]
    fn header_only_upload_is_empty_but_successful() {
        let source = MockTradeSource::with_content("symbol,qty,price,slippage\n");
        let mut app = AppState::default();

        let (records, analysis) = cli::analyze_source(&source, &mut app).unwrap();

        assert!(records.is_empty());
        assert_eq!(analysis.total_count, 0);
        assert!(app.has_upload());
    }
}

struct MockReportPort {
    analyses: RefCell<Vec<(UploadAnalysis, String, String)>>,
    scenarios: RefCell<Vec<(SliderParameters, ExplorerSavings, String)>>,
}

impl MockReportPort {
    fn new() -> Self {
        Self {
            analyses: RefCell::new(Vec::new()),
            scenarios: RefCell::new(Vec::new()),
        }
    }
}

impl ReportPort for MockReportPort {
    fn write_analysis(
        &self,
        analysis: &UploadAnalysis,
        source: &str,
        output_path: &str,
    ) -> Result<(), SlippageLabError> {
        self.analyses.borrow_mut().push((
            analysis.clone(),
            source.to_string(),
            output_path.to_string(),
        ));
        Ok(())
    }

    fn write_explorer(
        &self,
        params: &SliderParameters,
        savings: &ExplorerSavings,
        output_path: &str,
    ) -> Result<(), SlippageLabError> {
        self.scenarios
            .borrow_mut()
            .push((*params, savings.clone(), output_path.to_string()));
        Ok(())
    }
}

mod report_generation {
    use super::*;

    #[test]
    fn report_receives_analysis_and_source() {
        let source = MockTradeSource::with_content(SAMPLE_CSV);
        let mut app = AppState::default();
        let (_, analysis) = cli::analyze_source(&source, &mut app).unwrap();
        let port = MockReportPort::new();

        port.write_analysis(&analysis, "mock.csv", "out.typ").unwrap();

        let calls = port.analyses.borrow();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].0, analysis);
        assert_eq!(calls[0].1, "mock.csv");
        assert_eq!(calls[0].2, "out.typ");
    }

    #[test]
    fn report_receives_scenario() {
        let params = SliderParameters::default();
        let savings = ExplorerSavings::compute(&params);
        let port = MockReportPort::new();

        port.write_explorer(&params, &savings, "scenario.json").unwrap();

        let calls = port.scenarios.borrow();
        assert_eq!(calls[0].0, params);
        assert_relative_eq!(calls[0].1.monthly, 2500.0, epsilon = 1e-6);
    }
}

fn row_strategy() -> impl Strategy<Value = (String, i64, f64, f64)> {
    (
        "[A-Z]{1,8}",
        1i64..10_000,
        (1u32..1_000_000).prop_map(|cents| cents as f64 / 100.0),
        (0u32..500).prop_map(|bp| bp as f64 / 100.0),
    )
}

fn render_row((symbol, qty, price, slippage): &(String, i64, f64, f64)) -> String {
    format!("{symbol},{qty},{price},{slippage}%")
}

fn expected_savings(qty: i64, price: f64, slippage: f64) -> i64 {
    (((slippage - 0.2) / 100.0) * qty as f64 * price).round() as i64
}

proptest! {
    #[test]
    fn per_row_savings_follow_formula(row in row_strategy()) {
        let records = record_parser::parse(&csv(&[&render_row(&row)])).unwrap();
        let analysis = UploadAnalysis::compute(&records);

        let (_, qty, price, slippage) = row;
        prop_assert_eq!(analysis.breakdown.len(), 1);
        prop_assert_eq!(analysis.breakdown[0].savings, expected_savings(qty, price, slippage));
    }

    #[test]
    fn total_is_sum_over_valid_rows(
        rows in prop::collection::vec(row_strategy(), 0..20),
        invalid in 0usize..5,
    ) {
        let mut lines: Vec<String> = rows.iter().map(render_row).collect();
        for i in 0..invalid {
            lines.push(format!("BAD{i},x,100,1.0%"));
        }
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let analysis = UploadAnalysis::compute(&record_parser::parse(&csv(&refs)).unwrap());

        let expected: i64 = rows
            .iter()
            .map(|(_, q, p, s)| expected_savings(*q, *p, *s))
            .sum();
        prop_assert_eq!(analysis.projections.monthly, expected);
        prop_assert_eq!(analysis.valid_count, rows.len());
        prop_assert_eq!(analysis.total_count, rows.len() + invalid);
    }

    #[test]
    fn reparsing_is_idempotent(rows in prop::collection::vec(row_strategy(), 0..10)) {
        let lines: Vec<String> = rows.iter().map(render_row).collect();
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let content = csv(&refs);

        let first = record_parser::parse(&content).unwrap();
        let second = record_parser::parse(&content).unwrap();
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(UploadAnalysis::compute(&first), UploadAnalysis::compute(&second));
    }

    #[test]
    fn higher_slippage_never_lowers_savings(
        (symbol, qty, price, slippage) in row_strategy(),
        bump in 1u32..200,
    ) {
        let higher = slippage + bump as f64 / 100.0;
        let low = UploadAnalysis::compute(
            &record_parser::parse(&csv(&[&render_row(&(symbol.clone(), qty, price, slippage))])).unwrap(),
        );
        let high = UploadAnalysis::compute(
            &record_parser::parse(&csv(&[&render_row(&(symbol, qty, price, higher))])).unwrap(),
        );

        prop_assert!(high.projections.monthly >= low.projections.monthly);
        if qty as f64 * price * bump as f64 / 10_000.0 >= 2.0 {
            prop_assert!(high.projections.monthly > low.projections.monthly);
        }
    }

    #[test]
    fn mismatched_rows_never_appear(
        rows in prop::collection::vec(row_strategy(), 1..10),
        short in 1usize..4,
    ) {
        let mut lines: Vec<String> = rows.iter().map(render_row).collect();
        for i in 0..short {
            lines.push(format!("SHORT{i},1,2"));
            lines.push(format!("LONG{i},1,2,3%,extra"));
        }
        let refs: Vec<&str> = lines.iter().map(String::as_str).collect();
        let records = record_parser::parse(&csv(&refs)).unwrap();

        prop_assert_eq!(records.len(), rows.len());
        let only_well_formed = records.iter().all(|r| {
            let symbol = r.symbol.as_deref().unwrap_or("");
            !symbol.starts_with("SHORT") && !symbol.starts_with("LONG")
        });
        prop_assert!(only_well_formed);
    }

    #[test]
    fn slider_floor_at_optimized_slippage(
        slippage in 0.0f64..=0.2,
        trades in 10.0f64..2000.0,
        size in 5000.0f64..100_000.0,
    ) {
        let savings = ExplorerSavings::compute(&SliderParameters {
            current_slippage_pct: slippage,
            trades_per_month: trades,
            avg_trade_size: size,
        });

        prop_assert_eq!(savings.monthly, 0.0);
        prop_assert_eq!(savings.six_month, 0.0);
        prop_assert_eq!(savings.yearly, 0.0);
        prop_assert_eq!(savings.efficiency_pct, 0.0);
    }

    #[test]
    fn slider_projections_scale_exactly(
        slippage in 0.2f64..3.0,
        trades in 10.0f64..2000.0,
        size in 5000.0f64..100_000.0,
    ) {
        let savings = ExplorerSavings::compute(&SliderParameters {
            current_slippage_pct: slippage,
            trades_per_month: trades,
            avg_trade_size: size,
        });

        prop_assert!(savings.monthly >= 0.0);
        prop_assert_eq!(savings.six_month, savings.monthly * 6.0);
        prop_assert_eq!(savings.yearly, savings.monthly * 12.0);
    }
}
