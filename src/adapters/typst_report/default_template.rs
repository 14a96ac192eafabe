//! Built-in Typst report templates with `{{PLACEHOLDER}}` markers.

const PREAMBLE: &str = r#"#set page(paper: "a4", margin: 2cm)
#set text(size: 10pt)
#set table(stroke: 0.5pt + gray, inset: 6pt)
"#;

const ANALYSIS_BODY: &str = r#"
= Slippage Savings Report

Generated {{GENERATED}}. Figures are hypothetical and for education only.

== Upload Summary

{{SUMMARY_TABLE}}

== Slippage Analysis

{{SLIPPAGE_BREAKDOWN}}

== Savings Projections

{{PROJECTIONS_TABLE}}

== Six-Month Comparison

{{COMPARISON_CHART}}

== Trade Breakdown

{{TRADE_TABLE}}
"#;

const EXPLORER_BODY: &str = r#"
= Slippage Explorer Scenario

Generated {{GENERATED}}. Figures are hypothetical and for education only.

== Inputs

{{INPUTS_TABLE}}

== Potential Savings

{{EXPLORER_SAVINGS}}

== Six-Month Comparison

{{COMPARISON_CHART}}
"#;

pub fn analysis_template() -> String {
    format!("{PREAMBLE}{ANALYSIS_BODY}")
}

pub fn explorer_template() -> String {
    format!("{PREAMBLE}{EXPLORER_BODY}")
}
