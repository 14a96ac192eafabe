//! CLI definition and dispatch.

use clap::{Parser, Subcommand};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::{info, warn};

use crate::adapters::csv_adapter::CsvFileAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::adapters::json_report_adapter::JsonReportAdapter;
use crate::adapters::typst_report::TypstReportAdapter;
use crate::adapters::typst_report::tables::plain_amount;
use crate::domain::app_state::AppState;
use crate::domain::error::SlippageLabError;
use crate::domain::explorer::{self, ExplorerSavings, SliderParameters};
use crate::domain::sample::{SAMPLE_CSV, SAMPLE_FILE_NAME};
use crate::domain::savings::UploadAnalysis;
use crate::domain::session::{SessionState, UploadSession};
use crate::domain::settings::{ReportFormat, Settings};
use crate::domain::trade_record::{TradeRecord, TradeRow};
use crate::ports::report_port::ReportPort;
use crate::ports::trade_source_port::TradeSourcePort;

#[derive(Parser, Debug)]
#[command(
    name = "slippagelab",
    about = "Explore how lower slippage changes hypothetical trading savings"
)]
pub struct Cli {
    /// INI settings file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
    /// Log filter, e.g. `info` or `slippagelab=debug`
    #[arg(long, global = true, default_value = "info")]
    pub log_level: String,
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Analyse an uploaded trade CSV
    Analyze {
        #[arg(short, long)]
        file: PathBuf,
        /// Write a report to this path
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Report format: typst or json
        #[arg(long)]
        format: Option<String>,
        /// Custom Typst template
        #[arg(long)]
        template: Option<PathBuf>,
        /// List rows excluded from the totals
        #[arg(long)]
        show_invalid: bool,
    },
    /// Compute savings for a slider scenario
    Explore {
        /// Current slippage in percent
        #[arg(long)]
        slippage: Option<f64>,
        /// Trades per month
        #[arg(long)]
        trades: Option<f64>,
        /// Average trade size
        #[arg(long)]
        size: Option<f64>,
        /// Clamp inputs to the slider ranges and steps
        #[arg(long)]
        snap: bool,
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(long)]
        format: Option<String>,
        #[arg(long)]
        template: Option<PathBuf>,
    },
    /// Write the sample trade file
    Sample {
        #[arg(short, long)]
        output: Option<PathBuf>,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
    /// Show the manual vs. automated execution comparison
    About,
}

/// Manual vs. automated trading overview shown by `about`.
pub const EXECUTION_COMPARISON: [(&str, &str, &str); 4] = [
    ("Average Slippage", "1.5% - 3.0%", "0.1% - 0.3%"),
    ("Execution Speed", "2-5 seconds", "0.001 seconds"),
    ("Emotional Trading", "High Risk", "Eliminated"),
    ("24/7 Trading", "Impossible", "Fully Automated"),
];

pub fn run(cli: Cli) -> ExitCode {
    let config = cli.config.as_ref();
    match cli.command {
        Command::Analyze {
            file,
            output,
            format,
            template,
            show_invalid,
        } => run_analyze(
            config,
            &file,
            output.as_ref(),
            format.as_deref(),
            template,
            show_invalid,
        ),
        Command::Explore {
            slippage,
            trades,
            size,
            snap,
            output,
            format,
            template,
        } => run_explore(
            config,
            ExploreArgs {
                slippage,
                trades,
                size,
                snap,
            },
            output.as_ref(),
            format.as_deref(),
            template,
        ),
        Command::Sample { output, force } => run_sample(output.as_ref(), force),
        Command::About => {
            println!("{}", format_about());
            ExitCode::SUCCESS
        }
    }
}

pub fn load_settings(config_path: Option<&PathBuf>) -> Result<Settings, SlippageLabError> {
    match config_path {
        Some(path) => {
            info!(path = %path.display(), "loading config");
            let adapter = FileConfigAdapter::from_file(path)?;
            Settings::from_config(&adapter)
        }
        None => Settings::from_config(&FileConfigAdapter::empty()),
    }
}

pub fn resolve_format(
    flag: Option<&str>,
    settings: &Settings,
) -> Result<ReportFormat, SlippageLabError> {
    match flag {
        Some(f) => f
            .parse()
            .map_err(|e: String| SlippageLabError::invalid("cli", "format", e)),
        None => Ok(settings.report_format),
    }
}

pub fn build_report_port(
    format: ReportFormat,
    settings: &Settings,
    template: Option<PathBuf>,
) -> Box<dyn ReportPort> {
    match format {
        ReportFormat::Typst => {
            let today = chrono::Local::now().date_naive();
            let adapter = TypstReportAdapter::new(settings.currency.clone(), today);
            match template {
                Some(path) => Box::new(adapter.with_template(path)),
                None => Box::new(adapter),
            }
        }
        ReportFormat::Json => {
            if template.is_some() {
                warn!("--template is ignored for json reports");
            }
            Box::new(JsonReportAdapter::new(settings.currency.clone()))
        }
    }
}

/// Read and analyse one upload through an [`UploadSession`].
///
/// Each CLI invocation performs exactly one read, so a fresh session is
/// used and its ticket is always current. Superseded reads only arise for
/// long-lived callers that keep one session across several uploads.
pub fn analyze_source(
    source: &dyn TradeSourcePort,
    app: &mut AppState,
) -> Result<(Vec<TradeRecord>, UploadAnalysis), SlippageLabError> {
    let mut session = UploadSession::new();
    let ticket = session.begin_read();

    let content = match source.read_content() {
        Ok(content) => content,
        Err(e) => {
            let failure = SlippageLabError::Read {
                path: source.name(),
                reason: e.to_string(),
            };
            session.complete(ticket, Err(failure), app);
            return Err(e);
        }
    };
    session.complete(ticket, Ok(content), app);

    match session.state() {
        SessionState::Ready { records, analysis } => Ok((records.clone(), analysis.clone())),
        _ => Err(SlippageLabError::Read {
            path: source.name(),
            reason: "content is not readable as CSV".to_string(),
        }),
    }
}

fn run_analyze(
    config_path: Option<&PathBuf>,
    file: &Path,
    output: Option<&PathBuf>,
    format_flag: Option<&str>,
    template: Option<PathBuf>,
    show_invalid: bool,
) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let format = match resolve_format(format_flag, &settings) {
        Ok(f) => f,
        Err(e) => return fail(&e),
    };

    info!(file = %file.display(), "reading trades");
    let source = CsvFileAdapter::new(file.to_path_buf(), settings.max_upload_bytes);
    let mut app = AppState::new(settings.theme);

    let (records, analysis) = match analyze_source(&source, &mut app) {
        Ok(r) => r,
        Err(e) => return fail(&e),
    };

    println!("{}", format_analysis_summary(&analysis, &settings.currency));
    if show_invalid {
        println!("{}", format_invalid_rows(&records));
    }

    if let Some(path) = output {
        let port = build_report_port(format, &settings, template);
        if let Err(e) = port.write_analysis(&analysis, &source.name(), &path.to_string_lossy()) {
            return fail(&e);
        }
        info!(path = %path.display(), "report written");
    }
    ExitCode::SUCCESS
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ExploreArgs {
    pub slippage: Option<f64>,
    pub trades: Option<f64>,
    pub size: Option<f64>,
    pub snap: bool,
}

/// Flags override configured defaults; `snap` applies slider bounds.
pub fn resolve_params(args: &ExploreArgs, defaults: &SliderParameters) -> SliderParameters {
    let params = SliderParameters {
        current_slippage_pct: args.slippage.unwrap_or(defaults.current_slippage_pct),
        trades_per_month: args.trades.unwrap_or(defaults.trades_per_month),
        avg_trade_size: args.size.unwrap_or(defaults.avg_trade_size),
    };
    if args.snap {
        params.snapped()
    } else {
        params
    }
}

fn run_explore(
    config_path: Option<&PathBuf>,
    args: ExploreArgs,
    output: Option<&PathBuf>,
    format_flag: Option<&str>,
    template: Option<PathBuf>,
) -> ExitCode {
    let settings = match load_settings(config_path) {
        Ok(s) => s,
        Err(e) => return fail(&e),
    };
    let format = match resolve_format(format_flag, &settings) {
        Ok(f) => f,
        Err(e) => return fail(&e),
    };

    let params = resolve_params(&args, &settings.explorer_defaults);
    if !params.in_range() {
        warn!(?params, "inputs are outside the slider ranges");
    }

    let savings = ExplorerSavings::compute(&params);
    println!("{}", format_explorer_summary(&params, &savings, &settings.currency));

    if let Some(path) = output {
        let port = build_report_port(format, &settings, template);
        if let Err(e) = port.write_explorer(&params, &savings, &path.to_string_lossy()) {
            return fail(&e);
        }
        info!(path = %path.display(), "report written");
    }
    ExitCode::SUCCESS
}

pub fn write_sample(output: &Path, force: bool) -> Result<(), SlippageLabError> {
    if output.exists() && !force {
        return Err(SlippageLabError::Io(std::io::Error::new(
            std::io::ErrorKind::AlreadyExists,
            format!("{} already exists (use --force to overwrite)", output.display()),
        )));
    }
    fs::write(output, SAMPLE_CSV)?;
    Ok(())
}

fn run_sample(output: Option<&PathBuf>, force: bool) -> ExitCode {
    let path = output
        .cloned()
        .unwrap_or_else(|| PathBuf::from(SAMPLE_FILE_NAME));
    match write_sample(&path, force) {
        Ok(()) => {
            eprintln!("Sample written to: {}", path.display());
            ExitCode::SUCCESS
        }
        Err(e) => fail(&e),
    }
}

fn fail(err: &SlippageLabError) -> ExitCode {
    eprintln!("error: {err}");
    err.into()
}

pub fn format_analysis_summary(analysis: &UploadAnalysis, currency: &str) -> String {
    let p = &analysis.projections;
    let mut out = String::new();
    out.push_str("=== Slippage Analysis ===\n");
    out.push_str(&format!(
        "Trades processed:  {} of {} rows\n",
        analysis.valid_count, analysis.total_count
    ));
    out.push_str(&format!(
        "Current average:   {:.2}%\n",
        analysis.average_slippage_pct
    ));
    out.push_str(&format!(
        "Optimized target:  {:.1}%\n",
        analysis.optimized_slippage_pct
    ));
    out.push_str(&format!("Improvement:       {:.0}%\n", analysis.improvement_pct));

    out.push_str("\n=== Savings ===\n");
    out.push_str(&format!("Monthly:    {}\n", plain_amount(p.monthly as f64, currency)));
    out.push_str(&format!("3 months:   {}\n", plain_amount(p.quarter as f64, currency)));
    out.push_str(&format!("6 months:   {}\n", plain_amount(p.half_year as f64, currency)));
    out.push_str(&format!("12 months:  {}\n", plain_amount(p.year as f64, currency)));

    if !analysis.breakdown.is_empty() {
        out.push_str("\n=== Per-Trade Savings ===\n");
        for t in &analysis.breakdown {
            out.push_str(&format!(
                "  {:<12} {:>8} @ {:>10.2}  {:>5.2}% -> {:.1}%  {}\n",
                t.symbol,
                t.quantity,
                t.price,
                t.current_slippage_pct,
                t.optimized_slippage_pct,
                plain_amount(t.savings as f64, currency)
            ));
        }
    }
    out
}

pub fn format_invalid_rows(records: &[TradeRecord]) -> String {
    let invalid: Vec<String> = records
        .iter()
        .filter_map(|r| match r.classify() {
            TradeRow::Invalid { record, reason } => {
                Some(format!("  line {}: {}", record.line, reason))
            }
            TradeRow::Valid(_) => None,
        })
        .collect();

    if invalid.is_empty() {
        "No rows excluded.".to_string()
    } else {
        format!("=== Excluded Rows ===\n{}", invalid.join("\n"))
    }
}

pub fn format_explorer_summary(
    params: &SliderParameters,
    savings: &ExplorerSavings,
    currency: &str,
) -> String {
    let mut out = String::new();
    out.push_str("=== Scenario ===\n");
    out.push_str(&format!(
        "Current slippage:  {:.1}%\n",
        params.current_slippage_pct
    ));
    out.push_str(&format!("Trades per month:  {:.0}\n", params.trades_per_month));
    out.push_str(&format!(
        "Avg trade size:    {}\n",
        plain_amount(params.avg_trade_size, currency)
    ));

    out.push_str("\n=== Potential Savings ===\n");
    out.push_str(&format!("Monthly:     {}\n", plain_amount(savings.monthly, currency)));
    out.push_str(&format!("6 months:    {}\n", plain_amount(savings.six_month, currency)));
    out.push_str(&format!("12 months:   {}\n", plain_amount(savings.yearly, currency)));
    out.push_str(&format!("Efficiency:  {:.1}%\n", savings.efficiency_pct));

    out.push_str("\n=== Monthly Loss (manual vs optimized) ===\n");
    for m in explorer::monthly_comparison(savings) {
        out.push_str(&format!(
            "  {}  {:>12}  {:>12}\n",
            m.month,
            plain_amount(m.manual_loss, currency),
            plain_amount(m.algo_loss, currency)
        ));
    }
    out
}

pub fn format_about() -> String {
    let mut out = String::from("=== Manual Trading vs Algo ===\n");
    out.push_str(&format!("{:<20} {:<16} {}\n", "Feature", "Manual", "Algo"));
    for (feature, manual, algo) in EXECUTION_COMPARISON {
        out.push_str(&format!("{:<20} {:<16} {}\n", feature, manual, algo));
    }
    out
}
