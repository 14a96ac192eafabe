use clap::Parser;
use slippagelab::cli::{run, Cli};
use slippagelab::logging::init_tracing;

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    if let Err(e) = init_tracing(&cli.log_level) {
        eprintln!("error: {e}");
        return std::process::ExitCode::from(2);
    }
    run(cli)
}
