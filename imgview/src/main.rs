use anyhow::Result;
use clap::Parser;
use imgview::app;
use imgview::args::Args;
use imgview::config::ViewerConfig;
use std::process::ExitCode;
use tracing::{error, info};

fn init_logging(verbose: bool) {
    let log_level = if verbose { "debug" } else { "info" };

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("imgview={},iv_display={},iv_input={}", log_level, log_level, log_level)
                    .into()
            }),
        )
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

fn run(args: &Args) -> Result<()> {
    let config = ViewerConfig::load(args.config.as_deref())?;
    app::run(&config, &args.image)
}

fn main() -> ExitCode {
    // Usage errors print usage and exit 2; --help and --version exit 0.
    let args = Args::parse();

    init_logging(args.verbose);
    info!("Starting imgview {}", env!("CARGO_PKG_VERSION"));

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            ExitCode::FAILURE
        }
    }
}
