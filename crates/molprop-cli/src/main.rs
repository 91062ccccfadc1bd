mod cli;
mod commands;
mod config;
mod error;
mod logging;
mod prompt;

use crate::cli::{Cli, Commands};
use crate::error::{CliError, Result};
use clap::Parser;
use tracing::{debug, error, info};

fn main() {
    if let Err(e) = run_app() {
        eprintln!("\n❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn run_app() -> Result<()> {
    let cli = Cli::parse();
    logging::setup_logging(cli.verbose, cli.quiet, cli.log_file.clone())?;

    let (panic_hook, eyre_hook) = color_eyre::config::HookBuilder::default().into_hooks();
    eyre_hook.install().map_err(|e| CliError::Other(e.into()))?;
    std::panic::set_hook(Box::new(move |pi| {
        error!("{}", panic_hook.panic_report(pi));
    }));

    info!("🚀 molprop CLI v{} starting up.", env!("CARGO_PKG_VERSION"));
    debug!("Full CLI arguments parsed: {:?}", &cli);

    let command_result = dispatch(cli);

    match &command_result {
        Ok(_) => info!("✅ Command completed successfully."),
        Err(e) => error!("❌ Command failed: {}", e),
    }

    command_result
}

fn dispatch(cli: Cli) -> Result<()> {
    let model_config = config::resolve(&cli)?;

    match cli.command {
        Commands::BoilingPoint(args) => {
            info!("Dispatching to 'boiling-point' command.");
            commands::boiling_point::run(args, &model_config)
        }
        Commands::Tg(args) => {
            info!("Dispatching to 'tg' command.");
            commands::tg::run(args, &model_config)
        }
        Commands::Monomers => {
            info!("Dispatching to 'monomers' command.");
            commands::monomers::run(&model_config)
        }
        Commands::Sweep(args) => {
            info!("Dispatching to 'sweep' command.");
            commands::sweep::run(args, &model_config)
        }
    }
}
