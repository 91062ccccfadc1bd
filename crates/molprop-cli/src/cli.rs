use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

const HELP_TEMPLATE: &str = "\
{before-help}{name} {version}
{author-with-newline}{about-with-newline}
{usage-heading} {usage}

{all-args}{after-help}
";

#[derive(Parser, Debug)]
#[command(
    author = "Tony Kan",
    version,
    about = "molprop CLI - Quick estimates of alkane boiling points and polymer glass-transition temperatures.",
    help_template = HELP_TEMPLATE,
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity level (-v for INFO, -vv for DEBUG, -vvv for TRACE)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all log output except for errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Write logs to a specified file in addition to the console output
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Path to a configuration file in TOML format.
    #[arg(short, long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Set a specific configuration value, overriding the config file.
    /// Can be used multiple times. Example: -S tg-coefficients.aromatic-ring=35
    #[arg(short = 'S', long = "set", global = true, value_name = "KEY=VALUE")]
    pub set_values: Vec<String>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Predict the boiling point of a straight-chain alkane from its carbon count.
    BoilingPoint(BoilingPointArgs),
    /// Estimate the glass-transition temperature of a polymer from its monomer SMILES.
    Tg(TgArgs),
    /// Show estimated glass-transition temperatures for common vinyl monomers.
    Monomers,
    /// Write boiling-point predictions for a range of carbon counts as CSV.
    Sweep(SweepArgs),
}

/// Arguments for the `boiling-point` subcommand.
#[derive(Args, Debug)]
pub struct BoilingPointArgs {
    /// Carbon count to predict. Starts an interactive session when omitted.
    #[arg(
        short = 'n',
        long,
        value_name = "INT",
        value_parser = clap::value_parser!(i64).range(1..)
    )]
    pub carbons: Option<i64>,
}

/// Arguments for the `tg` subcommand.
#[derive(Args, Debug)]
pub struct TgArgs {
    /// Monomer in SMILES notation (e.g., 'C=CC1=CC=CC=C1'). Starts an
    /// interactive session when omitted.
    #[arg(short, long, value_name = "SMILES")]
    pub smiles: Option<String>,
}

/// Arguments for the `sweep` subcommand.
#[derive(Args, Debug)]
pub struct SweepArgs {
    /// Largest carbon count in the sweep; predictions cover 1 through this value.
    #[arg(
        short,
        long,
        value_name = "INT",
        default_value_t = 20,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub max: u32,

    /// Path for the CSV output. Writes to stdout when omitted.
    #[arg(short, long, value_name = "PATH")]
    pub output: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn global_flags_are_accepted_after_subcommand() {
        let cli = Cli::parse_from([
            "molprop",
            "tg",
            "--smiles",
            "C=CO",
            "-vv",
            "-S",
            "tg-coefficients.base=120",
            "--set",
            "tg-coefficients.ether=4",
        ]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(
            cli.set_values,
            vec!["tg-coefficients.base=120", "tg-coefficients.ether=4"]
        );
        match cli.command {
            Commands::Tg(args) => assert_eq!(args.smiles.as_deref(), Some("C=CO")),
            other => panic!("Expected 'tg' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn boiling_point_rejects_non_positive_carbon_counts() {
        assert!(Cli::try_parse_from(["molprop", "boiling-point", "--carbons", "0"]).is_err());
        assert!(Cli::try_parse_from(["molprop", "boiling-point", "-n", "-3"]).is_err());
        let cli = Cli::try_parse_from(["molprop", "boiling-point", "-n", "12"]).unwrap();
        match cli.command {
            Commands::BoilingPoint(args) => assert_eq!(args.carbons, Some(12)),
            other => panic!("Expected 'boiling-point' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn sweep_defaults_to_twenty_carbons() {
        let cli = Cli::parse_from(["molprop", "sweep"]);
        match cli.command {
            Commands::Sweep(args) => {
                assert_eq!(args.max, 20);
                assert!(args.output.is_none());
            }
            other => panic!("Expected 'sweep' subcommand, got {:?}", other),
        }
    }

    #[test]
    fn quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["molprop", "monomers", "-q", "-v"]).is_err());
    }
}
