use crate::cli::SweepArgs;
use crate::error::{CliError, Result};
use molprop::engine::config::ModelConfig;
use molprop::workflows::boiling_point::BoilingPointPredictor;
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use tracing::info;

#[derive(Serialize)]
struct SweepRow {
    carbon_count: u32,
    boiling_point: f64,
}

pub fn run(args: SweepArgs, config: &ModelConfig) -> Result<()> {
    let predictor = BoilingPointPredictor::from_table(&config.reference_table)?;
    let rows = predictor.sweep(args.max);

    match &args.output {
        Some(path) => {
            info!("Writing {} predictions to {:?}", rows.len(), path);
            write_csv(&rows, File::create(path)?)?;
            println!(
                "Boiling points for C1 through C{} written to: {}",
                args.max,
                path.display()
            );
        }
        None => write_csv(&rows, io::stdout().lock())?,
    }
    Ok(())
}

fn write_csv<W: Write>(rows: &[(u32, f64)], writer: W) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    for &(carbon_count, boiling_point) in rows {
        csv_writer
            .serialize(SweepRow {
                carbon_count,
                boiling_point,
            })
            .map_err(|e| CliError::Io(e.into()))?;
    }
    csv_writer.flush()?;
    Ok(())
}
