use crate::error::Result;
use molprop::engine::config::ModelConfig;
use molprop::workflows::glass_transition::{DEMONSTRATION_MONOMERS, TgEstimator};
use std::io::{self, Write};

const SEPARATOR_WIDTH: usize = 50;

pub fn run(config: &ModelConfig) -> Result<()> {
    let estimator = TgEstimator::new(config.tg_coefficients);
    let stdout = io::stdout();
    write_table(&estimator, &mut stdout.lock())
}

fn write_table<W: Write>(estimator: &TgEstimator, out: &mut W) -> Result<()> {
    let separator = "-".repeat(SEPARATOR_WIDTH);
    writeln!(out, "Predicted glass-transition temperatures of common monomers:")?;
    writeln!(out, "{}", separator)?;
    for (name, smiles) in DEMONSTRATION_MONOMERS {
        let prediction = estimator.predict(smiles)?;
        writeln!(out, "{} (SMILES: {}):", name, smiles)?;
        writeln!(out, "  {}", super::tg::format_prediction(&prediction))?;
        writeln!(out, "{}", separator)?;
    }
    Ok(())
}
