use crate::cli::TgArgs;
use crate::error::Result;
use crate::prompt::{Prompt, Reply};
use molprop::core::descriptors::DescriptorVector;
use molprop::engine::config::ModelConfig;
use molprop::workflows::glass_transition::{TgEstimator, TgPrediction};
use std::io::{self, BufRead, Write};
use tracing::{info, warn};

pub fn run(args: TgArgs, config: &ModelConfig) -> Result<()> {
    let estimator = TgEstimator::new(config.tg_coefficients);

    match args.smiles {
        Some(smiles) => {
            let prediction = estimator.predict(&smiles)?;
            info!("{}", describe(&prediction.descriptors));
            println!("{}", format_prediction(&prediction));
            Ok(())
        }
        None => {
            info!("Starting interactive Tg session.");
            let stdin = io::stdin();
            let mut prompt = Prompt::new(stdin.lock(), io::stdout());
            interact(&estimator, &mut prompt)
        }
    }
}

pub fn format_prediction(prediction: &TgPrediction) -> String {
    format!(
        "Predicted Tg = {:.1} K ({:.1} °C)",
        prediction.kelvin,
        prediction.celsius()
    )
}

fn describe(d: &DescriptorVector) -> String {
    format!(
        "MW {:.3}, rotatable bonds {}, H-bond donors {}, acceptors {}, aromatic rings {}, \
         amide {}, ester {}, ether {}, alcohol {}",
        d.molecular_weight,
        d.rotatable_bonds,
        d.h_donors,
        d.h_acceptors,
        d.aromatic_rings,
        d.amide_groups,
        d.ester_groups,
        d.ether_groups,
        d.alcohol_groups
    )
}

fn interact<R: BufRead, W: Write>(
    estimator: &TgEstimator,
    prompt: &mut Prompt<R, W>,
) -> Result<()> {
    prompt.say("Enter a monomer in SMILES notation (or 'q' to quit):")?;
    loop {
        let smiles = match prompt.ask("> ")? {
            Reply::Answer(answer) => answer,
            Reply::Quit | Reply::Closed => break,
        };

        match estimator.predict(&smiles) {
            Ok(prediction) => {
                info!("{}", describe(&prediction.descriptors));
                prompt.say(format_prediction(&prediction))?;
            }
            Err(e) => {
                warn!("{}", e);
                prompt.say("Invalid SMILES notation. Please try again.")?;
            }
        }
    }
    Ok(())
}
