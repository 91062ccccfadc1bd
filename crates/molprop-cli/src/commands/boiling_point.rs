use crate::cli::BoilingPointArgs;
use crate::error::Result;
use crate::prompt::{Prompt, Reply};
use molprop::engine::config::ModelConfig;
use molprop::workflows::boiling_point::BoilingPointPredictor;
use std::io::{self, BufRead, Write};
use tracing::{debug, info};

pub fn run(args: BoilingPointArgs, config: &ModelConfig) -> Result<()> {
    let predictor = BoilingPointPredictor::from_table(&config.reference_table)?;

    match args.carbons {
        Some(carbons) => {
            println!("{}", format_prediction(carbons, predictor.predict(carbons)));
            Ok(())
        }
        None => {
            info!("Starting interactive boiling-point session.");
            let stdin = io::stdin();
            let mut prompt = Prompt::new(stdin.lock(), io::stdout());
            interact(&predictor, &mut prompt)
        }
    }
}

pub fn format_prediction(carbons: i64, boiling_point: f64) -> String {
    let hydrogens = 2 * i128::from(carbons) + 2;
    format!(
        "C{}H{} predicted boiling point: {:.1} °C",
        carbons, hydrogens, boiling_point
    )
}

fn interact<R: BufRead, W: Write>(
    predictor: &BoilingPointPredictor,
    prompt: &mut Prompt<R, W>,
) -> Result<()> {
    loop {
        let answer = match prompt.ask("Enter the carbon count of an alkane (or 'q' to quit): ")? {
            Reply::Answer(answer) => answer,
            Reply::Quit | Reply::Closed => break,
        };

        let carbons = match answer.parse::<i64>() {
            Ok(n) if n > 0 => n,
            Ok(n) => {
                debug!(input = n, "Rejected non-positive carbon count");
                prompt.say("Please enter a positive integer.")?;
                prompt.blank_line()?;
                continue;
            }
            Err(_) => {
                prompt.say("Please enter a valid number.")?;
                prompt.blank_line()?;
                continue;
            }
        };

        prompt.say(format_prediction(carbons, predictor.predict(carbons)))?;

        if prompt.confirm("Show predictions over a range of carbon counts? (y/n): ")? {
            match prompt.ask("Enter the largest carbon count: ")? {
                Reply::Answer(answer) => match answer.parse::<u32>() {
                    Ok(max) if max > 0 => show_table(predictor, max, prompt)?,
                    _ => prompt.say("Please enter a valid number.")?,
                },
                Reply::Quit | Reply::Closed => break,
            }
        }
        prompt.blank_line()?;
    }
    Ok(())
}

fn show_table<R: BufRead, W: Write>(
    predictor: &BoilingPointPredictor,
    max_carbon: u32,
    prompt: &mut Prompt<R, W>,
) -> Result<()> {
    prompt.say(format!("{:>8}  {:>10}", "Carbons", "BP (°C)"))?;
    for (carbons, boiling_point) in predictor.sweep(max_carbon) {
        prompt.say(format!("{:>8}  {:>10.1}", carbons, boiling_point))?;
    }
    Ok(())
}
