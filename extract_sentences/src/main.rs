use std::io::Write;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;
use yomi_bench::{io, Exercise};

#[derive(Parser, Debug)]
#[clap(
    name = "extract_sentences",
    about = "A program to write the sentences of a gold corpus, one per line, as input for an analyzer."
)]
struct Args {
    /// Gold corpus.
    input: PathBuf,

    /// Output path of the raw sentences.
    output: PathBuf,
}

fn parse_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        process::exit(code);
    })
}

fn sentences(exercises: &[Exercise]) -> Result<Vec<String>, String> {
    exercises
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let sentence = e.sentence();
            if sentence.contains(['\n', '\r']) {
                Err(format!("exercise {i} contains a line break"))
            } else {
                Ok(sentence)
            }
        })
        .collect()
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = parse_args();

    info!("Loading corpus...");
    let exercises: Vec<Exercise> = io::read_json(&args.input)?;
    let sentences = sentences(&exercises)?;

    info!("Saving {} sentences...", sentences.len());
    io::write_with(&args.output, |wtr| {
        for sentence in &sentences {
            writeln!(wtr, "{}", sentence)?;
        }
        Ok(())
    })?;

    Ok(())
}
