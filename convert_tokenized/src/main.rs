use std::io::BufRead;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use log::info;
use yomi_bench::tokenized::{LineFormat, LineParser};
use yomi_bench::{io, Aligner, Exercise, Solution};

#[derive(Parser, Debug)]
#[clap(
    name = "convert_tokenized",
    about = "A program to convert line-based analyzer output into analyzer output JSON."
)]
struct Args {
    /// Analyzer output, one line per exercise.
    input: PathBuf,

    /// Output path of the analyzer output JSON.
    output: PathBuf,

    /// Format of the input lines: {tokenized, furigana}.
    /// tokenized: words separated by whitespaces, tags attached with slashes.
    /// furigana: readings embedded as {surface/reading}.
    #[clap(long, default_value = "tokenized")]
    format: LineFormat,

    /// Index of the tag holding the reading, starting from 0.
    ///
    /// The last tag is used if not specified.
    #[clap(long)]
    reading_tag: Option<usize>,

    /// Gold corpus used to check that every line reproduces its sentence.
    #[clap(long)]
    corpus: Option<PathBuf>,
}

fn parse_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        process::exit(code);
    })
}

fn check_corpus(
    exercises: &[Exercise],
    solutions: &[Solution],
) -> Result<(), Box<dyn std::error::Error>> {
    if exercises.len() != solutions.len() {
        return Err(format!(
            "the corpus has {} exercises, but the input has {} lines",
            exercises.len(),
            solutions.len()
        )
        .into());
    }
    let aligner = Aligner::new();
    for (i, (exercise, solution)) in exercises.iter().zip(solutions).enumerate() {
        aligner
            .verify(exercise, solution)
            .map_err(|e| format!("line {}: {}", i + 1, e))?;
    }
    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = parse_args();

    let mut parser = LineParser::new(args.format);
    if let Some(i) = args.reading_tag {
        parser = parser.reading_tag(i);
    }

    info!("Parsing analyzer output...");
    let rdr = std::io::BufReader::new(io::open_reader(&args.input)?);
    let mut solutions = vec![];
    for (i, line) in rdr.lines().enumerate() {
        let line = line?;
        let line = line.strip_suffix('\r').unwrap_or(&line);
        solutions.push(parser.parse(i + 1, line)?);
    }

    if let Some(path) = args.corpus {
        info!("Checking against the corpus...");
        let exercises: Vec<Exercise> = io::read_json(path)?;
        check_corpus(&exercises, &solutions)?;
    }

    info!("Saving {} solutions...", solutions.len());
    io::write_json(&args.output, &solutions)?;

    Ok(())
}
