use std::path::{Path, PathBuf};
use std::process;
use std::str::FromStr;

use clap::Parser;
use log::info;
use serde::Serialize;
use yomi_bench::{
    io, is_correct, tally, Aligner, CharUnit, Exercise, Gradable, GradableBuilder,
    GradeRegistry, Report, Solution, TagTally, Validation,
};

const DEFAULT_ANALYZERS: [&str; 4] = [
    "fugashi=./analyzers/fugashi/output.json",
    "spacy=./analyzers/spacy[ja]/output.json",
    "sudachi=./analyzers/sudachi-wasm/output.json",
    "yomikata=./analyzers/yomikata/output.json",
];

#[derive(Clone, Debug)]
struct AnalyzerOutput {
    name: String,
    path: PathBuf,
}

impl FromStr for AnalyzerOutput {
    type Err = &'static str;
    fn from_str(arg: &str) -> Result<Self, Self::Err> {
        match arg.split_once('=') {
            Some((name, path)) if !name.is_empty() && !path.is_empty() => Ok(Self {
                name: name.to_string(),
                path: PathBuf::from(path),
            }),
            _ => Err("Could not parse an analyzer value: expected NAME=PATH"),
        }
    }
}

#[derive(Parser, Debug)]
#[clap(
    name = "evaluate",
    about = "A program to evaluate the readings predicted by morphological analyzers."
)]
struct Args {
    /// Gold corpus.
    #[clap(long, default_value = "challenge-sentences.json")]
    corpus: PathBuf,

    /// Output of an analyzer, given as NAME=PATH.
    ///
    /// Analyzers are reported in the order they are specified.
    #[clap(long = "analyzer", default_values = DEFAULT_ANALYZERS)]
    analyzers: Vec<AnalyzerOutput>,

    /// Output path of the chart series.
    #[clap(long, default_value = "./public/benchmark-results.json")]
    output: PathBuf,

    /// Unit of character offsets: {char, grapheme}.
    #[clap(long, default_value = "char")]
    unit: CharUnit,

    /// Policy for analyzer tokens that do not reproduce the sentence: {strict, warn, off}.
    #[clap(long, default_value = "warn")]
    validation: Validation,

    /// Writes every graded segment to a CSV file.
    #[clap(long)]
    dump_gradables: Option<PathBuf>,
}

#[derive(Serialize)]
struct GradableRecord<'a> {
    analyzer: &'a str,
    text: &'a str,
    tags: String,
    yomi_expected: &'a str,
    yomi_actual: &'a str,
    correct: bool,
}

fn dump_gradables(path: &Path, gradables: &[Gradable]) -> yomi_bench::Result<()> {
    io::write_with(path, |w| {
        let mut wtr = csv::Writer::from_writer(w);
        for g in gradables {
            wtr.serialize(GradableRecord {
                analyzer: &g.analyzer,
                text: &g.text,
                tags: g.tags.join("|"),
                yomi_expected: &g.yomi_expected,
                yomi_actual: &g.yomi_actual,
                correct: is_correct(g),
            })
            .map_err(std::io::Error::from)?;
        }
        wtr.flush()?;
        Ok(())
    })
}

/// Grades every analyzer and writes the outputs.
///
/// The report is written last, so it is not left behind when an earlier output fails.
fn run(args: &Args) -> Result<Vec<TagTally>, Box<dyn std::error::Error>> {
    info!("Loading corpus...");
    let exercises: Vec<Exercise> = io::read_json(&args.corpus)?;

    let aligner = Aligner::new().unit(args.unit);
    let mut builder = GradableBuilder::new(aligner).validation(args.validation);
    for analyzer in &args.analyzers {
        info!("Loading {}...", analyzer.name);
        let solutions: Vec<Solution> = io::read_json(&analyzer.path)?;
        builder.ingest(&analyzer.name, &exercises, &solutions)?;
    }
    let gradables = builder.into_gradables();
    info!("{} gradables", gradables.len());

    let mut grader = GradeRegistry::new();
    grader.grade(&gradables);

    let tallies = tally(grader.outcomes());
    let report = Report::from_tallies(&tallies);

    if let Some(path) = &args.dump_gradables {
        info!("Saving gradables...");
        dump_gradables(path, &gradables)?;
    }

    info!("Saving report...");
    io::write_json(&args.output, &report)?;

    Ok(tallies)
}

fn parse_args() -> Args {
    Args::try_parse().unwrap_or_else(|e| {
        let code = if e.use_stderr() { 1 } else { 0 };
        let _ = e.print();
        process::exit(code);
    })
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = parse_args();

    let tallies = run(&args)?;

    for t in &tallies {
        for a in &t.analyzers {
            println!(
                "{}\t{}\t{}/{}\t{}%",
                t.tag,
                a.analyzer,
                a.tally.pass,
                a.tally.total,
                a.tally.percentage()
            );
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_args() {
        let args = Args::try_parse_from(["evaluate"]).unwrap();

        let names: Vec<&str> = args.analyzers.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(vec!["fugashi", "spacy", "sudachi", "yomikata"], names);
        assert_eq!(
            PathBuf::from("./analyzers/spacy[ja]/output.json"),
            args.analyzers[1].path
        );
        assert_eq!(PathBuf::from("challenge-sentences.json"), args.corpus);
        assert_eq!(CharUnit::Char, args.unit);
        assert_eq!(Validation::Warn, args.validation);
    }

    #[test]
    fn test_custom_analyzers() {
        let args = Args::try_parse_from([
            "evaluate",
            "--analyzer",
            "vaporetto=out/vaporetto.json.zst",
            "--analyzer",
            "mecab=out/mecab.json",
            "--unit",
            "grapheme",
        ])
        .unwrap();

        let names: Vec<&str> = args.analyzers.iter().map(|a| a.name.as_str()).collect();
        assert_eq!(vec!["vaporetto", "mecab"], names);
        assert_eq!(CharUnit::Grapheme, args.unit);
    }

    use std::env;
    use std::ffi::OsString;
    use std::fs;

    fn temp_dir(name: &str) -> PathBuf {
        let dir = env::temp_dir().join(format!("evaluate_{}_{}", process::id(), name));
        fs::create_dir_all(&dir).unwrap();
        fs::write(
            dir.join("corpus.json"),
            r#"[{"segments": ["私", {"text": "は", "yomi": "は", "tags": ["particle"]}]}]"#,
        )
        .unwrap();
        fs::write(
            dir.join("mecab.json"),
            r#"[{"tokens": [{"text": "私", "yomi": "ワタシ"}, {"text": "は", "yomi": "ワ"}]}]"#,
        )
        .unwrap();
        dir
    }

    fn args_in(dir: &Path, dump: &Path) -> Args {
        Args::try_parse_from([
            OsString::from("evaluate"),
            "--corpus".into(),
            dir.join("corpus.json").into_os_string(),
            "--analyzer".into(),
            format!("mecab={}", dir.join("mecab.json").display()).into(),
            "--output".into(),
            dir.join("report.json").into_os_string(),
            "--dump-gradables".into(),
            dump.as_os_str().to_owned(),
        ])
        .unwrap()
    }

    #[test]
    fn test_run_writes_outputs() {
        let dir = temp_dir("ok");
        let args = args_in(&dir, &dir.join("gradables.csv"));

        let tallies = run(&args).unwrap();
        let report = fs::read_to_string(dir.join("report.json")).unwrap();
        let dump = fs::read_to_string(dir.join("gradables.csv")).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!("particle", tallies[0].tag);
        assert!(report.contains("\"y\": 0"));
        assert!(dump.starts_with("analyzer,text,tags,yomi_expected,yomi_actual,correct\n"));
        assert!(dump.contains("mecab,は,particle,は,ワ,false"));
    }

    #[test]
    fn test_run_failed_dump_skips_report() {
        let dir = temp_dir("failed_dump");
        let args = args_in(&dir, &dir.join("missing").join("gradables.csv"));

        let result = run(&args);
        let report_written = dir.join("report.json").exists();
        fs::remove_dir_all(&dir).unwrap();

        assert!(result.is_err());
        assert!(!report_written);
    }

    #[test]
    fn test_invalid_analyzer() {
        assert!("mecab".parse::<AnalyzerOutput>().is_err());
        assert!("=out.json".parse::<AnalyzerOutput>().is_err());
        assert!(Args::try_parse_from(["evaluate", "--analyzer", "mecab"]).is_err());
    }
}
