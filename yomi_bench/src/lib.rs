//! # yomi_bench
//!
//! Measures how well Japanese morphological analyzers predict the readings (yomi) of annotated
//! spans in a gold corpus.
//!
//! Each analyzer tokenizes the sentences on its own, so its tokens rarely coincide with the gold
//! segments. [`Aligner`] maps every segment to the tokens overlapping it, [`GradableBuilder`]
//! collects the segments carrying an expected reading, [`GradeRegistry`] compares the readings
//! after kana normalization, and [`Report`] summarizes the accuracy by tag and analyzer.
//!
//! ## Examples
//!
//! ```
//! use yomi_bench::{
//!     Aligner, AnalyzerToken, Exercise, GradableBuilder, GradeRegistry, Segment, Solution,
//! };
//!
//! let exercises = vec![Exercise::new(vec![
//!     Segment::from("私"),
//!     Segment::annotated("は", Some("は"), &["particle"]),
//! ])];
//! let solutions = vec![Solution::new(vec![
//!     AnalyzerToken::new("私", "ワタシ"),
//!     AnalyzerToken::new("は", "ハ"),
//! ])];
//!
//! let mut builder = GradableBuilder::new(Aligner::new());
//! builder.ingest("mecab", &exercises, &solutions).unwrap();
//!
//! let mut grader = GradeRegistry::new();
//! grader.grade(builder.gradables());
//! let report = grader.to_report();
//!
//! assert_eq!("particle", report.series[0].name);
//! assert_eq!(100, report.series[0].data[0].y);
//! ```

mod align;
mod corpus;
mod errors;
mod gradable;
mod grader;
mod report;

pub mod io;
pub mod kana;
pub mod tokenized;

pub use align::{Aligner, Alignment, CharUnit, Validation};
pub use corpus::{AnalyzerToken, AnnotatedSegment, Exercise, Segment, Solution};
pub use errors::{
    InvalidArgumentError, InvalidFormatError, MisalignedError, Result, YomiBenchError,
};
pub use gradable::{extract, Gradable, GradableBuilder};
pub use grader::{is_correct, GradeRegistry, Outcome};
pub use report::{tally, AnalyzerTally, DataPoint, Report, Series, TagTally, Tally};
