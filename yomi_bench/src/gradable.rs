//! Extraction of the gradable segments of aligned exercises.

use log::{debug, warn};
use serde::Serialize;

use crate::align::{Aligner, Alignment, Validation};
use crate::corpus::{Exercise, Solution};
use crate::errors::{Result, YomiBenchError};

/// Expected reading of a segment paired with the reading an analyzer produced for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Gradable {
    pub analyzer: String,
    pub text: String,
    pub tags: Vec<String>,
    pub yomi_expected: String,
    pub yomi_actual: String,
}

/// Extracts gradables from alignments.
///
/// Segments without an expected reading are skipped.
///
/// # Arguments
///
/// * `analyzer` - Name of the analyzer that produced the aligned tokens.
/// * `alignments` - Alignments of one exercise.
pub fn extract(analyzer: &str, alignments: &[Alignment]) -> Vec<Gradable> {
    alignments
        .iter()
        .filter_map(|a| {
            let yomi_expected = a.segment.yomi()?;
            Some(Gradable {
                analyzer: analyzer.to_string(),
                text: a.segment.text().to_string(),
                tags: a.segment.tags().to_vec(),
                yomi_expected: yomi_expected.to_string(),
                yomi_actual: a.tokens.iter().map(|t| t.yomi()).collect(),
            })
        })
        .collect()
}

/// Accumulates gradables over the outputs of several analyzers.
#[derive(Debug, Default)]
pub struct GradableBuilder {
    aligner: Aligner,
    validation: Validation,
    gradables: Vec<Gradable>,
}

impl GradableBuilder {
    pub fn new(aligner: Aligner) -> Self {
        Self {
            aligner,
            validation: Validation::default(),
            gradables: vec![],
        }
    }

    /// Sets the policy for solutions that do not reproduce their sentence.
    pub fn validation(mut self, validation: Validation) -> Self {
        self.validation = validation;
        self
    }

    /// Aligns the solutions of an analyzer and appends the gradables.
    ///
    /// # Arguments
    ///
    /// * `analyzer` - Name of the analyzer.
    /// * `exercises` - Gold exercises.
    /// * `solutions` - Analyzer output, matched to `exercises` by index.
    ///
    /// # Errors
    ///
    /// Error is returned when
    ///   - `solutions` is shorter than `exercises`, or
    ///   - the validation is strict and a solution does not reproduce its sentence.
    pub fn ingest(
        &mut self,
        analyzer: &str,
        exercises: &[Exercise],
        solutions: &[Solution],
    ) -> Result<()> {
        if solutions.len() < exercises.len() {
            return Err(YomiBenchError::invalid_argument(
                "solutions",
                format!(
                    "{analyzer}: expected {} solutions, got {}",
                    exercises.len(),
                    solutions.len()
                ),
            ));
        }
        if solutions.len() > exercises.len() {
            warn!(
                "{analyzer}: ignoring {} solutions without an exercise",
                solutions.len() - exercises.len()
            );
        }

        let n_before = self.gradables.len();
        for (i, (exercise, solution)) in exercises.iter().zip(solutions).enumerate() {
            if self.validation != Validation::Off {
                if let Err(e) = self.aligner.verify(exercise, solution) {
                    if self.validation == Validation::Strict {
                        return Err(e.into());
                    }
                    warn!("{analyzer}: exercise {i}: {e}");
                }
            }
            let alignments = self.aligner.align(exercise, solution);
            self.gradables.extend(extract(analyzer, &alignments));
        }
        debug!("{analyzer}: {} gradables", self.gradables.len() - n_before);
        Ok(())
    }

    pub fn gradables(&self) -> &[Gradable] {
        &self.gradables
    }

    pub fn into_gradables(self) -> Vec<Gradable> {
        self.gradables
    }
}
