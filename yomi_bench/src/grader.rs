//! Grading of readings, one outcome per tag.

use serde::Serialize;

use crate::gradable::Gradable;
use crate::kana::normalize_reading;
use crate::report::Report;

/// Correctness of one gradable, counted under one of its tags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Outcome {
    pub tag: String,
    pub analyzer: String,
    pub is_correct: bool,
}

/// Checks whether the analyzer reading matches the expected one, ignoring the kana script.
pub fn is_correct(gradable: &Gradable) -> bool {
    normalize_reading(&gradable.yomi_expected) == normalize_reading(&gradable.yomi_actual)
}

/// Running list of outcomes.
#[derive(Debug, Default)]
pub struct GradeRegistry {
    results: Vec<Outcome>,
}

impl GradeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Grades gradables and appends one outcome per tag.
    ///
    /// Gradables without tags produce no outcome.
    pub fn grade(&mut self, gradables: &[Gradable]) {
        for gradable in gradables {
            let is_correct = is_correct(gradable);
            for tag in &gradable.tags {
                self.results.push(Outcome {
                    tag: tag.clone(),
                    analyzer: gradable.analyzer.clone(),
                    is_correct,
                });
            }
        }
    }

    pub fn outcomes(&self) -> &[Outcome] {
        &self.results
    }

    pub fn to_report(&self) -> Report {
        Report::from_outcomes(&self.results)
    }
}
