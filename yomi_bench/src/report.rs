//! Aggregation of outcomes into chart series.

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::grader::Outcome;

/// Pass and total counts of one (tag, analyzer) group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Tally {
    pub pass: usize,
    pub total: usize,
}

impl Tally {
    fn add(&mut self, is_correct: bool) {
        self.total += 1;
        if is_correct {
            self.pass += 1;
        }
    }

    /// Gets the accuracy as an integer percentage, rounding halves up.
    ///
    /// # Examples
    ///
    /// ```
    /// use yomi_bench::Tally;
    ///
    /// assert_eq!(33, Tally { pass: 1, total: 3 }.percentage());
    /// assert_eq!(50, Tally { pass: 1, total: 2 }.percentage());
    /// ```
    pub fn percentage(&self) -> u32 {
        if self.total == 0 {
            return 0;
        }
        // round(100 * pass / total) == floor((200 * pass + total) / (2 * total))
        ((200 * self.pass + self.total) / (2 * self.total)) as u32
    }
}

/// Tally of one analyzer under a tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyzerTally {
    pub analyzer: String,
    pub tally: Tally,
}

/// Tallies of all analyzers under one tag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagTally {
    pub tag: String,
    pub analyzers: Vec<AnalyzerTally>,
}

/// Groups outcomes by tag, then by analyzer.
///
/// Tags and analyzers keep the order in which they first appear in `outcomes`.
pub fn tally(outcomes: &[Outcome]) -> Vec<TagTally> {
    let mut tags: Vec<TagTally> = vec![];
    let mut tag_ids: HashMap<&str, usize> = HashMap::new();
    let mut analyzer_ids: HashMap<(usize, &str), usize> = HashMap::new();

    for outcome in outcomes {
        let tag_id = *tag_ids.entry(outcome.tag.as_str()).or_insert_with(|| {
            tags.push(TagTally {
                tag: outcome.tag.clone(),
                analyzers: vec![],
            });
            tags.len() - 1
        });
        let analyzers = &mut tags[tag_id].analyzers;
        let analyzer_id = *analyzer_ids
            .entry((tag_id, outcome.analyzer.as_str()))
            .or_insert_with(|| {
                analyzers.push(AnalyzerTally {
                    analyzer: outcome.analyzer.clone(),
                    tally: Tally::default(),
                });
                analyzers.len() - 1
            });
        analyzers[analyzer_id].tally.add(outcome.is_correct);
    }

    tags
}

/// Accuracy of one analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct DataPoint {
    /// Analyzer name.
    pub x: String,

    /// Percentage of correct readings.
    pub y: u32,
}

/// Accuracies of all analyzers under one tag.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Series {
    /// Tag name.
    pub name: String,

    pub data: Vec<DataPoint>,
}

/// Chart-ready report, serialized as an array of series.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(transparent)]
pub struct Report {
    pub series: Vec<Series>,
}

impl Report {
    pub fn from_tallies(tallies: &[TagTally]) -> Self {
        let series = tallies
            .iter()
            .map(|t| Series {
                name: t.tag.clone(),
                data: t
                    .analyzers
                    .iter()
                    .map(|a| DataPoint {
                        x: a.analyzer.clone(),
                        y: a.tally.percentage(),
                    })
                    .collect(),
            })
            .collect();
        Self { series }
    }

    pub fn from_outcomes(outcomes: &[Outcome]) -> Self {
        Self::from_tallies(&tally(outcomes))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(tag: &str, analyzer: &str, is_correct: bool) -> Outcome {
        Outcome {
            tag: tag.to_string(),
            analyzer: analyzer.to_string(),
            is_correct,
        }
    }

    #[test]
    fn test_percentage_rounding() {
        assert_eq!(33, Tally { pass: 1, total: 3 }.percentage());
        assert_eq!(67, Tally { pass: 2, total: 3 }.percentage());
        assert_eq!(50, Tally { pass: 1, total: 2 }.percentage());
        assert_eq!(13, Tally { pass: 1, total: 8 }.percentage());
        assert_eq!(0, Tally { pass: 0, total: 5 }.percentage());
        assert_eq!(100, Tally { pass: 5, total: 5 }.percentage());
    }

    #[test]
    fn test_tally_first_seen_order() {
        let outcomes = vec![
            outcome("verb", "sudachi", true),
            outcome("particle", "mecab", false),
            outcome("verb", "mecab", true),
            outcome("verb", "sudachi", false),
            outcome("particle", "sudachi", true),
        ];

        let expected = vec![
            TagTally {
                tag: "verb".to_string(),
                analyzers: vec![
                    AnalyzerTally {
                        analyzer: "sudachi".to_string(),
                        tally: Tally { pass: 1, total: 2 },
                    },
                    AnalyzerTally {
                        analyzer: "mecab".to_string(),
                        tally: Tally { pass: 1, total: 1 },
                    },
                ],
            },
            TagTally {
                tag: "particle".to_string(),
                analyzers: vec![
                    AnalyzerTally {
                        analyzer: "mecab".to_string(),
                        tally: Tally { pass: 0, total: 1 },
                    },
                    AnalyzerTally {
                        analyzer: "sudachi".to_string(),
                        tally: Tally { pass: 1, total: 1 },
                    },
                ],
            },
        ];
        assert_eq!(expected, tally(&outcomes));
    }

    #[test]
    fn test_report_from_outcomes() {
        let outcomes = vec![
            outcome("verb", "mecab", true),
            outcome("verb", "mecab", false),
            outcome("verb", "mecab", false),
            outcome("verb", "sudachi", true),
            outcome("verb", "sudachi", false),
        ];

        let expected = Report {
            series: vec![Series {
                name: "verb".to_string(),
                data: vec![
                    DataPoint {
                        x: "mecab".to_string(),
                        y: 33,
                    },
                    DataPoint {
                        x: "sudachi".to_string(),
                        y: 50,
                    },
                ],
            }],
        };
        assert_eq!(expected, Report::from_outcomes(&outcomes));
    }

    #[test]
    fn test_report_empty() {
        assert_eq!(Report::default(), Report::from_outcomes(&[]));
    }

    #[test]
    fn test_report_json_shape() {
        let report = Report::from_outcomes(&[outcome("particle", "mecab", true)]);

        assert_eq!(
            r#"[{"name":"particle","data":[{"x":"mecab","y":100}]}]"#,
            serde_json::to_string(&report).unwrap()
        );
    }
}
