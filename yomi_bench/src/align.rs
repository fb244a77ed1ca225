//! Alignment of gold segments to analyzer tokens.

use std::ops::Range;
use std::str::FromStr;

use unicode_segmentation::UnicodeSegmentation;

use crate::corpus::{AnalyzerToken, Exercise, Segment, Solution};
use crate::errors::MisalignedError;

/// Unit used to measure offsets in both gold text and analyzer text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CharUnit {
    /// Unicode scalar value.
    #[default]
    Char,

    /// Extended grapheme cluster.
    Grapheme,
}

impl CharUnit {
    /// Splits a text into units.
    pub fn units(self, text: &str) -> Vec<&str> {
        match self {
            Self::Char => text
                .char_indices()
                .map(|(i, c)| &text[i..i + c.len_utf8()])
                .collect(),
            Self::Grapheme => text.graphemes(true).collect(),
        }
    }

    /// Returns the byte offsets where units start, followed by the length of the text.
    fn boundaries(self, text: &str) -> Vec<usize> {
        let mut bounds: Vec<usize> = match self {
            Self::Char => text.char_indices().map(|(i, _)| i).collect(),
            Self::Grapheme => text.grapheme_indices(true).map(|(i, _)| i).collect(),
        };
        bounds.push(text.len());
        bounds
    }

    /// Counts the units in a text.
    ///
    /// # Examples
    ///
    /// ```
    /// use yomi_bench::CharUnit;
    ///
    /// assert_eq!(2, CharUnit::Char.count("\u{1f44f}\u{1f3fd}"));
    /// assert_eq!(1, CharUnit::Grapheme.count("\u{1f44f}\u{1f3fd}"));
    /// ```
    pub fn count(self, text: &str) -> usize {
        match self {
            Self::Char => text.chars().count(),
            Self::Grapheme => text.graphemes(true).count(),
        }
    }
}

impl FromStr for CharUnit {
    type Err = &'static str;
    fn from_str(unit: &str) -> Result<Self, Self::Err> {
        match unit {
            "char" => Ok(Self::Char),
            "grapheme" => Ok(Self::Grapheme),
            _ => Err("Could not parse a unit value"),
        }
    }
}

/// What to do when the analyzer tokens do not reproduce the gold sentence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Validation {
    /// Abort with an error.
    Strict,

    /// Log a warning and align anyway.
    #[default]
    Warn,

    /// Align without checking.
    Off,
}

impl FromStr for Validation {
    type Err = &'static str;
    fn from_str(validation: &str) -> Result<Self, Self::Err> {
        match validation {
            "strict" => Ok(Self::Strict),
            "warn" => Ok(Self::Warn),
            "off" => Ok(Self::Off),
            _ => Err("Could not parse a validation value"),
        }
    }
}

/// Gold segment paired with the analyzer tokens overlapping it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Alignment<'a> {
    pub segment: &'a Segment,
    pub tokens: Vec<&'a AnalyzerToken>,
}

/// Maps gold segments to analyzer tokens by unit offsets.
#[derive(Debug, Clone, Copy, Default)]
pub struct Aligner {
    unit: CharUnit,
}

impl Aligner {
    /// Creates a new aligner counting Unicode scalar values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the unit used to measure offsets.
    pub fn unit(mut self, unit: CharUnit) -> Self {
        self.unit = unit;
        self
    }

    /// Builds the owner map of a solution.
    ///
    /// Units are computed once over the concatenated tokens, so a grapheme cluster split across
    /// several tokens is still a single unit.
    ///
    /// # Returns
    ///
    /// A vector whose `i`-th element is the range of indices of the tokens overlapping the `i`-th
    /// unit of the concatenated tokens. With [`CharUnit::Char`], every range holds exactly one
    /// token.
    pub fn owner_map(&self, solution: &Solution) -> Vec<Range<usize>> {
        let surface = solution.surface();
        let bounds = self.unit.boundaries(&surface);

        let mut token_bounds = Vec::with_capacity(solution.tokens.len());
        let mut pos = 0;
        for token in &solution.tokens {
            token_bounds.push((pos, pos + token.text.len()));
            pos += token.text.len();
        }

        let mut first = 0;
        bounds
            .windows(2)
            .map(|w| {
                let (start, end) = (w[0], w[1]);
                while first < token_bounds.len() && token_bounds[first].1 <= start {
                    first += 1;
                }
                let mut last = first;
                while last < token_bounds.len() && token_bounds[last].0 < end {
                    last += 1;
                }
                first..last
            })
            .collect()
    }

    /// Aligns each segment of an exercise to the tokens of a solution.
    ///
    /// The concatenated tokens are assumed to reproduce the sentence. If they do not, the result
    /// silently drifts; use [`Aligner::verify()`] to detect it.
    ///
    /// # Returns
    ///
    /// One [`Alignment`] per segment, in the order of the segments.
    pub fn align<'a>(&self, exercise: &'a Exercise, solution: &'a Solution) -> Vec<Alignment<'a>> {
        let owners = self.owner_map(solution);
        let sentence = exercise.sentence();
        let bounds = self.unit.boundaries(&sentence);
        let n_units = bounds.len() - 1;

        let mut byte_end = 0;
        let mut unit = 0;
        exercise
            .segments
            .iter()
            .map(|segment| {
                // a unit belongs to the segment containing its first byte
                byte_end += segment.text().len();
                let offset = unit;
                while unit < n_units && bounds[unit] < byte_end {
                    unit += 1;
                }
                let start = offset.min(owners.len());
                let end = unit.min(owners.len());

                // ranges in owners are non-decreasing, so dedup keeps the first occurrence of
                // each token
                let mut indices: Vec<usize> =
                    owners[start..end].iter().cloned().flatten().collect();
                indices.dedup();

                Alignment {
                    segment,
                    tokens: indices
                        .into_iter()
                        .map(|i| &solution.tokens[i])
                        .filter(|t| !t.text.is_empty())
                        .collect(),
                }
            })
            .collect()
    }

    /// Checks that the tokens of a solution reproduce the sentence of an exercise.
    ///
    /// # Errors
    ///
    /// [`MisalignedError`] is returned with the offset of the first differing unit.
    pub fn verify(&self, exercise: &Exercise, solution: &Solution) -> Result<(), MisalignedError> {
        let sentence = exercise.sentence();
        let surface = solution.surface();
        if sentence == surface {
            return Ok(());
        }
        let expected = self.unit.units(&sentence);
        let actual = self.unit.units(&surface);
        let position = expected
            .iter()
            .zip(&actual)
            .position(|(e, a)| e != a)
            .unwrap_or_else(|| expected.len().min(actual.len()));
        Err(MisalignedError {
            position,
            expected_len: expected.len(),
            actual_len: actual.len(),
        })
    }
}
