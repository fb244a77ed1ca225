//! Gold exercises and analyzer solutions.

use serde::{Deserialize, Serialize};

/// Annotated span of a gold sentence.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum Segment {
    /// Text without any annotation. Never graded.
    Plain(String),

    /// Text with an optional expected reading and tags.
    Annotated(AnnotatedSegment),
}

/// Body of [`Segment::Annotated`].
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct AnnotatedSegment {
    #[serde(default)]
    pub text: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub yomi: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
}

impl Segment {
    /// Creates an annotated segment.
    pub fn annotated<S, Y>(text: S, yomi: Option<Y>, tags: &[&str]) -> Self
    where
        S: Into<String>,
        Y: Into<String>,
    {
        Self::Annotated(AnnotatedSegment {
            text: text.into(),
            yomi: yomi.map(Into::into),
            tags: tags.iter().map(|&t| t.to_string()).collect(),
        })
    }

    /// Gets the surface text.
    pub fn text(&self) -> &str {
        match self {
            Self::Plain(text) => text,
            Self::Annotated(s) => &s.text,
        }
    }

    /// Gets the expected reading.
    ///
    /// # Returns
    ///
    /// `None` if the segment is a plain string, or its reading is missing or empty.
    pub fn yomi(&self) -> Option<&str> {
        match self {
            Self::Plain(_) => None,
            Self::Annotated(s) => s.yomi.as_deref().filter(|y| !y.is_empty()),
        }
    }

    /// Gets the tags. Plain segments have no tags.
    pub fn tags(&self) -> &[String] {
        match self {
            Self::Plain(_) => &[],
            Self::Annotated(s) => &s.tags,
        }
    }
}

impl From<&str> for Segment {
    fn from(text: &str) -> Self {
        Self::Plain(text.to_string())
    }
}

/// One gold sentence split into segments.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Exercise {
    pub segments: Vec<Segment>,
}

impl Exercise {
    pub fn new(segments: Vec<Segment>) -> Self {
        Self { segments }
    }

    /// Concatenates the texts of all segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use yomi_bench::{Exercise, Segment};
    ///
    /// let e = Exercise::new(vec![
    ///     Segment::from("私"),
    ///     Segment::annotated("は", Some("は"), &["particle"]),
    /// ]);
    /// assert_eq!("私は", e.sentence());
    /// ```
    pub fn sentence(&self) -> String {
        self.segments.iter().map(Segment::text).collect()
    }
}

/// Token emitted by an analyzer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AnalyzerToken {
    #[serde(default)]
    pub text: String,

    #[serde(default)]
    pub yomi: Option<String>,
}

impl AnalyzerToken {
    pub fn new<S, Y>(text: S, yomi: Y) -> Self
    where
        S: Into<String>,
        Y: Into<String>,
    {
        Self {
            text: text.into(),
            yomi: Some(yomi.into()),
        }
    }

    /// Gets the reading, falling back to the surface when the analyzer reported none.
    pub fn yomi(&self) -> &str {
        self.yomi.as_deref().unwrap_or(&self.text)
    }
}

/// Tokens emitted by an analyzer for one exercise.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Solution {
    #[serde(default)]
    pub tokens: Vec<AnalyzerToken>,
}

impl Solution {
    pub fn new(tokens: Vec<AnalyzerToken>) -> Self {
        Self { tokens }
    }

    /// Concatenates the surfaces of all tokens.
    pub fn surface(&self) -> String {
        self.tokens.iter().map(|t| t.text.as_str()).collect()
    }
}
