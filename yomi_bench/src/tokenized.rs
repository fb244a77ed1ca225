//! Parsers for line-based analyzer output.

use std::str::FromStr;

use crate::corpus::{AnalyzerToken, Solution};
use crate::errors::{Result, YomiBenchError};

/// Format of one line of analyzer output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineFormat {
    /// Words separated by whitespaces, tags attached with slashes: `東京/名詞/とうきょう 都/接尾辞/と`.
    #[default]
    Tokenized,

    /// Readings embedded in braces: `{東京/とうきょう}{都/と}に行く`.
    Furigana,
}

impl FromStr for LineFormat {
    type Err = &'static str;
    fn from_str(format: &str) -> Result<Self, Self::Err> {
        match format {
            "tokenized" => Ok(Self::Tokenized),
            "furigana" => Ok(Self::Furigana),
            _ => Err("Could not parse a format value"),
        }
    }
}

/// Parser converting a line of analyzer output into a [`Solution`].
#[derive(Debug, Clone, Copy, Default)]
pub struct LineParser {
    format: LineFormat,
    reading_tag: Option<usize>,
}

impl LineParser {
    pub fn new(format: LineFormat) -> Self {
        Self {
            format,
            reading_tag: None,
        }
    }

    /// Sets the index of the tag holding the reading in the tokenized format.
    ///
    /// The last tag is used if not specified.
    pub fn reading_tag(mut self, index: usize) -> Self {
        self.reading_tag = Some(index);
        self
    }

    /// Parses a line.
    ///
    /// # Arguments
    ///
    /// * `line_no` - Line number used in error messages.
    /// * `line` - A line without the line break.
    ///
    /// # Errors
    ///
    /// [`YomiBenchError::InvalidFormat`] is returned when a tokenized line is malformed.
    pub fn parse(&self, line_no: usize, line: &str) -> Result<Solution> {
        match self.format {
            LineFormat::Tokenized => parse_tokenized(line_no, line, self.reading_tag),
            LineFormat::Furigana => Ok(parse_furigana(line)),
        }
    }
}

fn push_token(
    tokens: &mut Vec<AnalyzerToken>,
    fields: &mut Vec<String>,
    reading_tag: Option<usize>,
) {
    let mut it = fields.drain(..);
    let surface = it.next().unwrap_or_default();
    let tags: Vec<String> = it.collect();
    let yomi = match reading_tag {
        Some(i) => tags.get(i),
        None => tags.last(),
    }
    .filter(|y| !y.is_empty())
    .cloned()
    .unwrap_or_else(|| surface.clone());
    tokens.push(AnalyzerToken::new(surface, yomi));
}

fn parse_tokenized(line_no: usize, line: &str, reading_tag: Option<usize>) -> Result<Solution> {
    let mut tokens = vec![];
    if line.is_empty() {
        return Ok(Solution::new(tokens));
    }

    let mut fields = vec![String::new()];
    let mut escape = false;
    let mut prev_space = false;
    for c in line.chars() {
        match (escape, c) {
            (false, '\\') => {
                escape = true;
            }
            (false, ' ') => {
                if tokens.is_empty() && fields.len() == 1 && fields[0].is_empty() {
                    return Err(YomiBenchError::invalid_format(
                        line_no,
                        "line starts with a whitespace",
                    ));
                } else if prev_space {
                    return Err(YomiBenchError::invalid_format(
                        line_no,
                        "line contains consecutive whitespaces",
                    ));
                }
                push_token(&mut tokens, &mut fields, reading_tag);
                fields.push(String::new());
                prev_space = true;
            }
            (false, '/') => {
                fields.push(String::new());
                prev_space = false;
            }
            (_, _) => {
                if let Some(field) = fields.last_mut() {
                    field.push(c);
                }
                escape = false;
                prev_space = false;
            }
        }
    }
    if escape {
        return Err(YomiBenchError::invalid_format(
            line_no,
            "line ends with an escape character",
        ));
    }
    if prev_space {
        return Err(YomiBenchError::invalid_format(
            line_no,
            "line ends with a whitespace",
        ));
    }
    push_token(&mut tokens, &mut fields, reading_tag);

    Ok(Solution::new(tokens))
}

/// Parses `{surface/reading}` at the start of `text`.
fn parse_ruby(text: &str) -> Option<(&str, &str, usize)> {
    let close = text.find('}')?;
    let (surface, yomi) = text[1..close].split_once('/')?;
    if surface.is_empty() || yomi.is_empty() {
        return None;
    }
    Some((surface, yomi, close + 1))
}

fn parse_furigana(line: &str) -> Solution {
    let mut tokens = vec![];
    let mut plain = String::new();
    let mut rest = line;
    while let Some(c) = rest.chars().next() {
        if c == '{' {
            if let Some((surface, yomi, len)) = parse_ruby(rest) {
                if !plain.is_empty() {
                    tokens.push(AnalyzerToken::new(plain.clone(), std::mem::take(&mut plain)));
                }
                tokens.push(AnalyzerToken::new(surface, yomi));
                rest = &rest[len..];
                continue;
            }
        }
        plain.push(c);
        rest = &rest[c.len_utf8()..];
    }
    if !plain.is_empty() {
        tokens.push(AnalyzerToken::new(plain.clone(), plain));
    }
    Solution::new(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pairs(s: &Solution) -> Vec<(&str, &str)> {
        s.tokens.iter().map(|t| (t.text.as_str(), t.yomi())).collect()
    }

    #[test]
    fn test_tokenized_last_tag() {
        let s = LineParser::new(LineFormat::Tokenized)
            .parse(1, "東京/名詞/とうきょう 都/接尾辞/と に/助詞/に")
            .unwrap();

        assert_eq!(
            vec![("東京", "とうきょう"), ("都", "と"), ("に", "に")],
            pairs(&s)
        );
    }

    #[test]
    fn test_tokenized_reading_tag() {
        let s = LineParser::new(LineFormat::Tokenized)
            .reading_tag(0)
            .parse(1, "食べ/タベ/動詞 た/タ/助動詞")
            .unwrap();

        assert_eq!(vec![("食べ", "タベ"), ("た", "タ")], pairs(&s));
    }

    #[test]
    fn test_tokenized_missing_reading() {
        let s = LineParser::new(LineFormat::Tokenized)
            .reading_tag(1)
            .parse(1, "東京/名詞 、/補助記号/")
            .unwrap();

        assert_eq!(vec![("東京", "東京"), ("、", "、")], pairs(&s));
    }

    #[test]
    fn test_tokenized_escape() {
        let s = LineParser::new(LineFormat::Tokenized)
            .parse(1, "1\\/2/いちぶんのに \\ /空白")
            .unwrap();

        assert_eq!(vec![("1/2", "いちぶんのに"), (" ", "空白")], pairs(&s));
    }

    #[test]
    fn test_tokenized_empty_line() {
        let s = LineParser::new(LineFormat::Tokenized).parse(1, "").unwrap();

        assert!(s.tokens.is_empty());
    }

    #[test]
    fn test_tokenized_malformed() {
        let parser = LineParser::new(LineFormat::Tokenized);

        assert_eq!(
            "InvalidFormatError: line 3: line starts with a whitespace",
            parser.parse(3, " 東京").unwrap_err().to_string()
        );
        assert_eq!(
            "InvalidFormatError: line 3: line ends with a whitespace",
            parser.parse(3, "東京 ").unwrap_err().to_string()
        );
        assert_eq!(
            "InvalidFormatError: line 3: line contains consecutive whitespaces",
            parser.parse(3, "東京  都").unwrap_err().to_string()
        );
        assert_eq!(
            "InvalidFormatError: line 3: line ends with an escape character",
            parser.parse(3, "東京\\").unwrap_err().to_string()
        );
    }

    #[test]
    fn test_furigana() {
        let s = LineParser::new(LineFormat::Furigana)
            .parse(1, "{東京/とうきょう}{都/と}に行く")
            .unwrap();

        assert_eq!(
            vec![
                ("東京", "とうきょう"),
                ("都", "と"),
                ("に行く", "に行く"),
            ],
            pairs(&s)
        );
    }

    #[test]
    fn test_furigana_plain_between() {
        let s = LineParser::new(LineFormat::Furigana)
            .parse(1, "私は{昨日/きのう}、{寿司/すし}を")
            .unwrap();

        assert_eq!(
            vec![
                ("私は", "私は"),
                ("昨日", "きのう"),
                ("、", "、"),
                ("寿司", "すし"),
                ("を", "を"),
            ],
            pairs(&s)
        );
    }

    #[test]
    fn test_furigana_malformed_braces() {
        let s = LineParser::new(LineFormat::Furigana)
            .parse(1, "{私}は{/わたし}{東京/とうきょう")
            .unwrap();

        assert_eq!(
            vec![("{私}は{/わたし}{東京/とうきょう", "{私}は{/わたし}{東京/とうきょう")],
            pairs(&s)
        );
    }
}
