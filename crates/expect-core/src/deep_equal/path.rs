//! Traversal path segments and excluded field path patterns.

use crate::errors::FieldPathError;
use std::fmt;

/// One step of the traversal location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Struct field, rendered `.name`
    Field(&'static str),
    /// Slice or array index, rendered `[i]`
    Index(usize),
    /// Map key (rendered key text), rendered `[key]`
    Key(String),
}

impl fmt::Display for Segment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Segment::Field(name) => write!(f, ".{}", name),
            Segment::Index(index) => write!(f, "[{}]", index),
            Segment::Key(key) => write!(f, "[{}]", key),
        }
    }
}

/// Render a segment stack as a path string; the root is the empty string.
pub fn render_path(segments: &[Segment]) -> String {
    segments.iter().map(|s| s.to_string()).collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum PatternSegment {
    Field(String),
    /// `[text]`: a map key, or an index when `text` is a number
    Literal(String),
    /// `[*]`: any slice or array index
    AnyIndex,
}

impl PatternSegment {
    fn matches(&self, segment: &Segment) -> bool {
        match (self, segment) {
            (PatternSegment::Field(want), Segment::Field(name)) => want == name,
            (PatternSegment::Literal(want), Segment::Key(key)) => want == key,
            (PatternSegment::Literal(want), Segment::Index(index)) => {
                want.parse::<usize>().is_ok_and(|w| w == *index)
            }
            (PatternSegment::AnyIndex, Segment::Index(_)) => true,
            _ => false,
        }
    }
}

/// A compiled excluded field path such as `.items[*].created_at`.
///
/// A pattern matches a traversal location when it has the same number of
/// segments and every segment matches. `[*]` matches indices only, never
/// map keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldPattern {
    source: String,
    segments: Vec<PatternSegment>,
}

impl FieldPattern {
    /// Parse a pattern.
    ///
    /// # Errors
    ///
    /// Returns a [`FieldPathError`] for an empty pattern, a segment that
    /// does not start with `.` or `[`, an unclosed bracket, or an empty
    /// field name or bracket.
    pub fn parse(pattern: &str) -> Result<Self, FieldPathError> {
        if pattern.is_empty() {
            return Err(FieldPathError::Empty);
        }

        let chars: Vec<char> = pattern.chars().collect();
        let mut segments = Vec::new();
        let mut pos = 0;

        while pos < chars.len() {
            match chars[pos] {
                '.' => {
                    let start = pos + 1;
                    let mut end = start;
                    while end < chars.len() && chars[end] != '.' && chars[end] != '[' {
                        end += 1;
                    }
                    if end == start {
                        return Err(FieldPathError::EmptySegment {
                            pattern: pattern.to_string(),
                            position: pos,
                        });
                    }
                    segments.push(PatternSegment::Field(chars[start..end].iter().collect()));
                    pos = end;
                }
                '[' => {
                    let start = pos + 1;
                    let close = chars[start..]
                        .iter()
                        .position(|c| *c == ']')
                        .map(|offset| start + offset)
                        .ok_or_else(|| FieldPathError::UnclosedBracket {
                            pattern: pattern.to_string(),
                            position: pos,
                        })?;
                    if close == start {
                        return Err(FieldPathError::EmptySegment {
                            pattern: pattern.to_string(),
                            position: pos,
                        });
                    }
                    let text: String = chars[start..close].iter().collect();
                    segments.push(if text == "*" {
                        PatternSegment::AnyIndex
                    } else {
                        PatternSegment::Literal(text)
                    });
                    pos = close + 1;
                }
                found => {
                    return Err(FieldPathError::UnexpectedChar {
                        pattern: pattern.to_string(),
                        position: pos,
                        found,
                    });
                }
            }
        }

        Ok(Self {
            source: pattern.to_string(),
            segments,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    pub fn matches(&self, path: &[Segment]) -> bool {
        self.segments.len() == path.len()
            && self
                .segments
                .iter()
                .zip(path)
                .all(|(pattern, segment)| pattern.matches(segment))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_path() {
        let path = vec![
            Segment::Field("items"),
            Segment::Index(2),
            Segment::Key("spam".to_string()),
        ];
        assert_eq!(render_path(&path), ".items[2][spam]");
        assert_eq!(render_path(&[]), "");
    }

    #[test]
    fn test_wildcard_matches_any_index() {
        let pattern = FieldPattern::parse(".sliceField[*].nestedField").unwrap();
        assert!(pattern.matches(&[
            Segment::Field("sliceField"),
            Segment::Index(7),
            Segment::Field("nestedField"),
        ]));
        assert!(!pattern.matches(&[
            Segment::Field("sliceField"),
            Segment::Key("7".to_string()),
            Segment::Field("nestedField"),
        ]));
        assert!(!pattern.matches(&[Segment::Field("sliceField"), Segment::Index(7)]));
    }

    #[test]
    fn test_literal_matches_key_and_numeric_index() {
        let pattern = FieldPattern::parse(".mapField[spam]").unwrap();
        assert!(pattern.matches(&[Segment::Field("mapField"), Segment::Key("spam".to_string())]));
        assert!(!pattern.matches(&[Segment::Field("mapField"), Segment::Key("foo".to_string())]));

        let pattern = FieldPattern::parse("[3]").unwrap();
        assert!(pattern.matches(&[Segment::Index(3)]));
        assert!(pattern.matches(&[Segment::Key("3".to_string())]));
        assert!(!pattern.matches(&[Segment::Index(4)]));
    }

    #[test]
    fn test_malformed_patterns() {
        assert_eq!(FieldPattern::parse(""), Err(FieldPathError::Empty));
        assert!(matches!(
            FieldPattern::parse("name"),
            Err(FieldPathError::UnexpectedChar { position: 0, found: 'n', .. })
        ));
        assert!(matches!(
            FieldPattern::parse(".items[*"),
            Err(FieldPathError::UnclosedBracket { position: 6, .. })
        ));
        assert!(matches!(
            FieldPattern::parse(".items[]"),
            Err(FieldPathError::EmptySegment { position: 6, .. })
        ));
        assert!(matches!(
            FieldPattern::parse("..name"),
            Err(FieldPathError::EmptySegment { position: 0, .. })
        ));
        assert!(matches!(
            FieldPattern::parse(".items[0]x"),
            Err(FieldPathError::UnexpectedChar { position: 9, found: 'x', .. })
        ));
    }
}
