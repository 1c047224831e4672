//! Segment-based parsing for Azure Resource Manager identifiers.
//!
//! An ARM identifier is a `/`-separated path alternating fixed keys and
//! user-supplied values, for example
//! `/subscriptions/{subscription}/resourceGroups/{group}/providers/...`.
//! Each identifier type declares its layout as a slice of [`Segment`]s and
//! delegates parsing and formatting here, so that parse and format always
//! agree on the grammar.

use crate::error::{IdError, Result};

/// One position in an ARM identifier layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Segment {
    /// A fixed key such as `subscriptions` or `Microsoft.SignalRService`.
    Static(&'static str),
    /// A user-supplied value, named for error reporting.
    Value(&'static str),
}

/// Splits `input` according to `layout` and returns the user-supplied values in order.
pub(crate) fn parse_segments(
    kind: &'static str,
    input: &str,
    layout: &[Segment],
) -> Result<Vec<String>> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(IdError::Empty { kind });
    }

    let path = trimmed.strip_prefix('/').unwrap_or(trimmed);
    let path = path.strip_suffix('/').unwrap_or(path);
    let parts: Vec<&str> = path.split('/').collect();

    if parts.len() != layout.len() {
        return Err(IdError::SegmentCount {
            kind,
            input: input.to_string(),
            expected: layout.len(),
            actual: parts.len(),
        });
    }

    let mut values = Vec::with_capacity(layout.len() / 2);
    for (position, (segment, part)) in layout.iter().zip(parts).enumerate() {
        match *segment {
            Segment::Static(expected) => {
                if part != expected {
                    return Err(IdError::UnexpectedSegment {
                        kind,
                        input: input.to_string(),
                        position,
                        expected,
                        actual: part.to_string(),
                    });
                }
            }
            Segment::Value(name) => {
                if part.is_empty() {
                    return Err(IdError::EmptySegment {
                        kind,
                        input: input.to_string(),
                        segment: name,
                    });
                }
                values.push(part.to_string());
            }
        }
    }

    Ok(values)
}

/// Renders `values` into `layout`. `values` must hold one entry per [`Segment::Value`].
pub(crate) fn format_segments(layout: &[Segment], values: &[&str]) -> String {
    let mut out = String::new();
    let mut values = values.iter();
    for segment in layout {
        out.push('/');
        match segment {
            Segment::Static(s) => out.push_str(s),
            Segment::Value(_) => out.push_str(values.next().copied().unwrap_or_default()),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    const LAYOUT: &[Segment] = &[
        Segment::Static("things"),
        Segment::Value("thing"),
        Segment::Static("parts"),
        Segment::Value("part"),
    ];

    #[test]
    fn test_parse_extracts_values() {
        let values = parse_segments("Thing", "/things/a/parts/b", LAYOUT).unwrap();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parse_tolerates_trailing_slash() {
        let values = parse_segments("Thing", "/things/a/parts/b/", LAYOUT).unwrap();
        assert_eq!(values, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_parse_rejects_wrong_key() {
        let err = parse_segments("Thing", "/things/a/pieces/b", LAYOUT).unwrap_err();
        assert!(matches!(
            err,
            IdError::UnexpectedSegment {
                position: 2,
                expected: "parts",
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_empty_value() {
        let err = parse_segments("Thing", "/things//parts/b", LAYOUT).unwrap_err();
        assert!(matches!(err, IdError::EmptySegment { segment: "thing", .. }));
    }

    #[test]
    fn test_parse_rejects_extra_segments() {
        let err = parse_segments("Thing", "/things/a/parts/b/extra", LAYOUT).unwrap_err();
        assert!(matches!(
            err,
            IdError::SegmentCount {
                expected: 4,
                actual: 5,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_rejects_blank_input() {
        assert_eq!(
            parse_segments("Thing", "  ", LAYOUT).unwrap_err(),
            IdError::Empty { kind: "Thing" }
        );
    }

    #[test]
    fn test_format_matches_parse() {
        let formatted = format_segments(LAYOUT, &["a", "b"]);
        assert_eq!(formatted, "/things/a/parts/b");
        assert_eq!(
            parse_segments("Thing", &formatted, LAYOUT).unwrap(),
            vec!["a".to_string(), "b".to_string()]
        );
    }
}
