//! Substitution list syntax parsing.
//!
//! A substitution list is line oriented:
//!
//! ```text
//! // full-line comment, ignored
//! TARGET := REPLACEMENT            // trailing comment, stripped
//! TARGET2:=REPLACEMENT2
//! ```
//!
//! Every non-blank, non-comment line must contain exactly one `:=`. The left
//! side may not contain `\`. On the right side everything from the first `//`
//! onwards is a comment.

use crate::rules::SubstitutionList;

/// Separates a target from its replacement.
const DELIMITER: &str = ":=";

/// Starts a full-line comment, or an end-of-line comment after the delimiter.
const COMMENT: &str = "//";

/// Not allowed anywhere left of the delimiter.
const TARGET_COMMENT: char = '\\';

/// Malformed substitution list line.
///
/// `line_no` is 1-based; `line` is the offending line with surrounding
/// whitespace stripped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("line {line_no}: invalid substitution, missing `:=`: {line}")]
    MissingDelimiter { line_no: usize, line: String },

    #[error("line {line_no}: invalid substitution, found {count} `:=` where one is allowed: {line}")]
    ExtraDelimiter {
        line_no: usize,
        count: usize,
        line: String,
    },

    #[error("line {line_no}: comment cannot appear to the left of `:=`: {line}")]
    CommentInTarget { line_no: usize, line: String },

    #[error("line {line_no}: substitution target is empty: {line}")]
    EmptyTarget { line_no: usize, line: String },
}

impl ParseError {
    /// 1-based line number of the offending line.
    #[must_use]
    pub fn line_no(&self) -> usize {
        match self {
            Self::MissingDelimiter { line_no, .. }
            | Self::ExtraDelimiter { line_no, .. }
            | Self::CommentInTarget { line_no, .. }
            | Self::EmptyTarget { line_no, .. } => *line_no,
        }
    }

    /// The offending line text.
    #[must_use]
    pub fn line(&self) -> &str {
        match self {
            Self::MissingDelimiter { line, .. }
            | Self::ExtraDelimiter { line, .. }
            | Self::CommentInTarget { line, .. }
            | Self::EmptyTarget { line, .. } => line,
        }
    }
}

/// Parse substitution list source into an ordered [`SubstitutionList`].
///
/// Rules keep the order of their lines. Parsing stops at the first malformed
/// line.
pub fn parse_substitutions(source: &str) -> Result<SubstitutionList, ParseError> {
    let mut rules = SubstitutionList::new();

    for (idx, raw) in source.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with(COMMENT) {
            continue;
        }

        let line_no = idx + 1;
        let (target, replacement) = parse_rule(line, line_no)?;
        rules.push(target, replacement);
    }

    tracing::debug!(rules = rules.len(), "Parsed substitution list");
    Ok(rules)
}

/// Split one stripped, non-comment line into `(target, replacement)`.
fn parse_rule(line: &str, line_no: usize) -> Result<(&str, &str), ParseError> {
    let count = line.matches(DELIMITER).count();
    let Some((lhs, rhs)) = line.split_once(DELIMITER) else {
        return Err(ParseError::MissingDelimiter {
            line_no,
            line: line.to_owned(),
        });
    };
    if count > 1 {
        return Err(ParseError::ExtraDelimiter {
            line_no,
            count,
            line: line.to_owned(),
        });
    }

    if lhs.contains(TARGET_COMMENT) {
        return Err(ParseError::CommentInTarget {
            line_no,
            line: line.to_owned(),
        });
    }

    // The line is already stripped, so only the right edge of the target can
    // carry whitespace.
    let target = lhs.trim_end();
    if target.is_empty() {
        return Err(ParseError::EmptyTarget {
            line_no,
            line: line.to_owned(),
        });
    }

    let replacement = rhs.split_once(COMMENT).map_or(rhs, |(value, _)| value);

    Ok((target, replacement.trim()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rules::Rule;
    use pretty_assertions::assert_eq;

    fn pairs(rules: &SubstitutionList) -> Vec<(&str, &str)> {
        rules
            .iter()
            .map(|r: &Rule| (r.target(), r.replacement()))
            .collect()
    }

    #[test]
    fn test_parse_simple_rules() {
        let rules = parse_substitutions("$PRIMARY := #ff0000\n$BG := #000000").unwrap();
        assert_eq!(
            pairs(&rules),
            vec![("$PRIMARY", "#ff0000"), ("$BG", "#000000")]
        );
    }

    #[test]
    fn test_parse_without_spaces() {
        let rules = parse_substitutions("TARGET2:=REPLACEMENT2").unwrap();
        assert_eq!(pairs(&rules), vec![("TARGET2", "REPLACEMENT2")]);
    }

    #[test]
    fn test_trailing_comment_stripped() {
        let rules = parse_substitutions("foo := bar // note").unwrap();
        assert_eq!(pairs(&rules), vec![("foo", "bar")]);
    }

    #[test]
    fn test_trailing_comment_cut_at_first_marker() {
        let rules = parse_substitutions("url := http: // a // b").unwrap();
        assert_eq!(pairs(&rules), vec![("url", "http:")]);
    }

    #[test]
    fn test_replacement_empty_after_comment() {
        let rules = parse_substitutions("foo := // nothing left").unwrap();
        assert_eq!(pairs(&rules), vec![("foo", "")]);
    }

    #[test]
    fn test_full_line_comment_ignored() {
        let source = "// header comment\n   // indented comment := with delimiter\nfoo := bar";
        let rules = parse_substitutions(source).unwrap();
        assert_eq!(pairs(&rules), vec![("foo", "bar")]);
    }

    #[test]
    fn test_only_comments_yields_empty_list() {
        let rules = parse_substitutions("// one\n\n// two\n").unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_blank_lines_ignored() {
        let with_blanks = parse_substitutions("\n\na := 1\n   \n\t\nb := 2\n\n").unwrap();
        let without = parse_substitutions("a := 1\nb := 2").unwrap();
        assert_eq!(with_blanks, without);
    }

    #[test]
    fn test_crlf_line_endings() {
        let rules = parse_substitutions("a := 1\r\nb := 2\r\n").unwrap();
        assert_eq!(pairs(&rules), vec![("a", "1"), ("b", "2")]);
    }

    #[test]
    fn test_target_keeps_inner_whitespace() {
        let rules = parse_substitutions("  background color   :=   red  ").unwrap();
        assert_eq!(pairs(&rules), vec![("background color", "red")]);
    }

    #[test]
    fn test_backslash_allowed_in_replacement() {
        let rules = parse_substitutions(r"font := C:\Fonts\mono.ttf").unwrap();
        assert_eq!(pairs(&rules), vec![("font", r"C:\Fonts\mono.ttf")]);
    }

    #[test]
    fn test_missing_delimiter_rejected() {
        let err = parse_substitutions("a : b").unwrap_err();
        assert_eq!(
            err,
            ParseError::MissingDelimiter {
                line_no: 1,
                line: "a : b".to_owned()
            }
        );
    }

    #[test]
    fn test_multiple_delimiters_rejected() {
        let err = parse_substitutions("ok := fine\na := b := c").unwrap_err();
        assert_eq!(
            err,
            ParseError::ExtraDelimiter {
                line_no: 2,
                count: 2,
                line: "a := b := c".to_owned()
            }
        );
    }

    #[test]
    fn test_delimiter_inside_comment_still_counts() {
        let err = parse_substitutions("a := b // was c := d").unwrap_err();
        assert!(matches!(err, ParseError::ExtraDelimiter { .. }));
    }

    #[test]
    fn test_backslash_in_target_rejected() {
        let err = parse_substitutions("a\\b := c").unwrap_err();
        assert_eq!(
            err,
            ParseError::CommentInTarget {
                line_no: 1,
                line: "a\\b := c".to_owned()
            }
        );
    }

    #[test]
    fn test_empty_target_rejected() {
        let err = parse_substitutions("\n   := replacement").unwrap_err();
        assert_eq!(
            err,
            ParseError::EmptyTarget {
                line_no: 2,
                line: ":= replacement".to_owned()
            }
        );
    }

    #[test]
    fn test_error_message_identifies_line() {
        let err = parse_substitutions("// c\n\nbroken line").unwrap_err();
        assert_eq!(err.line_no(), 3);
        assert_eq!(err.line(), "broken line");
        assert_eq!(
            err.to_string(),
            "line 3: invalid substitution, missing `:=`: broken line"
        );
    }

    #[test]
    fn test_order_preserved() {
        let rules = parse_substitutions("z := 1\na := 2\nm := 3").unwrap();
        assert_eq!(pairs(&rules), vec![("z", "1"), ("a", "2"), ("m", "3")]);
    }
}
