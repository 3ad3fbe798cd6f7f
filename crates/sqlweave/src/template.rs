//! Query templates and placeholder parsing.
//!
//! A [`QueryTemplate`] is raw format text using `{n}`-style positional
//! placeholders (with `{{`/`}}` escapes for literal braces) plus the ordered
//! hole expressions indexed by `n`. The parser lowers the text into a flat
//! [`Segment`] list in a single left-to-right scan.

use crate::classify::HoleExpr;
use crate::error::{CompileError, CompileResult};

/// One piece of a parsed template: literal text or a placeholder index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Literal SQL text, copied verbatim into the output.
    Literal(String),
    /// A `{n}` placeholder referring to the template's nth hole expression.
    Hole(usize),
}

/// A format template plus its hole expressions.
///
/// # Example
/// ```
/// use sqlweave::{HoleExpr, QueryTemplate};
///
/// let tpl = QueryTemplate::new("SELECT {0} FROM {1} WHERE {2} = {3}")
///     .hole(HoleExpr::member("u", "Id"))
///     .hole(HoleExpr::ident("u"))
///     .hole(HoleExpr::member("u", "Name"))
///     .hole(HoleExpr::constant("alice"));
/// assert_eq!(tpl.holes().len(), 4);
/// ```
#[derive(Debug)]
pub struct QueryTemplate {
    text: String,
    holes: Vec<HoleExpr>,
}

impl QueryTemplate {
    /// Create a template with no holes yet.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            holes: Vec::new(),
        }
    }

    /// Create a template with its full hole list.
    pub fn with_holes(text: impl Into<String>, holes: Vec<HoleExpr>) -> Self {
        Self {
            text: text.into(),
            holes,
        }
    }

    /// Append a hole expression (bound to the next index).
    pub fn hole(mut self, expr: HoleExpr) -> Self {
        self.holes.push(expr);
        self
    }

    /// The raw format text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// The hole expressions, indexed by placeholder number.
    pub fn holes(&self) -> &[HoleExpr] {
        &self.holes
    }
}

/// Parse format text into segments.
///
/// Placeholder syntax is `{` index `}`, optionally with a `,alignment` and/or
/// `:format-spec` suffix; suffixes are consumed and ignored for indexing.
/// `{{` and `}}` yield literal braces. An unterminated `{`, a stray `}`, or a
/// non-numeric index is a [`CompileError::MalformedTemplate`]; an index with
/// no matching hole expression is a [`CompileError::OutOfRangeHole`].
pub(crate) fn parse_segments(text: &str, hole_count: usize) -> CompileResult<Vec<Segment>> {
    let mut segments = Vec::new();
    let mut literal = String::new();
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '{' => {
                // Escaped literal brace.
                if chars.peek() == Some(&'{') {
                    chars.next();
                    literal.push('{');
                    continue;
                }

                // Placeholder index digits.
                let mut digits = String::new();
                while let Some(&c) = chars.peek() {
                    if c.is_ascii_digit() {
                        digits.push(c);
                        chars.next();
                    } else {
                        break;
                    }
                }
                if digits.is_empty() {
                    return Err(CompileError::malformed(match chars.peek() {
                        Some(&c) => format!("expected placeholder index, found '{c}'"),
                        None => "unterminated placeholder".to_string(),
                    }));
                }

                // Optional alignment / format-spec suffix, scanned to the
                // closing brace and discarded.
                if matches!(chars.peek(), Some(',') | Some(':')) {
                    loop {
                        match chars.peek() {
                            Some('}') => break,
                            Some(_) => {
                                chars.next();
                            }
                            None => {
                                return Err(CompileError::malformed("unterminated placeholder"));
                            }
                        }
                    }
                }

                match chars.next() {
                    Some('}') => {}
                    Some(c) => {
                        return Err(CompileError::malformed(format!(
                            "expected '}}' after placeholder index, found '{c}'"
                        )));
                    }
                    None => return Err(CompileError::malformed("unterminated placeholder")),
                }

                let index: usize = digits
                    .parse()
                    .map_err(|_| CompileError::malformed(format!("invalid placeholder index '{digits}'")))?;
                if index >= hole_count {
                    return Err(CompileError::OutOfRangeHole { index, hole_count });
                }

                if !literal.is_empty() {
                    segments.push(Segment::Literal(std::mem::take(&mut literal)));
                }
                segments.push(Segment::Hole(index));
            }
            '}' => {
                // Only the `}}` escape may introduce a closing brace.
                if chars.peek() == Some(&'}') {
                    chars.next();
                    literal.push('}');
                } else {
                    return Err(CompileError::malformed("unmatched '}' in template"));
                }
            }
            c => literal.push(c),
        }
    }

    if !literal.is_empty() {
        segments.push(Segment::Literal(literal));
    }
    Ok(segments)
}
