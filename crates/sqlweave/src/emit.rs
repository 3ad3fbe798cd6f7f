//! SQL emission.
//!
//! The emitter assembles literal segments and classified holes into one of
//! two output shapes: named-parameter SQL (`@p0, @p1, ...` plus an ordered
//! value list) or a positional-format template (`{0}, {1}, ...` plus an
//! argument array, with literal braces re-escaped so the result is itself a
//! valid format string). Parameters are appended in left-to-right placeholder
//! order, so the placeholder count always equals the parameter count.

use crate::dialect::DialectProfile;
use crate::entity::AliasBinding;
use crate::value::Value;

/// A compiled query in named-parameter form.
///
/// `params[n]` is the value bound to the `@pn` placeholder.
#[derive(Debug, Clone, PartialEq)]
pub struct CompiledQuery {
    sql: String,
    params: Vec<Value>,
}

impl CompiledQuery {
    pub(crate) fn from_parts(sql: String, params: Vec<Value>) -> Self {
        Self { sql, params }
    }

    /// The SQL text with `@pN` placeholders.
    pub fn sql(&self) -> &str {
        &self.sql
    }

    /// The bound parameter values, aligned with placeholder numbering.
    pub fn params(&self) -> &[Value] {
        &self.params
    }

    /// Decompose into `(sql, params)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.sql, self.params)
    }
}

/// A compiled query in positional-template form.
///
/// `args[n]` is the value for the `{n}` placeholder; any literal brace in the
/// format is escaped as `{{`/`}}`.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionalQuery {
    format: String,
    args: Vec<Value>,
}

impl PositionalQuery {
    pub(crate) fn from_parts(format: String, args: Vec<Value>) -> Self {
        Self { format, args }
    }

    /// The format text with `{N}` placeholders.
    pub fn format(&self) -> &str {
        &self.format
    }

    /// The argument array for the format.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Decompose into `(format, args)`.
    pub fn into_parts(self) -> (String, Vec<Value>) {
        (self.format, self.args)
    }
}

/// Output placeholder convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum PlaceholderStyle {
    /// `@pN` driver-style named parameters.
    Named,
    /// `{N}` positional-format placeholders (literal braces escaped).
    Positional,
}

/// Whether alias emission must be suppressed for this compile call.
///
/// Statement-level heuristic, not a SQL parse: when the dialect forbids
/// aliased DML targets and the template's first whitespace-delimited token
/// (case-insensitive, followed by whitespace or end-of-text) is `UPDATE` or
/// `DELETE`, every table/column hole in the call is emitted without its
/// alias. Multi-statement templates and CTE-wrapped DML do not trigger it.
pub(crate) fn alias_suppressed_for(text: &str, profile: &DialectProfile) -> bool {
    if profile.allows_alias_in_dml {
        return false;
    }
    let trimmed = text.trim_start();
    let token = trimmed
        .split_once(char::is_whitespace)
        .map(|(t, _)| t)
        .unwrap_or(trimmed);
    token.eq_ignore_ascii_case("UPDATE") || token.eq_ignore_ascii_case("DELETE")
}

/// Streaming assembler for one compile call.
pub(crate) struct Emitter<'a> {
    profile: &'a DialectProfile,
    style: PlaceholderStyle,
    suppress_alias: bool,
    out: String,
    params: Vec<Value>,
}

impl<'a> Emitter<'a> {
    pub(crate) fn new(
        profile: &'a DialectProfile,
        style: PlaceholderStyle,
        suppress_alias: bool,
        capacity_hint: usize,
    ) -> Self {
        Self {
            profile,
            style,
            suppress_alias,
            out: String::with_capacity(capacity_hint),
            params: Vec::new(),
        }
    }

    /// Copy literal template text into the output.
    pub(crate) fn push_literal(&mut self, text: &str) {
        self.push_text(text);
    }

    /// Emit a table reference: quoted table name, plus the alias unless
    /// suppression is active.
    pub(crate) fn push_table(&mut self, binding: &AliasBinding) {
        self.push_quoted(binding.entity().table());
        if !self.suppress_alias {
            self.push_text(" ");
            self.push_text(binding.alias());
        }
    }

    /// Emit a column reference: `alias.quoted_column`, or the bare quoted
    /// column under suppression. The member name is resolved through the
    /// entity's column overrides.
    pub(crate) fn push_column(&mut self, binding: &AliasBinding, member: &str) {
        if !self.suppress_alias {
            self.push_text(binding.alias());
            self.push_text(".");
        }
        self.push_quoted(binding.entity().column_name(member));
    }

    /// Emit a placeholder token and bind the value at the next position.
    pub(crate) fn push_value(&mut self, value: Value) {
        let n = self.params.len();
        match self.style {
            PlaceholderStyle::Named => {
                self.out.push_str("@p");
                self.out.push_str(itoa(n).as_str());
            }
            PlaceholderStyle::Positional => {
                self.out.push('{');
                self.out.push_str(itoa(n).as_str());
                self.out.push('}');
            }
        }
        self.params.push(value);
    }

    pub(crate) fn finish(self) -> (String, Vec<Value>) {
        (self.out, self.params)
    }

    /// Write non-placeholder text, brace-escaped in positional form so the
    /// output remains a valid format template.
    fn push_text(&mut self, text: &str) {
        match self.style {
            PlaceholderStyle::Named => self.out.push_str(text),
            PlaceholderStyle::Positional => {
                for ch in text.chars() {
                    match ch {
                        '{' => self.out.push_str("{{"),
                        '}' => self.out.push_str("}}"),
                        c => self.out.push(c),
                    }
                }
            }
        }
    }

    fn push_quoted(&mut self, name: &str) {
        let mut quoted = String::with_capacity(name.len() + 2);
        self.profile.quote_style.write_quoted(&mut quoted, name);
        self.push_text(&quoted);
    }
}

/// Format a small non-negative integer without going through `fmt`.
fn itoa(n: usize) -> String {
    let mut s = String::with_capacity(4);
    if n == 0 {
        s.push('0');
        return s;
    }
    let mut buf = [0u8; 20];
    let mut pos = buf.len();
    let mut n = n;
    while n > 0 {
        pos -= 1;
        buf[pos] = b'0' + (n % 10) as u8;
        n /= 10;
    }
    for &b in &buf[pos..] {
        s.push(b as char);
    }
    s
}
