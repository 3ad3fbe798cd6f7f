//! SQL dialect profiles.
//!
//! A [`DialectProfile`] carries the two per-database facts the compiler needs:
//! how to quote an identifier, and whether the target of an `UPDATE`/`DELETE`
//! statement may carry an alias. Profiles are plain immutable values passed
//! explicitly through the pipeline; there is no ambient dialect configuration.

/// Supported SQL dialects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dialect {
    /// PostgreSQL: `"double quoted"` identifiers, aliased DML targets allowed.
    Postgres,
    /// SQL Server: `[bracketed]` identifiers, no alias on a bare DML target.
    SqlServer,
    /// MySQL / MariaDB: `` `backticked` `` identifiers, aliased DML targets allowed.
    MySql,
    /// SQLite: `"double quoted"` identifiers, no alias on DML targets.
    Sqlite,
}

impl Dialect {
    /// The quoting/capability profile for this dialect.
    pub fn profile(self) -> DialectProfile {
        match self {
            Dialect::Postgres => DialectProfile {
                quote_style: QuoteStyle::DoubleQuote,
                allows_alias_in_dml: true,
            },
            Dialect::SqlServer => DialectProfile {
                quote_style: QuoteStyle::Bracket,
                allows_alias_in_dml: false,
            },
            Dialect::MySql => DialectProfile {
                quote_style: QuoteStyle::Backtick,
                allows_alias_in_dml: true,
            },
            Dialect::Sqlite => DialectProfile {
                quote_style: QuoteStyle::DoubleQuote,
                allows_alias_in_dml: false,
            },
        }
    }
}

/// Identifier quoting convention.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuoteStyle {
    /// ANSI `"name"` with embedded `"` doubled.
    DoubleQuote,
    /// T-SQL `[name]` with embedded `]` doubled.
    Bracket,
    /// MySQL `` `name` `` with embedded backticks doubled.
    Backtick,
}

impl QuoteStyle {
    /// Quote an identifier into a fresh string.
    pub fn quote(&self, name: &str) -> String {
        let mut out = String::with_capacity(name.len() + 2);
        self.write_quoted(&mut out, name);
        out
    }

    /// Quote an identifier into an existing buffer.
    ///
    /// Identifiers come from trusted entity metadata, never from user input;
    /// the doubling here exists so a legitimate name containing the closing
    /// quote character still round-trips.
    pub(crate) fn write_quoted(&self, out: &mut String, name: &str) {
        let (open, close) = match self {
            QuoteStyle::DoubleQuote => ('"', '"'),
            QuoteStyle::Bracket => ('[', ']'),
            QuoteStyle::Backtick => ('`', '`'),
        };
        out.push(open);
        for ch in name.chars() {
            out.push(ch);
            if ch == close {
                out.push(close);
            }
        }
        out.push(close);
    }
}

/// Per-database compilation profile.
///
/// Fields are public so callers can construct a custom profile when the
/// built-in [`Dialect`] set does not fit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialectProfile {
    /// Identifier quoting convention.
    pub quote_style: QuoteStyle,
    /// Whether `UPDATE`/`DELETE` targets may carry an alias.
    pub allows_alias_in_dml: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn double_quote_simple() {
        assert_eq!(QuoteStyle::DoubleQuote.quote("User"), r#""User""#);
    }

    #[test]
    fn double_quote_escapes_embedded_quote() {
        assert_eq!(QuoteStyle::DoubleQuote.quote(r#"has"quote"#), r#""has""quote""#);
    }

    #[test]
    fn bracket_simple() {
        assert_eq!(QuoteStyle::Bracket.quote("User"), "[User]");
    }

    #[test]
    fn bracket_escapes_closing_bracket() {
        assert_eq!(QuoteStyle::Bracket.quote("odd]name"), "[odd]]name]");
    }

    #[test]
    fn backtick_simple() {
        assert_eq!(QuoteStyle::Backtick.quote("User"), "`User`");
    }

    #[test]
    fn backtick_escapes_embedded_backtick() {
        assert_eq!(QuoteStyle::Backtick.quote("odd`name"), "`odd``name`");
    }

    #[test]
    fn profiles_match_dialect_capabilities() {
        assert!(Dialect::Postgres.profile().allows_alias_in_dml);
        assert!(Dialect::MySql.profile().allows_alias_in_dml);
        assert!(!Dialect::Sqlite.profile().allows_alias_in_dml);
        assert!(!Dialect::SqlServer.profile().allows_alias_in_dml);
        assert_eq!(Dialect::Sqlite.profile().quote_style, QuoteStyle::DoubleQuote);
    }
}
