//! Statement normalization - shape fingerprints for logged SQL
//!
//! Normalization replaces literal values with `?` placeholders so that
//! structurally identical statements (differing only in bound values) share
//! a single shape. Shapes are the grouping key for run detection: the N
//! child queries of an N+1 sequence all collapse to one shape.
//!
//! Normalization is deterministic and idempotent: normalizing an
//! already-normalized shape yields the same text.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::LazyLock;

/// Collapses comma-separated placeholder lists so IN-lists of different
/// lengths produce the same shape: `(?, ?, ?)` becomes `(?)`.
static PLACEHOLDER_LIST_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\?(\s*,\s*\?)+").expect("valid regex"));

static OFFSET_LITERAL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bOFFSET\s+(\d+)").expect("valid regex"));

/// MySQL `LIMIT offset, count` form.
static LIMIT_COMMA_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\s+(\d+)\s*,\s*\d+").expect("valid regex"));

static WHERE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bWHERE\b").expect("valid regex"));

static LIMIT_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)\bLIMIT\b").expect("valid regex"));

/// A normalized statement fingerprint.
///
/// Two statements that differ only in literal values have equal shapes.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StatementShape(String);

impl StatementShape {
    /// Normalizes a raw SQL statement into its shape.
    ///
    /// Single left-to-right scan:
    /// - string literals (`'...'`, with `''` escaping) become `?`
    /// - free-standing numeric literals become `?`; digits that continue an
    ///   identifier (`col1`, `t2`) are left alone
    /// - runs of whitespace collapse to a single space
    /// - placeholder lists collapse, so IN-lists share one shape
    pub fn normalize(sql: &str) -> Self {
        let mut out = String::with_capacity(sql.len());
        let mut chars = sql.chars().peekable();

        while let Some(c) = chars.next() {
            match c {
                '\'' => {
                    // Consume the string literal, honoring '' escapes.
                    loop {
                        match chars.next() {
                            Some('\'') => {
                                if chars.peek() == Some(&'\'') {
                                    chars.next();
                                } else {
                                    break;
                                }
                            }
                            Some(_) => {}
                            None => break,
                        }
                    }
                    out.push('?');
                }
                c if c.is_ascii_digit() => {
                    let continues_identifier = out
                        .as_bytes()
                        .last()
                        .is_some_and(|b| b.is_ascii_alphanumeric() || *b == b'_');
                    if continues_identifier {
                        out.push(c);
                    } else {
                        // Consume the rest of the numeric literal (decimals,
                        // exponent) and emit a single placeholder.
                        while let Some(&next) = chars.peek() {
                            if next.is_ascii_digit() || next == '.' {
                                chars.next();
                            } else if next == 'e' || next == 'E' {
                                chars.next();
                                if let Some(&sign) = chars.peek() {
                                    if sign == '+' || sign == '-' {
                                        chars.next();
                                    }
                                }
                            } else {
                                break;
                            }
                        }
                        out.push('?');
                    }
                }
                c if c.is_whitespace() => {
                    if !out.is_empty() && !out.ends_with(' ') {
                        out.push(' ');
                    }
                }
                _ => out.push(c),
            }
        }

        let collapsed = PLACEHOLDER_LIST_REGEX.replace_all(out.trim_end(), "?");
        Self(collapsed.into_owned())
    }

    /// Returns the shape text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StatementShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Extracts a literal OFFSET value from a raw statement.
///
/// Understands `OFFSET n` and the MySQL `LIMIT n, m` form. Placeholder
/// offsets (`OFFSET ?`, `OFFSET :p`) yield `None` - only literal values can
/// be compared against a threshold.
pub fn offset_literal(sql: &str) -> Option<u64> {
    if let Some(caps) = OFFSET_LITERAL_REGEX.captures(sql) {
        return caps.get(1)?.as_str().parse().ok();
    }
    if let Some(caps) = LIMIT_COMMA_REGEX.captures(sql) {
        return caps.get(1)?.as_str().parse().ok();
    }
    None
}

/// Returns true if the statement carries a WHERE clause.
///
/// Intended for shape text, where string literals have already been
/// stripped and cannot produce false keyword matches.
pub fn has_where_clause(sql: &str) -> bool {
    WHERE_REGEX.is_match(sql)
}

/// Returns true if the statement carries a LIMIT clause. See
/// [`has_where_clause`] for the literal caveat.
pub fn has_limit_clause(sql: &str) -> bool {
    LIMIT_REGEX.is_match(sql)
}

#[cfg(test)]
mod tests;
