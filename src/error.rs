//! Compile-time failure modes (spec.md §7).
//!
//! Runtime queries (`match_type`, `match_fragment`, `fill_before`,
//! `find_wrapping`) never fail — mismatches are represented as `None`.
//! Only schema compilation can fail, and it fails all-or-nothing.

/// A content expression failed to parse.
///
/// `Display` renders `"<reason> (in content expression '<source>')"`,
/// matching the single-line diagnostic the reference engine produces.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{reason} (in content expression '{expression}')")]
pub struct SyntaxError {
    pub(crate) reason: SyntaxErrorReason,
    // Named `expression`, not `source`: thiserror treats a field literally
    // named `source` as the `Error::source()` delegate regardless of
    // attributes, which would require `String: std::error::Error`.
    pub(crate) expression: String,
}

impl SyntaxError {
    pub(crate) fn new(reason: SyntaxErrorReason, expression: impl Into<String>) -> Self {
        Self {
            reason,
            expression: expression.into(),
        }
    }

    /// The original content-expression source that failed to parse.
    pub fn source_text(&self) -> &str {
        &self.expression
    }
}

impl std::fmt::Display for SyntaxErrorReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SyntaxErrorReason::UnexpectedToken(tok) => write!(f, "Unexpected token '{tok}'"),
            SyntaxErrorReason::UnclosedGroup => write!(f, "Unclosed group"),
            SyntaxErrorReason::UnclosedRange => write!(f, "Unclosed range"),
            SyntaxErrorReason::TrailingText => write!(f, "Unexpected trailing text"),
            SyntaxErrorReason::UnknownName(name) => {
                write!(f, "No node type or group '{name}' found")
            }
            SyntaxErrorReason::MixedInlineBlock => write!(f, "Mixing inline and block content"),
            SyntaxErrorReason::UnexpectedEnd => write!(f, "Unexpected end of expression"),
            SyntaxErrorReason::InvalidRange => {
                write!(f, "Range must have a minimum not greater than its maximum")
            }
        }
    }
}

/// The specific syntactic reason an expression was rejected.
///
/// Kept separate from [`SyntaxError`] so the formatted reason and the
/// embedded source text compose through one `#[error]` template instead
/// of duplicating the `(in content expression '...')` suffix per variant.
#[derive(Debug, Clone)]
pub(crate) enum SyntaxErrorReason {
    UnexpectedToken(String),
    UnclosedGroup,
    UnclosedRange,
    TrailingText,
    UnknownName(String),
    MixedInlineBlock,
    UnexpectedEnd,
    InvalidRange,
}

/// A schema position requires a child but every type that could fill it
/// is non-generatable (text, or has a required attribute).
#[derive(Debug, Clone, thiserror::Error)]
#[error("Only non-generatable nodes ({}) in a required position", .names.join(", "))]
pub struct DeadEndError {
    pub(crate) names: Vec<String>,
}

impl DeadEndError {
    /// The offending type names, in the order they were discovered.
    pub fn offending_names(&self) -> &[String] {
        &self.names
    }
}

/// Either compile-time failure a schema's `parse_pattern` call can raise.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SchemaError {
    #[error(transparent)]
    Syntax(#[from] SyntaxError),
    #[error(transparent)]
    DeadEnd(#[from] DeadEndError),
}
