use std::{fmt, path::Path};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadingError<'i> {
    pub problem: String,
    pub details: String,
    pub filename: &'i Path,
}

impl<'i> fmt::Display for LoadingError<'i> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.problem, self.details)
    }
}

/// Mistakes made while putting a grammar together. These are reported when
/// the grammar is built (or when a parse names a rule that isn't there), never
/// as the result of matching input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GrammarError {
    DuplicateRule(String),
    DuplicateSkipper(String),
    InvalidRuleName(String),
    UnresolvedReference { rule: String, reference: String },
    UnknownRule(String),
    UnknownSkipper(String),
    MissingStartRule,
    InvalidRepetition { rule: String, min: usize, max: usize },
    InvalidPattern { pattern: String, reason: String },
}

impl fmt::Display for GrammarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GrammarError::DuplicateRule(name) => write!(f, "duplicate rule '{}'", name),
            GrammarError::DuplicateSkipper(name) => write!(f, "duplicate skipper '{}'", name),
            GrammarError::InvalidRuleName(name) => write!(f, "invalid rule name '{}'", name),
            GrammarError::UnresolvedReference { rule, reference } => {
                write!(f, "rule '{}' not found (referenced from '{}')", reference, rule)
            }
            GrammarError::UnknownRule(name) => write!(f, "rule '{}' not found", name),
            GrammarError::UnknownSkipper(name) => write!(f, "skipper '{}' not found", name),
            GrammarError::MissingStartRule => write!(f, "no start rule declared"),
            GrammarError::InvalidRepetition { rule, min, max } => write!(
                f,
                "invalid repetition {}..{} in rule '{}'",
                min, max, rule
            ),
            GrammarError::InvalidPattern { pattern, reason } => {
                write!(f, "invalid pattern /{}/: {}", pattern, reason)
            }
        }
    }
}

impl std::error::Error for GrammarError {}
