//! Running a grammar over a complete input.

use tracing::debug;

use crate::language::{AstNode, Grammar, GrammarError, RuleId};
use crate::parsing::cursor::ParseCursor;
use crate::problem::SyntaxError;

/// Settings for a single parse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Rule to start from instead of the grammar's start rule.
    pub start_rule: Option<String>,
    /// Name of the input as shown in syntax errors.
    pub source_name: String,
    /// Trace every match attempt.
    pub debug: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        ParseOptions {
            start_rule: None,
            source_name: "unknown".to_string(),
            debug: false,
        }
    }
}

impl ParseOptions {
    pub fn start_rule(mut self, name: &str) -> Self {
        self.start_rule = Some(name.to_string());
        self
    }

    pub fn source_name(mut self, name: &str) -> Self {
        self.source_name = name.to_string();
        self
    }

    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }
}

/// How much of the input the start rule accounted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Classification {
    /// The start rule matched all of the input.
    Full,
    /// The start rule matched, but input remains after it.
    Partial,
    /// The start rule did not match.
    NoMatch,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseResult<'i> {
    pub classification: Classification,
    /// The tree built by the start rule, when it matched.
    pub ast: Option<AstNode<'i>>,
    pub errors: Vec<SyntaxError>,
    /// Bytes of input consumed by the start rule.
    pub consumed: usize,
}

impl<'i> ParseResult<'i> {
    pub fn is_full(&self) -> bool {
        self.classification == Classification::Full
    }

    pub fn is_partial(&self) -> bool {
        self.classification == Classification::Partial
    }

    pub fn is_no_match(&self) -> bool {
        self.classification == Classification::NoMatch
    }

    /// The tree rendered as indented text, or an empty string if there is
    /// none.
    pub fn tree(&self) -> String {
        self.ast
            .as_ref()
            .map(|node| node.to_tree_string())
            .unwrap_or_default()
    }
}

impl Grammar {
    /// Parse `source` from the grammar's start rule.
    pub fn parse<'i>(&self, source: &'i str) -> Result<ParseResult<'i>, GrammarError> {
        self.parse_with(source, &ParseOptions::default())
    }

    pub fn parse_with<'i>(
        &self,
        source: &'i str,
        options: &ParseOptions,
    ) -> Result<ParseResult<'i>, GrammarError> {
        let id = self.resolve_start(options)?;
        let rule = self.get(id);

        let mut cursor = ParseCursor::new(self, source)
            .with_source_name(&options.source_name)
            .debugging(options.debug);

        cursor.enter(rule);
        let outcome = rule.match_at(&mut cursor);
        cursor.leave();

        let consumed = if outcome.success { outcome.end } else { 0 };
        let classification = if !outcome.success {
            Classification::NoMatch
        } else if consumed == source.len() {
            Classification::Full
        } else {
            Classification::Partial
        };
        let ast = outcome.ast;
        let errors = cursor.into_errors();

        debug!(
            "Parsed {} of {} byte{} with '{}': {:?}, {} error{}",
            consumed,
            source.len(),
            if source.len() == 1 { "" } else { "s" },
            rule.name()
                .unwrap_or_default(),
            classification,
            errors.len(),
            if errors.len() == 1 { "" } else { "s" }
        );

        Ok(ParseResult {
            classification,
            ast,
            errors,
            consumed,
        })
    }

    fn resolve_start(&self, options: &ParseOptions) -> Result<RuleId, GrammarError> {
        match &options.start_rule {
            Some(name) => self
                .lookup(name)
                .ok_or_else(|| GrammarError::UnknownRule(name.clone())),
            None => self
                .start
                .ok_or(GrammarError::MissingStartRule),
        }
    }
}
