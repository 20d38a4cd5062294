//! The mutable state of one parse: where we are in the input, which line
//! that is, and the syntax errors recorded so far.

use crate::language::{Grammar, Rule, ANONYMOUS};
use crate::problem::SyntaxError;

#[derive(Debug)]
pub struct ParseCursor<'g, 'i> {
    grammar: &'g Grammar,
    source: &'i str,
    source_name: String,
    position: usize,
    line_number: usize,
    line_start: usize,
    backtrack_border: usize,
    errors: Vec<SyntaxError>,
    productions: Vec<&'g Rule>,
    skipping: bool,
    debug: bool,
}

impl<'g, 'i> ParseCursor<'g, 'i> {
    pub fn new(grammar: &'g Grammar, source: &'i str) -> ParseCursor<'g, 'i> {
        ParseCursor {
            grammar,
            source,
            source_name: "unknown".to_string(),
            position: 0,
            line_number: 1,
            line_start: 0,
            backtrack_border: 0,
            errors: Vec::new(),
            productions: Vec::new(),
            skipping: false,
            debug: false,
        }
    }

    pub fn with_source_name(mut self, name: &str) -> Self {
        self.source_name = name.to_string();
        self
    }

    /// Trace every match, not just those of rules marked for debugging.
    pub fn debugging(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn grammar(&self) -> &'g Grammar {
        self.grammar
    }

    pub fn source(&self) -> &'i str {
        self.source
    }

    pub fn source_name(&self) -> &str {
        &self.source_name
    }

    pub fn is_debugging(&self) -> bool {
        self.debug
    }

    /// Whether a skipper is running. Rules matched inside a skipper do not
    /// skip themselves.
    pub fn is_skipping(&self) -> bool {
        self.skipping
    }

    pub(crate) fn set_skipping(&mut self, skipping: bool) {
        self.skipping = skipping;
    }

    pub fn position(&self) -> usize {
        self.position
    }

    /// Move to `position`, keeping the line number and line start in step
    /// by counting the newlines crossed in either direction. Moving behind
    /// the backtrack border lowers it.
    pub fn set_position(&mut self, position: usize) {
        debug_assert!(position <= self.source.len());
        let bytes = self
            .source
            .as_bytes();

        if position > self.position {
            let crossed = &bytes[self.position..position];
            let newlines = crossed
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            if let Some(last) = crossed
                .iter()
                .rposition(|&b| b == b'\n')
            {
                self.line_start = self.position + last + 1;
            }
            self.line_number += newlines;
        } else if position < self.position {
            let crossed = &bytes[position..self.position];
            let newlines = crossed
                .iter()
                .filter(|&&b| b == b'\n')
                .count();
            if newlines > 0 {
                self.line_number -= newlines;
                self.line_start = bytes[..position]
                    .iter()
                    .rposition(|&b| b == b'\n')
                    .map(|i| i + 1)
                    .unwrap_or(0);
            }
            if position < self.backtrack_border {
                self.backtrack_border = position;
            }
        }

        self.position = position;
    }

    pub fn advance(&mut self, width: usize) {
        self.set_position(self.position + width);
    }

    /// The input not yet consumed.
    pub fn rest(&self) -> &'i str {
        &self.source[self.position..]
    }

    pub fn is_finished(&self) -> bool {
        self.position >= self
            .source
            .len()
    }

    /// Text of the current line, without its newline.
    pub fn line(&self) -> &'i str {
        let rest = &self.source[self.line_start..];
        match rest.find('\n') {
            Some(end) => &rest[..end],
            None => rest,
        }
    }

    /// 0-based, in bytes.
    pub fn column(&self) -> usize {
        self.position - self.line_start
    }

    /// 1-based.
    pub fn line_number(&self) -> usize {
        self.line_number
    }

    pub fn line_start(&self) -> usize {
        self.line_start
    }

    pub fn backtrack_border(&self) -> usize {
        self.backtrack_border
    }

    /// Mark the current position as one the parse will not backtrack past.
    pub fn set_backtrack_border(&mut self) {
        self.backtrack_border = self.position;
    }

    /// Note that matching has descended into a named production.
    pub fn enter(&mut self, rule: &'g Rule) {
        self.productions
            .push(rule);
    }

    pub fn leave(&mut self) {
        self.productions
            .pop();
    }

    /// Record that `failed` did not match at the current position after a
    /// cut in `sequence`. The error names the innermost production being
    /// matched, or the sequence itself outside of any.
    pub fn record_error(&mut self, sequence: &Rule, failed: &Rule) {
        let enclosing = self
            .productions
            .last()
            .copied()
            .unwrap_or(sequence);

        let error = SyntaxError {
            source_name: self
                .source_name
                .clone(),
            line_text: self
                .line()
                .to_string(),
            line_number: self.line_number,
            column: self.column() + 1,
            offset: self.position,
            enclosing_rule: enclosing
                .name()
                .unwrap_or(ANONYMOUS)
                .to_string(),
            enclosing_notation: enclosing.to_grammar_notation(),
            expected: failed.to_grammar_notation(),
        };

        self.errors
            .push(error);
    }

    pub fn errors(&self) -> &[SyntaxError] {
        &self.errors
    }

    /// Drop errors recorded after the first `len`.
    pub(crate) fn truncate_errors(&mut self, len: usize) {
        self.errors
            .truncate(len);
    }

    pub fn into_errors(self) -> Vec<SyntaxError> {
        self.errors
    }
}
