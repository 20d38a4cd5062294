//! Matching rules against input.

use tracing::{debug, debug_span, trace, warn};

use crate::language::{assemble, AstNode, Kind, Rule};
use crate::parsing::cursor::ParseCursor;

/// What came of trying one rule at one position.
#[derive(Debug)]
pub struct MatchOutcome<'g, 'i> {
    pub rule: &'g Rule,
    pub success: bool,
    pub ast: Option<AstNode<'i>>,
    pub start: usize,
    pub end: usize,
    /// False once a cut has been crossed and the failure has been recorded
    /// as a syntax error. Such a failure is final: enclosing rules pass it
    /// on rather than trying anything else.
    pub may_backtrack: bool,
}

impl<'g, 'i> MatchOutcome<'g, 'i> {
    fn success(rule: &'g Rule, ast: Option<AstNode<'i>>, start: usize, end: usize) -> Self {
        MatchOutcome {
            rule,
            success: true,
            ast,
            start,
            end,
            may_backtrack: true,
        }
    }

    fn failure(rule: &'g Rule, start: usize, end: usize) -> Self {
        MatchOutcome {
            rule,
            success: false,
            ast: None,
            start,
            end,
            may_backtrack: true,
        }
    }

    fn hard_failure(rule: &'g Rule, start: usize, end: usize) -> Self {
        MatchOutcome {
            rule,
            success: false,
            ast: None,
            start,
            end,
            may_backtrack: false,
        }
    }

    pub fn is_success(&self) -> bool {
        self.success
    }

    pub fn is_failure(&self) -> bool {
        !self.success
    }
}

impl Rule {
    /// Try to match this rule at the cursor's current position. On failure
    /// the cursor is left where it was, unless the failure came after a cut.
    pub fn match_at<'g, 'i>(&'g self, cursor: &mut ParseCursor<'g, 'i>) -> MatchOutcome<'g, 'i> {
        if self.debug || cursor.is_debugging() {
            let span = debug_span!("match", rule = %self.label());
            let _guard = span.enter();

            let start = cursor.position();
            let preview: String = cursor
                .rest()
                .chars()
                .take(15)
                .collect();
            debug!("{}.match({:?},{})", self.label(), preview, start);

            let outcome = self.match_kind(cursor);

            let data = outcome
                .ast
                .as_ref()
                .map(|node| node.data())
                .unwrap_or_default();
            debug!(
                "--> {} => {:?},{}..{}",
                if outcome.success { "SUCCESS" } else { "FAIL" },
                data,
                outcome.start,
                outcome.end
            );
            outcome
        } else {
            trace!(rule = %self.label(), position = cursor.position());
            self.match_kind(cursor)
        }
    }

    /// Run the skipper that applies to this rule, if any, discarding what it
    /// matched. A skipper that fails leaves the cursor where it was. Nothing
    /// skips while a skipper is already running, including rules the
    /// skipper refers to.
    pub fn skip<'g>(&self, cursor: &mut ParseCursor<'g, '_>) {
        if cursor.is_skipping() {
            return;
        }

        let grammar = cursor.grammar();
        let skipper = self
            .skipper
            .or(grammar.default_skipper)
            .and_then(|id| grammar.find_skipper(id));

        if let Some(skipper) = skipper {
            let before = cursor.position();
            let recorded = cursor
                .errors()
                .len();

            cursor.set_skipping(true);
            let outcome = skipper.match_at(cursor);
            cursor.set_skipping(false);

            if outcome.is_failure() {
                cursor.set_position(before);
            }
            cursor.truncate_errors(recorded);
        }
    }

    fn node<'i>(
        &self,
        cursor: &ParseCursor<'_, 'i>,
        start: usize,
        end: usize,
        children: Vec<AstNode<'i>>,
    ) -> Option<AstNode<'i>> {
        if self.generating_ast {
            Some(AstNode::new(
                self.name
                    .clone(),
                start..end,
                children,
                self.merging,
                cursor.source(),
            ))
        } else {
            None
        }
    }

    fn match_kind<'g, 'i>(&'g self, cursor: &mut ParseCursor<'g, 'i>) -> MatchOutcome<'g, 'i> {
        match &self.kind {
            Kind::Literal(text) => {
                let start = cursor.position();
                if cursor
                    .rest()
                    .starts_with(text.as_str())
                {
                    cursor.advance(text.len());
                    self.leaf(cursor, start)
                } else {
                    MatchOutcome::failure(self, start, start)
                }
            }
            Kind::CharRange(first, last) => {
                let start = cursor.position();
                match cursor
                    .rest()
                    .chars()
                    .next()
                {
                    Some(c) if *first <= c && c <= *last => {
                        cursor.advance(c.len_utf8());
                        self.leaf(cursor, start)
                    }
                    _ => MatchOutcome::failure(self, start, start),
                }
            }
            Kind::Regex(pattern) => {
                let start = cursor.position();
                match pattern.find(cursor.rest()) {
                    Some(width) => {
                        cursor.advance(width);
                        self.leaf(cursor, start)
                    }
                    None => MatchOutcome::failure(self, start, start),
                }
            }
            Kind::EndOfStream => {
                let start = cursor.position();
                if self.using_skipper {
                    self.skip(cursor);
                }
                if cursor.is_finished() {
                    self.leaf(cursor, start)
                } else {
                    cursor.set_position(start);
                    MatchOutcome::failure(self, start, start)
                }
            }
            Kind::Sequence(children) => self.match_sequence(children, cursor),
            Kind::Choice(children) => self.match_choice(children, cursor),
            Kind::Repetition { rule, min, max } => self.match_repetition(rule, *min, *max, cursor),
            Kind::Optional(rule) => {
                let start = cursor.position();
                let outcome = rule.match_at(cursor);

                if outcome.success {
                    let end = cursor.position();
                    let ast = self.node(cursor, outcome.start, end, assemble(outcome.ast));
                    MatchOutcome::success(self, ast, outcome.start, end)
                } else if !outcome.may_backtrack {
                    MatchOutcome::hard_failure(self, start, cursor.position())
                } else {
                    cursor.set_position(start);
                    MatchOutcome::success(self, None, start, start)
                }
            }
            Kind::Reference {
                name,
                optional,
                target,
            } => {
                let start = cursor.position();
                let grammar = cursor.grammar();

                let Some(rule) = grammar.resolve(*target, name) else {
                    // no alternative can stand in for a rule that is not there
                    warn!("Reference to undeclared rule '{}' in grammar '{}'", name, grammar.name());
                    return MatchOutcome::hard_failure(self, start, start);
                };

                cursor.enter(rule);
                let outcome = rule.match_at(cursor);
                cursor.leave();

                if outcome.success {
                    let ast = self.node(cursor, outcome.start, outcome.end, assemble(outcome.ast));
                    MatchOutcome::success(self, ast, outcome.start, outcome.end)
                } else if !outcome.may_backtrack {
                    MatchOutcome::hard_failure(self, start, cursor.position())
                } else if *optional {
                    cursor.set_position(start);
                    MatchOutcome::success(self, None, start, start)
                } else {
                    cursor.set_position(start);
                    MatchOutcome::failure(self, start, start)
                }
            }
        }
    }

    fn leaf<'g, 'i>(&'g self, cursor: &ParseCursor<'g, 'i>, start: usize) -> MatchOutcome<'g, 'i> {
        let end = cursor.position();
        let ast = self.node(cursor, start, end, Vec::new());
        MatchOutcome::success(self, ast, start, end)
    }

    fn match_sequence<'g, 'i>(
        &'g self,
        children: &'g [Rule],
        cursor: &mut ParseCursor<'g, 'i>,
    ) -> MatchOutcome<'g, 'i> {
        let start = cursor.position();
        let mut nodes = Vec::new();
        let mut may_backtrack = true;

        for child in children {
            if self.using_skipper {
                self.skip(cursor);
            }

            let outcome = child.match_at(cursor);

            may_backtrack = may_backtrack && child.backtracking;
            if !may_backtrack {
                cursor.set_backtrack_border();
            }

            if outcome.success {
                nodes.extend(outcome.ast);
                continue;
            }

            if !outcome.may_backtrack {
                // already recorded further down
                return MatchOutcome::hard_failure(self, start, cursor.position());
            }

            if may_backtrack {
                cursor.set_position(start);
                return MatchOutcome::failure(self, start, start);
            }

            cursor.record_error(self, child);
            return MatchOutcome::hard_failure(self, start, cursor.position());
        }

        let end = cursor.position();
        let ast = self.node(cursor, start, end, assemble(nodes));
        MatchOutcome::success(self, ast, start, end)
    }

    fn match_choice<'g, 'i>(
        &'g self,
        children: &'g [Rule],
        cursor: &mut ParseCursor<'g, 'i>,
    ) -> MatchOutcome<'g, 'i> {
        let before = cursor.position();
        if self.using_skipper {
            self.skip(cursor);
        }
        let start = cursor.position();

        for child in children {
            cursor.set_position(start);
            let outcome = child.match_at(cursor);

            if outcome.success {
                let end = cursor.position();
                let ast = self.node(cursor, start, end, assemble(outcome.ast));
                return MatchOutcome::success(self, ast, start, end);
            }

            if !outcome.may_backtrack {
                return MatchOutcome::hard_failure(self, start, cursor.position());
            }
        }

        cursor.set_position(before);
        MatchOutcome::failure(self, before, before)
    }

    fn match_repetition<'g, 'i>(
        &'g self,
        rule: &'g Rule,
        min: usize,
        max: usize,
        cursor: &mut ParseCursor<'g, 'i>,
    ) -> MatchOutcome<'g, 'i> {
        let start = cursor.position();
        let mut nodes = Vec::new();
        let mut count = 0;

        while count < max {
            let before = cursor.position();
            if self.using_skipper {
                self.skip(cursor);
            }

            let outcome = rule.match_at(cursor);

            if !outcome.success {
                if !outcome.may_backtrack {
                    return MatchOutcome::hard_failure(self, start, cursor.position());
                }
                cursor.set_position(before);
                break;
            }

            count += 1;
            nodes.extend(outcome.ast);

            // matching is deterministic, so an iteration that consumed
            // nothing would repeat forever
            if cursor.position() == before {
                count = count.max(min);
                break;
            }
        }

        if count < min {
            cursor.set_position(start);
            return MatchOutcome::failure(self, start, start);
        }

        let end = cursor.position();
        let ast = self.node(cursor, start, end, assemble(nodes));
        MatchOutcome::success(self, ast, start, end)
    }
}
