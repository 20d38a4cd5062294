//! Rules, the building blocks of a grammar.

use regex::Regex;
use std::fmt;
use std::ops::{BitAnd, BitOr, RangeInclusive, Shr};
use std::sync::Arc;

use crate::language::error::GrammarError;

/// Upper bound used by the unbounded repetitions (`one_or_more()`,
/// `zero_or_more()`).
pub const MAX_REPETITIONS: usize = 10_000;

/// Handle to a rule registered in a grammar. A handle is only meaningful
/// to the grammar that issued it; rules cloned out of one grammar and
/// matched against another are rebound by name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RuleId(pub(crate) usize);

/// A compiled regular expression, anchored so it only matches at the cursor.
#[derive(Debug, Clone)]
pub struct Pattern {
    source: String,
    regex: Regex,
}

impl Pattern {
    pub fn new(source: &str) -> Result<Pattern, GrammarError> {
        let regex = Regex::new(&format!("^(?:{})", source)).map_err(|error| {
            GrammarError::InvalidPattern {
                pattern: source.to_string(),
                reason: error.to_string(),
            }
        })?;

        Ok(Pattern {
            source: source.to_string(),
            regex,
        })
    }

    pub fn as_str(&self) -> &str {
        &self.source
    }

    /// Length of the match at the very start of `haystack`, if any.
    pub(crate) fn find(&self, haystack: &str) -> Option<usize> {
        self.regex
            .find(haystack)
            .map(|found| found.end())
    }
}

#[derive(Debug, Clone)]
pub enum Kind {
    Literal(String),
    CharRange(char, char),
    Regex(Pattern),
    EndOfStream,
    Sequence(Vec<Rule>),
    Choice(Vec<Rule>),
    Repetition {
        rule: Box<Rule>,
        min: usize,
        max: usize,
    },
    Optional(Box<Rule>),
    Reference {
        name: String,
        optional: bool,
        target: Option<RuleId>,
    },
}

/// One production of a grammar, or an anonymous piece of one.
///
/// Rules are built with the constructor functions in this module and the
/// `>>`, `&` and `|` operators, then handed to a
/// [`GrammarBuilder`](crate::language::GrammarBuilder) which names them and
/// decides how they skip whitespace and whether their nodes are merged.
#[derive(Debug, Clone)]
pub struct Rule {
    pub(crate) name: Option<Arc<str>>,
    pub(crate) kind: Kind,
    pub(crate) merging: bool,
    pub(crate) using_skipper: bool,
    pub(crate) generating_ast: bool,
    pub(crate) backtracking: bool,
    pub(crate) debug: bool,
    pub(crate) skipper: Option<RuleId>,
}

impl Rule {
    pub(crate) fn anonymous(kind: Kind) -> Rule {
        Rule {
            name: None,
            kind,
            merging: true,
            using_skipper: false,
            generating_ast: true,
            backtracking: true,
            debug: false,
            skipper: None,
        }
    }

    pub fn name(&self) -> Option<&str> {
        self.name
            .as_deref()
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }

    pub fn is_anonymous(&self) -> bool {
        self.name
            .is_none()
    }

    pub fn is_merging(&self) -> bool {
        self.merging
    }

    pub fn is_using_skipper(&self) -> bool {
        self.using_skipper
    }

    pub fn is_generating_ast(&self) -> bool {
        self.generating_ast
    }

    pub fn is_backtracking(&self) -> bool {
        self.backtracking
    }

    pub fn is_debugging(&self) -> bool {
        self.debug
    }

    pub fn children(&self) -> &[Rule] {
        match &self.kind {
            Kind::Sequence(children) | Kind::Choice(children) => children,
            Kind::Repetition { rule, .. } | Kind::Optional(rule) => std::slice::from_ref(rule),
            _ => &[],
        }
    }

    fn is_composite(&self) -> bool {
        matches!(
            self.kind,
            Kind::Sequence(_) | Kind::Choice(_) | Kind::Repetition { .. }
        )
    }

    // builder methods

    /// Match this rule between `min` and `max` times, inclusive.
    pub fn repeat(self, min: usize, max: usize) -> Rule {
        Rule::anonymous(Kind::Repetition {
            rule: Box::new(self),
            min,
            max,
        })
    }

    pub fn one_or_more(self) -> Rule {
        self.repeat(1, MAX_REPETITIONS)
    }

    pub fn zero_or_more(self) -> Rule {
        self.repeat(0, MAX_REPETITIONS)
    }

    pub fn times(self, count: usize) -> Rule {
        self.repeat(count, count)
    }

    pub fn optional(self) -> Rule {
        Rule::anonymous(Kind::Optional(Box::new(self)))
    }

    /// Disable backtracking past this rule: once a sequence reaches it, a
    /// failure becomes a syntax error instead of a retry.
    pub fn cut(mut self) -> Rule {
        self.backtracking = false;
        self
    }

    /// Trace every attempt to match this rule.
    pub fn debug(mut self) -> Rule {
        self.debug = true;
        self
    }

    /// Apply `f` to this rule and to every anonymous rule nested inside it.
    /// References are not followed; the rules they name are declared (and
    /// configured) separately.
    pub(crate) fn configure(&mut self, f: &impl Fn(&mut Rule)) {
        f(self);
        match &mut self.kind {
            Kind::Sequence(children) | Kind::Choice(children) => {
                for child in children {
                    child.configure(f);
                }
            }
            Kind::Repetition { rule, .. } | Kind::Optional(rule) => rule.configure(f),
            _ => {}
        }
    }

    /// Visit this rule and every rule nested inside it, mutably.
    pub(crate) fn visit_mut<E>(
        &mut self,
        f: &mut impl FnMut(&mut Rule) -> Result<(), E>,
    ) -> Result<(), E> {
        f(self)?;
        match &mut self.kind {
            Kind::Sequence(children) | Kind::Choice(children) => {
                for child in children {
                    child.visit_mut(f)?;
                }
            }
            Kind::Repetition { rule, .. } | Kind::Optional(rule) => rule.visit_mut(f)?,
            _ => {}
        }
        Ok(())
    }

    /// Short label used when tracing matches.
    pub(crate) fn label(&self) -> String {
        match &self.name {
            Some(name) => name.to_string(),
            None => match &self.kind {
                Kind::Literal(_) => ":Lit",
                Kind::CharRange(..) => ":Ran",
                Kind::Regex(_) => ":Reg",
                Kind::EndOfStream => ":EOS",
                Kind::Sequence(_) => ":Seq",
                Kind::Choice(_) => ":Alt",
                Kind::Repetition { .. } => ":Rep",
                Kind::Optional(_) => ":Opt",
                Kind::Reference { .. } => "|>",
            }
            .to_string(),
        }
    }

    /// Render the rule as BNF-like text, as shown in diagnostics.
    pub fn to_grammar_notation(&self) -> String {
        match &self.kind {
            Kind::Literal(text) => format!("'{}'", text),
            Kind::CharRange(first, last) => format!("({}..{})", first, last),
            Kind::Regex(pattern) => format!("/{}/", pattern.as_str()),
            Kind::EndOfStream => "EOS".to_string(),
            Kind::Sequence(children) => children
                .iter()
                .map(|child| match child.kind {
                    Kind::Choice(_) => format!("({})", child.to_grammar_notation()),
                    _ => child.to_grammar_notation(),
                })
                .collect::<Vec<_>>()
                .join(" "),
            Kind::Choice(children) => children
                .iter()
                .map(|child| child.to_grammar_notation())
                .collect::<Vec<_>>()
                .join(" | "),
            Kind::Repetition { rule, min, max } => {
                let inner = if rule.is_composite() {
                    format!("({})", rule.to_grammar_notation())
                } else {
                    rule.to_grammar_notation()
                };

                match (*min, *max) {
                    (0, MAX_REPETITIONS) => format!("{}*", inner),
                    (1, MAX_REPETITIONS) => format!("{}+", inner),
                    (min, max) if min == max => format!("{}[{}]", inner, min),
                    (min, max) => format!("{}[{}..{}]", inner, min, max),
                }
            }
            Kind::Optional(rule) => match rule.kind {
                Kind::Reference { .. } => format!("{}?", rule.to_grammar_notation()),
                _ => format!("[{}]", rule.to_grammar_notation()),
            },
            Kind::Reference { name, optional, .. } => {
                if *optional {
                    format!("{}?", name)
                } else {
                    name.clone()
                }
            }
        }
    }
}

/// Renders the rule in the notation of the operators used to build it, for
/// example `'a' >> ('b' | 'cde') >> ~:item`.
impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            Kind::Literal(text) => write!(f, "'{}'", text),
            Kind::CharRange(first, last) => write!(f, "('{}'..'{}')", first, last),
            Kind::Regex(pattern) => write!(f, "/{}/", pattern.as_str()),
            Kind::EndOfStream => write!(f, "EOS"),
            Kind::Sequence(children) => {
                for (i, child) in children
                    .iter()
                    .enumerate()
                {
                    if i > 0 {
                        let operator = if child.backtracking { " >> " } else { " & " };
                        f.write_str(operator)?;
                    }
                    match child.kind {
                        Kind::Choice(_) => write!(f, "({})", child)?,
                        _ => write!(f, "{}", child)?,
                    }
                }
                Ok(())
            }
            Kind::Choice(children) => {
                for (i, child) in children
                    .iter()
                    .enumerate()
                {
                    if i > 0 {
                        f.write_str(" | ")?;
                    }
                    write!(f, "{}", child)?;
                }
                Ok(())
            }
            Kind::Repetition { rule, min, max } => {
                let inner = if rule.is_composite() {
                    format!("({})", rule)
                } else {
                    rule.to_string()
                };

                match (*min, *max) {
                    (0, MAX_REPETITIONS) => write!(f, "~{}", inner),
                    (1, MAX_REPETITIONS) => write!(f, "+{}", inner),
                    (min, max) if min == max => write!(f, "{}*{}", inner, min),
                    (min, max) => write!(f, "{}*({}..{})", inner, min, max),
                }
            }
            Kind::Optional(rule) => match rule.kind {
                Kind::Reference { .. } => write!(f, "{}?", rule),
                _ => write!(f, "[{}]", rule),
            },
            Kind::Reference { name, optional, .. } => {
                write!(f, ":{}{}", name, if *optional { "?" } else { "" })
            }
        }
    }
}

// constructors

/// Match `text` exactly.
pub fn literal(text: &str) -> Rule {
    Rule::anonymous(Kind::Literal(text.to_string()))
}

/// Match any single character from `first` to `last` inclusive.
pub fn range(first: char, last: char) -> Rule {
    Rule::anonymous(Kind::CharRange(first, last))
}

/// Match a regular expression starting exactly at the cursor.
pub fn pattern(source: &str) -> Result<Rule, GrammarError> {
    Ok(Rule::anonymous(Kind::Regex(Pattern::new(source)?)))
}

/// Match the end of input.
pub fn eos() -> Rule {
    Rule::anonymous(Kind::EndOfStream)
}

/// Refer to a rule by name. The rule need not be declared yet; names are
/// bound when the grammar is built. A trailing `?` makes the reference
/// optional: it succeeds without consuming anything when the named rule
/// fails.
pub fn reference(name: &str) -> Rule {
    let (name, optional) = match name.strip_suffix('?') {
        Some(stripped) => (stripped, true),
        None => (name, false),
    };

    Rule::anonymous(Kind::Reference {
        name: name.to_string(),
        optional,
        target: None,
    })
}

/// Match each of `rules` in turn. Anonymous sequences among them are
/// inlined; a cut on an inlined sequence moves to its first element.
pub fn seq<I>(rules: I) -> Rule
where
    I: IntoIterator,
    I::Item: Into<Rule>,
{
    let mut children = Vec::new();

    for rule in rules {
        let rule = rule.into();
        match rule {
            Rule {
                name: None,
                kind: Kind::Sequence(mut inner),
                backtracking,
                ..
            } => {
                if !backtracking {
                    if let Some(first) = inner.first_mut() {
                        first.backtracking = false;
                    }
                }
                children.extend(inner);
            }
            other => children.push(other),
        }
    }

    Rule::anonymous(Kind::Sequence(children))
}

/// Try each of `rules` in order; the first to match wins. Anonymous choices
/// among them are absorbed into this one.
pub fn choice<I>(rules: I) -> Rule
where
    I: IntoIterator,
    I::Item: Into<Rule>,
{
    let mut children = Vec::new();

    for rule in rules {
        let rule = rule.into();
        match rule {
            Rule {
                name: None,
                kind: Kind::Choice(inner),
                backtracking: true,
                ..
            } => children.extend(inner),
            other => children.push(other),
        }
    }

    Rule::anonymous(Kind::Choice(children))
}

/// `item >> ~(',' >> item)`
pub fn list(item: impl Into<Rule>) -> Rule {
    list_sep(item, ",")
}

/// `item >> ~(separator >> item)`
pub fn list_sep(item: impl Into<Rule>, separator: impl Into<Rule>) -> Rule {
    let item = item.into();
    let tail = seq([separator.into(), item.clone()]).zero_or_more();
    seq([item, tail])
}

// conversions

impl From<&str> for Rule {
    fn from(text: &str) -> Rule {
        literal(text)
    }
}

impl From<String> for Rule {
    fn from(text: String) -> Rule {
        Rule::anonymous(Kind::Literal(text))
    }
}

impl From<char> for Rule {
    fn from(c: char) -> Rule {
        Rule::anonymous(Kind::Literal(c.to_string()))
    }
}

impl From<RangeInclusive<char>> for Rule {
    fn from(chars: RangeInclusive<char>) -> Rule {
        range(*chars.start(), *chars.end())
    }
}

impl From<Vec<Rule>> for Rule {
    fn from(alternatives: Vec<Rule>) -> Rule {
        choice(alternatives)
    }
}

impl<const N: usize> From<[Rule; N]> for Rule {
    fn from(alternatives: [Rule; N]) -> Rule {
        choice(alternatives)
    }
}

// operators

impl<R: Into<Rule>> Shr<R> for Rule {
    type Output = Rule;

    fn shr(self, rhs: R) -> Rule {
        seq([self, rhs.into()])
    }
}

impl<R: Into<Rule>> BitAnd<R> for Rule {
    type Output = Rule;

    fn bitand(self, rhs: R) -> Rule {
        seq([self, rhs.into().cut()])
    }
}

impl<R: Into<Rule>> BitOr<R> for Rule {
    type Output = Rule;

    fn bitor(self, rhs: R) -> Rule {
        choice([self, rhs.into()])
    }
}
