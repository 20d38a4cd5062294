//! First sets: which terminals a rule can begin with.

use std::collections::BTreeSet;
use std::fmt;

use crate::language::error::GrammarError;
use crate::language::grammar::Grammar;
use crate::language::rules::{Kind, Rule, RuleId};

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Terminal {
    Literal(String),
    Range(char, char),
    Pattern(String),
    End,
    /// The rule can match without consuming anything.
    Empty,
}

impl fmt::Display for Terminal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Terminal::Literal(text) => write!(f, "'{}'", text),
            Terminal::Range(first, last) => write!(f, "({}..{})", first, last),
            Terminal::Pattern(source) => write!(f, "/{}/", source),
            Terminal::End => write!(f, "EOS"),
            Terminal::Empty => write!(f, "ε"),
        }
    }
}

pub type FirstSet = BTreeSet<Terminal>;

impl Grammar {
    /// Compute the first set of the named rule.
    pub fn first_set(&self, name: &str) -> Result<FirstSet, GrammarError> {
        let id = self
            .lookup(name)
            .ok_or_else(|| GrammarError::UnknownRule(name.to_string()))?;

        let mut stack = vec![id];
        Ok(self.first_of(self.get(id), &mut stack))
    }

    fn first_of(&self, rule: &Rule, stack: &mut Vec<RuleId>) -> FirstSet {
        let mut set = FirstSet::new();

        match rule.kind() {
            Kind::Literal(text) => {
                if text.is_empty() {
                    set.insert(Terminal::Empty);
                } else {
                    set.insert(Terminal::Literal(text.clone()));
                }
            }
            Kind::CharRange(first, last) => {
                set.insert(Terminal::Range(*first, *last));
            }
            Kind::Regex(pattern) => {
                set.insert(Terminal::Pattern(
                    pattern
                        .as_str()
                        .to_string(),
                ));
            }
            Kind::EndOfStream => {
                set.insert(Terminal::End);
            }
            Kind::Choice(children) => {
                for child in children {
                    set.extend(self.first_of(child, stack));
                }
            }
            Kind::Sequence(children) => {
                let mut nullable = true;
                for child in children {
                    let mut first = self.first_of(child, stack);
                    let empty = first.remove(&Terminal::Empty);
                    set.extend(first);
                    if !empty {
                        nullable = false;
                        break;
                    }
                }
                if nullable {
                    set.insert(Terminal::Empty);
                }
            }
            Kind::Repetition { rule, min, .. } => {
                set.extend(self.first_of(rule, stack));
                if *min == 0 {
                    set.insert(Terminal::Empty);
                }
            }
            Kind::Optional(rule) => {
                set.extend(self.first_of(rule, stack));
                set.insert(Terminal::Empty);
            }
            Kind::Reference {
                name,
                optional,
                target,
            } => {
                if let Some(id) = (*target).or_else(|| self.lookup(name)) {
                    // recursion through a rule already being analysed adds nothing
                    if !stack.contains(&id) {
                        stack.push(id);
                        set.extend(self.first_of(self.get(id), stack));
                        stack.pop();
                    }
                }
                if *optional {
                    set.insert(Terminal::Empty);
                }
            }
        }

        set
    }
}
