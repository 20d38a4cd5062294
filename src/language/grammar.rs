//! A grammar: rules registered under names, the skippers that run between
//! them, and the rule parsing starts from.

use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

use crate::compile;
use crate::language::error::GrammarError;
use crate::language::rules::{Kind, Rule, RuleId};

/// How a declared rule treats whitespace and its own node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Declaration {
    /// An ordinary production: skips between its parts, keeps its node.
    Rule,
    /// A lexical production: no skipping inside, keeps its node.
    Token,
    /// Skips between its parts; its node is spliced into the parent.
    Helper,
    /// No skipping inside; its node is spliced into the parent.
    Fragment,
    /// Consumes whitespace (or comments) between other rules, never
    /// appears in the tree.
    Skipper,
}

impl Declaration {
    fn merging(self) -> bool {
        matches!(self, Declaration::Helper | Declaration::Fragment)
    }

    fn using_skipper(self) -> bool {
        matches!(self, Declaration::Rule | Declaration::Helper)
    }

    fn generating_ast(self) -> bool {
        !matches!(self, Declaration::Skipper)
    }
}

/// A finished grammar. Immutable once built, so one instance can serve any
/// number of parses, from any number of threads.
#[derive(Debug, Clone)]
pub struct Grammar {
    pub(crate) name: String,
    pub(crate) arena: Vec<Rule>,
    pub(crate) rules: HashMap<String, RuleId>,
    pub(crate) skippers: HashMap<String, RuleId>,
    pub(crate) default_skipper: Option<RuleId>,
    pub(crate) start: Option<RuleId>,
}

impl Grammar {
    /// Begin defining a grammar.
    pub fn define(name: &str) -> GrammarBuilder {
        GrammarBuilder {
            name: name.to_string(),
            arena: Vec::new(),
            rules: HashMap::new(),
            skippers: HashMap::new(),
            default_skipper: None,
            start: None,
            assignments: Vec::new(),
            problems: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Look up a declared rule (not a skipper) by name.
    pub fn rule(&self, name: &str) -> Option<&Rule> {
        self.rules
            .get(name)
            .map(|id| self.get(*id))
    }

    pub fn skipper(&self, name: &str) -> Option<&Rule> {
        self.skippers
            .get(name)
            .map(|id| self.get(*id))
    }

    pub fn default_skipper(&self) -> Option<&Rule> {
        self.default_skipper
            .map(|id| self.get(id))
    }

    pub fn start_rule(&self) -> Option<&Rule> {
        self.start
            .map(|id| self.get(id))
    }

    pub(crate) fn lookup(&self, name: &str) -> Option<RuleId> {
        self.rules
            .get(name)
            .copied()
    }

    pub(crate) fn get(&self, id: RuleId) -> &Rule {
        &self.arena[id.0]
    }

    /// The rule a reference to `name` binds to. The handle is used only if
    /// it points at a rule of that name in this grammar, otherwise the name
    /// is looked up afresh.
    pub(crate) fn resolve(&self, target: Option<RuleId>, name: &str) -> Option<&Rule> {
        target
            .and_then(|id| self.arena.get(id.0))
            .filter(|rule| rule.name() == Some(name))
            .or_else(|| self.rule(name))
    }

    /// The skipper behind a handle, if the handle belongs to this grammar.
    pub(crate) fn find_skipper(&self, id: RuleId) -> Option<&Rule> {
        self.arena
            .get(id.0)
            .filter(|rule| {
                rule.name()
                    .is_some_and(|name| self.skippers.get(name) == Some(&id))
            })
    }

    /// Names of the declared rules, sorted.
    pub fn rule_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .rules
            .keys()
            .map(|name| name.as_str())
            .collect();
        names.sort();
        names
    }

    pub fn is_empty(&self) -> bool {
        self.rules
            .is_empty()
    }
}

/// Collects declarations for a [`Grammar`]. Problems found while declaring
/// are held back and reported by [`build()`](GrammarBuilder::build), so
/// declarations can be chained.
#[derive(Debug)]
pub struct GrammarBuilder {
    name: String,
    arena: Vec<Rule>,
    rules: HashMap<String, RuleId>,
    skippers: HashMap<String, RuleId>,
    default_skipper: Option<RuleId>,
    start: Option<RuleId>,
    assignments: Vec<(String, String)>,
    problems: Vec<GrammarError>,
}

impl GrammarBuilder {
    pub fn rule(self, name: &str, definition: impl Into<Rule>) -> Self {
        self.declare(name, definition.into(), Declaration::Rule)
            .0
    }

    pub fn token(self, name: &str, definition: impl Into<Rule>) -> Self {
        self.declare(name, definition.into(), Declaration::Token)
            .0
    }

    pub fn helper(self, name: &str, definition: impl Into<Rule>) -> Self {
        self.declare(name, definition.into(), Declaration::Helper)
            .0
    }

    pub fn fragment(self, name: &str, definition: impl Into<Rule>) -> Self {
        self.declare(name, definition.into(), Declaration::Fragment)
            .0
    }

    /// Declare an ordinary rule and make it where parsing begins.
    pub fn start(self, name: &str, definition: impl Into<Rule>) -> Self {
        let (mut builder, id) = self.declare(name, definition.into(), Declaration::Rule);
        if id.is_some() {
            builder.start = id;
        }
        builder
    }

    pub fn skipper(self, name: &str, definition: impl Into<Rule>) -> Self {
        self.declare(name, definition.into(), Declaration::Skipper)
            .0
    }

    /// Declare a skipper and use it for every rule that has no skipper of
    /// its own.
    pub fn default_skipper(self, name: &str, definition: impl Into<Rule>) -> Self {
        let (mut builder, id) = self.declare(name, definition.into(), Declaration::Skipper);
        if id.is_some() {
            builder.default_skipper = id;
        }
        builder
    }

    /// Have `rule` (and the anonymous rules inside it) skip with the named
    /// skipper instead of the default one.
    pub fn skip_with(mut self, rule: &str, skipper: &str) -> Self {
        self.assignments
            .push((rule.to_string(), skipper.to_string()));
        self
    }

    fn declare(
        mut self,
        name: &str,
        mut rule: Rule,
        declaration: Declaration,
    ) -> (Self, Option<RuleId>) {
        let pattern = compile!(r"^[A-Za-z_][A-Za-z0-9_]*$");
        if !pattern.is_match(name) {
            self.problems
                .push(GrammarError::InvalidRuleName(name.to_string()));
            return (self, None);
        }

        if self
            .rules
            .contains_key(name)
            || self
                .skippers
                .contains_key(name)
        {
            let problem = match declaration {
                Declaration::Skipper => GrammarError::DuplicateSkipper(name.to_string()),
                _ => GrammarError::DuplicateRule(name.to_string()),
            };
            self.problems
                .push(problem);
            return (self, None);
        }

        rule.name = Some(Arc::from(name));
        rule.merging = declaration.merging();
        rule.configure(&|r: &mut Rule| {
            r.using_skipper = declaration.using_skipper();
            r.generating_ast = declaration.generating_ast();
        });

        let id = RuleId(
            self.arena
                .len(),
        );
        self.arena
            .push(rule);

        match declaration {
            Declaration::Skipper => self
                .skippers
                .insert(name.to_string(), id),
            _ => self
                .rules
                .insert(name.to_string(), id),
        };

        (self, Some(id))
    }

    /// Finish the grammar: bind every reference to the rule it names, apply
    /// skipper assignments, and check repetition bounds.
    pub fn build(self) -> Result<Grammar, GrammarError> {
        let GrammarBuilder {
            name,
            mut arena,
            rules,
            skippers,
            default_skipper,
            start,
            assignments,
            mut problems,
        } = self;

        if !problems.is_empty() {
            return Err(problems.remove(0));
        }

        for (rule, skipper) in assignments {
            let target = *rules
                .get(&rule)
                .ok_or_else(|| GrammarError::UnknownRule(rule.clone()))?;
            let skipper = *skippers
                .get(&skipper)
                .ok_or_else(|| GrammarError::UnknownSkipper(skipper.clone()))?;

            arena[target.0].configure(&|r: &mut Rule| r.skipper = Some(skipper));
        }

        for declared in arena.iter_mut() {
            let owner = declared
                .name()
                .unwrap_or_default()
                .to_string();

            declared.visit_mut(&mut |r: &mut Rule| match &mut r.kind {
                Kind::Reference { name, target, .. } => match rules.get(name.as_str()) {
                    Some(id) => {
                        *target = Some(*id);
                        Ok(())
                    }
                    None => Err(GrammarError::UnresolvedReference {
                        rule: owner.clone(),
                        reference: name.clone(),
                    }),
                },
                Kind::Repetition { min, max, .. } if *min > *max => {
                    Err(GrammarError::InvalidRepetition {
                        rule: owner.clone(),
                        min: *min,
                        max: *max,
                    })
                }
                _ => Ok(()),
            })?;
        }

        debug!(
            "Built grammar '{}' with {} rule{} and {} skipper{}",
            name,
            rules.len(),
            if rules.len() == 1 { "" } else { "s" },
            skippers.len(),
            if skippers.len() == 1 { "" } else { "s" }
        );

        Ok(Grammar {
            name,
            arena,
            rules,
            skippers,
            default_skipper,
            start,
        })
    }
}
