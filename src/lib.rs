//! A parsing expression grammar engine.
//!
//! Grammars are trees of composable [`Rule`](language::Rule)s registered in
//! a [`Grammar`](language::Grammar). Parsing some input yields a
//! [`ParseResult`](parsing::ParseResult) carrying a three-way classification
//! (full, partial, or no match), a tree of [`AstNode`](language::AstNode)s
//! whose ranges point back into the input, and any syntax errors recorded
//! after a cut.

pub mod grammars;
pub mod language;
pub mod parsing;
pub mod problem;
mod regex;
