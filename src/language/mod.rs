// Types describing grammars and the trees they produce

mod ast;
mod error;
mod first;
mod grammar;
mod rules;
mod walk;

// Re-export all public symbols
pub use ast::*;
pub use error::*;
pub use first::*;
pub use grammar::*;
pub use rules::*;
pub use walk::*;
