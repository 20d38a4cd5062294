// Diagnostics reported while matching input

mod format;
mod syntax;

// Re-export all public symbols
pub use format::*;
pub use syntax::*;
