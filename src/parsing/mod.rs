//! matching input against a grammar

use std::path::Path;
use tracing::debug;

use crate::language::LoadingError;

mod cursor;
mod matcher;
mod parser;

pub use cursor::*;
pub use matcher::*;
pub use parser::*;

/// Read a file and return an owned String. We pass that ownership back to the
/// caller so that the ParseResult created from it can borrow the text for
/// as long as the tree is needed.
pub fn load(filename: &Path) -> Result<String, LoadingError<'_>> {
    match std::fs::read_to_string(filename) {
        Ok(content) => Ok(content),
        Err(error) => {
            debug!(?error);
            match error.kind() {
                std::io::ErrorKind::NotFound => Err(LoadingError {
                    problem: "File not found".to_string(),
                    details: String::new(),
                    filename,
                }),
                _ => Err(LoadingError {
                    problem: "Failed reading".to_string(),
                    details: error
                        .kind()
                        .to_string(),
                    filename,
                }),
            }
        }
    }
}
