use owo_colors::OwoColorize;

use super::syntax::SyntaxError;
use crate::language::LoadingError;

impl SyntaxError {
    /// Format the error with full details including the offending line of
    /// source and a caret under the point of failure.
    pub fn full_details(&self) -> String {
        let line = self.line_number;

        // the caret is placed by characters, not bytes
        let column = self
            .line_text
            .get(..self.column.saturating_sub(1))
            .map(|before| {
                before
                    .chars()
                    .count()
                    + 1
            })
            .unwrap_or(self.column);

        let width = 3.max(
            line.to_string()
                .len(),
        );

        format!(
            r#"
{}: {}:{}:{} expected {}

{:width$} {}
{:width$} {} {}
{:width$} {} {:>column$}

in rule {} -> {}
            "#,
            "error".bright_red(),
            self.source_name,
            line,
            self.column,
            self.expected
                .bold(),
            ' ',
            '|'.bright_blue(),
            line.bright_blue(),
            '|'.bright_blue(),
            self.line_text,
            ' ',
            '|'.bright_blue(),
            '^'.bright_red(),
            self.enclosing_rule
                .bold(),
            self.enclosing_notation
        )
        .trim_ascii()
        .to_string()
    }

    /// Format the error as a single line.
    pub fn concise(&self) -> String {
        format!(
            "{}: {}:{}:{} expected {}",
            "error".bright_red(),
            self.source_name,
            self.line_number,
            self.column,
            self.expected
                .bold(),
        )
    }
}

/// Format a LoadingError with concise single-line output
pub fn concise_loading_error<'i>(error: &LoadingError<'i>) -> String {
    let mut result = format!(
        "{}: {}: {}",
        "error".bright_red(),
        error
            .filename
            .display(),
        error
            .problem
            .bold()
    );
    if !error
        .details
        .is_empty()
    {
        result.push_str(&format!(" ({})", error.details));
    }
    result
}
