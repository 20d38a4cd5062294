use serde::Serialize;
use std::fmt;
use tinytemplate::{format_unescaped, TinyTemplate};

static TEMPLATE: &'static str = r#"SyntaxError
| in source '{source_name}'
| in line {line_number} at column {column}
| {quoted}
| {marker}^
| Expected: {expected}
| In Rule: {enclosing_rule} -> {enclosing_notation}
"#;

/// A failure recorded after a cut, when the parser was no longer allowed to
/// backtrack out of the enclosing production.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SyntaxError {
    pub source_name: String,
    /// Text of the line the failure happened on, without its newline.
    pub line_text: String,
    /// 1-based.
    pub line_number: usize,
    /// 1-based, in bytes from the start of the line.
    pub column: usize,
    pub offset: usize,
    pub enclosing_rule: String,
    pub enclosing_notation: String,
    /// Grammar notation of the rule that failed to match.
    pub expected: String,
}

#[derive(Serialize)]
struct Context<'a> {
    source_name: &'a str,
    line_number: usize,
    column: usize,
    quoted: String,
    marker: String,
    expected: &'a str,
    enclosing_rule: &'a str,
    enclosing_notation: &'a str,
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut tt = TinyTemplate::new();
        tt.set_default_formatter(&format_unescaped);
        tt.add_template("syntax", TEMPLATE)
            .map_err(|_| fmt::Error)?;

        let context = Context {
            source_name: &self.source_name,
            line_number: self.line_number,
            column: self.column,
            quoted: format!("{:?}", self.line_text),
            marker: "-".repeat(self.column),
            expected: &self.expected,
            enclosing_rule: &self.enclosing_rule,
            enclosing_notation: &self.enclosing_notation,
        };

        let rendered = tt
            .render("syntax", &context)
            .map_err(|_| fmt::Error)?;

        f.write_str(&rendered)
    }
}

impl std::error::Error for SyntaxError {}
