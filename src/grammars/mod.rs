//! Grammars for a handful of common notations. They serve as examples of
//! the builder and back the command line tool.

use crate::language::*;

type Constructor = fn() -> Result<Grammar, GrammarError>;

/// Every bundled grammar, by name.
pub const BUNDLED: &[(&str, Constructor)] = &[
    ("arithmetic", arithmetic),
    ("bit_strings", bit_strings),
    ("float", float),
    ("identifier", identifier),
    ("integer", integer),
    ("parameter_list", parameter_list),
    ("quoted_string", quoted_string),
    ("words", words),
];

pub fn names() -> impl Iterator<Item = &'static str> {
    BUNDLED
        .iter()
        .map(|(name, _)| *name)
}

/// Build the bundled grammar called `name`, if there is one.
pub fn by_name(name: &str) -> Option<Result<Grammar, GrammarError>> {
    BUNDLED
        .iter()
        .find(|(candidate, _)| *candidate == name)
        .map(|(_, constructor)| constructor())
}

/// Letters, digits and underscores, not starting with a digit.
pub fn identifier() -> Result<Grammar, GrammarError> {
    Grammar::define("identifier")
        .helper("lower", 'a'..='z')
        .helper("upper", 'A'..='Z')
        .helper("letter", reference("lower") | reference("upper"))
        .helper("ident_start", reference("letter") | "_")
        .helper("ident_letter", reference("ident_start") | ('0'..='9'))
        .start(
            "ident",
            reference("ident_start") >> reference("ident_letter").repeat(0, 128),
        )
        .build()
}

/// Decimal integers without leading zeros.
pub fn integer() -> Result<Grammar, GrammarError> {
    Grammar::define("integer")
        .helper("digit", '0'..='9')
        .helper("nonzero", '1'..='9')
        .start(
            "int",
            literal("0") | reference("nonzero") >> reference("digit").zero_or_more(),
        )
        .build()
}

/// Signed decimal numbers with an optional fractional part.
pub fn float() -> Result<Grammar, GrammarError> {
    Grammar::define("float")
        .rule("sign", literal("+") | "-")
        .helper("digit", '0'..='9')
        .helper("nonzero", '1'..='9')
        .helper("places", literal(".") >> reference("digit").one_or_more())
        .start(
            "float",
            reference("sign?")
                >> (literal("0") | reference("nonzero") >> reference("digit").zero_or_more())
                >> reference("places?"),
        )
        .build()
}

/// Comma separated lowercase words.
pub fn parameter_list() -> Result<Grammar, GrammarError> {
    Grammar::define("parameter_list")
        .default_skipper("ws", literal(" ").one_or_more())
        .rule("item", range('a', 'z').one_or_more())
        .start("list", list(reference("item")))
        .build()
}

/// Sums and products of integers and variables.
pub fn arithmetic() -> Result<Grammar, GrammarError> {
    Grammar::define("arithmetic")
        .default_skipper("ws", literal(" ").one_or_more())
        .token("add", literal("+") | "-")
        .token("mult", literal("*") | "/")
        .helper("digit", '0'..='9')
        .helper("nonzero", '1'..='9')
        .token(
            "int",
            literal("0") | reference("nonzero") >> reference("digit").zero_or_more(),
        )
        .rule("lit", reference("int"))
        .token("var", range('a', 'z').one_or_more())
        .rule("unary_exp", reference("var") | reference("lit"))
        .rule(
            "add_exp",
            reference("unary_exp") >> (reference("add") >> reference("unary_exp")).zero_or_more(),
        )
        .rule(
            "mult_exp",
            reference("add_exp") >> (reference("mult") >> reference("add_exp")).zero_or_more(),
        )
        .start("expression", reference("mult_exp"))
        .build()
}

/// One to three binary digits.
pub fn bit_strings() -> Result<Grammar, GrammarError> {
    Grammar::define("bit_strings")
        .start("start", (literal("0") | "1").repeat(1, 3))
        .build()
}

/// Text between double quotes.
pub fn quoted_string() -> Result<Grammar, GrammarError> {
    Grammar::define("quoted_string")
        .default_skipper("ws", literal(" ").one_or_more())
        .fragment("content", pattern(r#"[^"\n]*"#)?)
        .token("string", literal("\"") >> reference("content") >> "\"")
        .start("quoted_string", reference("string") >> eos())
        .build()
}

/// Lowercase words separated by whitespace, running to the end of input.
/// Anything else after the first word is a syntax error.
pub fn words() -> Result<Grammar, GrammarError> {
    Grammar::define("words")
        .default_skipper("ws", (literal(" ") | "\t" | "\n" | "\r").one_or_more())
        .token("word", range('a', 'z').one_or_more())
        .start("sentence", reference("word").one_or_more() & eos())
        .build()
}
