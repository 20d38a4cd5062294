use clap::{Arg, ArgAction, ArgMatches, Command};
use owo_colors::OwoColorize;
use std::path::Path;
use tracing::{debug, Level};

use grammy::grammars;
use grammy::language::Grammar;
use grammy::parsing::{self, ParseOptions};
use grammy::problem::concise_loading_error;

fn main() {
    const VERSION: &str = concat!("v", env!("CARGO_PKG_VERSION"));

    let grammar_arg = || {
        Arg::new("grammar")
            .short('g')
            .long("grammar")
            .required(true)
            .help("Name of the bundled grammar to use. Run the 'grammars' command to list them.")
    };

    let matches = Command::new("grammy")
        .version(VERSION)
        .propagate_version(true)
        .about("A parsing expression grammar engine.")
        .disable_help_subcommand(true)
        .arg(
            Arg::new("verbose")
                .short('v')
                .long("verbose")
                .global(true)
                .action(ArgAction::SetTrue)
                .help("Log what the engine is doing to standard error."),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse a file with one of the bundled grammars")
                .arg(grammar_arg())
                .arg(
                    Arg::new("rule")
                        .short('r')
                        .long("rule")
                        .help("Start from this rule instead of the grammar's start rule."),
                )
                .arg(
                    Arg::new("debug")
                        .long("debug")
                        .action(ArgAction::SetTrue)
                        .help("Trace every rule as it is tried."),
                )
                .arg(
                    Arg::new("concise")
                        .long("concise")
                        .action(ArgAction::SetTrue)
                        .help("Report each syntax error on a single line."),
                )
                .arg(
                    Arg::new("filename")
                        .required(true)
                        .help("The file containing the input to parse."),
                ),
        )
        .subcommand(
            Command::new("rules")
                .about("Show the rules of a bundled grammar")
                .arg(grammar_arg()),
        )
        .subcommand(
            Command::new("first")
                .about("Show the terminals a rule can begin with")
                .arg(grammar_arg())
                .arg(
                    Arg::new("rule")
                        .short('r')
                        .long("rule")
                        .required(true)
                        .help("The rule to analyse."),
                ),
        )
        .subcommand(Command::new("grammars").about("List the bundled grammars"))
        .get_matches();

    let level = match matches.subcommand() {
        Some(("parse", submatches)) if submatches.get_flag("debug") => Level::DEBUG,
        _ if matches.get_flag("verbose") => Level::INFO,
        _ => Level::WARN,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();

    let code = match matches.subcommand() {
        Some(("parse", submatches)) => run_parse(submatches),
        Some(("rules", submatches)) => run_rules(submatches),
        Some(("first", submatches)) => run_first(submatches),
        Some(("grammars", _)) => {
            for name in grammars::names() {
                println!("{}", name);
            }
            0
        }
        Some(_) => {
            println!("No valid subcommand was used");
            1
        }
        None => {
            println!("usage: grammy [COMMAND] ...");
            println!("Try '--help' for more information.");
            0
        }
    };

    std::process::exit(code);
}

fn select_grammar(submatches: &ArgMatches) -> Result<Grammar, String> {
    let name = submatches
        .get_one::<String>("grammar")
        .ok_or_else(|| "no grammar given".to_string())?;

    match grammars::by_name(name) {
        Some(Ok(grammar)) => Ok(grammar),
        Some(Err(error)) => Err(format!("grammar '{}' is broken: {}", name, error)),
        None => Err(format!("unknown grammar '{}'", name)),
    }
}

fn report(problem: &str) -> i32 {
    eprintln!("{}: {}", "error".bright_red(), problem);
    1
}

fn run_parse(submatches: &ArgMatches) -> i32 {
    let grammar = match select_grammar(submatches) {
        Ok(grammar) => grammar,
        Err(problem) => return report(&problem),
    };

    let filename = match submatches.get_one::<String>("filename") {
        Some(filename) => Path::new(filename),
        None => return report("no file given"),
    };

    let content = match parsing::load(filename) {
        Ok(content) => content,
        Err(error) => {
            eprintln!("{}", concise_loading_error(&error));
            return 1;
        }
    };

    let mut options = ParseOptions::default()
        .source_name(&filename.to_string_lossy())
        .debug(submatches.get_flag("debug"));
    if let Some(rule) = submatches.get_one::<String>("rule") {
        options = options.start_rule(rule);
    }

    let result = match grammar.parse_with(&content, &options) {
        Ok(result) => result,
        Err(error) => return report(&error.to_string()),
    };

    debug!(classification = ?result.classification, consumed = result.consumed);

    print!("{}", result.tree());

    for error in &result.errors {
        if submatches.get_flag("concise") {
            eprintln!("{}", error.concise());
        } else {
            eprintln!("{}\n", error.full_details());
        }
    }

    if result.is_full() {
        0
    } else if result.is_partial() {
        eprintln!(
            "{}: {}: input remains after byte {}",
            "warning".bright_yellow(),
            filename.display(),
            result.consumed
        );
        1
    } else {
        if result
            .errors
            .is_empty()
        {
            eprintln!("{}: {}: no match", "error".bright_red(), filename.display());
        }
        1
    }
}

fn run_rules(submatches: &ArgMatches) -> i32 {
    let grammar = match select_grammar(submatches) {
        Ok(grammar) => grammar,
        Err(problem) => return report(&problem),
    };

    let start = grammar
        .start_rule()
        .and_then(|rule| rule.name());

    for name in grammar.rule_names() {
        if let Some(rule) = grammar.rule(name) {
            let marker = if Some(name) == start { "*" } else { " " };
            println!("{} {} -> {}", marker, name.bold(), rule.to_grammar_notation());
        }
    }
    0
}

fn run_first(submatches: &ArgMatches) -> i32 {
    let grammar = match select_grammar(submatches) {
        Ok(grammar) => grammar,
        Err(problem) => return report(&problem),
    };

    let rule = match submatches.get_one::<String>("rule") {
        Some(rule) => rule,
        None => return report("no rule given"),
    };

    match grammar.first_set(rule) {
        Ok(set) => {
            let terminals: Vec<String> = set
                .iter()
                .map(|terminal| terminal.to_string())
                .collect();
            println!("{}", terminals.join(" "));
            0
        }
        Err(error) => report(&error.to_string()),
    }
}
