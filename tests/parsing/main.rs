mod ast;
mod errors;
mod grammars;
mod samples;
