use custom_error::custom_error;
use std::io::Write;

mod ast;
mod environment;
pub mod evaluator;
mod lexer;
mod object;
mod parser;
pub mod repl;
mod token;

pub use environment::Scope;
pub use lexer::{LexError, Lexer};
pub use object::{EvalError, Outcome, Value};
pub use parser::{ParseError, Parser};

custom_error! {
    #[derive(Clone, PartialEq)]
    pub Error

    Lex{source: LexError} = "{source}",
    Parse{source: ParseError} = "{source}",
    Eval{source: EvalError} = "{source}",
}

impl Error {
    /// Source line the error refers to, when one is known.
    pub fn line(&self) -> Option<u32> {
        match self {
            Self::Lex { source } => Some(source.line()),
            Self::Parse { source } => source.line(),
            Self::Eval { source } => Some(source.line()),
        }
    }
}

/// Runs a source text through the whole pipeline against a fresh scope,
/// writing `print` output to `out`. Any stage failure aborts the run and
/// surfaces here; nothing is recoverable below this point.
pub fn interpret<W: Write>(source: &str, out: &mut W) -> Result<Outcome, Error> {
    let tokens = Lexer::new(source.to_owned()).tokenize()?;
    let program = Parser::new(tokens).parse_program()?;

    let mut scope = Scope::new();
    Ok(evaluator::eval_program(&program, &mut scope, out)?)
}
