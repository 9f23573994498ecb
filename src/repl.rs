use crate::environment::Scope;
use crate::evaluator;
use crate::lexer::Lexer;
use crate::object::Outcome;
use crate::parser::Parser;
use std::io::{self, Write};

static PROMPT: &str = ">> ";

/// Interactive line-at-a-time session sharing one scope. Errors are printed
/// rather than fatal here; `exit(..)` ends the process for real.
pub fn start() {
    let mut scope = Scope::new();
    loop {
        print!("{}", PROMPT);
        let _ = io::stdout().flush();
        let mut line = String::new();
        match io::stdin().read_line(&mut line) {
            Ok(0) | Err(_) => return,
            Ok(_) => {}
        }

        let tokens = match Lexer::new(line).tokenize() {
            Ok(tokens) => tokens,
            Err(err) => {
                println!("ERROR: {}", err);
                continue;
            }
        };

        let program = match Parser::new(tokens).parse_program() {
            Ok(program) => program,
            Err(err) => {
                println!("ERROR: {}", err);
                continue;
            }
        };

        let mut stdout = io::stdout();
        match evaluator::eval_program(&program, &mut scope, &mut stdout) {
            Ok(Outcome::Exit(code)) => std::process::exit(code as i32),
            Ok(Outcome::Completed) => {}
            Err(err) => println!("ERROR: {}", err),
        }
    }
}
