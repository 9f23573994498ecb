use std::fs;
use std::io;
use std::process;

use clap::Parser;
use husk::{interpret, repl, Outcome};

/// Interpreter for the husk scripting language.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Script to execute; starts an interactive session when omitted.
    script: Option<String>,
}

fn main() {
    let args = Args::parse();

    let path = match args.script {
        Some(path) => path,
        None => {
            repl::start();
            return;
        }
    };

    let source = fs::read_to_string(&path).unwrap_or_else(|err| {
        eprintln!("cannot open {}: {}", path, err);
        process::exit(1);
    });

    let mut stdout = io::stdout();
    match interpret(&source, &mut stdout) {
        Ok(Outcome::Exit(code)) => process::exit(code as i32),
        Ok(Outcome::Completed) => {}
        Err(err) => {
            eprintln!("{}", err);
            if let Some(text) = err
                .line()
                .and_then(|line| source.lines().nth(line.saturating_sub(1) as usize))
            {
                eprintln!("  --> {}", text.trim_end());
            }
            process::exit(1);
        }
    }
}
