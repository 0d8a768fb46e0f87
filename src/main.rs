use std::{collections::BTreeMap, fs, process::ExitCode};

use calcscript::{Interpreter, evaluate, interactive::Interactive};
use clap::Parser;
use rustyline::{DefaultEditor, error::ReadlineError};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// calcscript is a small line-oriented calculator scripting language with
/// exact decimal arithmetic.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells calcscript to read the script from a file.
    #[arg(short, long)]
    file: bool,

    /// Prints only the last output value of the script.
    #[arg(short, long)]
    quiet: bool,

    /// The script to run. An interactive session starts when it is omitted.
    contents: Option<String>,
}

fn main() -> ExitCode {
    tracing_subscriber::registry().with(fmt::layer().with_writer(std::io::stderr))
                                  .with(EnvFilter::from_default_env())
                                  .init();

    let args = Args::parse();
    let Some(contents) = args.contents else {
        return repl();
    };

    let script = if args.file {
        match fs::read_to_string(&contents) {
            Ok(script) => script,
            Err(e) => {
                eprintln!("Failed to read the input file '{contents}': {e}");
                return ExitCode::FAILURE;
            },
        }
    } else {
        contents
    };

    if args.quiet {
        match evaluate(&script) {
            Ok(last) => {
                if let Some(value) = last {
                    println!("{value}");
                }
                ExitCode::SUCCESS
            },
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        }
    } else {
        let mut interpreter = printing_interpreter();
        interpreter.set_source(script);
        if run_reporting(&mut interpreter) { ExitCode::SUCCESS } else { ExitCode::FAILURE }
    }
}

/// An interpreter with the bundled modules that prints every output value.
fn printing_interpreter() -> Interpreter {
    let mut interpreter = Interpreter::with_default_modules();
    interpreter.subscribe(|event| {
                   if let Some(value) = event.output() {
                       println!("{value}");
                   }
               });
    interpreter
}

fn run_reporting(interpreter: &mut Interpreter) -> bool {
    let success = interpreter.run();
    if let Some(error) = interpreter.last_error() {
        eprintln!("{error}");
    }
    success
}

fn repl() -> ExitCode {
    let mut editor = match DefaultEditor::new() {
        Ok(editor) => editor,
        Err(e) => {
            eprintln!("Failed to create the line editor: {e}");
            return ExitCode::FAILURE;
        },
    };
    let mut interpreter = printing_interpreter();
    let mut input = Interactive::new();

    println!("calcscript v{}", env!("CARGO_PKG_VERSION"));
    println!("Type :vars to list variables, :reset to clear them, :quit to exit.");

    loop {
        let prompt = if input.is_pending() { "...   " } else { "calc> " };
        match editor.readline(prompt) {
            Ok(line) => {
                if let Err(e) = editor.add_history_entry(line.as_str()) {
                    warn!("Failed to add history entry: {e}");
                }
                if !input.is_pending() {
                    match line.trim() {
                        ":quit" => break,
                        ":vars" => {
                            let sorted: BTreeMap<_, _> = interpreter.vars.iter().collect();
                            for (name, value) in sorted {
                                println!("{name} = {value}");
                            }
                            continue;
                        },
                        ":reset" => {
                            interpreter.reset();
                            continue;
                        },
                        _ => {},
                    }
                }
                if let Some(script) = input.push_line(&line) {
                    interpreter.set_source(script);
                    run_reporting(&mut interpreter);
                }
            },
            Err(ReadlineError::Interrupted) => {
                input.clear();
                println!("^C");
            },
            Err(ReadlineError::Eof) => break,
            Err(e) => {
                eprintln!("Error: {e}");
                return ExitCode::FAILURE;
            },
        }
    }
    ExitCode::SUCCESS
}
