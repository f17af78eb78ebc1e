mod error;

use error::Error;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::{io::{self, BufRead, IsTerminal}, process::ExitCode};
use tgp_core::{eval::Assignments, simplify::step::Step, simplify_with_steps, types::Type, Node};
use tgp_reader::{read, read_type};
use tracing::debug;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Installs the log subscriber. The filter is read from `RUST_LOG`, and defaults to warnings.
fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Reads the type of each variable from the command line arguments: `v0` has the type of the first
/// argument, and so on.
fn variable_types() -> Result<Vec<Type>, (String, Error)> {
    std::env::args()
        .skip(1)
        .map(|arg| read_type(&arg).map_err(|err| (arg, Error::TypeError(err))))
        .collect()
}

/// Reads and simplifies the given input, printing the simplified tree. Trees without variables are
/// also evaluated.
fn read_simplify(input: &str, variables: &[Type]) -> Result<(), Error> {
    let node = read(input, variables).map_err(Error::ReadError)?;

    let mut steps = Vec::<Step>::new();
    let simplified = simplify_with_steps(&node, &mut steps);
    debug!(?steps, "simplified");

    println!("{}", simplified);
    println!("  nodes: {}, depth: {}", simplified.node_count(), simplified.depth());

    if !simplified.iter().any(Node::is_variable) {
        let value = simplified.evaluate(&Assignments::default()).map_err(Error::EvalError)?;
        println!("  = {}", value);
    }

    Ok(())
}

/// Processes a single line of input, printing the result or the error.
fn process(input: &str, variables: &[Type]) {
    if let Err(err) = read_simplify(input, variables) {
        if let Err(io_err) = err.report_to_stderr(input) {
            eprintln!("{}", io_err);
        }
    }
}

fn main() -> ExitCode {
    init_logging();

    let variables = match variable_types() {
        Ok(variables) => variables,
        Err((arg, err)) => {
            if let Err(io_err) = err.report_to_stderr(&arg) {
                eprintln!("{}", io_err);
            }
            return ExitCode::from(2);
        },
    };
    debug!(?variables, "declared variables");

    if !io::stdin().is_terminal() {
        // read one expression per line from stdin
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) if line.trim().is_empty() => (),
                Ok(line) => process(&line, &variables),
                Err(err) => {
                    eprintln!("{}", err);
                    return ExitCode::FAILURE;
                },
            }
        }
        return ExitCode::SUCCESS;
    }

    // run the repl / interactive mode
    let mut rl = match DefaultEditor::new() {
        Ok(rl) => rl,
        Err(err) => {
            eprintln!("{}", err);
            return ExitCode::FAILURE;
        },
    };

    fn process_line(rl: &mut DefaultEditor, variables: &[Type]) -> Result<(), ReadlineError> {
        let input = rl.readline("> ")?;
        if input.trim().is_empty() {
            return Ok(());
        }

        rl.add_history_entry(&input)?;

        process(&input, variables);
        Ok(())
    }

    loop {
        if let Err(err) = process_line(&mut rl, &variables) {
            match err {
                ReadlineError::Eof | ReadlineError::Interrupted => (),
                _ => eprintln!("{}", err),
            }
            break;
        }
    }

    ExitCode::SUCCESS
}
