pub mod util;
pub mod interpreter;

use std::cell::RefCell;
use std::io::{BufRead, Write};
use std::path::PathBuf;
use std::rc::Rc;
use clap::Parser as ClapParser;
use thiserror::Error;
use crate::interpreter::ast::{Program, Statement};
use crate::interpreter::environment::Environment;
use crate::interpreter::error::ParseFailure;
use crate::interpreter::evaluator;
use crate::interpreter::lexer::Lexer;
use crate::interpreter::object::Object;
use crate::interpreter::parser::Parser;

const PROMPT: &str = ">> ";

#[derive(ClapParser, Debug)]
#[clap(author, version, about, long_about = None)]
pub struct Config {
    #[clap(help = "Program file to run; starts an interactive session if omitted")]
    pub input: Option<PathBuf>,

    #[clap(short, long, help = "Print verbose log output")]
    pub verbose: bool,
}

#[derive(Error, Debug)]
pub enum RunError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Parse(#[from] ParseFailure),
    #[error("program has {0} syntax error(s)")]
    Syntax(usize),
    #[error("{0}")]
    Evaluation(String),
}

pub fn run(config: Config) -> Result<(), RunError> {
    match config.input {
        Some(path) => {
            let source = std::fs::read_to_string(&path)?;
            tracing::debug!(path = %path.display(), bytes = source.len(), "running file");

            run_source(&source, &mut std::io::stdout(), &mut std::io::stderr())
        },
        None => {
            let stdin = std::io::stdin();
            start_repl(stdin.lock(), &mut std::io::stdout())
        },
    }
}

/// Parses and evaluates a whole program, printing its result to `output` unless it is null.
pub fn run_source(source: &str, output: &mut impl Write, errors: &mut impl Write) -> Result<(), RunError> {
    let mut parser = Parser::new(Lexer::new(source));
    let program = parser.parse_program()?;

    if parser.had_error() {
        write_parser_errors(errors, parser.errors())?;
        return Err(RunError::Syntax(parser.errors().len()));
    }

    let result = evaluator::eval(&program, &Environment::new());

    match &*result {
        Object::Error(message) => {
            writeln!(errors, "{}", result.inspect())?;
            Err(RunError::Evaluation(message.clone()))
        },
        Object::Null => Ok(()),
        _ => {
            writeln!(output, "{}", result.inspect())?;
            Ok(())
        },
    }
}

/// Reads one program per line until an empty line or end of input. Bindings persist
/// across lines.
pub fn start_repl(mut input: impl BufRead, output: &mut impl Write) -> Result<(), RunError> {
    let env = Environment::new();
    let mut line = String::new();

    loop {
        write!(output, "{}", PROMPT)?;
        output.flush()?;

        line.clear();

        if input.read_line(&mut line)? == 0 || line.trim().is_empty() {
            return Ok(());
        }

        eval_line(&line, &env, output)?;
    }
}

fn eval_line(line: &str, env: &Rc<RefCell<Environment>>, output: &mut impl Write) -> Result<(), RunError> {
    let mut parser = Parser::new(Lexer::new(line));

    let program = match parser.parse_program() {
        Ok(program) => program,
        Err(failure) => return write_parser_errors(output, &[failure.to_string()]),
    };

    if parser.had_error() {
        return write_parser_errors(output, parser.errors());
    }

    let result = evaluator::eval(&program, env);

    if !ends_with_let(&program) {
        writeln!(output, "{}", result.inspect())?;
    }

    Ok(())
}

fn ends_with_let(program: &Program) -> bool {
    matches!(program.statements.last(), Some(Statement::Let { .. }))
}

fn write_parser_errors(output: &mut impl Write, errors: &[String]) -> Result<(), RunError> {
    writeln!(output, "parser errors:")?;

    for error in errors {
        writeln!(output, "\t{}", error)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn repl(input: &str) -> String {
        let mut output = Vec::new();
        start_repl(input.as_bytes(), &mut output).expect("in-memory I/O");

        String::from_utf8(output).expect("utf-8 output")
    }

    fn source(source: &str) -> (Result<(), RunError>, String, String) {
        let mut output = Vec::new();
        let mut errors = Vec::new();
        let result = run_source(source, &mut output, &mut errors);

        (result, String::from_utf8_lossy(&output).into_owned(), String::from_utf8_lossy(&errors).into_owned())
    }

    #[test]
    fn repl_keeps_bindings() {
        let output = repl("let x = 5;\nlet double = fn(n) { n * 2 };\ndouble(x)\n");
        assert_eq!(">> >> >> 10\n>> ", output);
    }

    #[test]
    fn repl_prints_every_result() {
        assert_eq!(">> null\n>> Error: identifier not found: y\n>> ", repl("puts()\ny\n"));
    }

    #[test]
    fn repl_reports_parser_errors() {
        let output = repl("let = 5;\nadd(1, 2\n");

        assert_eq!(concat!(
            ">> parser errors:\n\texpected next token to be IDENT, got =\n",
            ">> parser errors:\n\tlist was never closed: expected ), got END_OF_FILE\n",
            ">> ",
        ), output);
    }

    #[test]
    fn repl_stops_on_empty_line() {
        assert_eq!(">> 1\n>> ", repl("1\n\n2\n"));
        assert_eq!(">> ", repl(""));
    }

    #[test]
    fn source_prints_result() {
        let (result, output, errors) = source("let a = [1, 2]; push(a, 3)");

        assert!(result.is_ok());
        assert_eq!("[1, 2, 3]\n", output);
        assert_eq!("", errors);
    }

    #[test]
    fn source_skips_null_result() {
        let (result, output, _) = source("let a = 1;");

        assert!(result.is_ok());
        assert_eq!("", output);
    }

    #[test]
    fn source_reports_errors() {
        let (result, output, errors) = source("let x = ; let y = ;");
        assert!(matches!(result, Err(RunError::Syntax(2))), "{:?}", result);
        assert_eq!("", output);
        assert_eq!("parser errors:\n\tno prefix parse function for ; found\n\tno prefix parse function for ; found\n", errors);

        let (result, _, errors) = source("1 + true");
        assert!(matches!(result, Err(RunError::Evaluation(ref message)) if message == "type mismatch: INTEGER + BOOLEAN"), "{:?}", result);
        assert_eq!("Error: type mismatch: INTEGER + BOOLEAN\n", errors);

        let (result, _, _) = source("[1, 2");
        assert!(matches!(result, Err(RunError::Parse(ParseFailure::UnterminatedList { .. }))), "{:?}", result);
    }
}
