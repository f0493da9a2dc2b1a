// calcline: run a program file line by line, or start an interactive session

use std::fs;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser as ClapParser;
use crossterm::style::Stylize;

use calcline::interpreter::engine::Interpreter;
use calcline::memory::Environment;
use calcline::parser::lexer::Token;
use calcline::parser::parse::Parser;
use calcline::terminal::{InputSource, StdTerminal};
use calcline::Error;

/// calcline evaluates a small statement language with numbers, strings,
/// booleans, global variables, if/while, print and input.
#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Program file, run one line at a time against a shared environment.
    /// Starts an interactive session when omitted.
    file: Option<PathBuf>,

    /// Echo every token to stderr as it is lexed.
    #[arg(short, long)]
    trace: bool,

    /// Do not echo the value of each evaluated line.
    #[arg(short, long)]
    quiet: bool,
}

/// Outcome of one submitted unit of source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Step {
    Continue,
    Failed,
    Finished,
}

/// Shared state across every unit submitted in one run
struct Session {
    env: Environment,
    interp: Interpreter<StdTerminal, StdTerminal>,
    trace: bool,
    quiet: bool,
    styled: bool,
}

impl Session {
    fn new(args: &Args) -> Self {
        Session {
            env: Environment::new(),
            interp: Interpreter::new(StdTerminal, StdTerminal),
            trace: args.trace,
            quiet: args.quiet,
            styled: io::stderr().is_terminal(),
        }
    }

    /// Parse and evaluate one unit, echoing its value when appropriate.
    fn submit(&mut self, source: &str, origin: &str) -> Step {
        match self.evaluate(source) {
            Ok(()) => Step::Continue,
            Err(e) if e.is_end_of_input() => Step::Finished,
            Err(e) => {
                self.report(origin, &e);
                Step::Failed
            }
        }
    }

    fn evaluate(&mut self, source: &str) -> Result<(), Error> {
        let mut parser = if self.trace {
            let styled = self.styled;
            Parser::with_trace(
                source,
                Box::new(move |token: &Token| {
                    let line = format!("token {}", token);
                    if styled {
                        eprintln!("{}", line.dark_grey());
                    } else {
                        eprintln!("{}", line);
                    }
                }),
            )
        } else {
            Parser::new(source)
        };

        let program = parser.parse_program()?;
        let value = self.interp.run(&program, &mut self.env)?;

        if !self.quiet && !value.is_unit() && program.echoes_result() {
            println!("{}", value);
        }
        Ok(())
    }

    fn report(&self, origin: &str, err: &Error) {
        let message = format!("{}: {}", origin, err);
        if self.styled {
            eprintln!("{}", message.red());
        } else {
            eprintln!("{}", message);
        }
    }
}

/// Net `{` minus `}` outside string literals, used to join multi-line blocks.
fn brace_depth(line: &str) -> i64 {
    let mut depth = 0;
    let mut in_string = false;
    let mut escaped = false;

    for ch in line.chars() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '#' => break,
            '{' => depth += 1,
            '}' => depth -= 1,
            _ => {}
        }
    }

    depth
}

/// Feed `source` to `submit` one unit at a time, joining lines until braces
/// balance. `submit` gets the unit and its first line number. Returns true
/// if any unit failed, including units before an end-of-input stop.
fn run_units(source: &str, mut submit: impl FnMut(&str, usize) -> Step) -> bool {
    let mut failed = false;
    let mut pending = String::new();
    let mut pending_start = 0;
    let mut depth = 0;

    for (index, line) in source.lines().enumerate() {
        if pending.is_empty() {
            if line.trim().is_empty() {
                continue;
            }
            pending_start = index + 1;
        }
        pending.push_str(line);
        pending.push('\n');
        depth += brace_depth(line);

        if depth > 0 {
            continue;
        }

        let step = submit(&pending, pending_start);
        pending.clear();
        depth = 0;

        match step {
            Step::Continue => {}
            Step::Failed => failed = true,
            Step::Finished => return failed,
        }
    }

    // Unbalanced trailing block: let the parser report what is missing
    if !pending.is_empty() {
        if let Step::Failed = submit(&pending, pending_start) {
            failed = true;
        }
    }

    failed
}

fn run_file(session: &mut Session, path: &PathBuf) -> ExitCode {
    let source = match fs::read_to_string(path) {
        Ok(source) => source,
        Err(e) => {
            eprintln!("Error: cannot read '{}': {}", path.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let failed = run_units(&source, |unit, line| {
        session.submit(unit, &format!("{}:{}", path.display(), line))
    });

    if failed {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn run_repl(session: &mut Session) -> ExitCode {
    let mut console = StdTerminal;
    let prompt = if io::stdout().is_terminal() {
        format!("{}", "calc> ".bold())
    } else {
        "calc> ".to_string()
    };
    let continuation = "....> ";

    let mut pending = String::new();
    let mut depth = 0;

    loop {
        let shown = if pending.is_empty() {
            prompt.as_str()
        } else {
            continuation
        };
        let line = match console.read_line(Some(shown)) {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                eprintln!("Error: failed to read input: {}", e);
                return ExitCode::FAILURE;
            }
        };

        if pending.is_empty() && line.trim().is_empty() {
            continue;
        }
        pending.push_str(&line);
        pending.push('\n');
        depth += brace_depth(&line);
        if depth > 0 {
            continue;
        }

        let step = session.submit(&pending, "<stdin>");
        pending.clear();
        depth = 0;

        if let Step::Finished = step {
            break;
        }
    }

    ExitCode::SUCCESS
}

fn main() -> ExitCode {
    let args = Args::parse();
    let mut session = Session::new(&args);

    match &args.file {
        Some(path) => run_file(&mut session, path),
        None => run_repl(&mut session),
    }
}
