//! REPL loop with rustyline.
//!
//! Interactive mode: prompt, meta-commands, history, TAB completion.
//! Pipe mode: read lines from stdin, execute each.

use std::io::{self, BufRead};

use rustyline::completion::{Completer, Pair};
use rustyline::error::ReadlineError;
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{CompletionType, Config, Context, Editor, Helper};

use crate::commands::build_repl_cmd;
use crate::format::{format_error, format_output, OutputMode};
use crate::parse::{check_meta_command, matches_to_invocation, MetaCommand};
use crate::state::SessionState;

/// Run the interactive REPL.
pub fn run_repl(state: &mut SessionState, mode: OutputMode) -> rustyline::Result<()> {
    let config = Config::builder()
        .history_ignore_space(true)
        .completion_type(CompletionType::List)
        .build();

    let mut rl: Editor<RegistryHelper, _> = Editor::with_config(config)?;
    rl.set_helper(Some(RegistryHelper));

    let history_path = history_file();
    if let Some(ref path) = history_path {
        // Missing history on first run is expected
        let _ = rl.load_history(path);
    }

    loop {
        match rl.readline(&state.prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if trimmed.is_empty() {
                    continue;
                }
                let _ = rl.add_history_entry(trimmed);

                if let Some(meta) = check_meta_command(trimmed) {
                    match meta {
                        MetaCommand::Quit => break,
                        MetaCommand::Clear => print!("\x1B[2J\x1B[1;1H"),
                        MetaCommand::Help { command } => print_help(command.as_deref()),
                    }
                    continue;
                }

                execute_line(trimmed, state, mode);
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(err) => {
                eprintln!("(error) {:?}", err);
                break;
            }
        }
    }

    if let Some(ref path) = history_path {
        if let Err(e) = rl.save_history(path) {
            tracing::debug!(error = %e, "could not save history");
        }
    }
    tracing::debug!(invocations = state.invocation_count(), "session closed");
    Ok(())
}

/// Run in pipe mode: read lines from stdin, execute each.
///
/// Blank lines and `#` comments are skipped. Returns 1 if any line failed.
pub fn run_pipe(state: &mut SessionState, mode: OutputMode) -> i32 {
    let stdin = io::stdin();
    let exit_code = run_lines(stdin.lock(), state, mode);
    tracing::debug!(invocations = state.invocation_count(), "pipe closed");
    exit_code
}

/// Execute every line of `input`; an unreadable line stops the run with 1.
fn run_lines(input: impl BufRead, state: &mut SessionState, mode: OutputMode) -> i32 {
    let mut exit_code = 0;
    for line in input.lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("(error) Failed to read input: {}", e);
                return 1;
            }
        };
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        if !execute_line(trimmed, state, mode) {
            exit_code = 1;
        }
    }
    exit_code
}

/// Tokenize, parse and execute one line. Returns true on success.
fn execute_line(line: &str, state: &mut SessionState, mode: OutputMode) -> bool {
    let tokens = match shlex::split(line) {
        Some(t) if !t.is_empty() => t,
        Some(_) => return true,
        None => {
            eprintln!("(error) Invalid quoting: {}", line);
            return false;
        }
    };

    let matches = match build_repl_cmd().try_get_matches_from(tokens) {
        Ok(m) => m,
        Err(e) => {
            eprintln!("{}", e);
            return false;
        }
    };

    let invocation = match matches_to_invocation(&matches, state.schema()) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("(error) {}", e);
            return false;
        }
    };

    match state.execute(&invocation) {
        Ok(output) => {
            let formatted = format_output(&output, mode);
            if !formatted.is_empty() {
                println!("{}", formatted);
            }
            true
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            false
        }
    }
}

fn history_file() -> Option<String> {
    std::env::var("HOME")
        .ok()
        .map(|h| format!("{}/.privreg_history", h))
}

fn print_help(command: Option<&str>) {
    if let Some(cmd) = command {
        if let Err(e) = build_repl_cmd().try_get_matches_from([cmd, "--help"]) {
            println!("{}", e);
        }
        return;
    }
    println!("Available commands:");
    println!("  create NAME COLOR QTY OWNER PRICE   Create a record and its private detail");
    println!("  read NAME                           Read the public record");
    println!("  read-private NAME                   Read the private-detail record");
    println!("  transfer NAME OWNER                 Change the owner");
    println!("  delete NAME                         Delete record, private detail and index entry");
    println!("  range START END                     Public records in [START, END)");
    println!("  hash NAME                           Hash of the public record");
    println!("  hash-private NAME                   Hash of the private-detail record");
    println!("  by-color COLOR                      Public records with COLOR");
    println!("  invoke FUNC [ARGS..] -t KEY=JSON    Raw invocation");
    println!();
    println!("Meta-commands:");
    println!("  help [command]   Show help");
    println!("  quit / exit      Exit REPL");
    println!("  clear            Clear screen");
}

// =========================================================================
// TAB Completion
// =========================================================================

const TOP_LEVEL_COMMANDS: &[&str] = &[
    "create",
    "read",
    "read-private",
    "transfer",
    "delete",
    "range",
    "hash",
    "hash-private",
    "by-color",
    "invoke",
    "help",
    "quit",
    "exit",
    "clear",
];

struct RegistryHelper;

impl Helper for RegistryHelper {}
impl Validator for RegistryHelper {}
impl Highlighter for RegistryHelper {}
impl Hinter for RegistryHelper {
    type Hint = String;

    fn hint(&self, _line: &str, _pos: usize, _ctx: &Context<'_>) -> Option<String> {
        None
    }
}

impl Completer for RegistryHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &Context<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(complete_command(&line[..pos]))
    }
}

/// Complete the first word only; arguments are free-form.
fn complete_command(line_to_pos: &str) -> (usize, Vec<Pair>) {
    let pos = line_to_pos.len();
    if line_to_pos.contains(char::is_whitespace) {
        return (pos, Vec::new());
    }
    let candidates = TOP_LEVEL_COMMANDS
        .iter()
        .filter(|cmd| cmd.starts_with(line_to_pos))
        .map(|cmd| Pair {
            display: cmd.to_string(),
            replacement: cmd.to_string(),
        })
        .collect();
    (0, candidates)
}
