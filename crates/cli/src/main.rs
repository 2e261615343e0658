//! privreg CLI: shell, REPL and pipe front end for the registry.
//!
//! Three modes:
//! - **Shell mode**: `privreg [flags] COMMAND`: single invocation, exit
//! - **REPL mode**: `privreg [flags]`: interactive prompt (if stdin is TTY)
//! - **Pipe mode**: `echo "read asset1" | privreg`: line-by-line from stdin
//!
//! The ledger is in-process, so state persists for one process only; pipe a
//! script to run a sequence of invocations against the same ledger.

mod commands;
mod format;
mod parse;
mod repl;
mod state;

use std::io::IsTerminal;
use std::path::Path;
use std::process;

use anyhow::Context;
use privreg_executor::{Ledger, RegistryConfig};
use tracing_subscriber::EnvFilter;

use commands::build_cli;
use format::{format_error, format_output, OutputMode};
use parse::matches_to_invocation;
use state::SessionState;

/// Log filter variable; defaults to `warn`.
const LOG_ENV: &str = "PRIVREG_LOG";

fn main() {
    init_tracing();

    let matches = build_cli().get_matches();

    let output_mode = if matches.get_flag("json") {
        OutputMode::Json
    } else if matches.get_flag("raw") {
        OutputMode::Raw
    } else {
        OutputMode::Human
    };

    let ledger = match open_ledger(&matches) {
        Ok(ledger) => ledger,
        Err(e) => {
            eprintln!("(error) {:#}", e);
            process::exit(1);
        }
    };
    let mut state = SessionState::new(ledger);

    if matches.subcommand().is_some() {
        process::exit(run_shell_mode(&matches, &mut state, output_mode));
    } else if std::io::stdin().is_terminal() {
        if let Err(e) = repl::run_repl(&mut state, output_mode) {
            eprintln!("(error) {}", e);
            process::exit(1);
        }
    } else {
        process::exit(repl::run_pipe(&mut state, output_mode));
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn open_ledger(matches: &clap::ArgMatches) -> anyhow::Result<Ledger> {
    let config = match matches.get_one::<String>("config") {
        Some(path) => RegistryConfig::from_file(Path::new(path))
            .with_context(|| format!("failed to load configuration {}", path))?,
        None => {
            let entity = matches
                .get_one::<String>("entity")
                .map(String::as_str)
                .unwrap_or("asset");
            RegistryConfig::for_entity(entity)
        }
    };
    let ledger = Ledger::from_config(&config).context("invalid registry configuration")?;
    tracing::debug!(deployment = ?ledger.deployment(), "ledger opened");
    Ok(ledger)
}

fn run_shell_mode(matches: &clap::ArgMatches, state: &mut SessionState, mode: OutputMode) -> i32 {
    let invocation = match matches_to_invocation(matches, state.schema()) {
        Ok(inv) => inv,
        Err(e) => {
            eprintln!("(error) {}", e);
            return 1;
        }
    };
    match state.execute(&invocation) {
        Ok(output) => {
            let formatted = format_output(&output, mode);
            if !formatted.is_empty() {
                println!("{}", formatted);
            }
            0
        }
        Err(e) => {
            eprintln!("{}", format_error(&e, mode));
            1
        }
    }
}
