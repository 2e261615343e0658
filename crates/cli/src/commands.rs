//! Clap command tree definition.
//!
//! Builds the `clap::Command` tree used by shell mode (directly) and by
//! REPL/pipe mode (via `try_get_matches_from`).

use clap::{Arg, ArgAction, Command};

/// Build the complete CLI command tree, global flags included.
pub fn build_cli() -> Command {
    let cli = Command::new("privreg")
        .about("Private-data record registry")
        .subcommand_required(false)
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .value_name("FILE")
                .help("Registry configuration file (TOML)")
                .global(true),
        )
        .arg(
            Arg::new("entity")
                .long("entity")
                .value_name("ENTITY")
                .help("Built-in entity when no config file is given: asset or car")
                .conflicts_with("config")
                .global(true),
        )
        .arg(
            Arg::new("json")
                .long("json")
                .help("JSON output mode")
                .action(ArgAction::SetTrue)
                .conflicts_with("raw")
                .global(true),
        )
        .arg(
            Arg::new("raw")
                .long("raw")
                .help("Raw output mode (payload only)")
                .action(ArgAction::SetTrue)
                .global(true),
        );
    with_operations(cli)
}

/// Build a command tree for REPL mode (no global flags).
pub fn build_repl_cmd() -> Command {
    with_operations(
        Command::new("repl")
            .multicall(true)
            .subcommand_required(true),
    )
}

fn with_operations(cmd: Command) -> Command {
    cmd.subcommand(build_create())
        .subcommand(name_command("read", "Read the public record"))
        .subcommand(name_command("read-private", "Read the private-detail record"))
        .subcommand(build_transfer())
        .subcommand(name_command("delete", "Delete a record, its private detail and index entry"))
        .subcommand(build_range())
        .subcommand(name_command("hash", "Hash of the public record"))
        .subcommand(name_command("hash-private", "Hash of the private-detail record"))
        .subcommand(build_by_color())
        .subcommand(build_invoke())
}

fn name_arg() -> Arg {
    Arg::new("name").required(true).help("Record name")
}

fn name_command(name: &'static str, about: &'static str) -> Command {
    Command::new(name).about(about).arg(name_arg())
}

fn build_create() -> Command {
    Command::new("create")
        .about("Create a record with its private detail")
        .arg(name_arg())
        .arg(Arg::new("color").required(true).help("Color"))
        .arg(
            Arg::new("quantity")
                .required(true)
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Quantity (size or tiresize)"),
        )
        .arg(Arg::new("owner").required(true).help("Owner"))
        .arg(
            Arg::new("price")
                .required(true)
                .value_parser(clap::value_parser!(i64))
                .allow_negative_numbers(true)
                .help("Price (private)"),
        )
}

fn build_transfer() -> Command {
    Command::new("transfer")
        .about("Change the owner of a record")
        .arg(name_arg())
        .arg(Arg::new("owner").required(true).help("New owner"))
}

fn build_range() -> Command {
    Command::new("range")
        .about("Public records with start <= key < end")
        .arg(Arg::new("start").required(true).help("Inclusive start key (\"\" for the beginning)"))
        .arg(Arg::new("end").required(true).help("Exclusive end key (\"\" for unbounded)"))
}

fn build_by_color() -> Command {
    Command::new("by-color")
        .about("Public records with the given color")
        .arg(Arg::new("color").required(true).help("Color"))
}

fn build_invoke() -> Command {
    Command::new("invoke")
        .about("Raw invocation: function name, positional args and transient data")
        .arg(Arg::new("function").required(true).help("Operation name, e.g. readPublic"))
        .arg(
            Arg::new("args")
                .num_args(0..)
                .value_name("ARG")
                .help("Positional arguments"),
        )
        .arg(
            Arg::new("transient")
                .long("transient")
                .short('t')
                .value_name("KEY=JSON")
                .action(ArgAction::Append)
                .help("Transient map entry (repeatable)"),
        )
}
