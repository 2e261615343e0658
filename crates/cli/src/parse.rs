//! ArgMatches → Invocation conversion, plus REPL meta-commands.
//!
//! Convenience subcommands are translated into the same [`Invocation`]
//! a peer would submit: record data goes into the transient map under
//! the entity's keys, names and ranges become positional arguments.

use clap::ArgMatches;
use privreg_executor::{Command, EntitySchema, Invocation};
use serde_json::{json, Value};

/// REPL meta-commands.
pub enum MetaCommand {
    Help { command: Option<String> },
    Quit,
    Clear,
}

/// Check for REPL meta-commands before delegating to clap.
pub fn check_meta_command(line: &str) -> Option<MetaCommand> {
    let mut parts = line.split_whitespace();
    match parts.next()? {
        "quit" | "exit" => Some(MetaCommand::Quit),
        "clear" => Some(MetaCommand::Clear),
        "help" => Some(MetaCommand::Help {
            command: parts.next().map(str::to_string),
        }),
        _ => None,
    }
}

/// Convert clap ArgMatches into an invocation for `schema`'s entity.
pub fn matches_to_invocation(matches: &ArgMatches, schema: &EntitySchema) -> Result<Invocation, String> {
    let (sub_name, sub) = matches
        .subcommand()
        .ok_or_else(|| "No command provided".to_string())?;

    let invocation = match sub_name {
        "create" => {
            let quantity = sub.get_one::<i64>("quantity").copied().unwrap_or_default();
            let price = sub.get_one::<i64>("price").copied().unwrap_or_default();
            let mut data = serde_json::Map::new();
            data.insert("name".into(), json!(string(sub, "name")));
            data.insert("color".into(), json!(string(sub, "color")));
            data.insert(schema.quantity_field.clone(), json!(quantity));
            data.insert("owner".into(), json!(string(sub, "owner")));
            data.insert("price".into(), json!(price));
            Invocation::new(Command::CREATE).transient_json(schema.create_key(), &Value::Object(data))
        }
        "transfer" => Invocation::new(Command::TRANSFER).transient_json(
            schema.transfer_key(),
            &json!({"name": string(sub, "name"), "owner": string(sub, "owner")}),
        ),
        "delete" => Invocation::new(Command::DELETE)
            .transient_json(schema.delete_key(), &json!({ "name": string(sub, "name") })),
        "read" => Invocation::new(Command::READ_PUBLIC).arg(string(sub, "name")),
        "read-private" => Invocation::new(Command::READ_PRIVATE_DETAIL).arg(string(sub, "name")),
        "hash" => Invocation::new(Command::HASH_OF_PUBLIC).arg(string(sub, "name")),
        "hash-private" => Invocation::new(Command::HASH_OF_PRIVATE_DETAIL).arg(string(sub, "name")),
        "range" => Invocation::new(Command::RANGE_QUERY)
            .arg(string(sub, "start"))
            .arg(string(sub, "end")),
        "by-color" => Invocation::new(Command::QUERY_BY_COLOR).arg(string(sub, "color")),
        "invoke" => parse_invoke(sub)?,
        other => return Err(format!("Unknown command: {}", other)),
    };
    Ok(invocation)
}

fn string(matches: &ArgMatches, id: &str) -> String {
    matches.get_one::<String>(id).cloned().unwrap_or_default()
}

fn parse_invoke(matches: &ArgMatches) -> Result<Invocation, String> {
    let mut invocation = Invocation::new(string(matches, "function"));
    if let Some(args) = matches.get_many::<String>("args") {
        for arg in args {
            invocation = invocation.arg(arg.clone());
        }
    }
    if let Some(entries) = matches.get_many::<String>("transient") {
        for entry in entries {
            let (key, value) = parse_transient(entry)?;
            invocation = invocation.transient(key, value);
        }
    }
    Ok(invocation)
}

/// Parse a `KEY=JSON` transient entry.
///
/// The value is passed through as bytes; it is checked for JSON syntax only
/// so that typos fail here rather than as a remote decode error.
pub fn parse_transient(entry: &str) -> Result<(String, Vec<u8>), String> {
    let (key, value) = entry
        .split_once('=')
        .ok_or_else(|| format!("Invalid transient entry (expected KEY=JSON): {}", entry))?;
    if key.is_empty() {
        return Err(format!("Invalid transient entry (empty key): {}", entry));
    }
    serde_json::from_str::<Value>(value)
        .map_err(|e| format!("Invalid JSON for transient key {}: {}", key, e))?;
    Ok((key.to_string(), value.as_bytes().to_vec()))
}
