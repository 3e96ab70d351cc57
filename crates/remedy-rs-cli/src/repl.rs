//! Slash command parsing for the interactive loop.

use std::path::PathBuf;

/// Supported slash commands in the REPL input line.
#[derive(Debug, Clone, PartialEq)]
pub enum SlashCommand {
    /// Checkpoint the context, optionally to an explicit path.
    Save(Option<PathBuf>),
    /// Restore the context, optionally from an explicit path.
    Load(Option<PathBuf>),
    /// Print the current state table.
    State,
    /// Print tool usage counters.
    Tools,
    /// Print the recent conversation window, optionally sized.
    Window(Option<usize>),
    /// Look up drug information.
    Drug(String),
    /// Look up condition details and published guidelines.
    Condition(String),
    /// Exit the session.
    Quit,
}

/// Parse a slash command from the input line.
///
/// Returns `Ok(None)` for lines that are not commands at all.
pub fn parse_slash_command(input: &str) -> Result<Option<SlashCommand>, String> {
    let trimmed = input.trim();
    if !trimmed.starts_with('/') {
        return Ok(None);
    }
    let mut parts = trimmed.trim_start_matches('/').split_whitespace();
    let Some(command) = parts.next() else {
        return Ok(None);
    };
    match command.to_lowercase().as_str() {
        "save" => Ok(Some(SlashCommand::Save(parts.next().map(PathBuf::from)))),
        "load" => Ok(Some(SlashCommand::Load(parts.next().map(PathBuf::from)))),
        "state" => Ok(Some(SlashCommand::State)),
        "tools" => Ok(Some(SlashCommand::Tools)),
        "window" => match parts.next() {
            None => Ok(Some(SlashCommand::Window(None))),
            Some(size) => {
                let size = size
                    .parse::<usize>()
                    .map_err(|_| "usage: /window [size]".to_string())?;
                Ok(Some(SlashCommand::Window(Some(size))))
            }
        },
        "drug" => {
            let name = parts.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return Err("usage: /drug <name>".to_string());
            }
            Ok(Some(SlashCommand::Drug(name)))
        }
        "condition" => {
            let name = parts.collect::<Vec<_>>().join(" ");
            if name.is_empty() {
                return Err("usage: /condition <name>".to_string());
            }
            Ok(Some(SlashCommand::Condition(name)))
        }
        "quit" | "exit" => Ok(Some(SlashCommand::Quit)),
        _ => Err(format!("unknown command: {command}")),
    }
}
