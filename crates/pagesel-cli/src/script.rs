//! Line-oriented session scripts.
//!
//! Each non-empty line is one display-surface action:
//!
//! ```text
//! # comments and blank lines are skipped
//! page 2
//! next
//! prev
//! toggle 13 off
//! all on
//! select 15
//! show
//! ```

use pagesel_model::ItemId;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptCommand {
    /// Navigate to a 1-based page.
    Page(u64),
    Next,
    Prev,
    /// Set one item's checkbox.
    Toggle { id: ItemId, selected: bool },
    /// Set the page header checkbox.
    All(bool),
    /// Replace the bulk rule. Kept as typed so validation happens where the
    /// user would see it.
    Select(String),
    /// Render the current page.
    Show,
}

/// A parsed command with its 1-based source line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptLine {
    pub line: usize,
    pub command: ScriptCommand,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScriptError {
    #[error("line {line}: unknown command '{command}'")]
    UnknownCommand { line: usize, command: String },

    #[error("line {line}: {message}")]
    Syntax { line: usize, message: String },
}

/// Parse a whole script, stopping at the first malformed line.
pub fn parse_script(text: &str) -> Result<Vec<ScriptLine>, ScriptError> {
    let mut lines = Vec::new();
    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        if let Some(command) = parse_line(line, raw)? {
            lines.push(ScriptLine { line, command });
        }
    }
    Ok(lines)
}

/// Parse one line; `Ok(None)` for blanks and comments.
pub fn parse_line(line: usize, raw: &str) -> Result<Option<ScriptCommand>, ScriptError> {
    let text = raw.trim();
    if text.is_empty() || text.starts_with('#') {
        return Ok(None);
    }
    let mut words = text.split_whitespace();
    let Some(verb) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();
    let syntax = |message: String| ScriptError::Syntax { line, message };

    let command = match verb.to_ascii_lowercase().as_str() {
        "page" => {
            let [number] = args.as_slice() else {
                return Err(syntax("usage: page N".to_string()));
            };
            let number: u64 = number
                .parse()
                .map_err(|_| syntax(format!("'{number}' is not a page number")))?;
            if number == 0 {
                return Err(syntax("pages are numbered from 1".to_string()));
            }
            ScriptCommand::Page(number)
        }
        "next" => expect_no_args(&args, ScriptCommand::Next, line)?,
        "prev" => expect_no_args(&args, ScriptCommand::Prev, line)?,
        "show" => expect_no_args(&args, ScriptCommand::Show, line)?,
        "toggle" => {
            let [id, state] = args.as_slice() else {
                return Err(syntax("usage: toggle ID on|off".to_string()));
            };
            let id = ItemId::new(*id).map_err(|err| syntax(err.to_string()))?;
            let selected = parse_switch(state).ok_or_else(|| {
                syntax(format!("expected on or off, found '{state}'"))
            })?;
            ScriptCommand::Toggle { id, selected }
        }
        "all" => {
            let [state] = args.as_slice() else {
                return Err(syntax("usage: all on|off".to_string()));
            };
            let checked = parse_switch(state).ok_or_else(|| {
                syntax(format!("expected on or off, found '{state}'"))
            })?;
            ScriptCommand::All(checked)
        }
        "select" => {
            if args.is_empty() {
                return Err(syntax("usage: select N".to_string()));
            }
            ScriptCommand::Select(args.join(" "))
        }
        _ => {
            return Err(ScriptError::UnknownCommand {
                line,
                command: verb.to_string(),
            });
        }
    };
    Ok(Some(command))
}

fn expect_no_args(
    args: &[&str],
    command: ScriptCommand,
    line: usize,
) -> Result<ScriptCommand, ScriptError> {
    if args.is_empty() {
        Ok(command)
    } else {
        Err(ScriptError::Syntax {
            line,
            message: format!("unexpected arguments: {}", args.join(" ")),
        })
    }
}

fn parse_switch(value: &str) -> Option<bool> {
    match value.to_ascii_lowercase().as_str() {
        "on" | "true" | "yes" | "1" => Some(true),
        "off" | "false" | "no" | "0" => Some(false),
        _ => None,
    }
}
