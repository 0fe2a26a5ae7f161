// src/core/arg_parser.rs

use std::collections::BTreeMap;
use std::fmt;

/// A single parsed argument value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ArgValue {
    Int(i64),
    Bool(bool),
    Text(String),
}

/// Named values handed to a handler, either parsed from the command line or
/// carried across interactive steps.
pub type ValueMap = BTreeMap<String, ArgValue>;

impl ArgValue {
    /// Parses a raw token: integer first, then boolean, else the text itself.
    pub fn parse(raw: &str) -> Self {
        if let Ok(n) = raw.parse::<i64>() {
            return Self::Int(n);
        }
        match raw {
            "t" | "T" | "true" | "TRUE" | "True" => Self::Bool(true),
            "f" | "F" | "false" | "FALSE" | "False" => Self::Bool(false),
            _ => Self::Text(raw.to_string()),
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => None,
        }
    }

    /// The value as the user typed it. A section named `2024` parses as an
    /// integer but is still a valid name.
    pub fn to_text(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ArgValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(n) => write!(f, "{}", n),
            Self::Bool(b) => write!(f, "{}", b),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for ArgValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for ArgValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<i64> for ArgValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<bool> for ArgValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// A one-shot invocation split into its command name, flags and bare tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub name: String,
    pub named: ValueMap,
    /// Bare tokens in the order they appeared. Their meaning depends on the
    /// command.
    pub positional: Vec<String>,
}

/// Splits `args` into a [`ParsedCommand`]. Returns `None` when `args` is empty.
///
/// # Logic:
/// - The first token is the command name, with an optional leading `--` removed.
/// - `--key=value` stores the parsed value under `key`.
/// - `--key value` does the same when the next token doesn't start with `--`;
///   the value token is consumed.
/// - `--key` alone (last token, or followed by another flag) stores `true`.
/// - Anything else is positional.
pub fn parse_command_line(args: &[String]) -> Option<ParsedCommand> {
    let (first, rest) = args.split_first()?;
    let name = first.strip_prefix("--").unwrap_or(first).to_string();

    let mut named = ValueMap::new();
    let mut positional = Vec::new();
    let mut tokens = rest.iter().map(String::as_str).peekable();

    while let Some(token) = tokens.next() {
        let Some(flag) = token.strip_prefix("--") else {
            positional.push(token.to_string());
            continue;
        };

        if let Some((key, value)) = flag.split_once('=') {
            named.insert(key.to_string(), ArgValue::parse(value));
            continue;
        }

        let value = match tokens.peek() {
            Some(next) if !next.starts_with("--") => {
                let value = ArgValue::parse(next);
                tokens.next();
                value
            }
            _ => ArgValue::Bool(true),
        };
        named.insert(flag.to_string(), value);
    }

    log::debug!(
        "Parsed command '{}': named={:?}, positional={:?}",
        name,
        named,
        positional
    );
    Some(ParsedCommand {
        name,
        named,
        positional,
    })
}
