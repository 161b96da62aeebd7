//! Command language of the driver.
//!
//! One command per line or per `;`-separated segment. Names containing
//! whitespace or `;` are written in double quotes.

use crate::error::{CommandError, Result};

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Create { name: String, value: f64 },
    Set { name: String, value: f64 },
    Get { name: String },
    Show { name: String },
    Remove { name: String },
    Has { name: String },
    Count,
    List,
    Reset,
    Error,
}

/// Split a script into command segments on newlines and unquoted `;`.
pub fn split_commands(input: &str) -> Vec<&str> {
    let mut segments = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    for (i, c) in input.char_indices() {
        match c {
            '"' => in_quotes = !in_quotes,
            ';' if !in_quotes => {
                segments.push(&input[start..i]);
                start = i + 1;
            }
            '\n' => {
                segments.push(&input[start..i]);
                start = i + 1;
                in_quotes = false;
            }
            _ => {}
        }
    }
    segments.push(&input[start..]);
    segments
        .into_iter()
        .map(str::trim)
        .filter(|s| !s.is_empty() && !s.starts_with('#'))
        .collect()
}

fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut chars = line.trim().chars().peekable();
    while let Some(&c) = chars.peek() {
        if c.is_whitespace() {
            chars.next();
            continue;
        }
        let mut token = String::new();
        if c == '"' {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') => break,
                    Some(ch) => token.push(ch),
                    None => return Err(CommandError::UnterminatedQuote),
                }
            }
        } else {
            while let Some(&ch) = chars.peek() {
                if ch.is_whitespace() {
                    break;
                }
                token.push(ch);
                chars.next();
            }
        }
        tokens.push(token);
    }
    Ok(tokens)
}

fn parse_value(raw: &str) -> Result<f64> {
    raw.parse::<f64>()
        .map_err(|_| CommandError::InvalidNumber(raw.to_string()))
}

/// Parse one command segment.
pub fn parse_command(line: &str) -> Result<Command> {
    let tokens = tokenize(line)?;
    let Some((head, args)) = tokens.split_first() else {
        return Err(CommandError::Usage("empty command"));
    };
    let keyword = head.to_ascii_lowercase();

    match (keyword.as_str(), args) {
        ("create", [name, value]) => Ok(Command::Create {
            name: name.clone(),
            value: parse_value(value)?,
        }),
        ("create", _) => Err(CommandError::Usage("create NAME VALUE")),
        ("set", [name, value]) => Ok(Command::Set {
            name: name.clone(),
            value: parse_value(value)?,
        }),
        ("set", _) => Err(CommandError::Usage("set NAME VALUE")),
        ("get", [name]) => Ok(Command::Get { name: name.clone() }),
        ("get", _) => Err(CommandError::Usage("get NAME")),
        ("show", [name]) => Ok(Command::Show { name: name.clone() }),
        ("show", _) => Err(CommandError::Usage("show NAME")),
        ("remove" | "rm", [name]) => Ok(Command::Remove { name: name.clone() }),
        ("remove" | "rm", _) => Err(CommandError::Usage("remove NAME")),
        ("has", [name]) => Ok(Command::Has { name: name.clone() }),
        ("has", _) => Err(CommandError::Usage("has NAME")),
        ("count", []) => Ok(Command::Count),
        ("list" | "ls", []) => Ok(Command::List),
        ("reset", []) => Ok(Command::Reset),
        ("error", []) => Ok(Command::Error),
        ("count" | "list" | "ls" | "reset" | "error", _) => {
            Err(CommandError::Usage("command takes no arguments"))
        }
        _ => Err(CommandError::Unknown(head.clone())),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_commands() {
        assert_eq!(
            split_commands("create a 1; get a\n\n  # comment\ncount;"),
            vec!["create a 1", "get a", "count"]
        );
        assert_eq!(
            split_commands(r#"create "a;b" 1; get "a;b""#),
            vec![r#"create "a;b" 1"#, r#"get "a;b""#]
        );
    }

    #[test]
    fn test_parse_commands() {
        assert_eq!(
            parse_command("create life 105").unwrap(),
            Command::Create {
                name: "life".into(),
                value: 105.0
            }
        );
        assert_eq!(
            parse_command("SET life -2.5").unwrap(),
            Command::Set {
                name: "life".into(),
                value: -2.5
            }
        );
        assert_eq!(
            parse_command("get life").unwrap(),
            Command::Get { name: "life".into() }
        );
        assert_eq!(parse_command("ls").unwrap(), Command::List);
        assert_eq!(parse_command("error").unwrap(), Command::Error);
    }

    #[test]
    fn test_quoted_names() {
        assert_eq!(
            parse_command(r#"create "net income" 12"#).unwrap(),
            Command::Create {
                name: "net income".into(),
                value: 12.0
            }
        );
        assert_eq!(
            parse_command(r#"get """#).unwrap(),
            Command::Get { name: String::new() }
        );
        assert_eq!(
            parse_command(r#"get "open"#),
            Err(CommandError::UnterminatedQuote)
        );
    }

    #[test]
    fn test_non_finite_literals_parse() {
        let Command::Create { value, .. } = parse_command("create x NaN").unwrap() else {
            panic!("expected create");
        };
        assert!(value.is_nan());
        let Command::Set { value, .. } = parse_command("set x inf").unwrap() else {
            panic!("expected set");
        };
        assert_eq!(value, f64::INFINITY);
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            parse_command("frobnicate x"),
            Err(CommandError::Unknown("frobnicate".into()))
        );
        assert_eq!(
            parse_command("create x"),
            Err(CommandError::Usage("create NAME VALUE"))
        );
        assert_eq!(
            parse_command("create x ten"),
            Err(CommandError::InvalidNumber("ten".into()))
        );
        assert_eq!(
            parse_command("count 3"),
            Err(CommandError::Usage("command takes no arguments"))
        );
    }
}
