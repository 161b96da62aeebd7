//! Cell name validation.
//!
//! A well-formed name is non-empty, at most [`MAX_NAME_LEN`] bytes, has no
//! leading or trailing whitespace, and contains no control characters and no
//! angle brackets (`<name>` is the reference syntax of formula cells).

use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

use crate::error::{EngineError, Result};

pub const MAX_NAME_LEN: usize = 255;

/// Why a name was rejected.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum NameError {
    #[error("name is empty")]
    Empty,

    #[error("name is {len} bytes long (max {max})")]
    TooLong { len: usize, max: usize },

    #[error("name has leading or trailing whitespace")]
    SurroundingWhitespace,

    #[error("name contains control character {0:?}")]
    ControlCharacter(char),

    #[error("name contains reserved character {0:?}")]
    ReservedCharacter(char),

    #[error("name is not valid UTF-8")]
    NotUtf8,

    #[error("name is missing")]
    Missing,
}

fn forbidden_char_re() -> &'static Regex {
    static FORBIDDEN_RE: OnceLock<Regex> = OnceLock::new();
    FORBIDDEN_RE.get_or_init(|| {
        Regex::new(r"[<>\p{Cc}]").expect("forbidden name character regex must compile")
    })
}

/// Check a name without touching any engine state.
pub fn check_name(name: &str) -> std::result::Result<(), NameError> {
    if name.is_empty() {
        return Err(NameError::Empty);
    }
    if name.len() > MAX_NAME_LEN {
        return Err(NameError::TooLong {
            len: name.len(),
            max: MAX_NAME_LEN,
        });
    }
    if let Some(m) = forbidden_char_re().find(name) {
        let ch = m.as_str().chars().next().unwrap_or('\0');
        return Err(if ch.is_control() {
            NameError::ControlCharacter(ch)
        } else {
            NameError::ReservedCharacter(ch)
        });
    }
    if name.trim() != name {
        return Err(NameError::SurroundingWhitespace);
    }
    Ok(())
}

pub(crate) fn validate_name(name: &str) -> Result<()> {
    check_name(name).map_err(|reason| EngineError::InvalidName {
        name: name.to_string(),
        reason,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_ordinary_names() {
        for name in ["life", "Life", "FlatStrTree", "a b", "x_1", "µ", "42"] {
            assert_eq!(check_name(name), Ok(()), "{name}");
        }
    }

    #[test]
    fn rejects_empty() {
        assert_eq!(check_name(""), Err(NameError::Empty));
    }

    #[test]
    fn rejects_surrounding_whitespace() {
        assert_eq!(check_name(" life"), Err(NameError::SurroundingWhitespace));
        assert_eq!(check_name("life "), Err(NameError::SurroundingWhitespace));
        assert_eq!(check_name("   "), Err(NameError::SurroundingWhitespace));
    }

    #[test]
    fn rejects_control_and_reserved_characters() {
        assert_eq!(check_name("a\nb"), Err(NameError::ControlCharacter('\n')));
        assert_eq!(check_name("a\0"), Err(NameError::ControlCharacter('\0')));
        assert_eq!(check_name("<life>"), Err(NameError::ReservedCharacter('<')));
        assert_eq!(check_name("a>b"), Err(NameError::ReservedCharacter('>')));
    }

    #[test]
    fn rejects_overlong_names() {
        let name = "x".repeat(MAX_NAME_LEN + 1);
        assert_eq!(
            check_name(&name),
            Err(NameError::TooLong {
                len: MAX_NAME_LEN + 1,
                max: MAX_NAME_LEN
            })
        );
        assert_eq!(check_name(&"x".repeat(MAX_NAME_LEN)), Ok(()));
    }

    #[test]
    fn validate_name_wraps_reason() {
        let err = validate_name("").unwrap_err();
        assert_eq!(
            err,
            EngineError::InvalidName {
                name: String::new(),
                reason: NameError::Empty
            }
        );
        assert_eq!(err.to_string(), r#"invalid cell name "": name is empty"#);
    }
}
