//! Textual form events.
//!
//! One event per line: `<verb> [target]`. Category targets are an id or a
//! name; subcategory targets are the remainder of the line, so names may
//! contain spaces. Scripts skip blank lines and `#` comments.

use std::fmt;
use std::str::FromStr;

use crate::domain::error::{DomainError, DomainResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormEvent {
    CheckCategory(String),
    UncheckCategory(String),
    ExpandCategory(String),
    CollapseCategory(String),
    CheckSubcategory(String),
    UncheckSubcategory(String),
    ShowItems(String),
    HideItems(String),
    Reset,
    Submit,
}

impl FormEvent {
    /// Parse a single line; `line_no` is 1-based and only used for errors.
    pub fn parse_line(line: &str, line_no: usize) -> DomainResult<Self> {
        let line = line.trim();
        let (verb, rest) = match line.split_once(char::is_whitespace) {
            Some((verb, rest)) => (verb, rest.trim()),
            None => (line, ""),
        };

        let invalid = |message: String| DomainError::InvalidEvent {
            line: line_no,
            message,
        };
        let target = || -> DomainResult<String> {
            if rest.is_empty() {
                Err(invalid(format!("'{verb}' needs a target")))
            } else {
                Ok(rest.to_string())
            }
        };
        let bare = |event: FormEvent| -> DomainResult<FormEvent> {
            if rest.is_empty() {
                Ok(event)
            } else {
                Err(invalid(format!("'{verb}' takes no target")))
            }
        };

        match verb {
            "check" => Ok(Self::CheckCategory(target()?)),
            "uncheck" => Ok(Self::UncheckCategory(target()?)),
            "expand" => Ok(Self::ExpandCategory(target()?)),
            "collapse" => Ok(Self::CollapseCategory(target()?)),
            "check-sub" => Ok(Self::CheckSubcategory(target()?)),
            "uncheck-sub" => Ok(Self::UncheckSubcategory(target()?)),
            "show" => Ok(Self::ShowItems(target()?)),
            "hide" => Ok(Self::HideItems(target()?)),
            "reset" => bare(Self::Reset),
            "submit" => bare(Self::Submit),
            "" => Err(invalid("empty event".to_string())),
            other => Err(invalid(format!("unknown verb '{other}'"))),
        }
    }

    /// Parse a script, skipping blank lines and comments.
    pub fn parse_script(content: &str) -> DomainResult<Vec<Self>> {
        content
            .lines()
            .enumerate()
            .filter(|(_, l)| {
                let t = l.trim();
                !t.is_empty() && !t.starts_with('#')
            })
            .map(|(i, l)| Self::parse_line(l, i + 1))
            .collect()
    }
}

impl FromStr for FormEvent {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_line(s, 1)
    }
}

impl fmt::Display for FormEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckCategory(t) => write!(f, "check {t}"),
            Self::UncheckCategory(t) => write!(f, "uncheck {t}"),
            Self::ExpandCategory(t) => write!(f, "expand {t}"),
            Self::CollapseCategory(t) => write!(f, "collapse {t}"),
            Self::CheckSubcategory(t) => write!(f, "check-sub {t}"),
            Self::UncheckSubcategory(t) => write!(f, "uncheck-sub {t}"),
            Self::ShowItems(t) => write!(f, "show {t}"),
            Self::HideItems(t) => write!(f, "hide {t}"),
            Self::Reset => write!(f, "reset"),
            Self::Submit => write!(f, "submit"),
        }
    }
}
