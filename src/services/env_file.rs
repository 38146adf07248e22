// src/services/env_file.rs
//! Text operations on the `NAME=value` configuration store
//! Pure functions over the file contents so they can be tested without I/O

use regex::{NoExpand, Regex};

use crate::common::KeySetupError;

/// State of a single entry in the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EntryState<'a> {
    /// `NAME=value` with a non-empty value
    Set(&'a str),
    /// `NAME=` with nothing after the equals sign
    Empty,
    /// No line starts with `NAME=`
    Missing,
}

/// Result of ensuring an entry, carrying the new file contents when they changed
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEdit {
    Unchanged,
    Filled { content: String },
    Appended { content: String },
}

impl StoreEdit {
    pub fn content(&self) -> Option<&str> {
        match self {
            StoreEdit::Unchanged => None,
            StoreEdit::Filled { content } | StoreEdit::Appended { content } => Some(content),
        }
    }
}

pub fn validate_key_name(name: &str) -> Result<(), KeySetupError> {
    let valid = !name.is_empty()
        && name
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_');

    if valid {
        Ok(())
    } else {
        Err(KeySetupError::InvalidKeyName(name.to_string()))
    }
}

/// Matches the first `NAME=...` line, tolerating CRLF line endings
fn entry_regex(name: &str) -> Result<Regex, KeySetupError> {
    validate_key_name(name)?;
    Regex::new(&format!(r"(?mR)^{}=(.*)$", regex::escape(name)))
        .map_err(|_| KeySetupError::InvalidKeyName(name.to_string()))
}

fn entry_state<'a>(re: &Regex, content: &'a str) -> EntryState<'a> {
    match re.captures(content).and_then(|caps| caps.get(1)) {
        Some(value) if !value.as_str().is_empty() => EntryState::Set(value.as_str()),
        Some(_) => EntryState::Empty,
        None => EntryState::Missing,
    }
}

#[cfg(test)]
pub fn find_entry<'a>(content: &'a str, name: &str) -> Result<EntryState<'a>, KeySetupError> {
    Ok(entry_state(&entry_regex(name)?, content))
}

/// Make sure `name` has a value, calling `generate` at most once
pub fn ensure_entry<F>(content: &str, name: &str, generate: F) -> Result<StoreEdit, KeySetupError>
where
    F: FnOnce() -> String,
{
    let re = entry_regex(name)?;

    let edit = match entry_state(&re, content) {
        EntryState::Set(_) => StoreEdit::Unchanged,
        EntryState::Empty => {
            let line = format!("{}={}", name, generate());
            StoreEdit::Filled {
                content: re.replacen(content, 1, NoExpand(&line)).into_owned(),
            }
        }
        EntryState::Missing => {
            let existing = content.trim_end();
            let content = if existing.is_empty() {
                format!("{}={}\n", name, generate())
            } else {
                format!("{}\n{}={}\n", existing, name, generate())
            };
            StoreEdit::Appended { content }
        }
    };

    Ok(edit)
}
