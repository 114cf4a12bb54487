use std::collections::{BTreeMap, HashMap};

use serde::Deserialize;

use super::{CharacterTable, CharsetDescriptor, Pattern};

#[derive(Deserialize)]
struct CharsetConfig {
    set: SetHeader,
    mappings: BTreeMap<String, String>,
}

#[derive(Deserialize)]
struct SetHeader {
    id: String,
    description: String,
}

#[derive(Debug, thiserror::Error)]
pub enum CharsetError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("[set] id is empty")]
    EmptyId,
    #[error("[mappings] table is empty")]
    Empty,
    #[error("key must be a single lowercase character: {0:?}")]
    InvalidKey(String),
    #[error("invalid pattern for {key:?}: {pattern:?}")]
    InvalidPattern { key: String, pattern: String },
}

/// Parse a character-set TOML document into its descriptor and table.
pub fn parse_charset_toml(
    toml_str: &str,
) -> Result<(CharsetDescriptor, CharacterTable), CharsetError> {
    let config: CharsetConfig =
        toml::from_str(toml_str).map_err(|e| CharsetError::Parse(e.to_string()))?;

    if config.set.id.is_empty() {
        return Err(CharsetError::EmptyId);
    }
    if config.mappings.is_empty() {
        return Err(CharsetError::Empty);
    }

    let mut mappings = HashMap::with_capacity(config.mappings.len());
    for (key, value) in &config.mappings {
        let ch = single_lowercase_char(key).ok_or_else(|| CharsetError::InvalidKey(key.clone()))?;
        let pattern = Pattern::parse(value).ok_or_else(|| CharsetError::InvalidPattern {
            key: key.clone(),
            pattern: value.clone(),
        })?;
        mappings.insert(ch, pattern);
    }

    let descriptor = CharsetDescriptor {
        id: config.set.id,
        description: config.set.description,
    };
    Ok((descriptor, CharacterTable::new(mappings)))
}

fn single_lowercase_char(key: &str) -> Option<char> {
    let mut chars = key.chars();
    match (chars.next(), chars.next()) {
        (Some(ch), None) if !ch.is_uppercase() && !ch.is_whitespace() => Some(ch),
        _ => None,
    }
}
