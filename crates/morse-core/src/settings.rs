//! Conversion settings loaded from TOML, plus partial overrides.
//!
//! - `Settings::default()` parses the embedded `default_settings.toml`
//! - `parse_settings_toml(toml_content)` loads and validates a custom file
//! - `Settings::apply_overrides` merges `key=value` style partial settings

use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::charset::registry;

pub const DEFAULT_SETTINGS_TOML: &str = include_str!("default_settings.toml");

/// Returns the embedded default settings TOML content.
pub fn default_toml() -> &'static str {
    DEFAULT_SETTINGS_TOML
}

#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("TOML parse error: {0}")]
    Parse(String),
    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: String, reason: String },
    #[error("unknown option: {0}")]
    UnknownOption(String),
    #[error("unsupported character set: {0}")]
    UnsupportedCharacterSet(String),
}

/// How override keys that are not recognised option names are handled.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MergePolicy {
    /// Skip unknown keys; apply any `morseType` verbatim.
    #[default]
    Lenient,
    /// Reject unknown keys, unregistered character sets and empty symbols.
    Strict,
}

/// Whether the last word of the input receives `word_after`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FinalWord {
    /// Close the last word like every other word.
    #[default]
    Close,
    /// Only close when the character index equals the table size.
    /// Kept for output compatibility with older renderings.
    Legacy,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Settings {
    pub morse_type: String,
    pub short_symbol: String,
    pub long_symbol: String,
    pub char_separator: String,
    pub word_separator: String,
    pub word_before: String,
    pub word_after: String,
    #[serde(default)]
    pub merge_policy: MergePolicy,
    #[serde(default)]
    pub final_word: FinalWord,
}

impl Default for Settings {
    /// Clone of the embedded defaults, parsed once per process.
    fn default() -> Self {
        static DEFAULTS: OnceLock<Settings> = OnceLock::new();
        DEFAULTS
            .get_or_init(|| {
                parse_settings_toml(DEFAULT_SETTINGS_TOML)
                    .expect("default settings TOML must be valid")
            })
            .clone()
    }
}

impl Settings {
    /// Switch the active character set. Returns `false` and leaves the
    /// settings untouched if `id` is not registered.
    pub fn set_character_set(&mut self, id: &str) -> bool {
        if !registry().is_registered(id) {
            debug!(id, "rejected unregistered character set");
            return false;
        }
        self.morse_type = id.to_string();
        true
    }

    /// Apply partial overrides in order. Returns whether anything changed.
    ///
    /// Under [`MergePolicy::Strict`] the first invalid entry aborts the merge
    /// and `self` is left as it was.
    pub fn apply_overrides(
        &mut self,
        overrides: &Overrides,
        policy: MergePolicy,
    ) -> Result<bool, SettingsError> {
        if overrides.is_empty() {
            return Ok(false);
        }
        let mut updated = self.clone();
        for (name, value) in overrides.iter() {
            match name.parse::<OptionKey>() {
                Ok(key) => updated.set_option(key, value),
                Err(e) if policy == MergePolicy::Strict => return Err(e),
                Err(_) => debug!(option = name, "ignoring unknown option"),
            }
        }
        if policy == MergePolicy::Strict {
            validate(&updated)?;
        }
        let changed = updated != *self;
        *self = updated;
        Ok(changed)
    }

    pub fn get_option(&self, key: OptionKey) -> &str {
        match key {
            OptionKey::MorseType => &self.morse_type,
            OptionKey::ShortSymbol => &self.short_symbol,
            OptionKey::LongSymbol => &self.long_symbol,
            OptionKey::CharSeparator => &self.char_separator,
            OptionKey::WordSeparator => &self.word_separator,
            OptionKey::WordBefore => &self.word_before,
            OptionKey::WordAfter => &self.word_after,
        }
    }

    fn set_option(&mut self, key: OptionKey, value: &str) {
        let slot = match key {
            OptionKey::MorseType => &mut self.morse_type,
            OptionKey::ShortSymbol => &mut self.short_symbol,
            OptionKey::LongSymbol => &mut self.long_symbol,
            OptionKey::CharSeparator => &mut self.char_separator,
            OptionKey::WordSeparator => &mut self.word_separator,
            OptionKey::WordBefore => &mut self.word_before,
            OptionKey::WordAfter => &mut self.word_after,
        };
        value.clone_into(slot);
    }
}

/// Recognised override option names.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKey {
    MorseType,
    ShortSymbol,
    LongSymbol,
    CharSeparator,
    WordSeparator,
    WordBefore,
    WordAfter,
}

impl OptionKey {
    pub const ALL: [OptionKey; 7] = [
        OptionKey::MorseType,
        OptionKey::ShortSymbol,
        OptionKey::LongSymbol,
        OptionKey::CharSeparator,
        OptionKey::WordSeparator,
        OptionKey::WordBefore,
        OptionKey::WordAfter,
    ];

    pub const fn name(self) -> &'static str {
        match self {
            OptionKey::MorseType => "morseType",
            OptionKey::ShortSymbol => "shortSymbol",
            OptionKey::LongSymbol => "longSymbol",
            OptionKey::CharSeparator => "charSeparator",
            OptionKey::WordSeparator => "wordSeparator",
            OptionKey::WordBefore => "wordBefore",
            OptionKey::WordAfter => "wordAfter",
        }
    }

    const fn field(self) -> &'static str {
        match self {
            OptionKey::MorseType => "morse_type",
            OptionKey::ShortSymbol => "short_symbol",
            OptionKey::LongSymbol => "long_symbol",
            OptionKey::CharSeparator => "char_separator",
            OptionKey::WordSeparator => "word_separator",
            OptionKey::WordBefore => "word_before",
            OptionKey::WordAfter => "word_after",
        }
    }
}

impl FromStr for OptionKey {
    type Err = SettingsError;

    /// Accepts both the camelCase option name and the TOML field name.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        OptionKey::ALL
            .into_iter()
            .find(|key| key.name() == s || key.field() == s)
            .ok_or_else(|| SettingsError::UnknownOption(s.to_string()))
    }
}

impl fmt::Display for OptionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Ordered partial settings. Names are kept as given so the merge policy can
/// decide what to do with unknown ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    entries: Vec<(String, String)>,
}

impl Overrides {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.push(name, value);
        self
    }

    pub fn push(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries.push((name.into(), value.into()));
    }

    /// Parse `name=value` assignments. The value may be empty.
    pub fn from_assignments<I, S>(assignments: I) -> Result<Self, SettingsError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut overrides = Self::new();
        for assignment in assignments {
            let assignment = assignment.as_ref();
            let (name, value) =
                assignment
                    .split_once('=')
                    .ok_or_else(|| SettingsError::InvalidValue {
                        field: assignment.to_string(),
                        reason: "expected name=value".to_string(),
                    })?;
            overrides.push(name.trim(), value);
        }
        Ok(overrides)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub fn parse_settings_toml(toml_str: &str) -> Result<Settings, SettingsError> {
    let s: Settings = toml::from_str(toml_str).map_err(|e| SettingsError::Parse(e.to_string()))?;
    validate(&s)?;
    Ok(s)
}

fn validate(s: &Settings) -> Result<(), SettingsError> {
    macro_rules! check_non_empty {
        ($field:ident) => {
            if s.$field.is_empty() {
                return Err(SettingsError::InvalidValue {
                    field: stringify!($field).to_string(),
                    reason: "must not be empty".to_string(),
                });
            }
        };
    }

    if !registry().is_registered(&s.morse_type) {
        return Err(SettingsError::UnsupportedCharacterSet(s.morse_type.clone()));
    }
    check_non_empty!(short_symbol);
    check_non_empty!(long_symbol);

    Ok(())
}
