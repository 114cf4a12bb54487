//! Character-to-pattern tables.
//!
//! Each character set maps a single lowercase character to a [`Pattern`] of
//! short and long elements. The built-in table is embedded TOML, parsed once
//! into a process-wide [`CharsetRegistry`].

mod config;

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use serde::Serialize;

pub use config::{parse_charset_toml, CharsetError};

pub(crate) const DEFAULT_INTERNATIONAL_TOML: &str = include_str!("default_international.toml");

/// Identifier of the built-in ITU table.
pub const INTERNATIONAL: &str = "international";

/// Returns the embedded international table TOML.
pub fn default_toml() -> &'static str {
    DEFAULT_INTERNATIONAL_TOML
}

/// One element of a Morse pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    Short,
    Long,
}

impl Symbol {
    fn from_char(ch: char) -> Option<Self> {
        match ch {
            '.' => Some(Symbol::Short),
            '-' => Some(Symbol::Long),
            _ => None,
        }
    }

    const fn as_char(self) -> char {
        match self {
            Symbol::Short => '.',
            Symbol::Long => '-',
        }
    }
}

/// Ordered, non-empty sequence of symbols encoding one character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern(Vec<Symbol>);

impl Pattern {
    /// Parse dot/dash notation (`".-"`). Returns `None` for empty input or
    /// any character other than `.` and `-`.
    pub fn parse(s: &str) -> Option<Self> {
        if s.is_empty() {
            return None;
        }
        s.chars()
            .map(Symbol::from_char)
            .collect::<Option<Vec<_>>>()
            .map(Pattern)
    }

    /// Substitute each symbol with its display string.
    pub fn render(&self, short: &str, long: &str) -> String {
        let mut out = String::with_capacity(self.0.len() * short.len().max(long.len()));
        for symbol in &self.0 {
            out.push_str(match symbol {
                Symbol::Short => short,
                Symbol::Long => long,
            });
        }
        out
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for symbol in &self.0 {
            write!(f, "{}", symbol.as_char())?;
        }
        Ok(())
    }
}

/// Identifier and display name of a supported character set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CharsetDescriptor {
    pub id: String,
    pub description: String,
}

/// A single character set: lowercase character → pattern.
#[derive(Debug, Clone, Default)]
pub struct CharacterTable {
    mappings: HashMap<char, Pattern>,
}

impl CharacterTable {
    pub(crate) fn new(mappings: HashMap<char, Pattern>) -> Self {
        Self { mappings }
    }

    /// Look up a character. The caller is responsible for lowercasing.
    pub fn get(&self, ch: char) -> Option<&Pattern> {
        self.mappings.get(&ch)
    }

    pub fn len(&self) -> usize {
        self.mappings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mappings.is_empty()
    }

    /// All mappings sorted by character.
    pub fn entries(&self) -> Vec<(char, &Pattern)> {
        let mut entries: Vec<_> = self.mappings.iter().map(|(c, p)| (*c, p)).collect();
        entries.sort_by_key(|(c, _)| *c);
        entries
    }
}

/// The set of registered character sets.
///
/// Ids that are not registered (including the reserved `wabun`) resolve to an
/// empty table, so every lookup against them misses.
pub struct CharsetRegistry {
    descriptors: Vec<CharsetDescriptor>,
    tables: Vec<CharacterTable>,
    empty: CharacterTable,
}

impl CharsetRegistry {
    fn new(sets: Vec<(CharsetDescriptor, CharacterTable)>) -> Self {
        let (descriptors, tables) = sets.into_iter().unzip();
        Self {
            descriptors,
            tables,
            empty: CharacterTable::default(),
        }
    }

    pub fn descriptors(&self) -> &[CharsetDescriptor] {
        &self.descriptors
    }

    pub fn is_registered(&self, id: &str) -> bool {
        self.descriptors.iter().any(|d| d.id == id)
    }

    pub fn table(&self, id: &str) -> &CharacterTable {
        self.descriptors
            .iter()
            .position(|d| d.id == id)
            .map(|idx| &self.tables[idx])
            .unwrap_or(&self.empty)
    }

    pub fn lookup(&self, id: &str, ch: char) -> Option<&Pattern> {
        self.table(id).get(ch)
    }
}

/// Get or initialize the global registry.
pub fn registry() -> &'static CharsetRegistry {
    static INSTANCE: OnceLock<CharsetRegistry> = OnceLock::new();
    INSTANCE.get_or_init(|| {
        let international = parse_charset_toml(DEFAULT_INTERNATIONAL_TOML)
            .expect("international charset TOML must be valid");
        CharsetRegistry::new(vec![international])
    })
}
