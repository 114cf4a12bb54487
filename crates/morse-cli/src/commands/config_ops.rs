use std::fs;
use std::process;

use morse_core::charset::{self, registry, CharacterTable};
use morse_core::settings;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

pub fn charsets_list(json: bool) {
    let descriptors = registry().descriptors();
    if json {
        let out = die!(serde_json::to_string_pretty(descriptors), "Error: {}");
        println!("{out}");
        return;
    }
    for d in descriptors {
        let size = registry().table(&d.id).len();
        println!("{:<16} {} ({} characters)", d.id, d.description, size);
    }
}

pub fn charset_export() {
    print!("{}", charset::default_toml());
}

/// One `char  pattern` line per mapping, sorted by character.
pub fn format_mappings(table: &CharacterTable) -> Vec<String> {
    table
        .entries()
        .into_iter()
        .map(|(ch, pattern)| format!("{ch}  {pattern}"))
        .collect()
}

pub fn charset_show(id: &str) {
    if !registry().is_registered(id) {
        eprintln!("Error: unknown character set: {id}");
        process::exit(1);
    }
    for line in format_mappings(registry().table(id)) {
        println!("{line}");
    }
}

pub fn charset_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let (descriptor, table) = die!(charset::parse_charset_toml(&content), "Error: {}");
    println!("OK: {} ({} mappings)", descriptor.id, table.len());
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: morse_type={}, short_symbol={:?}, long_symbol={:?}, merge_policy={:?}, final_word={:?}",
        s.morse_type, s.short_symbol, s.long_symbol, s.merge_policy, s.final_word
    );
}
