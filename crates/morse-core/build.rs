//! Rejects embedded TOML that would make the `include_str!` defaults fail to
//! load at runtime.

const SETTINGS: (&str, &str) = (
    "src/default_settings.toml",
    include_str!("src/default_settings.toml"),
);

const CHARSETS: [(&str, &str); 1] = [(
    "src/charset/default_international.toml",
    include_str!("src/charset/default_international.toml"),
)];

fn main() {
    let (path, content) = SETTINGS;
    parse(path, content);

    for (path, content) in CHARSETS {
        let table = parse(path, content);
        let id = table
            .get("set")
            .and_then(|set| set.get("id"))
            .and_then(toml::Value::as_str)
            .unwrap_or_default();
        if id.is_empty() {
            panic!("{path}: [set] needs a non-empty id");
        }
        let mapped = table
            .get("mappings")
            .and_then(toml::Value::as_table)
            .map_or(0, toml::Table::len);
        if mapped == 0 {
            panic!("{path}: [mappings] is empty");
        }
    }
}

fn parse(path: &str, content: &str) -> toml::Table {
    println!("cargo:rerun-if-changed={path}");
    toml::from_str(content).unwrap_or_else(|e| panic!("{path}: invalid TOML: {e}"))
}
