use std::io::{self, BufRead};
use std::process;

use serde::Serialize;

use morse_engine::{MergePolicy, MorseEngine, Overrides};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// One converted line in `--json` output (JSONL).
#[derive(Debug, Serialize)]
struct ConvertRecord<'a> {
    input: &'a str,
    output: &'a str,
}

pub struct ConvertOptions<'a> {
    pub settings_file: Option<&'a str>,
    pub assignments: &'a [String],
    pub strict: bool,
    pub json: bool,
}

/// Convert `text`, or every stdin line when `text` is `None`.
pub fn convert_cmd(text: Option<&str>, opts: &ConvertOptions<'_>) {
    let mut engine = match opts.settings_file {
        Some(path) => die!(
            MorseEngine::from_settings_file(path),
            "Error loading settings: {}"
        ),
        None => MorseEngine::new(),
    };
    if opts.strict {
        engine.settings_mut().merge_policy = MergePolicy::Strict;
    }
    let overrides = die!(
        Overrides::from_assignments(opts.assignments),
        "Error parsing --set: {}"
    );

    match text {
        Some(text) => convert_one(&mut engine, text, &overrides, opts.json),
        None => {
            for line in io::stdin().lock().lines() {
                let line = die!(line, "Error reading stdin: {}");
                convert_one(&mut engine, &line, &overrides, opts.json);
            }
        }
    }
}

fn convert_one(engine: &mut MorseEngine, text: &str, overrides: &Overrides, json: bool) {
    let output = die!(engine.convert(Some(text), overrides), "Error: {}");
    let line = die!(format_output(text, &output, json), "Error: {}");
    println!("{line}");
}

fn format_output(input: &str, output: &str, json: bool) -> Result<String, serde_json::Error> {
    if json {
        serde_json::to_string(&ConvertRecord { input, output })
    } else {
        Ok(output.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_plain() {
        assert_eq!(format_output("sos", "...|---|...", false).unwrap(), "...|---|...");
    }

    #[test]
    fn test_format_json() {
        let line = format_output("e!", "•|!", true).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["input"], "e!");
        assert_eq!(value["output"], "•|!");
    }
}
