use std::path::Path;

use clap::{Parser, Subcommand};
use morse_engine::trace_init;
use tracing_subscriber::EnvFilter;

use morse_cli::commands::{config_ops, convert_ops};

#[derive(Parser)]
#[command(name = "morsetool", about = "Text to Morse code conversion")]
struct Cli {
    /// Log conversion diagnostics to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    /// Write JSON trace logs to this directory (requires the `trace` feature)
    #[arg(long, global = true, value_name = "DIR")]
    trace_dir: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Convert text to Morse code (reads stdin lines when TEXT is omitted)
    Convert {
        /// Text to convert
        text: Option<String>,
        /// Path to a settings TOML file (optional)
        #[arg(long)]
        settings: Option<String>,
        /// Override an option, e.g. --set shortSymbol=. (repeatable)
        #[arg(short = 's', long = "set", value_name = "NAME=VALUE")]
        set: Vec<String>,
        /// Reject unknown option names and unsupported character sets
        #[arg(long)]
        strict: bool,
        /// Output one JSON object per line
        #[arg(long)]
        json: bool,
    },

    /// List supported character sets
    Charsets {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Character table operations
    Charset {
        #[command(subcommand)]
        action: CharsetAction,
    },

    /// Settings file operations
    Settings {
        #[command(subcommand)]
        action: TomlAction,
    },
}

#[derive(Subcommand)]
enum TomlAction {
    /// Print the embedded default TOML
    Export,
    /// Validate a TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
}

#[derive(Subcommand)]
enum CharsetAction {
    /// Print the embedded default TOML
    Export,
    /// Validate a TOML file
    Validate {
        /// Path to the TOML file
        file: String,
    },
    /// List every mapping of a registered character set
    Show {
        /// Character set id
        #[arg(default_value = morse_core::charset::INTERNATIONAL)]
        id: String,
    },
}

fn init_stderr_logging() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(trace_init::DEFAULT_DIRECTIVES));
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .init();
}

fn main() {
    let cli = Cli::parse();
    if let Some(dir) = cli.trace_dir.as_deref() {
        trace_init::init_tracing(Path::new(dir));
    } else if cli.verbose {
        init_stderr_logging();
    }

    match cli.command {
        Command::Convert {
            text,
            settings,
            set,
            strict,
            json,
        } => {
            let opts = convert_ops::ConvertOptions {
                settings_file: settings.as_deref(),
                assignments: &set,
                strict,
                json,
            };
            convert_ops::convert_cmd(text.as_deref(), &opts);
        }
        Command::Charsets { json } => config_ops::charsets_list(json),
        Command::Charset { action } => match action {
            CharsetAction::Export => config_ops::charset_export(),
            CharsetAction::Validate { file } => config_ops::charset_validate(&file),
            CharsetAction::Show { id } => config_ops::charset_show(&id),
        },
        Command::Settings { action } => match action {
            TomlAction::Export => config_ops::settings_export(),
            TomlAction::Validate { file } => config_ops::settings_validate(&file),
        },
    }
}
