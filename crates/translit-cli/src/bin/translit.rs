use clap::{Parser, Subcommand};

use translit_cli::commands::config_ops::{self, TableKind};
use translit_cli::commands::{check_ops, convert_ops};
use translit_cli::trace_init;
use translit_core::NormalizationMode;

#[derive(Parser)]
#[command(name = "translit", about = "Unicode transliteration tool")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Transliterate text (reads stdin line by line when no text is given)
    Convert {
        /// Text to transliterate
        text: Vec<String>,
        /// Normalization mode (decompose, compose, compatibility-compose, compatibility-decompose)
        #[arg(long)]
        mode: Option<NormalizationMode>,
        /// Skip the default and emoji reference tables
        #[arg(long)]
        no_default: bool,
        /// Custom mapping TOML file (literal keys)
        #[arg(long)]
        mapping: Option<String>,
        /// Output one JSON object per input
        #[arg(long)]
        json: bool,
        /// Settings file replacing the embedded defaults
        #[arg(long)]
        settings: Option<String>,
    },
    /// Show well-formedness, grapheme count and codepoints of a string
    Check {
        text: String,
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Validate a custom mapping TOML file
    ValidateMapping {
        /// TOML file to validate
        file: String,
    },
    /// Print an embedded reference table
    TableExport {
        #[arg(value_enum, default_value = "default")]
        table: TableKind,
    },
    /// Show entry counts of the active reference tables
    TableStats {
        /// Output as JSON instead of text
        #[arg(long)]
        json: bool,
        /// Settings file whose `[tables]` section selects replacement data
        #[arg(long)]
        settings: Option<String>,
    },
    /// Print the embedded default settings TOML
    SettingsExport,
    /// Validate a settings TOML file
    SettingsValidate {
        /// TOML file to validate
        file: String,
    },
}

fn main() {
    trace_init::init_tracing();
    let cli = Cli::parse();

    match cli.command {
        Command::Convert {
            text,
            mode,
            no_default,
            mapping,
            json,
            settings,
        } => {
            let settings = config_ops::load_settings(settings.as_deref());
            let args = convert_ops::ConvertArgs {
                texts: &text,
                mode,
                no_default,
                mapping: mapping.as_deref(),
                json,
            };
            convert_ops::convert_cmd(settings, &args);
        }
        Command::Check { text, json } => check_ops::check_cmd(&text, json),
        Command::ValidateMapping { file } => check_ops::validate_mapping_cmd(&file),
        Command::TableExport { table } => config_ops::table_export(table),
        Command::TableStats { json, settings } => {
            let settings = config_ops::load_settings(settings.as_deref());
            config_ops::table_stats(settings, json);
        }
        Command::SettingsExport => config_ops::settings_export(),
        Command::SettingsValidate { file } => config_ops::settings_validate(&file),
    }
}
