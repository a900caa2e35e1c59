use std::fs;
use std::process;

use serde::Serialize;

use translit_core::mapping::{DEFAULT_TOML, EMOJI_TOML};
use translit_core::settings::{self, Settings};

use crate::mapping_file::load_tables;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// Which embedded reference table to print.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum TableKind {
    Default,
    Emoji,
}

/// Install a settings file as the process-wide settings, then return them.
pub fn load_settings(file: Option<&str>) -> &'static Settings {
    if let Some(file) = file {
        let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
        die!(settings::init_custom(content), "Error: {}");
    }
    settings::settings()
}

pub fn settings_export() {
    print!("{}", settings::default_toml());
}

pub fn settings_validate(file: &str) {
    let content = die!(fs::read_to_string(file), "Error reading {file}: {}");
    let s = die!(settings::parse_settings_toml(&content), "Error: {}");
    println!(
        "OK: transliterate.mode={}, transliterate.use_default_mapping={}",
        s.transliterate.mode, s.transliterate.use_default_mapping
    );
}

pub fn table_export(kind: TableKind) {
    match kind {
        TableKind::Default => print!("{DEFAULT_TOML}"),
        TableKind::Emoji => print!("{EMOJI_TOML}"),
    }
}

#[derive(Debug, Serialize)]
struct TableStats {
    name: &'static str,
    entries: usize,
    max_key_len: usize,
}

pub fn table_stats(settings: &Settings, json: bool) {
    let tables = die!(load_tables(&settings.tables), "Error loading tables: {}");
    let stats = [
        TableStats {
            name: "default",
            entries: tables.default.len(),
            max_key_len: tables.default.max_key_len(),
        },
        TableStats {
            name: "emoji",
            entries: tables.emoji.len(),
            max_key_len: tables.emoji.max_key_len(),
        },
    ];
    if json {
        println!("{}", die!(serde_json::to_string(&stats), "Error: {}"));
        return;
    }
    for s in &stats {
        println!(
            "{:<8} entries={:<5} max_key_len={}",
            s.name, s.entries, s.max_key_len
        );
    }
}
