use std::collections::HashMap;
use std::io::{self, BufRead};
use std::path::Path;
use std::process;

use serde::Serialize;
use tracing::debug;

use translit_core::settings::Settings;
use translit_core::{NormalizationMode, Options, Transliterator};

use crate::mapping_file::{load_custom_mapping, load_tables};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

/// One line of `--json` output.
#[derive(Debug, Serialize)]
struct ConvertRecord<'a> {
    input: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

pub struct ConvertArgs<'a> {
    pub texts: &'a [String],
    pub mode: Option<NormalizationMode>,
    pub no_default: bool,
    pub mapping: Option<&'a str>,
    pub json: bool,
}

pub fn convert_cmd(settings: &Settings, args: &ConvertArgs<'_>) {
    let tables = die!(load_tables(&settings.tables), "Error loading tables: {}");
    let engine = Transliterator::new(tables);

    let mut options = Options::from(settings);
    if let Some(mode) = args.mode {
        options.mode = mode;
    }
    if args.no_default {
        options.use_default_mapping = false;
    }

    let custom: Option<HashMap<String, String>> = args
        .mapping
        .map(|path| die!(load_custom_mapping(Path::new(path)), "Error: {}"));
    debug!(?options, custom_entries = custom.as_ref().map_or(0, HashMap::len), "convert");

    let mut failed = false;
    let mut emit = |text: &str| {
        let result = engine.run(text, options, custom.as_ref());
        failed |= result.is_err();
        print_result(text, result, args.json);
    };

    if args.texts.is_empty() {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let line = die!(line, "Error reading stdin: {}");
            emit(line.as_str());
        }
    } else {
        for text in args.texts {
            emit(text.as_str());
        }
    }

    if failed {
        process::exit(1);
    }
}

fn print_result(input: &str, result: Result<String, translit_core::TransliterateError>, json: bool) {
    if json {
        let record = match result {
            Ok(output) => ConvertRecord {
                input,
                output: Some(output),
                error: None,
            },
            Err(e) => ConvertRecord {
                input,
                output: None,
                error: Some(e.to_string()),
            },
        };
        println!("{}", die!(serde_json::to_string(&record), "Error: {}"));
    } else {
        match result {
            Ok(output) => println!("{output}"),
            Err(e) => eprintln!("Error: {input:?}: {e}"),
        }
    }
}
