use std::path::Path;
use std::process;

use serde::Serialize;

use translit_core::unicode::notation;
use translit_core::validate::{grapheme_count, is_well_formed};

use crate::mapping_file::load_custom_mapping;

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Serialize)]
struct CheckReport {
    well_formed: bool,
    graphemes: usize,
    codepoints: Vec<String>,
}

pub fn check_cmd(text: &str, json: bool) {
    let report = CheckReport {
        well_formed: is_well_formed(text),
        graphemes: grapheme_count(text),
        codepoints: text.chars().map(notation).collect(),
    };
    if json {
        println!("{}", die!(serde_json::to_string(&report), "Error: {}"));
    } else {
        println!("well-formed: {}", report.well_formed);
        println!("graphemes:   {}", report.graphemes);
        println!("codepoints:  {}", report.codepoints.join(" "));
    }
}

pub fn validate_mapping_cmd(file: &str) {
    let map = die!(load_custom_mapping(Path::new(file)), "Error: {}");
    println!("OK: {} mappings", map.len());
}
