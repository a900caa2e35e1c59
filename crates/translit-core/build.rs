fn main() {
    // Validate embedded TOML files at compile time.
    validate_toml(
        "src/default_settings.toml",
        include_str!("src/default_settings.toml"),
    );
    validate_toml(
        "src/mapping/default_mappings.toml",
        include_str!("src/mapping/default_mappings.toml"),
    );
    validate_toml(
        "src/mapping/emoji_mappings.toml",
        include_str!("src/mapping/emoji_mappings.toml"),
    );
}

fn validate_toml(path: &str, content: &str) {
    let table = match content.parse::<toml::Table>() {
        Ok(t) => t,
        Err(e) => panic!("{path} contains invalid TOML: {e}"),
    };
    if path.ends_with("_mappings.toml") && !table.contains_key("mappings") {
        panic!("{path} has no [mappings] table");
    }
}
