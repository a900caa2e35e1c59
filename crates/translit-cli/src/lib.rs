pub mod commands;
pub mod mapping_file;
pub mod trace_init;
