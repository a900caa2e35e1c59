//! Unicode-to-ASCII-leaning transliteration.
//!
//! Multi-codepoint sequences (emoji, ligatures, language digraphs) are
//! replaced from layered mapping tables, the result is normalized, and
//! residual non-spacing marks are removed.

pub mod async_worker;
pub mod mapping;
pub mod normalize;
pub mod settings;
pub mod transliterate;
pub mod unicode;
pub mod validate;

pub use async_worker::{CancellationToken, PendingResult, TransliterationWorker};
pub use mapping::{prepare_table, MappingTable, ReferenceTables};
pub use normalize::NormalizationMode;
pub use transliterate::{transliterate, Options, TransliterateError, Transliterator};
