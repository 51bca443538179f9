//! # Species Pinyin - pinyin lookup table for species names
//!
//! Joins a taxonomy table (eBird export) with a translation table of
//! `English(中文)` names and emits, per English name, the toneless pinyin
//! of the Chinese name, its initials, the species code and the Latin name.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────┐     ┌─────────────┐     ┌─────────────┐     ┌──────────────┐
//! │ birdMap.json │────▶│   Parser    │────▶│  Transform  │────▶│ pinyin_      │
//! │ taxonomy.xlsx│     │ (xlsx/csv)  │     │ (join+pinyin│     │ mapping.json │
//! └──────────────┘     └─────────────┘     └─────────────┘     └──────────────┘
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use species_pinyin::{run, MappingConfig};
//!
//! let report = run(&MappingConfig::default()).unwrap();
//! println!("Wrote {} records", report.records);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`config`] - Paths and column names for a run
//! - [`models`] - Rows, records and the output mapping
//! - [`parser`] - Translation and taxonomy loading
//! - [`phonetic`] - Localized name extraction and romanization
//! - [`transform`] - Join and end-to-end pipeline
//! - [`emit`] - Output serialization
//! - [`logs`] - Console logging

// Core modules
pub mod config;
pub mod error;
pub mod logs;
pub mod models;

// Loading
pub mod parser;

// Phonetics
pub mod phonetic;

// Join
pub mod transform;

// Output
pub mod emit;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, EmitError, ErrorKind, LoadError, PipelineError};

// =============================================================================
// Re-exports - Config
// =============================================================================

pub use config::{ColumnNames, MappingConfig};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{OutputMapping, OutputRecord, RawRow, SkipReason, TaxonomyRow, TranslationTable};

// =============================================================================
// Re-exports - Loading
// =============================================================================

pub use parser::{load_taxonomy, load_translations, SourceFormat, TaxonomyTable};

// =============================================================================
// Re-exports - Phonetics
// =============================================================================

pub use phonetic::{
    extract_localized_name,
    to_phonetic,
    HanyuPinyin,
    LookupRomanizer,
    Phonetic,
    Romanizer,
};

// =============================================================================
// Re-exports - Join & Pipeline
// =============================================================================

pub use transform::{build, join_row, run, run_with, JoinResult, RunReport, SkippedRow};

// =============================================================================
// Re-exports - Output
// =============================================================================

pub use emit::{read_mapping, to_json_bytes, write_mapping};
