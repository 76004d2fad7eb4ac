//! # Crafting Error Types
//!
//! Load-time failures. Craft attempts never produce these; they resolve to a
//! [`CraftOutcome`](crate::crafter::CraftOutcome) instead.

use std::path::PathBuf;

use thiserror::Error;

use crate::material::MaterialId;

/// Errors that can occur while loading materials, recipes, or configuration.
#[derive(Error, Debug)]
pub enum CraftError {
    /// A data file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// The file that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A numeric field did not parse.
    #[error("{path}:{line}: malformed {field} '{value}'")]
    MalformedNumber {
        /// The file being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Which field was malformed.
        field: &'static str,
        /// The raw text of the field.
        value: String,
    },

    /// A line had fewer fields than its format requires.
    #[error("{path}:{line}: missing {field}")]
    MissingField {
        /// The file being parsed.
        path: PathBuf,
        /// 1-based line number.
        line: usize,
        /// Which field was missing.
        field: &'static str,
    },

    /// A recipe referenced a material id the inventory has never seen.
    #[error("{path}: material with id {id} not found in materials file")]
    UnknownMaterial {
        /// The recipe file.
        path: PathBuf,
        /// The unresolved id.
        id: MaterialId,
    },

    /// Invalid configuration file.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result type for crafting load operations.
pub type CraftResult<T> = Result<T, CraftError>;
