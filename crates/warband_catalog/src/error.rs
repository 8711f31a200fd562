//! # Catalog Error Types
//!
//! All errors that can occur while loading and validating prototype
//! tables.

use thiserror::Error;

/// Errors that can occur in the catalog layer.
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Catalog file could not be read.
    #[error("failed to read catalog file: {0}")]
    Io(#[from] std::io::Error),

    /// Catalog file is not valid TOML or does not match the schema.
    #[error("failed to parse catalog: {0}")]
    Parse(#[from] toml::de::Error),

    /// A prototype table exceeds the id space.
    #[error("catalog defines {count} {table} prototypes, limit is {limit}")]
    TableOverflow {
        /// Which table overflowed.
        table: &'static str,
        /// Entries found in the file.
        count: usize,
        /// Maximum representable entries.
        limit: usize,
    },

    /// A unit prototype references a form id that is not defined.
    #[error("unit {unit:?} references form {form}, but only {count} forms are defined")]
    MissingForm {
        /// Name of the offending unit prototype.
        unit: String,
        /// The dangling 1-based form id.
        form: u16,
        /// Forms actually defined.
        count: usize,
    },

    /// A form prototype references a body id that is not defined.
    #[error("form {form:?} references body {body}, but only {count} bodies are defined")]
    MissingBody {
        /// Name of the offending form prototype.
        form: String,
        /// The dangling 1-based body id.
        body: u16,
        /// Bodies actually defined.
        count: usize,
    },

    /// A form prototype references an attribute line that is not defined.
    #[error(
        "form {form:?} references attribute line {attributes}, but only {count} lines are defined"
    )]
    MissingAttributes {
        /// Name of the offending form prototype.
        form: String,
        /// The dangling 1-based attribute line id.
        attributes: u16,
        /// Attribute lines actually defined.
        count: usize,
    },
}

/// Result type for catalog operations.
pub type CatalogResult<T> = Result<T, CatalogError>;
