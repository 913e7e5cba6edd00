//! Error types for wikilex operations.
//!
//! Most anomalies in a page are not errors at all: they become
//! [`Diagnostic`](crate::Diagnostic)s and extraction carries on. The types
//! here cover the few places where a unit of work has to be abandoned.

use thiserror::Error;

/// Lookup outside a virtual grid.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("no cell at row {row}, column {col}")]
    OutOfRange { row: usize, col: usize },
}

/// A table that cannot be tagged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableShapeError {
    #[error("expected a table element, found <{tag}>")]
    NotATable { tag: String },

    #[error("unrecognized inflection table with {rows} rows")]
    Unrecognized { rows: usize },

    #[error("pronoun table has no inner table")]
    MissingInnerTable,
}

/// Input contract violations of the entry builders.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EntryError {
    #[error("entry has neither content nor subsections")]
    Empty,

    #[error("entry must start at a category heading, found <{tag}>")]
    NotAHeading { tag: String },
}

/// Usage example blocks that match no known layout.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ExampleError {
    #[error("example matches no known shape: {fragment}")]
    UnknownShape { fragment: String },

    #[error("example has an empty primary sentence: {fragment}")]
    EmptyText { fragment: String },
}

impl ExampleError {
    /// Serialized markup of the offending block.
    pub fn fragment(&self) -> &str {
        match self {
            ExampleError::UnknownShape { fragment } | ExampleError::EmptyText { fragment } => {
                fragment
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SelectorError {
    #[error("invalid selector: {0}")]
    Invalid(String),
}

/// Errors that can occur while reading or extracting a page.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Grid(#[from] GridError),

    #[error(transparent)]
    TableShape(#[from] TableShapeError),

    #[error(transparent)]
    Entry(#[from] EntryError),

    #[error(transparent)]
    Example(#[from] ExampleError),

    #[error(transparent)]
    Selector(#[from] SelectorError),
}

pub type Result<T> = std::result::Result<T, Error>;
