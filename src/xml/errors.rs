//! Error types for catalog document parsing and import.

use std::fmt;
use std::path::PathBuf;

use thiserror::Error;

use crate::import::ImportError;

/// Errors that can occur while building a [`Document`](crate::xml::Document) from XML.
#[derive(Debug, Error)]
pub enum DeserializeError {
    #[error("XML parsing error: {0}")]
    Xml(#[from] quick_xml::Error),
    #[error("XML attribute error: {0}")]
    Attr(#[from] quick_xml::events::attributes::AttrError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unexpected end of XML")]
    UnexpectedEof,
    #[error("Document has no root element")]
    MissingRoot,
    #[error("Unexpected closing tag </{0}>")]
    UnexpectedEnd(String),
    #[error("Deserialization error: {0}")]
    Custom(String),
}

/// Top-level error for the parse-then-import convenience entry points.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// IO error occurred while reading the file.
    #[error("IO error reading file: {0}")]
    Io(#[from] std::io::Error),

    /// The catalog document could not be parsed.
    #[error("Parse error{context}: {source}")]
    Parse {
        #[source]
        source: DeserializeError,
        context: ErrorContext,
    },

    /// The import itself failed (identifier generation).
    #[error("Import error: {0}")]
    Import(#[from] ImportError),
}

impl From<DeserializeError> for CatalogError {
    fn from(source: DeserializeError) -> Self {
        CatalogError::Parse {
            source,
            context: ErrorContext::new(),
        }
    }
}

/// Context information for error reporting.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ErrorContext {
    /// The file path where the error occurred (if available).
    pub file_path: Option<PathBuf>,
    /// Byte offset into the input where the reader stopped (if available).
    pub position: Option<u64>,
    /// Additional context about what was being parsed.
    pub parsing: Option<String>,
}

impl ErrorContext {
    /// Create a new empty error context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an error context with file path.
    pub fn with_file_path<P: Into<PathBuf>>(path: P) -> Self {
        Self {
            file_path: Some(path.into()),
            ..Self::default()
        }
    }

    /// Add the reader's byte position.
    pub fn with_position(mut self, position: u64) -> Self {
        self.position = Some(position);
        self
    }

    /// Add parsing context information.
    pub fn with_parsing<S: Into<String>>(mut self, parsing: S) -> Self {
        self.parsing = Some(parsing.into());
        self
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();

        if let Some(ref path) = self.file_path {
            parts.push(format!(" in file '{}'", path.display()));
        }

        if let Some(position) = self.position {
            parts.push(format!(" at byte {}", position));
        }

        if let Some(ref parsing) = self.parsing {
            parts.push(format!(" while parsing {}", parsing));
        }

        if parts.is_empty() {
            return Ok(());
        }

        write!(f, "{}", parts.join(","))
    }
}
