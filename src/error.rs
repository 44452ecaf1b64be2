//! Error types for glyphline.

use std::io;
use thiserror::Error;

/// Result type alias for glyphline operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur while reconstructing page text.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error when reading sources or writing output.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A JSON page source could not be decoded.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A text block is not a single `BT ... ET` region.
    #[error("Malformed text block: {0}")]
    Structural(String),

    /// An operand string does not match the grammar its operator expects.
    #[error("Invalid operand '{operand}' for operator '{operator}': expected {expected}")]
    OperandParse {
        /// Operator mnemonic
        operator: String,
        /// Offending operand text
        operand: String,
        /// Description of the expected grammar
        expected: &'static str,
    },

    /// An operator outside the recognized text operator set.
    #[error("Unrecognized text operator '{operator}' (operand '{operand}')")]
    UnknownOperator {
        /// Operator mnemonic
        operator: String,
        /// Operand text preceding the operator
        operand: String,
    },

    /// The selected font is not in the page's font table.
    #[error("Font '{0}' not found in available page fonts")]
    FontResolution(String),

    /// A character code lies outside a font's declared range.
    #[error("Char {code} is outside range {first}..={last} of font '{font}'")]
    GlyphRange {
        /// Character code
        code: u8,
        /// Font name
        font: String,
        /// First valid code
        first: u8,
        /// Last valid code
        last: u8,
    },

    /// No free column slot was found near the requested X position.
    #[error("Failed to find available space in row {row} for x={x}")]
    PlacementExhausted {
        /// Row key
        row: i64,
        /// Requested X position
        x: f64,
    },

    /// An error raised while executing a specific operator.
    #[error("Operator '{operator}' with operand '{operand}': {source}")]
    InOperator {
        /// Operator mnemonic
        operator: String,
        /// Operand text, trimmed
        operand: String,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// An error raised while processing a specific page.
    #[error("Page {page}: {source}")]
    InPage {
        /// Page number (1-indexed)
        page: u32,
        /// Underlying error
        #[source]
        source: Box<Error>,
    },

    /// The source has no pages to export.
    #[error("Document has no pages")]
    EmptyDocument,

    /// Page number is out of range.
    #[error("Page {0} is out of range (document has {1} pages)")]
    PageOutOfRange(u32, u32),

    /// Invalid page range specification.
    #[error("Invalid page range: {0}")]
    InvalidPageRange(String),
}

impl Error {
    /// Attach page context to an error. Errors that already carry a page are
    /// returned unchanged.
    pub fn in_page(self, page: u32) -> Self {
        match self {
            Error::InPage { .. } => self,
            other => Error::InPage {
                page,
                source: Box::new(other),
            },
        }
    }

    /// Attach the operator and operand being executed. Errors that already
    /// name their operator are returned unchanged.
    pub fn in_operator(self, operator: &str, operand: &str) -> Self {
        match self {
            Error::OperandParse { .. }
            | Error::UnknownOperator { .. }
            | Error::InOperator { .. }
            | Error::InPage { .. } => self,
            other => Error::InOperator {
                operator: operator.to_string(),
                operand: operand.trim().to_string(),
                source: Box::new(other),
            },
        }
    }

    /// Strip page and operator context and return the underlying error kind.
    pub fn root(&self) -> &Error {
        match self {
            Error::InPage { source, .. } | Error::InOperator { source, .. } => source.root(),
            other => other,
        }
    }
}
