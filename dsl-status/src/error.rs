//! Error types for status parsing and field extraction.

use thiserror::Error;

/// Errors that can occur while turning a status dump into values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The status text did not contain the preamble, header, port and
    /// counter blocks.
    #[error("Malformed status text: expected 4 separator-delimited blocks, found {found}")]
    MalformedStatusText { found: usize },

    /// The port section has no line naming both direction columns.
    #[error("Malformed port table: no header line with Upstream and Downstream columns")]
    MalformedPortTable,

    /// The short field name is not in the field dictionary.
    #[error("Unknown field: {0}")]
    UnknownField(String),

    /// The router did not report a row with this label.
    #[error("Row '{0}' not found in port table")]
    MissingRow(String),

    /// The row exists but has nothing in the requested column.
    #[error("Row '{label}' has no {column} value")]
    MissingCell { label: String, column: String },

    /// The leading token of a cell is not a number.
    #[error("Cannot parse '{value}' in row '{label}' as a number")]
    UnparsableValue { label: String, value: String },
}
