//!
//! IPP error
//!
use std::io;

use crate::{
    model::{DelimiterTag, ValueTag},
    parser::IppParseError,
};

/// Message parts which have no wire representation
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IppEncodeError {
    #[error("Attribute name is empty")]
    /// Empty names are reserved for additional values
    EmptyName,

    #[error("Attribute name is too long: {0} bytes")]
    /// Attribute name does not fit into the 16-bit length field
    NameTooLong(usize),

    #[error("Value of type {tag:?} is too long: {len} bytes")]
    /// Value does not fit into the 16-bit length field
    ValueTooLong { tag: ValueTag, len: usize },

    #[error("Delimiter tag {0:?} cannot start an attribute group")]
    /// Group tagged with end-of-attributes
    InvalidGroupTag(DelimiterTag),
}

/// IPP error
#[derive(Debug, thiserror::Error)]
pub enum IppError {
    #[error(transparent)]
    /// File I/O error
    IoError(#[from] io::Error),

    #[error(transparent)]
    /// Parsing error
    ParseError(#[from] IppParseError),

    #[error(transparent)]
    /// Encoding error
    EncodeError(#[from] IppEncodeError),

    #[error("Invalid IPP version: {0}")]
    /// Version string is not in `major.minor` form
    InvalidVersion(String),

    #[error("Invalid attribute: {0}")]
    /// Attribute specification cannot be parsed
    InvalidAttribute(String),

    #[error("Missing attribute: {0}")]
    /// Missing attribute in message
    MissingAttribute(String),

    #[error("Invalid attribute type")]
    /// Invalid attribute type
    InvalidAttributeType,
}
