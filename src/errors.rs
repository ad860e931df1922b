//! Atom decoding errors.

use thiserror::Error;

use crate::Atom;

/// Errors raised while decoding an atom stream.
#[derive(Debug, Error)]
pub enum QtError {
    /// Fewer bytes were available than a read step required.
    #[error("Truncated read @ offset {offset}: needed {needed} bytes, got {available}.")]
    Truncated {
        offset: u64,
        needed: u64,
        available: u64,
    },
    /// A field schema references a kind/width the decoder can not interpret.
    #[error("Unsupported layout for field '{field}': {kind}.")]
    UnsupportedLayout {
        field: &'static str,
        kind: String,
    },
    /// Declared atom size is smaller than its own header.
    #[error("Invalid atom size {size} @ offset {offset} (header is {header_size} bytes).")]
    InvalidSize {
        offset: u64,
        size: u64,
        header_size: u8,
    },
    /// Atom nesting exceeded the configured maximum.
    #[error("Atom depth {depth} exceeds max depth {max}.")]
    DepthExceeded { depth: usize, max: usize },
    /// IO error other than running out of bytes.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<binrw::Error> for QtError {
    fn from(err: binrw::Error) -> Self {
        match err {
            binrw::Error::Io(err) => QtError::Io(err),
            other => QtError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, other.to_string())),
        }
    }
}

/// Converts QtError to std::io::Error
impl From<QtError> for std::io::Error {
    fn from(err: QtError) -> Self {
        match err {
            QtError::Io(err) => err,
            QtError::Truncated { .. } => std::io::Error::new(std::io::ErrorKind::UnexpectedEof, err),
            other => std::io::Error::new(std::io::ErrorKind::InvalidData, other),
        }
    }
}

/// A hard failure together with everything
/// recovered before it.
#[derive(Debug, Error)]
#[error("{error}")]
pub struct ParseError {
    /// Cause of the failure.
    #[source]
    pub error: QtError,
    /// Top-level atoms fully decoded before the failure,
    /// in stream order.
    pub atoms: Vec<Atom>,
    /// The atom that was being decoded when the failure occurred.
    /// Its subtree holds the children decoded so far,
    /// with the failing descendant (if any) as the last child.
    pub partial: Option<Box<Atom>>,
}

impl ParseError {
    pub(crate) fn new(error: QtError, partial: Option<Atom>) -> Self {
        Self {
            error,
            atoms: Vec::new(),
            partial: partial.map(Box::new),
        }
    }

    /// Returns `true` if the failure was caused by the stream
    /// (or an atom span) ending early.
    pub fn is_truncated(&self) -> bool {
        matches!(self.error, QtError::Truncated { .. })
    }

    /// Consumes the error and returns the recovered top-level atoms,
    /// with the partial atom appended last if there is one.
    pub fn into_recovered(self) -> Vec<Atom> {
        let mut atoms = self.atoms;
        if let Some(partial) = self.partial {
            atoms.push(*partial);
        }
        atoms
    }
}

impl From<ParseError> for std::io::Error {
    fn from(err: ParseError) -> Self {
        err.error.into()
    }
}
