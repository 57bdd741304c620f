use std::io;
use thiserror::Error;

//===========================================================================//

/// Errors that can occur while turning icon files into resources.
#[derive(Error, Debug)]
pub enum Error {
    /// An icon file couldn't be opened, or one of its payloads couldn't be
    /// read.
    #[error("I/O error: {source}")]
    Io {
        /// The underlying I/O error.
        #[from]
        source: io::Error,
    },
    /// The icon file (or a serialized group directory) is malformed.
    #[error("Malformed icon data: {0}")]
    Format(String),
    /// A resource name can't be represented as a UTF-16 directory string.
    #[error("Can't encode resource name: {0}")]
    Encoding(String),
    /// The numeric ID source has no more values to hand out.
    #[error("Numeric resource ID source is exhausted")]
    IdsExhausted,
}

impl Error {
    /// Returns true if this is an I/O error.
    pub fn is_io(&self) -> bool {
        matches!(self, Error::Io { .. })
    }

    /// Returns true if this is a format error.
    pub fn is_format(&self) -> bool {
        matches!(self, Error::Format(_))
    }

    /// Returns true if this is a name encoding error.
    pub fn is_encoding(&self) -> bool {
        matches!(self, Error::Encoding(_))
    }
}

/// A specialized `Result` type for this crate's operations.
pub type Result<T> = std::result::Result<T, Error>;

//===========================================================================//


//===========================================================================//
