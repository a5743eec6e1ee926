use std::fmt;
use std::str::Utf8Error;

use serde::{Deserialize, Serialize};

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Error {
    /// Account data had no bytes at all, so there wasn't even a tag to read.
    EmptyBuffer,
    /// A field read would have run past the end of the account data. `offset` is where the read
    /// started, `needed` is how many bytes it wanted, and `available` is how many were left.
    OutOfBounds {
        step: &'static str,
        offset: usize,
        needed: usize,
        available: usize,
    },
    /// The leading discriminator byte didn't match any known account type.
    UnknownTag(u8),
    /// A length-prefixed string's payload wasn't valid UTF-8. `offset` is the start of the payload.
    InvalidUtf8 {
        step: &'static str,
        offset: usize,
        source: Utf8Error,
    },
    /// An attestation's expiry can't be represented as a calendar date.
    ExpiryOutOfRange(i64),
    /// Account data as returned over RPC couldn't be turned into raw bytes.
    BadAccountData(String),
}

impl Error {
    /// Get the kind of error, without any of the diagnostic details.
    pub fn kind(&self) -> ErrorKind {
        match *self {
            Error::EmptyBuffer => ErrorKind::EmptyBuffer,
            Error::OutOfBounds { .. } => ErrorKind::OutOfBounds,
            Error::UnknownTag(_) => ErrorKind::UnknownTag,
            Error::InvalidUtf8 { .. } => ErrorKind::InvalidUtf8,
            Error::ExpiryOutOfRange(_) => ErrorKind::ExpiryOutOfRange,
            Error::BadAccountData(_) => ErrorKind::BadAccountData,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            Error::EmptyBuffer => f.write_str("Account data is empty"),
            Error::OutOfBounds {
                step,
                offset,
                needed,
                available,
            } => write!(
                f,
                "Expected {} bytes at offset {}, but only {} remain on step [{}]",
                needed, offset, available, step
            ),
            Error::UnknownTag(tag) => write!(f, "Unknown account tag {}", tag),
            Error::InvalidUtf8 {
                step,
                offset,
                ref source,
            } => write!(
                f,
                "Invalid UTF-8 in string at offset {} on step [{}]: {}",
                offset, step, source
            ),
            Error::ExpiryOutOfRange(expiry) => write!(
                f,
                "Expiry {} is outside the representable date range",
                expiry
            ),
            Error::BadAccountData(ref err) => write!(f, "Bad account data: {}", err),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match *self {
            Error::InvalidUtf8 { ref source, .. } => Some(source),
            _ => None,
        }
    }
}

impl std::convert::From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Self::BadAccountData(format!("base64: {}", e))
    }
}

impl std::convert::From<bs58::decode::Error> for Error {
    fn from(e: bs58::decode::Error) -> Self {
        Self::BadAccountData(format!("base58: {}", e))
    }
}

/// The category of an [`Error`], as reported in a batch's failure list.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    EmptyBuffer,
    OutOfBounds,
    UnknownTag,
    InvalidUtf8,
    ExpiryOutOfRange,
    BadAccountData,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::EmptyBuffer => "EmptyBuffer",
            ErrorKind::OutOfBounds => "OutOfBounds",
            ErrorKind::UnknownTag => "UnknownTag",
            ErrorKind::InvalidUtf8 => "InvalidUtf8",
            ErrorKind::ExpiryOutOfRange => "ExpiryOutOfRange",
            ErrorKind::BadAccountData => "BadAccountData",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
