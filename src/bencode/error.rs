use std::io;

use thiserror::Error;

/// Why a decimal numeral (an integer body or a string length) was rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum NumeralError {
    /// No digits between the opening marker and the terminator (`ie`).
    #[error("no digits")]
    Empty,

    /// A multi-digit numeral starting with `0` (`i03e`, `03:abc`).
    #[error("leading zeros")]
    LeadingZero,

    /// `i-0e`; zero has exactly one representation.
    #[error("negative zero")]
    NegativeZero,

    /// A byte that is neither a digit nor the expected terminator.
    #[error("unexpected byte {0:#04x}")]
    UnexpectedByte(u8),

    /// The numeral does not fit the target type (`i64` or `usize`).
    #[error("out of range")]
    Overflow,
}

/// Errors that can occur while decoding bencode.
///
/// Every variant except [`DecodeError::InputTooLarge`] carries the absolute
/// byte offset at which the failure was detected.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("invalid leading byte {byte:#04x} at offset {offset}")]
    InvalidLeadingByte { byte: u8, offset: usize },

    #[error("malformed integer at offset {offset}: {reason}")]
    MalformedInteger { reason: NumeralError, offset: usize },

    #[error("malformed string length at offset {offset}: {reason}")]
    MalformedLength { reason: NumeralError, offset: usize },

    #[error("input truncated at offset {offset}: {needed} more byte(s) required")]
    TruncatedInput { needed: usize, offset: usize },

    /// End of input before the `e` closing the container opened at `offset`.
    #[error("container opened at offset {offset} is never terminated")]
    UnterminatedContainer { offset: usize },

    #[error("dictionary key at offset {offset} is not a byte string")]
    NonStringDictionaryKey { offset: usize },

    #[error("nesting deeper than {limit} containers at offset {offset}")]
    RecursionLimitExceeded { limit: usize, offset: usize },

    #[error("trailing data after value at offset {offset}")]
    TrailingData { offset: usize },

    #[error("input of {len} bytes exceeds the {limit} byte limit")]
    InputTooLarge { len: usize, limit: usize },

    #[error("io error at offset {offset}: {source}")]
    Io {
        #[source]
        source: io::Error,
        offset: usize,
    },
}

/// Field-less mirror of [`DecodeError`], convenient for matching and
/// comparing error classes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DecodeErrorKind {
    InvalidLeadingByte,
    MalformedInteger,
    MalformedLength,
    TruncatedInput,
    UnterminatedContainer,
    NonStringDictionaryKey,
    RecursionLimitExceeded,
    TrailingData,
    InputTooLarge,
    Io,
}

impl DecodeError {
    pub fn kind(&self) -> DecodeErrorKind {
        match self {
            DecodeError::InvalidLeadingByte { .. } => DecodeErrorKind::InvalidLeadingByte,
            DecodeError::MalformedInteger { .. } => DecodeErrorKind::MalformedInteger,
            DecodeError::MalformedLength { .. } => DecodeErrorKind::MalformedLength,
            DecodeError::TruncatedInput { .. } => DecodeErrorKind::TruncatedInput,
            DecodeError::UnterminatedContainer { .. } => DecodeErrorKind::UnterminatedContainer,
            DecodeError::NonStringDictionaryKey { .. } => DecodeErrorKind::NonStringDictionaryKey,
            DecodeError::RecursionLimitExceeded { .. } => DecodeErrorKind::RecursionLimitExceeded,
            DecodeError::TrailingData { .. } => DecodeErrorKind::TrailingData,
            DecodeError::InputTooLarge { .. } => DecodeErrorKind::InputTooLarge,
            DecodeError::Io { .. } => DecodeErrorKind::Io,
        }
    }

    /// The byte offset at which the failure was detected, if it has one.
    pub fn offset(&self) -> Option<usize> {
        match *self {
            DecodeError::InvalidLeadingByte { offset, .. }
            | DecodeError::MalformedInteger { offset, .. }
            | DecodeError::MalformedLength { offset, .. }
            | DecodeError::TruncatedInput { offset, .. }
            | DecodeError::UnterminatedContainer { offset }
            | DecodeError::NonStringDictionaryKey { offset }
            | DecodeError::RecursionLimitExceeded { offset, .. }
            | DecodeError::TrailingData { offset }
            | DecodeError::Io { offset, .. } => Some(offset),
            DecodeError::InputTooLarge { .. } => None,
        }
    }

    /// Returns `true` if the input ended early rather than being malformed.
    ///
    /// A streaming consumer can treat these as "need more bytes".
    pub fn is_truncation(&self) -> bool {
        matches!(
            self,
            DecodeError::TruncatedInput { .. } | DecodeError::UnterminatedContainer { .. }
        )
    }
}

/// Errors that can occur while writing an encoded value.
///
/// Encoding itself is total; only the destination writer can fail.
#[derive(Debug, Error)]
pub enum EncodeError {
    #[error("io error: {0}")]
    Io(#[from] io::Error),
}
