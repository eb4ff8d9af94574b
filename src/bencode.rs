//! Bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! Bencode supports four data types:
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Reading and writing
//!
//! Decoding is lenient about dictionary key order; encoding is strict and
//! always emits keys in ascending byte order. Re-encoding a decoded value
//! therefore reproduces canonical input byte for byte, and canonicalizes
//! anything else.
//!
//! ```
//! use rbencode::{decode, encode};
//!
//! let canonical = b"d3:cow3:moo4:spam4:eggse";
//! assert_eq!(encode(&decode(canonical).unwrap()), canonical);
//!
//! let unordered = b"d4:spam4:eggs3:cow3:mooe";
//! assert_eq!(encode(&decode(unordered).unwrap()), canonical);
//! ```
//!
//! Several values stored back to back can be walked with [`decode_prefix`],
//! [`Decoder`], or [`StreamDecoder`] for any [`std::io::BufRead`]:
//!
//! ```
//! use rbencode::{Decoder, StreamDecoder};
//!
//! let data = b"i1e4:spamle";
//! assert_eq!(Decoder::new(data).count(), 3);
//! assert_eq!(StreamDecoder::new(&data[..]).count(), 3);
//! ```
//!
//! # Error Handling
//!
//! Decoding stops at the first problem and reports it with its byte offset:
//!
//! - [`DecodeError::InvalidLeadingByte`] - A byte that cannot start a value
//! - [`DecodeError::MalformedInteger`] - Empty digits, leading zeros, `-0`, overflow
//! - [`DecodeError::MalformedLength`] - The same rules applied to a string length
//! - [`DecodeError::TruncatedInput`] - Input ended inside a token or string
//! - [`DecodeError::UnterminatedContainer`] - A list or dictionary never closed
//! - [`DecodeError::NonStringDictionaryKey`] - A dictionary key that is not a string
//! - [`DecodeError::RecursionLimitExceeded`] - Nesting beyond [`DecodeOptions::max_depth`]
//! - [`DecodeError::TrailingData`] - Extra data after the value
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod options;
mod source;
mod value;

pub use decode::{
    decode, decode_prefix, decode_prefix_with, decode_reader, decode_with, Decoder, StreamDecoder,
};
pub use encode::{encode, encode_bytes, encode_to};
pub use error::{DecodeError, DecodeErrorKind, EncodeError, NumeralError};
pub use options::{DecodeOptions, DEFAULT_MAX_DEPTH};
pub use value::Value;
