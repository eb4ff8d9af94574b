//! rbencode - a bencode codec
//!
//! Decodes and encodes the self-describing binary format used by BitTorrent
//! metainfo files and tracker messages ([BEP-3]). The encoder always
//! produces the canonical form, which is what info-hashes are computed over.
//!
//! # Modules
//!
//! - [`bencode`] - value model, decoder, encoder and their errors
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

pub mod bencode;

pub use bencode::{
    decode, decode_prefix, decode_prefix_with, decode_reader, decode_with, encode, encode_bytes,
    encode_to, DecodeError, DecodeErrorKind, DecodeOptions, Decoder, EncodeError, NumeralError,
    StreamDecoder, Value, DEFAULT_MAX_DEPTH,
};
