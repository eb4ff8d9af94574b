use super::error::EncodeError;
use super::value::Value;
use bytes::{BufMut, Bytes, BytesMut};
use std::io::{self, Write};

/// Encodes a bencode value to a byte vector.
///
/// The output is the canonical encoding:
/// - Integers: `i<number>e`, minimal decimal form
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e`, keys in ascending byte order
///
/// Dictionary order does not depend on how the dictionary was built, so
/// logically equal values always encode to identical bytes.
///
/// # Examples
///
/// ```
/// use rbencode::{encode, Value};
///
/// assert_eq!(encode(&Value::Integer(42)), b"i42e");
/// assert_eq!(encode(&Value::string("hello")), b"5:hello");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list), b"li1e3:twoe");
///
/// let dict = Value::dict()
///     .insert("spam", Value::string("eggs"))
///     .insert("cow", Value::string("moo"));
/// assert_eq!(encode(&dict), b"d3:cow3:moo4:spam4:eggse");
/// ```
pub fn encode(value: &Value) -> Vec<u8> {
    let mut buf = Vec::with_capacity(value.encoded_len());
    encode_value(value, &mut buf);
    buf
}

/// Encodes a value into a shareable [`Bytes`] buffer.
pub fn encode_bytes(value: &Value) -> Bytes {
    let mut buf = BytesMut::with_capacity(value.encoded_len());
    encode_value(value, &mut buf);
    buf.freeze()
}

/// Streams the canonical encoding of `value` to `writer`.
///
/// Pieces are written as the value is walked, so no full copy of the
/// encoding is built in memory. Wrap unbuffered writers in a
/// [`BufWriter`](std::io::BufWriter) to avoid many small writes.
///
/// # Errors
///
/// Returns an error only if the writer fails. Output already written before
/// the failure is left in the writer.
pub fn encode_to<W: Write>(value: &Value, writer: &mut W) -> Result<(), EncodeError> {
    write_value(value, writer)?;
    Ok(())
}

fn encode_value<B: BufMut>(value: &Value, buf: &mut B) {
    match value {
        Value::Integer(i) => {
            buf.put_u8(b'i');
            put_decimal(buf, *i < 0, i.unsigned_abs());
            buf.put_u8(b'e');
        }
        Value::Bytes(b) => encode_string(b, buf),
        Value::List(l) => {
            buf.put_u8(b'l');
            for item in l {
                encode_value(item, buf);
            }
            buf.put_u8(b'e');
        }
        Value::Dict(d) => {
            buf.put_u8(b'd');
            // BTreeMap iterates in ascending byte order of the keys.
            for (key, val) in d {
                encode_string(key, buf);
                encode_value(val, buf);
            }
            buf.put_u8(b'e');
        }
    }
}

fn encode_string<B: BufMut>(bytes: &[u8], buf: &mut B) {
    put_decimal(buf, false, bytes.len() as u64);
    buf.put_u8(b':');
    buf.put_slice(bytes);
}

fn put_decimal<B: BufMut>(buf: &mut B, negative: bool, magnitude: u64) {
    let mut digits = [0u8; 21];
    buf.put_slice(format_decimal(&mut digits, negative, magnitude));
}

fn write_value<W: Write>(value: &Value, writer: &mut W) -> io::Result<()> {
    match value {
        Value::Integer(i) => {
            let mut digits = [0u8; 21];
            writer.write_all(b"i")?;
            writer.write_all(format_decimal(&mut digits, *i < 0, i.unsigned_abs()))?;
            writer.write_all(b"e")
        }
        Value::Bytes(b) => write_string(b, writer),
        Value::List(l) => {
            writer.write_all(b"l")?;
            for item in l {
                write_value(item, writer)?;
            }
            writer.write_all(b"e")
        }
        Value::Dict(d) => {
            writer.write_all(b"d")?;
            for (key, val) in d {
                write_string(key, writer)?;
                write_value(val, writer)?;
            }
            writer.write_all(b"e")
        }
    }
}

fn write_string<W: Write>(bytes: &[u8], writer: &mut W) -> io::Result<()> {
    let mut digits = [0u8; 21];
    writer.write_all(format_decimal(&mut digits, false, bytes.len() as u64))?;
    writer.write_all(b":")?;
    writer.write_all(bytes)
}

/// Formats `magnitude` right-aligned in `digits`, with a leading minus sign
/// when `negative`, and returns the used tail.
fn format_decimal(digits: &mut [u8; 21], negative: bool, mut magnitude: u64) -> &[u8] {
    let mut start = digits.len();
    loop {
        start -= 1;
        digits[start] = b'0' + (magnitude % 10) as u8;
        magnitude /= 10;
        if magnitude == 0 {
            break;
        }
    }

    if negative {
        start -= 1;
        digits[start] = b'-';
    }
    &digits[start..]
}

/// Number of decimal digits in `n`, plus one for a minus sign.
pub(crate) fn decimal_len(negative: bool, mut n: u64) -> usize {
    let mut len = 1;
    while n >= 10 {
        n /= 10;
        len += 1;
    }
    len + usize::from(negative)
}
