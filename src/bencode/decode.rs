use super::error::{DecodeError, NumeralError};
use super::options::DecodeOptions;
use super::source::{ReaderSource, SliceSource, Source};
use super::value::Value;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::BufRead;

/// Decodes a single value that must span the whole of `data`.
///
/// # Errors
///
/// Returns [`DecodeError::TrailingData`] if bytes remain after the value, or
/// any other [`DecodeError`] if the input is malformed or truncated.
///
/// # Examples
///
/// ```
/// use rbencode::{decode, DecodeErrorKind, Value};
///
/// assert_eq!(decode(b"i42e").unwrap(), Value::Integer(42));
/// assert_eq!(
///     decode(b"i42eextra").unwrap_err().kind(),
///     DecodeErrorKind::TrailingData
/// );
/// ```
pub fn decode(data: &[u8]) -> Result<Value, DecodeError> {
    decode_with(data, &DecodeOptions::default())
}

/// Like [`decode`], with explicit limits.
pub fn decode_with(data: &[u8], options: &DecodeOptions) -> Result<Value, DecodeError> {
    check_input_len(data, options)?;

    let mut parser = Parser::new(SliceSource::new(data, 0), options);
    let value = parser.parse_value(0)?;

    let pos = parser.src.position();
    if pos != data.len() {
        return Err(DecodeError::TrailingData { offset: pos });
    }

    Ok(value)
}

/// Decodes one value starting at `start`, returning it together with the
/// number of bytes it occupied.
///
/// Bytes after the value are left alone, so a buffer of concatenated values
/// can be walked by advancing `start` by the reported length each time.
/// Offsets in errors are absolute positions within `data`.
///
/// # Examples
///
/// ```
/// use rbencode::{decode_prefix, Value};
///
/// let data = b"4:spami7e";
/// let (first, used) = decode_prefix(data, 0).unwrap();
/// assert_eq!(first, Value::string("spam"));
/// assert_eq!(used, 6);
///
/// let (second, _) = decode_prefix(data, used).unwrap();
/// assert_eq!(second, Value::Integer(7));
/// ```
pub fn decode_prefix(data: &[u8], start: usize) -> Result<(Value, usize), DecodeError> {
    decode_prefix_with(data, start, &DecodeOptions::default())
}

/// Like [`decode_prefix`], with explicit limits.
pub fn decode_prefix_with(
    data: &[u8],
    start: usize,
    options: &DecodeOptions,
) -> Result<(Value, usize), DecodeError> {
    check_input_len(data, options)?;

    let mut parser = Parser::new(SliceSource::new(data, start), options);
    let value = parser.parse_value(0)?;
    Ok((value, parser.src.position() - start))
}

/// Decodes a single value from a buffered reader.
///
/// Reading stops right after the value; whatever follows stays in the reader.
pub fn decode_reader<R: BufRead>(reader: R) -> Result<Value, DecodeError> {
    let options = DecodeOptions::default();
    let mut parser = Parser::new(ReaderSource::new(reader, options.max_input_len), &options);
    parser.parse_value(0)
}

fn check_input_len(data: &[u8], options: &DecodeOptions) -> Result<(), DecodeError> {
    match options.max_input_len {
        Some(limit) if data.len() > limit => Err(DecodeError::InputTooLarge {
            len: data.len(),
            limit,
        }),
        _ => Ok(()),
    }
}

/// A cursor over a buffer holding several concatenated values.
///
/// Iteration stops at the end of the buffer, and after the first error.
///
/// # Examples
///
/// ```
/// use rbencode::{Decoder, Value};
///
/// let values: Vec<Value> = Decoder::new(b"i1e3:twoli3ee")
///     .collect::<Result<_, _>>()
///     .unwrap();
/// assert_eq!(values.len(), 3);
/// assert_eq!(values[1].as_str(), Some("two"));
/// ```
#[derive(Debug, Clone)]
pub struct Decoder<'a> {
    data: &'a [u8],
    pos: usize,
    options: DecodeOptions,
    failed: bool,
}

impl<'a> Decoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            pos: 0,
            options: DecodeOptions::default(),
            failed: false,
        }
    }

    pub fn with_options(mut self, options: DecodeOptions) -> Self {
        self.options = options;
        self
    }

    /// Starts decoding at `offset` instead of the beginning of the buffer.
    pub fn at(mut self, offset: usize) -> Self {
        self.pos = offset;
        self
    }

    /// Offset of the first byte not yet decoded.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns `true` once every byte of the buffer has been consumed.
    pub fn is_finished(&self) -> bool {
        self.pos >= self.data.len()
    }

    /// Decodes the next value and advances past it.
    pub fn decode_next(&mut self) -> Result<Value, DecodeError> {
        let (value, used) = decode_prefix_with(self.data, self.pos, &self.options)?;
        tracing::trace!(offset = self.pos, used, kind = value.kind(), "decoded value");
        self.pos += used;
        Ok(value)
    }
}

impl Iterator for Decoder<'_> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed || self.is_finished() {
            return None;
        }
        let result = self.decode_next();
        self.failed = result.is_err();
        Some(result)
    }
}

/// Decodes consecutive values from a buffered reader.
///
/// [`StreamDecoder::decode_next`] returns `Ok(None)` when the input ends
/// cleanly between two values. Wrap unbuffered sources such as files or
/// sockets in a [`std::io::BufReader`].
///
/// # Examples
///
/// ```
/// use rbencode::{StreamDecoder, Value};
///
/// let mut decoder = StreamDecoder::new(&b"i1ei2e"[..]);
/// assert_eq!(decoder.decode_next().unwrap(), Some(Value::Integer(1)));
/// assert_eq!(decoder.decode_next().unwrap(), Some(Value::Integer(2)));
/// assert_eq!(decoder.decode_next().unwrap(), None);
/// ```
pub struct StreamDecoder<R> {
    src: ReaderSource<R>,
    options: DecodeOptions,
    failed: bool,
}

impl<R: BufRead> StreamDecoder<R> {
    pub fn new(reader: R) -> Self {
        Self::with_options(reader, DecodeOptions::default())
    }

    pub fn with_options(reader: R, options: DecodeOptions) -> Self {
        Self {
            src: ReaderSource::new(reader, options.max_input_len),
            options,
            failed: false,
        }
    }

    /// Number of bytes consumed from the reader so far.
    pub fn position(&self) -> usize {
        self.src.position()
    }

    pub fn decode_next(&mut self) -> Result<Option<Value>, DecodeError> {
        if self.src.peek()?.is_none() {
            return Ok(None);
        }

        let start = self.src.position();
        let mut parser = Parser::new(&mut self.src, &self.options);
        let value = parser.parse_value(0)?;
        let used = self.src.position() - start;
        tracing::trace!(offset = start, used, kind = value.kind(), "decoded value");
        Ok(Some(value))
    }

    pub fn into_inner(self) -> R {
        self.src.into_inner()
    }
}

impl<R: BufRead> Iterator for StreamDecoder<R> {
    type Item = Result<Value, DecodeError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        let result = self.decode_next().transpose();
        self.failed = matches!(result, Some(Err(_)));
        result
    }
}

/// Recursive-descent parser over any [`Source`].
///
/// `depth` is the number of containers enclosing the value being parsed.
struct Parser<'o, S> {
    src: S,
    options: &'o DecodeOptions,
}

impl<'o, S: Source> Parser<'o, S> {
    fn new(src: S, options: &'o DecodeOptions) -> Self {
        Self { src, options }
    }

    fn parse_value(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let offset = self.src.position();
        match self.src.peek()? {
            Some(b'i') => self.parse_integer().map(Value::Integer),
            Some(b'l') => self.parse_list(depth),
            Some(b'd') => self.parse_dict(depth),
            Some(b'0'..=b'9') => self.parse_bytes().map(Value::Bytes),
            Some(byte) => Err(DecodeError::InvalidLeadingByte { byte, offset }),
            None => Err(DecodeError::TruncatedInput { needed: 1, offset }),
        }
    }

    fn parse_integer(&mut self) -> Result<i64, DecodeError> {
        self.src.bump();
        self.parse_numeral(b'e', true, |reason, offset| {
            DecodeError::MalformedInteger { reason, offset }
        })
    }

    fn parse_bytes(&mut self) -> Result<Bytes, DecodeError> {
        let offset = self.src.position();
        let malformed =
            |reason: NumeralError, offset: usize| DecodeError::MalformedLength { reason, offset };

        let len = self.parse_numeral(b':', false, malformed)?;
        let len = usize::try_from(len).map_err(|_| malformed(NumeralError::Overflow, offset))?;
        self.src.take(len)
    }

    /// Reads a decimal numeral up to and including `terminator`.
    ///
    /// Accumulates with the sign applied so that `i64::MIN` is representable.
    fn parse_numeral(
        &mut self,
        terminator: u8,
        signed: bool,
        malformed: impl Fn(NumeralError, usize) -> DecodeError,
    ) -> Result<i64, DecodeError> {
        let negative = signed && self.src.peek()? == Some(b'-');
        if negative {
            self.src.bump();
        }

        let mut value: i64 = 0;
        let mut digits = 0usize;
        let mut leading_zero = false;

        loop {
            let offset = self.src.position();
            match self.src.next_byte()? {
                Some(byte) if byte == terminator => {
                    if digits == 0 {
                        return Err(malformed(NumeralError::Empty, offset));
                    }
                    if negative && leading_zero {
                        return Err(malformed(NumeralError::NegativeZero, offset));
                    }
                    return Ok(value);
                }
                Some(byte @ b'0'..=b'9') => {
                    if leading_zero {
                        return Err(malformed(NumeralError::LeadingZero, offset));
                    }
                    if digits == 0 && byte == b'0' {
                        leading_zero = true;
                    }

                    let digit = i64::from(byte - b'0');
                    value = value
                        .checked_mul(10)
                        .and_then(|v| {
                            if negative {
                                v.checked_sub(digit)
                            } else {
                                v.checked_add(digit)
                            }
                        })
                        .ok_or_else(|| malformed(NumeralError::Overflow, offset))?;
                    digits += 1;
                }
                Some(byte) => return Err(malformed(NumeralError::UnexpectedByte(byte), offset)),
                None => return Err(DecodeError::TruncatedInput { needed: 1, offset }),
            }
        }
    }

    fn enter(&self, depth: usize, offset: usize) -> Result<(), DecodeError> {
        if depth >= self.options.max_depth {
            return Err(DecodeError::RecursionLimitExceeded {
                limit: self.options.max_depth,
                offset,
            });
        }
        Ok(())
    }

    fn parse_list(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let open = self.src.position();
        self.enter(depth, open)?;
        self.src.bump();

        let mut list = Vec::new();
        loop {
            match self.src.peek()? {
                Some(b'e') => {
                    self.src.bump();
                    return Ok(Value::List(list));
                }
                Some(_) => list.push(self.parse_value(depth + 1)?),
                None => return Err(DecodeError::UnterminatedContainer { offset: open }),
            }
        }
    }

    fn parse_dict(&mut self, depth: usize) -> Result<Value, DecodeError> {
        let open = self.src.position();
        self.enter(depth, open)?;
        self.src.bump();

        let mut dict = BTreeMap::new();
        loop {
            let offset = self.src.position();
            let key = match self.src.peek()? {
                Some(b'e') => {
                    self.src.bump();
                    return Ok(Value::Dict(dict));
                }
                Some(b'0'..=b'9') => self.parse_bytes()?,
                Some(b'i' | b'l' | b'd') => {
                    return Err(DecodeError::NonStringDictionaryKey { offset });
                }
                Some(byte) => return Err(DecodeError::InvalidLeadingByte { byte, offset }),
                None => return Err(DecodeError::UnterminatedContainer { offset: open }),
            };

            if self.src.peek()?.is_none() {
                return Err(DecodeError::UnterminatedContainer { offset: open });
            }
            let value = self.parse_value(depth + 1)?;

            // Key order is not checked on read; a repeated key keeps the last value.
            dict.insert(key, value);
        }
    }
}
