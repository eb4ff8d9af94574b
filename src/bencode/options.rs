/// Default limit on container nesting.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Limits applied while decoding.
///
/// # Examples
///
/// ```
/// use rbencode::{decode_with, DecodeErrorKind, DecodeOptions};
///
/// let options = DecodeOptions::default().with_max_depth(2);
/// assert!(decode_with(b"llee", &options).is_ok());
///
/// let err = decode_with(b"llleee", &options).unwrap_err();
/// assert_eq!(err.kind(), DecodeErrorKind::RecursionLimitExceeded);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Maximum number of nested lists/dictionaries.
    pub max_depth: usize,
    /// Maximum number of input bytes a single decode may look at.
    pub max_input_len: Option<usize>,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_input_len: None,
        }
    }
}

impl DecodeOptions {
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn with_max_input_len(mut self, max_input_len: usize) -> Self {
        self.max_input_len = Some(max_input_len);
        self
    }
}
