//! All error types for the islcodec crate.
//!
//! These are returned from all fallible operations (parsing, encoding,
//! decoding, file handling).

use thiserror::Error;

/// A convenience `Result` alias using the crate's [`Error`] type.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    /// A grammar violation detected while parsing ISL source text.
    ///
    /// `consumed` is the input prefix scanned up to and including the
    /// offending character, kept for diagnostic display.
    #[error("cannot parse translations, error in string: {consumed} <---")]
    Parse { consumed: String },

    /// The source text was empty, or parsing produced an empty map where
    /// the caller required a populated one.
    #[error("translations is empty")]
    EmptyInput,

    /// A binary blob did not start with the expected magic tag.
    #[error("bad magic: not an ISL binary file")]
    BadMagic,

    /// A length-prefixed field declared more bytes than the input holds.
    #[error("truncated input while reading {context}")]
    Truncated { context: &'static str },

    /// Decoded key/name/value bytes were not valid UTF-8.
    #[error("invalid UTF-8 in binary data: {0}")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    /// A string or map exceeds the width of its length field on encode.
    #[error("{context} length {len} exceeds format limit {max}")]
    FieldTooLong {
        context: &'static str,
        len: usize,
        max: usize,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Creates a parse error from the consumed input prefix.
    pub(crate) fn parse_at(consumed: impl Into<String>) -> Self {
        Error::Parse {
            consumed: consumed.into(),
        }
    }

    /// Creates a truncation error naming the field being read.
    pub(crate) fn truncated(context: &'static str) -> Self {
        Error::Truncated { context }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_parse_error_display_carries_prefix() {
        let error = Error::parse_at("en.Title !");
        assert_eq!(
            error.to_string(),
            "cannot parse translations, error in string: en.Title ! <---"
        );
    }

    #[test]
    fn test_truncated_error_display() {
        let error = Error::truncated("value bytes");
        assert_eq!(
            error.to_string(),
            "truncated input while reading value bytes"
        );
    }

    #[test]
    fn test_field_too_long_display() {
        let error = Error::FieldTooLong {
            context: "string id",
            len: 300,
            max: 255,
        };
        assert_eq!(
            error.to_string(),
            "string id length 300 exceeds format limit 255"
        );
    }

    #[test]
    fn test_io_error_wraps() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "file not found");
        let error = Error::Io(io_error);
        assert!(error.to_string().contains("I/O error"));
    }

    #[test]
    fn test_empty_input_display() {
        assert_eq!(Error::EmptyInput.to_string(), "translations is empty");
    }
}
