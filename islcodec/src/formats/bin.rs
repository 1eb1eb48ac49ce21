//! Support for the compiled binary lookup format.
//!
//! The layout is a flat, self-describing byte sequence with no compression
//! and no checksum: a 4-byte magic tag, then a little-endian `u16` count of
//! string ids, each followed by its length-prefixed UTF-8 key and a `u16`
//! count of locale entries, each of which is a length-prefixed locale name
//! (`u8`) and value (`u16`).
//!
//! Decoding is strict: a wrong magic tag or any length prefix that demands
//! more bytes than remain aborts immediately, and no partial map is ever
//! returned.

use std::io::{Read, Write};

use crate::{
    error::{Error, Result},
    traits::Parser,
    types::{LocaleMap, Translations},
};

/// Magic tag opening every binary file: `ISL` plus a NUL byte.
///
/// Historically only the first three bytes are compared on read; the fourth
/// must be present but its content is ignored.
pub const MAGIC: [u8; 4] = *b"ISL\0";

const MAGIC_CHECKED_LEN: usize = 3;

/// Represents one compiled binary lookup table.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// The decoded translation set.
    pub translations: Translations,
}

/// Encodes a translation set into the binary layout.
///
/// Fails only when a key, locale name, value, or entry count does not fit
/// its length field; the byte order of entries follows map iteration order
/// and is unspecified.
pub fn encode(translations: &Translations) -> Result<Vec<u8>> {
    let mut out = Vec::new();
    out.extend_from_slice(&MAGIC);
    out.extend_from_slice(&checked_u16(translations.len(), "string id count")?.to_le_bytes());

    for (id, locales) in translations.iter() {
        write_prefixed_u8(&mut out, id, "string id")?;
        out.extend_from_slice(&checked_u16(locales.len(), "locale count")?.to_le_bytes());
        for (locale, value) in locales {
            write_prefixed_u8(&mut out, locale, "locale name")?;
            write_prefixed_u16(&mut out, value, "value")?;
        }
    }

    tracing::debug!(bytes = out.len(), "encoded binary lookup table");
    Ok(out)
}

/// Decodes a binary lookup table back into a translation set.
pub fn decode(bytes: &[u8]) -> Result<Translations> {
    Format::from_bytes(bytes).map(Translations::from)
}

fn checked_u16(len: usize, context: &'static str) -> Result<u16> {
    u16::try_from(len).map_err(|_| Error::FieldTooLong {
        context,
        len,
        max: u16::MAX as usize,
    })
}

fn write_prefixed_u8(out: &mut Vec<u8>, s: &str, context: &'static str) -> Result<()> {
    let len = u8::try_from(s.len()).map_err(|_| Error::FieldTooLong {
        context,
        len: s.len(),
        max: u8::MAX as usize,
    })?;
    out.push(len);
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

fn write_prefixed_u16(out: &mut Vec<u8>, s: &str, context: &'static str) -> Result<()> {
    out.extend_from_slice(&checked_u16(s.len(), context)?.to_le_bytes());
    out.extend_from_slice(s.as_bytes());
    Ok(())
}

/// Fills `buf` from the reader, reporting a short read as [`Error::Truncated`]
/// naming the field being read.
fn read_field<R: Read>(reader: &mut R, buf: &mut [u8], context: &'static str) -> Result<()> {
    reader.read_exact(buf).map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            Error::truncated(context)
        } else {
            Error::Io(e)
        }
    })
}

fn read_u8<R: Read>(reader: &mut R, context: &'static str) -> Result<u8> {
    let mut buf = [0u8; 1];
    read_field(reader, &mut buf, context)?;
    Ok(buf[0])
}

fn read_u16<R: Read>(reader: &mut R, context: &'static str) -> Result<u16> {
    let mut buf = [0u8; 2];
    read_field(reader, &mut buf, context)?;
    Ok(u16::from_le_bytes(buf))
}

fn read_string<R: Read>(reader: &mut R, len: usize, context: &'static str) -> Result<String> {
    let mut buf = vec![0u8; len];
    read_field(reader, &mut buf, context)?;
    Ok(String::from_utf8(buf)?)
}

impl Parser for Format {
    fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut magic = [0u8; MAGIC.len()];
        read_field(&mut reader, &mut magic, "magic tag")?;
        if magic[..MAGIC_CHECKED_LEN] != MAGIC[..MAGIC_CHECKED_LEN] {
            return Err(Error::BadMagic);
        }

        let entry_count = read_u16(&mut reader, "string id count")?;
        let mut entries = Vec::with_capacity(entry_count as usize);
        for _ in 0..entry_count {
            let key_len = read_u8(&mut reader, "string id length")?;
            let key = read_string(&mut reader, key_len as usize, "string id bytes")?;

            let locale_count = read_u16(&mut reader, "locale count")?;
            let mut locales = LocaleMap::with_capacity(locale_count as usize);
            for _ in 0..locale_count {
                let name_len = read_u8(&mut reader, "locale name length")?;
                let name = read_string(&mut reader, name_len as usize, "locale name bytes")?;
                let value_len = read_u16(&mut reader, "value length")?;
                let value = read_string(&mut reader, value_len as usize, "value bytes")?;
                locales.insert(name, value);
            }
            entries.push((key, locales));
        }

        Ok(Format {
            translations: entries.into_iter().collect(),
        })
    }

    fn to_writer<W: Write>(&self, mut writer: W) -> Result<()> {
        writer
            .write_all(&encode(&self.translations)?)
            .map_err(Error::Io)
    }
}

impl From<Format> for Translations {
    fn from(value: Format) -> Self {
        value.translations
    }
}

impl From<Translations> for Format {
    fn from(translations: Translations) -> Self {
        Format { translations }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::isl;

    fn sample() -> Translations {
        isl::parse("en.Title =Hello\nen.Body =Line1\\nLine2\nde.Title =Hallo\n").unwrap()
    }

    #[test]
    fn test_encode_starts_with_magic() {
        let bytes = encode(&sample()).unwrap();
        assert_eq!(&bytes[..4], b"ISL\0");
    }

    #[test]
    fn test_round_trip_preserves_map() {
        let map = sample();
        assert_eq!(decode(&encode(&map).unwrap()).unwrap(), map);
    }

    #[test]
    fn test_round_trip_empty_map() {
        let map = Translations::new();
        let bytes = encode(&map).unwrap();
        assert_eq!(bytes.len(), 6); // magic + zero entry count
        assert_eq!(decode(&bytes).unwrap(), map);
    }

    #[test]
    fn test_round_trip_empty_value_and_embedded_newline() {
        let map = isl::parse("en.Empty =\nen.Body =a\\nb\n").unwrap();
        let decoded = decode(&encode(&map).unwrap()).unwrap();
        assert_eq!(decoded.value("Empty", "en"), Some(""));
        assert_eq!(decoded.value("Body", "en"), Some("a\nb"));
    }

    #[test]
    fn test_bad_magic_is_rejected() {
        let mut bytes = encode(&sample()).unwrap();
        bytes[0] = b'X';
        assert!(matches!(decode(&bytes), Err(Error::BadMagic)));
    }

    #[test]
    fn test_fourth_magic_byte_is_not_compared() {
        let mut bytes = encode(&sample()).unwrap();
        bytes[3] = 0xFF;
        assert!(decode(&bytes).is_ok());
    }

    #[test]
    fn test_truncated_magic_is_short_read() {
        assert!(matches!(
            decode(b"IS"),
            Err(Error::Truncated { context: "magic tag" })
        ));
    }

    #[test]
    fn test_declared_value_length_beyond_input_is_truncation() {
        let bytes = encode(&sample()).unwrap();
        // Drop the tail so the last declared value overruns the input.
        let cut = &bytes[..bytes.len() - 1];
        assert!(matches!(decode(cut), Err(Error::Truncated { .. })));
    }

    #[test]
    fn test_missing_entry_body_is_truncation() {
        let mut bytes = Vec::from(MAGIC);
        bytes.extend_from_slice(&1u16.to_le_bytes());
        // Entry count says one entry, but no key follows.
        assert!(matches!(
            decode(&bytes),
            Err(Error::Truncated { context: "string id length" })
        ));
    }

    #[test]
    fn test_non_utf8_key_is_rejected() {
        let mut bytes = Vec::from(MAGIC);
        bytes.extend_from_slice(&1u16.to_le_bytes());
        bytes.push(2);
        bytes.extend_from_slice(&[0xFF, 0xFE]);
        bytes.extend_from_slice(&0u16.to_le_bytes());
        assert!(matches!(decode(&bytes), Err(Error::InvalidUtf8(_))));
    }

    #[test]
    fn test_oversized_string_id_fails_encode() {
        let mut map = Translations::new();
        map.declare("k".repeat(300));
        let err = encode(&map).unwrap_err();
        assert!(matches!(
            err,
            Error::FieldTooLong { context: "string id", len: 300, .. }
        ));
    }

    #[test]
    fn test_multibyte_values_round_trip() {
        let map = isl::parse("ja.Greeting =こんにちは\n").unwrap();
        assert_eq!(decode(&encode(&map).unwrap()).unwrap(), map);
    }
}
