//! Support for the ISL translation source format.
//!
//! ISL is a line-oriented text format: a `<locale>.` header opens a section,
//! and each `<string id> = <value>` line inside it assigns the translated
//! text of that string id for that locale. `;` starts a full-line comment,
//! and a literal `\n` inside a value stands for a real newline.
//!
//! Parsing runs a character-level state machine over one fully buffered
//! source text and either produces a [`Translations`] map or stops at the
//! first grammar violation, reporting the input consumed so far.

use std::io::Read;
use std::path::Path;

use crate::{
    error::{Error, Result},
    traits::Parser,
    types::Translations,
};

/// Locale token lengths the grammar refuses to treat as a section header.
///
/// Lengths 0, 1, 4 and 9 (and anything of 12 or more) send the parser into
/// the error path instead. The set is inherited from the format's first
/// implementation and does not match any locale-naming convention; files in
/// the wild rely on it, so it is preserved as-is.
const REJECTED_LOCALE_LENGTHS: [usize; 4] = [0, 1, 4, 9];

const MAX_LOCALE_LEN: usize = 12;

/// Represents one ISL translation source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Format {
    /// The parsed translation set.
    pub translations: Translations,
}

/// Parser states. `BeginDocument` and `EndValue` both mean "awaiting the
/// next section header, comment, or end of input".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    BeginDocument,
    EndDocument,
    BeginStringId,
    EndStringId,
    BeginLocale,
    EndLocale,
    BeginValue,
    EndValue,
}

fn is_separator(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\r' | '\n')
}

fn is_locale_char(c: char) -> bool {
    c.is_alphabetic() || c == '_'
}

fn is_string_id_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

/// Byte length of the maximal prefix of `s` made of locale characters.
fn locale_run(s: &str) -> usize {
    s.find(|c| !is_locale_char(c)).unwrap_or(s.len())
}

/// Byte length of the maximal prefix of `s` made of string id characters.
fn string_id_run(s: &str) -> usize {
    s.find(|c| !is_string_id_char(c)).unwrap_or(s.len())
}

/// Parses one ISL source text into a [`Translations`] map.
///
/// The whole input is scanned in a single pass; the first grammar violation
/// aborts the parse with [`Error::Parse`] carrying the consumed prefix.
/// Empty input yields [`Error::EmptyInput`]. Each call starts from a fresh
/// state, so repeated calls never contaminate each other.
pub fn parse(text: &str) -> Result<Translations> {
    if text.is_empty() {
        return Err(Error::EmptyInput);
    }

    let mut map = Translations::new();
    let mut state = State::BeginDocument;
    let mut string_id = String::new();
    let mut current_locale = String::new();
    let len = text.len();
    let mut pos = 0;

    while pos < len {
        // `pos` always sits on a char boundary.
        let ch = text[pos..]
            .chars()
            .next()
            .ok_or_else(|| Error::parse_at(&text[..pos]))?;
        let mut incr = ch.len_utf8();

        match state {
            State::BeginDocument | State::EndValue => {
                if !is_separator(ch) {
                    if ch == ';' {
                        // Comment line: skip through its newline.
                        incr = match text[pos..].find('\n') {
                            Some(off) => off + 1,
                            None => len - pos,
                        };
                    } else {
                        let run = locale_run(&text[pos..]);
                        let locale_chars = text[pos..pos + run].chars().count();
                        if locale_chars < MAX_LOCALE_LEN
                            && !REJECTED_LOCALE_LENGTHS.contains(&locale_chars)
                        {
                            // Re-dispatch on the same position as a locale.
                            state = State::BeginLocale;
                            continue;
                        }
                        return Err(Error::parse_at(&text[..pos + ch.len_utf8()]));
                    }
                }
            }

            State::BeginLocale => {
                let run = locale_run(&text[pos..]);
                current_locale = text[pos..pos + run].to_string();
                if pos + run == len {
                    // Unterminated locale at end of input.
                    return Err(Error::parse_at(&text[..pos + run]));
                }
                state = State::EndLocale;
                incr = run;
            }

            State::EndLocale => {
                if !is_separator(ch) {
                    if ch == '.' {
                        state = State::BeginStringId;
                    } else {
                        return Err(Error::parse_at(&text[..pos + ch.len_utf8()]));
                    }
                }
            }

            State::BeginStringId => {
                if !is_separator(ch) {
                    let run = string_id_run(&text[pos..]);
                    let end = pos + run;
                    match text[end..].chars().next() {
                        // The id run may only be ended by a separator or `=`;
                        // running out of input mid-token is an error too.
                        None => return Err(Error::parse_at(text)),
                        Some(c) if !is_separator(c) && c != '=' => {
                            return Err(Error::parse_at(&text[..end + c.len_utf8()]));
                        }
                        Some(_) => {}
                    }
                    string_id = text[pos..end].to_string();
                    if !string_id.is_empty() {
                        map.declare(string_id.clone());
                    }
                    state = State::EndStringId;
                    incr = run;
                }
            }

            State::EndStringId => {
                if !is_separator(ch) {
                    if ch == '=' {
                        state = State::BeginValue;
                    } else {
                        return Err(Error::parse_at(&text[..pos + ch.len_utf8()]));
                    }
                }
            }

            State::BeginValue => {
                // Everything up to the line terminator, which is left for the
                // next state to consume as a separator.
                let (raw, consumed) = match text[pos..].find('\n') {
                    Some(off) => (&text[pos..pos + off], off),
                    None => (&text[pos..], len - pos),
                };
                let raw = raw.strip_suffix('\r').unwrap_or(raw);
                let value = raw.replace("\\n", "\n");
                if !current_locale.is_empty() {
                    // Ignored when the string id was empty: no entry exists.
                    map.set(&string_id, current_locale.clone(), value);
                }
                state = State::EndValue;
                incr = consumed;
            }

            State::EndDocument => unreachable!("terminal state inside scan loop"),
        }

        pos += incr;
        if pos == len {
            state = State::EndDocument;
        }
    }

    debug_assert_eq!(state, State::EndDocument);
    tracing::debug!(string_ids = map.len(), "parsed ISL source");
    Ok(map)
}

/// Renders a translation set back to ISL source text.
///
/// Emits `<locale>.<id> =<value>` per pair, with real newlines in values
/// escaped back to the literal two-character `\n`, and a blank line after
/// each string id's group. Pair order follows map iteration order and is
/// unspecified.
pub fn render(translations: &Translations) -> String {
    let mut out = String::new();
    for (id, locales) in translations.iter() {
        for (locale, value) in locales {
            out.push_str(locale);
            out.push('.');
            out.push_str(id);
            out.push_str(" =");
            out.push_str(&value.replace('\n', "\\n"));
            out.push('\n');
        }
        out.push('\n');
    }
    out
}

impl Parser for Format {
    fn from_reader<R: Read>(mut reader: R) -> Result<Self> {
        let mut text = String::new();
        reader.read_to_string(&mut text).map_err(Error::Io)?;
        Ok(Format {
            translations: parse(&text)?,
        })
    }

    fn to_writer<W: std::io::Write>(&self, mut writer: W) -> Result<()> {
        writer
            .write_all(render(&self.translations).as_bytes())
            .map_err(Error::Io)
    }

    /// Override default file reading to tolerate a BOM in hand-edited files.
    fn read_from<P: AsRef<Path>>(path: P) -> Result<Self>
    where
        Self: Sized,
    {
        let decoded = crate::files::read_text(path)?;
        Self::from_str(&decoded)
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
