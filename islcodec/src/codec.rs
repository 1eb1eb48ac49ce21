//! High-level entry points coupling the core to files on disk.
//!
//! [`Codec`] owns one [`Translations`] set and knows how to fill it from
//! ISL sources (merging several files into one set) or from a compiled
//! binary file, and how to write it back out in either representation.
//! [`verify_files`] is the tolerant counterpart of the strict merge: each
//! file is parsed independently and failures are reported per file instead
//! of aborting the whole run.

use std::fmt::{self, Display, Formatter};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::{
    error::{Error, Result},
    files,
    formats::{bin, isl},
    traits::Parser,
    types::Translations,
};

/// Owns a translation set and moves it between the two on-disk formats.
#[derive(Debug, Clone, Default)]
pub struct Codec {
    translations: Translations,
}

impl Codec {
    /// Creates a new, empty `Codec`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current translation set.
    pub fn translations(&self) -> &Translations {
        &self.translations
    }

    /// Consumes the codec, yielding the translation set.
    pub fn into_translations(self) -> Translations {
        self.translations
    }

    /// Reads one ISL source file, replacing the current set.
    pub fn read_isl_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.read_isl_files(&[path])
    }

    /// Reads and merges several ISL source files into one set, replacing
    /// the current one.
    ///
    /// Each file's text is appended with a trailing line break and the
    /// whole buffer is parsed in a single pass, so a lexical error in any
    /// file aborts the merge. An unreadable file aborts it too. Empty
    /// source text, or a parse that produces no entries, yields
    /// [`Error::EmptyInput`].
    pub fn read_isl_files<P: AsRef<Path>>(&mut self, paths: &[P]) -> Result<()> {
        let mut buffer = String::new();
        for path in paths {
            let text = files::read_text(path)?;
            if !text.is_empty() {
                buffer.push_str(&text);
                buffer.push('\n');
            }
        }
        if buffer.is_empty() {
            return Err(Error::EmptyInput);
        }

        let map = isl::parse(&buffer)?;
        if map.is_empty() {
            return Err(Error::EmptyInput);
        }
        tracing::info!(
            files = paths.len(),
            string_ids = map.len(),
            "merged ISL sources"
        );
        self.translations = map;
        Ok(())
    }

    /// Reads a compiled binary file, replacing the current set.
    pub fn read_bin_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.translations = bin::Format::read_from(path)?.into();
        Ok(())
    }

    /// Writes the current set as a compiled binary file.
    pub fn write_bin_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let bytes = bin::encode(&self.translations)?;
        std::fs::write(path, bytes).map_err(Error::Io)
    }

    /// Writes the current set back out as ISL source text.
    pub fn write_isl_file<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        std::fs::write(path, isl::render(&self.translations)).map_err(Error::Io)
    }

    /// Compiles ISL sources into one binary file: merge-read then encode.
    pub fn compile<P: AsRef<Path>>(&mut self, inputs: &[P], output: impl AsRef<Path>) -> Result<()> {
        self.read_isl_files(inputs)?;
        self.write_bin_file(&output)?;
        tracing::info!(output = %output.as_ref().display(), "compiled binary lookup table");
        Ok(())
    }

    /// Decompiles a binary file back into ISL source text.
    pub fn decompile(&mut self, input: impl AsRef<Path>, output: impl AsRef<Path>) -> Result<()> {
        self.read_bin_file(&input)?;
        self.write_isl_file(&output)?;
        tracing::info!(output = %output.as_ref().display(), "decoded binary lookup table");
        Ok(())
    }
}

/// Outcome of verifying one source file.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum VerifyStatus {
    /// Parsed cleanly into a non-empty set.
    Ok,
    /// The source text was empty.
    Empty,
    /// Parsed cleanly, but no (string id, locale) pair was produced.
    EmptyMap,
    /// The file could not be read; carries the I/O error text.
    Unreadable(String),
    /// A lexical error; carries the input prefix consumed up to the failure.
    ParseError(String),
}

/// One verification report line: a path and what happened to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileReport {
    pub path: PathBuf,
    #[serde(flatten)]
    pub status: VerifyStatus,
}

impl FileReport {
    pub fn is_ok(&self) -> bool {
        self.status == VerifyStatus::Ok
    }
}

impl Display for FileReport {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "\nFile verification: {}", self.path.display())?;
        writeln!(f, "============================")?;
        match &self.status {
            VerifyStatus::Ok => writeln!(f, "Status: ok"),
            VerifyStatus::Empty => writeln!(f, "Warning: translations is empty!"),
            VerifyStatus::EmptyMap => writeln!(f, "Warning: translations map is empty!"),
            VerifyStatus::Unreadable(_) => writeln!(f, "Error: cannot read file!"),
            VerifyStatus::ParseError(consumed) => writeln!(
                f,
                "Error: cannot parse translations, error in string:\n{consumed} <---"
            ),
        }
    }
}

/// Verifies each source file independently, one report per file.
///
/// Unlike the merge path, a failure never stops the run: every input gets
/// its own fresh parse and its own [`FileReport`].
pub fn verify_files<P: AsRef<Path>>(paths: &[P]) -> Vec<FileReport> {
    paths
        .iter()
        .map(|path| {
            let path = path.as_ref().to_path_buf();
            let status = verify_one(&path);
            if !matches!(status, VerifyStatus::Ok) {
                tracing::warn!(path = %path.display(), ?status, "verification failure");
            }
            FileReport { path, status }
        })
        .collect()
}

/// Renders the reports as one human-readable block, in input order.
pub fn verify_report<P: AsRef<Path>>(paths: &[P]) -> String {
    verify_files(paths)
        .iter()
        .map(FileReport::to_string)
        .collect()
}

fn verify_one(path: &Path) -> VerifyStatus {
    let text = match files::read_text(path) {
        Ok(text) => text,
        Err(e) => return VerifyStatus::Unreadable(e.to_string()),
    };
    if text.is_empty() {
        return VerifyStatus::Empty;
    }
    match isl::parse(&text) {
        Ok(map) if map.is_empty() => VerifyStatus::EmptyMap,
        Ok(_) => VerifyStatus::Ok,
        Err(Error::EmptyInput) => VerifyStatus::Empty,
        Err(Error::Parse { consumed }) => VerifyStatus::ParseError(consumed),
        Err(e) => VerifyStatus::Unreadable(e.to_string()),
    }
}
