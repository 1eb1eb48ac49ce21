//! File-level helpers shared by the high-level [`crate::Codec`] and the
//! format readers.

use std::{
    fs::File,
    io::Read,
    path::{Path, PathBuf},
};

use crate::error::{Error, Result};

/// Reads a whole text file, decoding a BOM when one is present.
///
/// Hand-edited ISL sources frequently carry a UTF-8 (or UTF-16) BOM; the
/// decoder normalizes everything to UTF-8 text.
pub(crate) fn read_text<P: AsRef<Path>>(path: P) -> Result<String> {
    let file = File::open(path).map_err(Error::Io)?;
    let mut decoder = encoding_rs_io::DecodeReaderBytesBuilder::new()
        .bom_override(true)
        .build(file);

    let mut decoded = String::new();
    decoder.read_to_string(&mut decoded).map_err(Error::Io)?;
    Ok(decoded)
}

/// Lists the regular files in `dir` with the `.isl` extension, sorted by
/// name so callers process them in a deterministic order.
pub fn list_isl_files<P: AsRef<Path>>(dir: P) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let path = entry.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == "isl") {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}
