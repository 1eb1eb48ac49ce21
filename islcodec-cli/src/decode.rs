use std::path::{Path, PathBuf};

use islcodec::Codec;

/// Run the decode command: turn a binary lookup table back into ISL
/// source text.
pub fn run(input: &str, output: Option<&str>) {
    let input = Path::new(input);
    let output = output
        .map(PathBuf::from)
        .unwrap_or_else(|| input.with_extension("isl"));

    let mut codec = Codec::new();
    if let Err(e) = codec.decompile(input, &output) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("[OK] Conversion succeeded: {}", output.display());
}
