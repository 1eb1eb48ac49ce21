use std::path::{Path, PathBuf};

use islcodec::{Codec, list_isl_files};

/// Run the compile command: merge one file or a directory of `.isl`
/// sources into a single binary lookup table.
pub fn run(input: &str, output: Option<&str>) {
    let input = Path::new(input);
    let (sources, default_output) = match resolve_inputs(input) {
        Ok(resolved) => resolved,
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    };
    if sources.is_empty() {
        eprintln!("Error: no .isl files found in {}", input.display());
        std::process::exit(1);
    }

    let output = output.map(PathBuf::from).unwrap_or(default_output);
    let mut codec = Codec::new();
    if let Err(e) = codec.compile(&sources, &output) {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }

    println!("[OK] Conversion succeeded: {}", output.display());
}

fn resolve_inputs(input: &Path) -> islcodec::Result<(Vec<PathBuf>, PathBuf)> {
    if input.is_dir() {
        Ok((list_isl_files(input)?, input.join("translations.bin")))
    } else {
        Ok((vec![input.to_path_buf()], input.with_extension("bin")))
    }
}
