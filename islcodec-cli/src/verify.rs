use std::path::{Path, PathBuf};

use islcodec::{FileReport, list_isl_files, verify_files};

/// Run the verify command: parse each source independently and report
/// every file, failures included. Exits 1 when any file fails.
pub fn run(input: &str, json: bool) {
    let input = Path::new(input);
    let files: Vec<PathBuf> = if input.is_dir() {
        match list_isl_files(input) {
            Ok(files) => files,
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        vec![input.to_path_buf()]
    };

    let reports = verify_files(&files);
    if json {
        match serde_json::to_string_pretty(&reports) {
            Ok(rendered) => println!("{rendered}"),
            Err(e) => {
                eprintln!("Error: {e}");
                std::process::exit(1);
            }
        }
    } else {
        for report in &reports {
            print!("{report}");
        }
    }

    if !reports.iter().all(FileReport::is_ok) {
        std::process::exit(1);
    }
}
