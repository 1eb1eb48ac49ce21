#![forbid(unsafe_code)]
//! Toolkit for ISL translation sources.
//!
//! Parses the line-oriented ISL source format into a [`Translations`] map,
//! compiles that map into a compact binary lookup table, and decodes the
//! binary form back into source text. All processing goes through the one
//! shared `Translations` model.
//!
//! # Quick Start
//!
//! ```rust
//! use islcodec::{decode, encode, parse, render};
//!
//! let translations = parse("en.Title =Hello\nde.Title =Hallo\n")?;
//! let bytes = encode(&translations)?;
//! assert_eq!(decode(&bytes)?, translations);
//!
//! let source = render(&translations);
//! assert_eq!(parse(&source)?, translations);
//! # Ok::<(), islcodec::Error>(())
//! ```
//!
//! Or work with files through the high-level [`Codec`]:
//!
//! ```rust,no_run
//! use islcodec::Codec;
//!
//! let mut codec = Codec::new();
//! codec.compile(&["en.isl", "de.isl"], "translations.bin")?;
//! # Ok::<(), islcodec::Error>(())
//! ```
//!
//! # Features
//!
//! - Single-pass state machine parser with error positions for diagnostics
//! - Compact length-prefixed binary layout with strict truncation checks
//! - Multi-file merge into one set, and a tolerant per-file verify mode
//! - BOM-aware reading of hand-edited source files

pub mod codec;
pub mod error;
pub mod files;
pub mod formats;
pub mod traits;
pub mod types;

// Re-export most used items for easy consumption
pub use crate::{
    codec::{Codec, FileReport, VerifyStatus, verify_files, verify_report},
    error::{Error, Result},
    files::list_isl_files,
    formats::{
        bin::{decode, encode},
        isl::{parse, render},
    },
    types::{LocaleMap, Translations},
};
