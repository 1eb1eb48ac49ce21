//! The two on-disk representations of a translation set.
//!
//! [`isl`] is the human-editable source format; [`bin`] is the compiled
//! binary lookup format. Both convert to and from [`crate::Translations`].

pub mod bin;
pub mod isl;

// Reexporting the formats for easier access
pub use bin::Format as BinFormat;
pub use isl::Format as IslFormat;
