//! Reporting utilities: annotations and formatted terminal output.

pub mod format;

pub use format::*;
