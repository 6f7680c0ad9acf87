//! Output formatters

pub mod console;
