//! Progress reporters for long-running commands

pub mod reporter;
