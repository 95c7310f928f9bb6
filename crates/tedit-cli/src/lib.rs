//! Command-line front end for the TEdit world editor.

pub mod logging;
pub mod summary;
pub mod workflow;
