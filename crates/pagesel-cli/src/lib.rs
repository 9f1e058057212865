//! Library components of the `pagesel` CLI.

pub mod logging;
pub mod render;
pub mod runner;
pub mod script;
pub mod types;
