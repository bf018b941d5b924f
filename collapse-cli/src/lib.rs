//! Support library for the `collapse` binary.
//!
//! Exposes argument parsing, command execution and logging set-up so tests
//! can drive the commands without spawning a subprocess.

pub mod cli;
pub mod logging;
