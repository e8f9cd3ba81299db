//! Command Line Interface module
//!
//! - `search`: one lookup, result printed to stdout
//! - `ui`: the interactive single-screen client
//! - `config`: inspect the effective configuration

pub mod config;
pub mod search;
pub mod ui;
