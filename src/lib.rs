//! Library entry point for the python-switchers CLI.
//!
//! Finds installed Python interpreters, names each by distribution, and
//! writes shell functions that switch `PATH` between them.

pub mod classify;
pub mod commands;
pub mod config;
pub mod emit;
pub mod error;
pub mod index;
pub mod model;
pub mod probe;
pub mod scanner;
pub mod utils;
