//! Printdesk application library.
//!
//! Wires the layout engine and the page sinks into an operator-facing
//! CLI: argument parsing, environment-backed defaults, and the job
//! sequencer that turns a list of images into printed pages.

pub mod cli;
pub mod commands;
pub mod config;
pub mod job;
pub mod sequencer;
