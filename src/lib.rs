//! `neows-analysis` library crate.
//!
//! The binary (`neows`) is a thin wrapper around this library so that:
//!
//! - core logic is testable without spawning processes
//! - modules are reusable (e.g., a future batch runner or notebook bindings)
//! - code stays easy to navigate as the project grows

pub mod app;
pub mod cli;
pub mod config;
pub mod data;
pub mod error;
pub mod logging;
pub mod notify;
pub mod plot;
pub mod stats;
