//! # CLI Layer
//!
//! One UI client for the jobtrack library. This is the only place that
//! parses arguments, touches stdout/stderr, prompts, or starts an async
//! runtime.
//!
//! - `setup.rs`: clap definitions
//! - `commands.rs`: context wiring, dispatch to `JobtrackApi`, output
//! - `print.rs`: tables, detail view, messages
//! - `markdown.rs`: terminal rendering of generated markdown
//! - `styles.rs`: light and dark palettes, picked from the persisted theme

mod commands;
mod markdown;
mod print;
mod setup;
mod styles;

pub use commands::run;
