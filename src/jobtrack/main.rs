//! # jobtrack CLI
//!
//! The binary is intentionally thin: the CLI lives in `cli/`, and this file
//! only invokes `cli::run()` and handles process termination.
//!
//! ```text
//! cli/        clap parsing, dispatch, terminal rendering
//!   │
//!   ▼
//! api.rs      id resolution, dispatch, structured CmdResult
//!   │
//!   ▼
//! commands/   business logic over the record store
//!   │
//!   ▼
//! store/      in-memory records + write-through key-value persistence
//! ```

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
