//! # jobtrack Architecture
//!
//! jobtrack is a **UI-agnostic job-application tracking library** with a thin
//! CLI client on top. The library owns the records, their invariants, the
//! derived list view, persistence, and the boundary to the text generator
//! used for summaries and interview prep.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (cli/, wired by main.rs)                         │
//! │  - Parses arguments, formats output, handles terminal I/O   │
//! │  - Owns the tokio runtime used for generation requests      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Resolves id prefixes to UUIDs                            │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - Business logic, returns CmdResult                        │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                 ┌────────────┴────────────┐
//!                 ▼                         ▼
//! ┌───────────────────────────┐ ┌───────────────────────────────┐
//! │  Storage (store/)         │ │  Prep (prep/)                 │
//! │  - RecordStore in memory  │ │  - prompts, TextGenerator     │
//! │  - KvBackend write-through│ │  - in-flight tracking         │
//! └───────────────────────────┘ └───────────────────────────────┘
//! ```
//!
//! ## Records
//!
//! An [`model::ApplicationRecord`] always has a non-blank company and role,
//! and carries an interview date only while its status is Interviewing. The
//! store enforces both on every insert and update and when loading from disk.
//!
//! ## Derived view
//!
//! What a user sees is never stored: [`query::derive_view`] filters by status,
//! searches company and role case-insensitively, and sorts stably (missing
//! interview dates always last).
//!
//! ## Generation
//!
//! Generation is optional. Without an API key every request resolves to a
//! "disabled" outcome and record CRUD is unaffected. See [`prep`].
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade, entry point for all operations
//! - [`commands`]: Business logic for each command
//! - [`store`]: Record store, persistence and backends
//! - [`query`]: Filter and sort pipeline
//! - [`model`]: `ApplicationRecord`, `Status`, `ThemePreference`
//! - [`prep`]: Prompts, text generator seam, request tracking
//! - [`config`]: Configuration management
//! - [`init`]: Data directory resolution and wiring
//! - [`error`]: Error types

pub mod api;
pub mod commands;
pub mod config;
pub mod error;
pub mod init;
pub mod model;
pub mod prep;
pub mod query;
pub mod store;
