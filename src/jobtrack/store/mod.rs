//! # Storage Layer
//!
//! Storage is split in three layers, leaves first:
//!
//! 1. [`backend::KvBackend`]: a durable key-value store. Raw strings in, raw
//!    strings out.
//!    - [`fs_backend::FsBackend`]: production, one file per key, atomic writes.
//!    - [`mem_backend::MemBackend`]: in-memory, for tests.
//! 2. [`persistence::Persistence`]: knows the two keys and their encodings.
//!    Loading is tolerant: missing or corrupt data never reaches the caller as
//!    an error, it becomes an empty collection (or the light theme).
//! 3. [`record_store::RecordStore`]: the authoritative in-memory collection.
//!    Enforces the record invariants on every write and writes through after
//!    every mutation.
//!
//! ## Storage Layout
//!
//! ```text
//! <data dir>/
//! ├── jobApplications   # JSON array of records, newest first
//! ├── theme             # "light" or "dark"
//! └── config.json       # Configuration (see config.rs)
//! ```
//!
//! ## Write-through
//!
//! Persistence is best-effort durability. The in-memory collection is the
//! source of truth for the running process; a failed write is logged and
//! surfaced through [`record_store::RecordStore::take_write_error`], and the
//! next successful write persists the full collection again.

pub mod backend;
pub mod fs_backend;
pub mod mem_backend;
pub mod persistence;
pub mod record_store;

pub use backend::KvBackend;
pub use record_store::RecordStore;
