use crate::error::Result;

/// Abstract interface for raw key-value I/O.
///
/// This trait handles the "how" of durability (filesystem vs memory), while
/// [`Persistence`](super::persistence::Persistence) handles the "what"
/// (which keys exist and how their values are encoded).
pub trait KvBackend {
    /// Read the raw value stored under `key`.
    /// Returns Ok(None) if nothing has been written yet.
    /// Returns Err only on actual I/O errors (permissions, disk failure).
    fn read(&self, key: &str) -> Result<Option<String>>;

    /// Replace the value stored under `key`.
    /// MUST be atomic (e.g. write to tmp then rename) to avoid partial writes.
    fn write(&self, key: &str, value: &str) -> Result<()>;

    /// Remove the value stored under `key`. Removing a missing key is not an error.
    fn remove(&self, key: &str) -> Result<()>;
}
