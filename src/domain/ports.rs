use crate::utils::error::Result;
use std::path::Path;

/// Blocking byte storage addressed by path. Implementations open and release
/// any handle within the call.
pub trait Storage {
    /// Read the whole file. A missing file is reported as `FileNotFound`.
    fn read_file(&self, path: &Path) -> Result<Vec<u8>>;
    fn write_file(&self, path: &Path, data: &[u8]) -> Result<()>;
}
