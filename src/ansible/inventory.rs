//! Throwaway inventory file handed to `ansible -i`.

use std::io::Write;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::errors::Result;

/// The single inventory line: run everything against the local machine.
pub const INVENTORY_LINE: &str = "localhost ansible_connection=local\n";

/// A temporary inventory file that lives exactly as long as this value.
///
/// The file is created with owner-only permissions and removed when the
/// guard is dropped, whichever way the caller leaves its scope. A file
/// that has already disappeared by then is not an error.
pub struct TempInventory {
    file: NamedTempFile,
}

impl TempInventory {
    /// Create and populate the inventory file in the system temp dir.
    pub fn create() -> Result<Self> {
        let mut file = tempfile::Builder::new()
            .prefix("vault-extract-inventory-")
            .suffix(".ini")
            .tempfile()?;

        file.write_all(INVENTORY_LINE.as_bytes())?;
        file.flush()?;

        tracing::debug!(path = %file.path().display(), "created temporary inventory");
        Ok(Self { file })
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }
}
