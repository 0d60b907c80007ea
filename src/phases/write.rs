//! Phase 7: Writing to Disk
//!
//! The final phase persists the composed package.
//!
//! ## Process
//!
//! 1.  **Serialize**: The package is rendered in memory first, as a `.docx`
//!     archive or Flat OPC XML depending on the output extension, so a
//!     serialization failure never touches the output path.
//!
//! 2.  **Create Directories**: Missing parent directories of the output are
//!     created recursively.
//!
//! 3.  **Write and Rename**: Content goes to a hidden sibling file which is
//!     then renamed over the output path. The hidden file is removed if
//!     either step fails.
//!
//! 4.  **Verify**: The output must exist and be non-empty.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};

use crate::document::{DocumentFormat, WordPackage};
use crate::error::{Error, Result};

fn write_error(path: &Path, message: impl Into<String>) -> Error {
    Error::OutputWrite {
        path: path.to_path_buf(),
        message: message.into(),
    }
}

/// Sibling path the content is staged in before the rename.
fn staging_path(output: &Path) -> PathBuf {
    let name = output
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "output".to_string());
    output.with_file_name(format!(".{name}.partial"))
}

/// Staged content that is deleted on drop unless committed.
struct Staged {
    path: PathBuf,
    committed: bool,
}

impl Staged {
    fn new(path: PathBuf) -> Self {
        Staged {
            path,
            committed: false,
        }
    }

    fn commit(mut self) {
        self.committed = true;
    }
}

impl Drop for Staged {
    fn drop(&mut self) {
        if !self.committed && self.path.exists() {
            if let Err(e) = fs::remove_file(&self.path) {
                debug!("Could not remove {}: {}", self.path.display(), e);
            }
        }
    }
}

/// Write `package` to `output` and return the persisted size in bytes.
pub fn execute(package: &WordPackage, output: &Path) -> Result<u64> {
    let bytes = package.to_bytes(DocumentFormat::for_path(output))?;
    write_bytes(&bytes, output)
}

/// Stage `content` next to `output`, move it into place and verify it.
pub fn write_bytes(content: &[u8], output: &Path) -> Result<u64> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent).map_err(|e| {
            write_error(
                output,
                format!("cannot create directory '{}': {}", parent.display(), e),
            )
        })?;
    }

    let staging = Staged::new(staging_path(output));
    fs::write(&staging.path, content).map_err(|e| write_error(output, e.to_string()))?;
    fs::rename(&staging.path, output).map_err(|e| write_error(output, e.to_string()))?;
    staging.commit();

    verify(output)
}

/// Size of a persisted output; fails if it is missing or empty.
pub fn verify(output: &Path) -> Result<u64> {
    let size = fs::metadata(output)
        .map_err(|e| write_error(output, format!("output missing after write: {e}")))?
        .len();
    if size == 0 {
        return Err(write_error(output, "output is empty"));
    }
    debug!("Wrote {} ({} bytes)", output.display(), size);
    Ok(size)
}
