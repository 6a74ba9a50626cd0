//! Atomic file replacement shared by the ledger and the registry.

use std::fs;
use std::io;
use std::path::Path;

/// Writes `bytes` to `path` by way of a sibling temp file and a rename.
///
/// The rename is the commit point: readers see either the old complete
/// file or the new complete file, never a partial write.
pub(crate) fn write_atomic(path: &Path, bytes: &[u8]) -> io::Result<()> {
    let tmp = match path.file_name() {
        Some(name) => {
            let mut tmp_name = name.to_os_string();
            tmp_name.push(".tmp");
            path.with_file_name(tmp_name)
        }
        None => {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "storage path has no file name",
            ))
        }
    };

    fs::write(&tmp, bytes)?;
    fs::rename(&tmp, path)
}
