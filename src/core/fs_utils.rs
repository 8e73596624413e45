//! File system helpers: reading the UTF-8 source and writing fixtures.
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::Path;

use super::errors::{FixtureError, FixtureResult};

/// Read a file as strict UTF-8 text.
///
/// A leading U+FEFF is kept as part of the text; the canonical source is
/// expected to carry no BOM.
pub fn read_utf8_file(path: &Path) -> FixtureResult<String> {
    let bytes = fs::read(path).map_err(|e| FixtureError::from_read(path, e))?;
    decode_utf8(path, bytes)
}

/// Decode raw source bytes, rejecting any malformed sequence
pub fn decode_utf8(path: &Path, bytes: Vec<u8>) -> FixtureResult<String> {
    String::from_utf8(bytes).map_err(|e| FixtureError::InvalidUtf8 {
        path: path.to_path_buf(),
        valid_up_to: e.utf8_error().valid_up_to(),
    })
}

/// Create (or truncate) `path` and write `prefix` followed by `body`.
///
/// Returns the number of bytes written. The file handle is closed on every
/// exit path when the writer drops.
pub fn write_prefixed_file(path: &Path, prefix: &[u8], body: &[u8]) -> FixtureResult<usize> {
    let file = File::create(path).map_err(|e| FixtureError::write(path, e))?;
    let mut writer = BufWriter::new(file);

    writer
        .write_all(prefix)
        .and_then(|_| writer.write_all(body))
        .and_then(|_| writer.flush())
        .map_err(|e| FixtureError::write(path, e))?;

    Ok(prefix.len() + body.len())
}
