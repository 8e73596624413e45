//! Re-reads written fixtures and checks them against the source text.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::core::{FixtureError, FixtureResult};
use crate::encoding::{detect_bom, fixture_file_name, EncodingDescriptor, DESCRIPTORS};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VerifiedFixture {
    pub label: &'static str,
    pub path: PathBuf,
    pub len: usize,
}

#[derive(Debug, Clone, Default)]
pub struct VerificationReport {
    pub fixtures: Vec<VerifiedFixture>,
}

/// Checks every fixture in `dir`: BOM prefix, total length, BOM detection and
/// lossless decode back to `source_text`.
pub fn verify_fixtures(dir: &Path, source_text: &str) -> FixtureResult<VerificationReport> {
    let mut report = VerificationReport::default();
    for descriptor in &DESCRIPTORS {
        report.fixtures.push(verify_fixture(dir, descriptor, source_text)?);
    }
    Ok(report)
}

pub fn verify_fixture(
    dir: &Path,
    descriptor: &EncodingDescriptor,
    source_text: &str,
) -> FixtureResult<VerifiedFixture> {
    let path = dir.join(fixture_file_name(descriptor.label));
    let bytes = fs::read(&path).map_err(|e| FixtureError::from_read(&path, e))?;
    let mismatch = |reason: String| FixtureError::Mismatch {
        path: path.clone(),
        reason,
    };

    let body = bytes
        .strip_prefix(descriptor.bom)
        .ok_or_else(|| mismatch(format!("missing {} BOM", descriptor.label)))?;

    let expected_len = descriptor.bom.len() + descriptor.codec.encoded_len(source_text);
    if bytes.len() != expected_len {
        return Err(mismatch(format!(
            "expected {} bytes, found {}",
            expected_len,
            bytes.len()
        )));
    }

    match detect_bom(&bytes) {
        Some(detected) if detected.codec == descriptor.codec => {}
        Some(detected) => {
            return Err(mismatch(format!("BOM detected as {}", detected.label)));
        }
        None => return Err(mismatch("no BOM detected".to_string())),
    }

    let decoded = descriptor.codec.decode(body)?;
    if decoded != source_text {
        return Err(mismatch("decoded text differs from source".to_string()));
    }

    debug!("Verified {}", path.display());
    Ok(VerifiedFixture {
        label: descriptor.label,
        path,
        len: bytes.len(),
    })
}
