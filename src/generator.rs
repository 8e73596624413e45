/*!
# Fixture Generator

Reads the canonical UTF-8 source once and writes one BOM-prefixed fixture per
entry of [`DESCRIPTORS`]. Each fixture is exactly `bom || encode(text)`.
*/

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use crate::config::{FailurePolicy, GeneratorConfig};
use crate::core::{read_utf8_file, write_prefixed_file, FixtureError, FixtureResult};
use crate::encoding::{fixture_file_name, EncodingDescriptor, DESCRIPTORS};

/// One fixture written to disk
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrittenFixture {
    pub label: &'static str,
    pub path: PathBuf,
    pub bytes_written: usize,
}

/// Outcome of a successful run
#[derive(Debug, Clone, Default)]
pub struct GenerationReport {
    pub source: PathBuf,
    pub source_chars: usize,
    pub fixtures: Vec<WrittenFixture>,
}

impl GenerationReport {
    pub fn total_bytes(&self) -> usize {
        self.fixtures.iter().map(|f| f.bytes_written).sum()
    }
}

/// Generates fixtures next to `source_path`.
///
/// Aborts at the first failure.
pub fn generate<P: AsRef<Path>>(source_path: P) -> FixtureResult<GenerationReport> {
    FixtureGenerator::new(GeneratorConfig::for_source(source_path.as_ref())).run()
}

pub struct FixtureGenerator {
    config: GeneratorConfig,
}

impl FixtureGenerator {
    pub fn new(config: GeneratorConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &GeneratorConfig {
        &self.config
    }

    /// Reads the source and writes every fixture
    pub fn run(&self) -> FixtureResult<GenerationReport> {
        let text = read_utf8_file(&self.config.source)?;
        debug!(
            "Read {} ({} bytes, {} chars)",
            self.config.source.display(),
            text.len(),
            text.chars().count()
        );
        self.write_all(&text)
    }

    /// Writes every fixture for an already decoded source text
    pub fn write_all(&self, text: &str) -> FixtureResult<GenerationReport> {
        let output_dir = self.config.resolved_output_dir();
        let mut report = GenerationReport {
            source: self.config.source.clone(),
            source_chars: text.chars().count(),
            fixtures: Vec::with_capacity(DESCRIPTORS.len()),
        };
        let mut failures = Vec::new();

        for descriptor in &DESCRIPTORS {
            match write_fixture(&output_dir, descriptor, text) {
                Ok(fixture) => report.fixtures.push(fixture),
                Err(e) => match self.config.failure_policy {
                    FailurePolicy::Abort => return Err(e),
                    FailurePolicy::Continue => {
                        warn!("{} fixture failed: {}", descriptor.label, e);
                        failures.push(e);
                    }
                },
            }
        }

        if !failures.is_empty() {
            return Err(FixtureError::Aggregate(failures));
        }

        info!(
            "Wrote {} fixtures ({} bytes) to {}",
            report.fixtures.len(),
            report.total_bytes(),
            output_dir.display()
        );
        Ok(report)
    }
}

fn write_fixture(
    output_dir: &Path,
    descriptor: &EncodingDescriptor,
    text: &str,
) -> FixtureResult<WrittenFixture> {
    let encoded = descriptor.codec.encode(text);
    let path = output_dir.join(fixture_file_name(descriptor.label));
    let bytes_written = write_prefixed_file(&path, descriptor.bom, &encoded)?;

    debug!(
        "{}: {} bytes ({} BOM + {} x {}-byte units, {:?} endian)",
        path.display(),
        bytes_written,
        descriptor.bom.len(),
        encoded.len() / descriptor.codec.unit_size(),
        descriptor.codec.unit_size(),
        descriptor.codec.byte_order(),
    );

    Ok(WrittenFixture {
        label: descriptor.label,
        path,
        bytes_written,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_generate_writes_next_to_source() {
        let dir = tempdir().unwrap();
        let source = dir.path().join("text_UTF-8.txt");
        fs::write(&source, "A").unwrap();

        let report = generate(&source).unwrap();

        assert_eq!(report.fixtures.len(), 5);
        assert_eq!(report.source_chars, 1);
        for fixture in &report.fixtures {
            assert_eq!(fixture.path.parent(), Some(dir.path()));
            assert!(fixture.path.is_file());
        }
        // 4 + 4 + 4 + 8 + 8
        assert_eq!(report.total_bytes(), 28);
    }

    #[test]
    fn test_abort_stops_at_first_failure() {
        let dir = tempdir().unwrap();
        let generator = FixtureGenerator::new(
            GeneratorConfig::default().with_output_dir(dir.path().join("missing")),
        );

        let err = generator.write_all("A").unwrap_err();
        assert!(matches!(err, FixtureError::WriteFailure { .. }));
        assert!(err.to_string().contains("text_UTF-8-BOM.txt"));
    }

    #[test]
    fn test_continue_aggregates_failures() {
        let dir = tempdir().unwrap();
        let generator = FixtureGenerator::new(
            GeneratorConfig::default()
                .with_output_dir(dir.path().join("missing"))
                .with_failure_policy(FailurePolicy::Continue),
        );

        match generator.write_all("A") {
            Err(FixtureError::Aggregate(errors)) => assert_eq!(errors.len(), 5),
            other => panic!("expected Aggregate, got {:?}", other),
        }
    }

    #[test]
    fn test_continue_keeps_successful_fixtures() {
        let dir = tempdir().unwrap();
        // A directory squatting on one fixture name makes only that write fail
        fs::create_dir(dir.path().join("text_UTF-16LE-BOM.txt")).unwrap();
        let generator = FixtureGenerator::new(
            GeneratorConfig::default()
                .with_output_dir(dir.path())
                .with_failure_policy(FailurePolicy::Continue),
        );

        let err = generator.write_all("A").unwrap_err();
        assert_eq!(err.failure_count(), 1);
        assert!(dir.path().join("text_UTF-32LE-BOM.txt").is_file());
        assert!(dir.path().join("text_UTF-8-BOM.txt").is_file());
    }
}
