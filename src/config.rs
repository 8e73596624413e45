//! Generator configuration: defaults, optional TOML file, CLI overrides.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::{FixtureError, FixtureResult};

/// Canonical source file name, looked up in the working directory
pub const DEFAULT_SOURCE: &str = "text_UTF-8.txt";

/// What to do when one fixture fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum FailurePolicy {
    /// Stop at the first failing fixture
    #[default]
    Abort,
    /// Try every fixture, then report all failures together
    Continue,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// UTF-8 source file
    pub source: PathBuf,
    /// Where fixtures are written; next to the source when unset
    pub output_dir: Option<PathBuf>,
    pub failure_policy: FailurePolicy,
    /// Re-read and check every fixture after writing
    pub verify: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            source: PathBuf::from(DEFAULT_SOURCE),
            output_dir: None,
            failure_policy: FailurePolicy::Abort,
            verify: false,
        }
    }
}

impl GeneratorConfig {
    pub fn for_source(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            ..Self::default()
        }
    }

    pub fn with_output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(dir.into());
        self
    }

    pub fn with_failure_policy(mut self, policy: FailurePolicy) -> Self {
        self.failure_policy = policy;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    /// Loads a config from a TOML file. Missing keys take their defaults.
    pub fn from_toml_file(path: &Path) -> FixtureResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| FixtureError::from_read(path, e))?;
        Self::from_toml_str(&content).map_err(|message| FixtureError::Config {
            path: path.to_path_buf(),
            message,
        })
    }

    pub fn from_toml_str(content: &str) -> Result<Self, String> {
        toml::from_str(content).map_err(|e| e.to_string())
    }

    /// Directory the fixtures land in.
    ///
    /// Falls back to the source's parent, or the working directory for a bare
    /// file name.
    pub fn resolved_output_dir(&self) -> PathBuf {
        match &self.output_dir {
            Some(dir) => dir.clone(),
            None => match self.source.parent() {
                Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
                _ => PathBuf::from("."),
            },
        }
    }
}
