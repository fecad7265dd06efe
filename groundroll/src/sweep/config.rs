use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::sweep::grid::ParameterRanges;
use crate::sweep::SweepError;

/// Default cap on generated artifacts.
pub const DEFAULT_MAX_ARTIFACTS: usize = 50_000;

/// Everything a sweep needs besides the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SweepConfig {
    pub ranges: ParameterRanges,
    /// Stop once this many artifacts have been generated
    pub max_artifacts: usize,
    pub output_dir: PathBuf,
    /// Artifact `n` is written to `<output_dir>/<file_prefix>_<n>.npy`
    pub file_prefix: String,
}

impl Default for SweepConfig {
    fn default() -> Self {
        Self {
            ranges: ParameterRanges::default(),
            max_artifacts: DEFAULT_MAX_ARTIFACTS,
            output_dir: PathBuf::from("./syn_data"),
            file_prefix: "sample_groundroll".to_string(),
        }
    }
}

impl SweepConfig {
    /// Read a JSON config; missing keys take their defaults.
    pub fn from_json_file(path: &Path) -> Result<Self, SweepError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&text)?)
    }

    pub fn validate(&self) -> Result<(), SweepError> {
        self.ranges.validate()?;
        if self.file_prefix.is_empty() {
            return Err(SweepError::EmptyPrefix);
        }
        Ok(())
    }

    pub fn artifact_path(&self, index: usize) -> PathBuf {
        self.output_dir
            .join(format!("{}_{}.npy", self.file_prefix, index))
    }

    /// Where the sweep summary is written alongside the artifacts.
    pub fn report_path(&self) -> PathBuf {
        self.output_dir.join("sweep_report.json")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_artifact_naming() {
        let config = SweepConfig::default();
        assert_eq!(
            config.artifact_path(0),
            PathBuf::from("./syn_data/sample_groundroll_0.npy")
        );
        assert_eq!(
            config.artifact_path(49_999),
            PathBuf::from("./syn_data/sample_groundroll_49999.npy")
        );
        assert_eq!(
            config.report_path(),
            PathBuf::from("./syn_data/sweep_report.json")
        );
    }

    #[test]
    fn test_json_file_with_partial_keys() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sweep.json");
        fs::write(
            &path,
            r#"{"max_artifacts": 7, "ranges": {"win_scale": [4.0]}}"#,
        )
        .unwrap();

        let config = SweepConfig::from_json_file(&path).unwrap();

        assert_eq!(config.max_artifacts, 7);
        assert_eq!(config.ranges.win_scale, vec![4.0]);
        assert_eq!(config.ranges.num_traces, vec![50, 100, 150]);
        assert_eq!(config.file_prefix, "sample_groundroll");
    }

    #[test]
    fn test_malformed_json_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("sweep.json");
        fs::write(&path, "{ not json").unwrap();

        assert!(matches!(
            SweepConfig::from_json_file(&path),
            Err(SweepError::Json(_))
        ));
    }

    #[test]
    fn test_empty_prefix_rejected() {
        let config = SweepConfig {
            file_prefix: String::new(),
            ..Default::default()
        };
        assert!(matches!(config.validate(), Err(SweepError::EmptyPrefix)));
    }
}
