//! Sweep bookkeeping, serialized next to the artifacts.

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::params::SynthesisParameters;
use crate::sweep::SweepError;

/// One generated artifact.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArtifactRecord {
    /// Sequential artifact number used in the file name
    pub index: usize,
    /// Position of the combination in the Cartesian enumeration
    pub position: usize,
    pub path: PathBuf,
    pub parameters: SynthesisParameters,
    /// Traces that wrote into the gather
    pub live_traces: usize,
}

/// A combination that passed screening but could not be persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailedArtifact {
    pub position: usize,
    pub path: PathBuf,
    pub error: String,
}

/// Counts and records for a whole sweep.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SweepReport {
    /// Size of the full parameter product
    pub total_combinations: usize,
    pub max_artifacts: usize,
    /// Combinations looked at before the sweep ended
    pub enumerated: usize,
    /// Rejected by the last-trace window check
    pub rejected_window: usize,
    /// Rejected by parameter validation
    pub rejected_invalid: usize,
    pub generated: usize,
    pub cap_reached: bool,
    pub artifacts: Vec<ArtifactRecord>,
    pub failures: Vec<FailedArtifact>,
}

impl SweepReport {
    pub fn new(total_combinations: usize, max_artifacts: usize) -> Self {
        Self {
            total_combinations,
            max_artifacts,
            ..Default::default()
        }
    }

    pub(crate) fn record_artifact(&mut self, record: ArtifactRecord) {
        self.generated += 1;
        self.artifacts.push(record);
    }

    pub fn write_json(&self, path: &Path) -> Result<(), SweepError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_report_json_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("out").join("sweep_report.json");

        let mut report = SweepReport::new(27, 5);
        report.enumerated = 3;
        report.rejected_window = 1;
        report.record_artifact(ArtifactRecord {
            index: 0,
            position: 2,
            path: PathBuf::from("out/sample_groundroll_0.npy"),
            parameters: SynthesisParameters::default(),
            live_traces: 39,
        });
        report.failures.push(FailedArtifact {
            position: 1,
            path: PathBuf::from("out/sample_groundroll_0.npy"),
            error: "disk full".to_string(),
        });

        report.write_json(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        let loaded: SweepReport = serde_json::from_str(&text).unwrap();

        assert_eq!(loaded, report);
        assert_eq!(loaded.generated, 1);
    }
}
