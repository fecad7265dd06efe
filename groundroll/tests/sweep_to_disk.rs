//! End-to-end sweeps writing real `.npy` artifacts into a temporary directory

use groundroll::sweep::SweepReport;
use groundroll::{
    synthesize_gather, MatrixStore, NpyStore, ParameterRanges, SweepConfig, SweepDriver,
};
use std::fs;
use tempfile::TempDir;

fn reference_config(dir: &std::path::Path, max_artifacts: usize) -> SweepConfig {
    SweepConfig {
        ranges: ParameterRanges::default(),
        max_artifacts,
        output_dir: dir.join("syn_data"),
        file_prefix: "sample_groundroll".to_string(),
    }
}

#[test]
fn test_reference_sweep_prefix_matches_direct_synthesis() {
    let temp_dir = TempDir::new().unwrap();
    let config = reference_config(temp_dir.path(), 5);

    let report = SweepDriver::new(&config, &NpyStore).run().unwrap();

    // Every window is valid for the first nine combinations, so the cap is
    // filled by positions 0..5 in order
    assert_eq!(report.total_combinations, 177_147);
    assert_eq!(report.generated, 5);
    assert_eq!(report.enumerated, 5);
    assert!(report.cap_reached);

    for (index, record) in report.artifacts.iter().enumerate() {
        assert_eq!(record.index, index);
        assert_eq!(record.position, index);
        assert_eq!(
            record.path,
            temp_dir
                .path()
                .join("syn_data")
                .join(format!("sample_groundroll_{index}.npy"))
        );

        let params = config.ranges.combination(record.position);
        assert_eq!(record.parameters, params);

        let expected = synthesize_gather(&params).unwrap();
        let loaded = NpyStore.load(&record.path).unwrap();
        assert_eq!(loaded.dim(), (500, 50));
        assert_eq!(loaded, expected.data);
    }
    assert!(!config.artifact_path(5).exists());
}

#[test]
fn test_fully_rejected_sweep_writes_nothing() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = reference_config(temp_dir.path(), 100);
    // n_edge = 785 at dt = 0.001, but the longest chirp is only 1180 samples
    config.ranges = ParameterRanges {
        num_traces: vec![10],
        num_time_samples: vec![500, 1000],
        dt: vec![0.001],
        win_scale: vec![2.0],
        duration_ratio: vec![0.02],
        ..ParameterRanges::default()
    };

    let report = SweepDriver::new(&config, &NpyStore).run().unwrap();

    assert_eq!(report.generated, 0);
    assert_eq!(report.rejected_window, report.total_combinations);
    assert!(!report.cap_reached);
    assert!(!config.output_dir.exists());
}

#[test]
fn test_parallel_sweep_writes_contiguous_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let mut config = reference_config(temp_dir.path(), 6);
    config.ranges.num_time_samples = vec![500];
    config.ranges.num_traces = vec![50];

    let report = SweepDriver::new(&config, &NpyStore)
        .run_parallel(Some(3))
        .unwrap();

    assert_eq!(report.generated, 6);
    assert!(report.cap_reached);

    for index in 0..6 {
        let path = config.artifact_path(index);
        assert!(path.exists(), "missing {}", path.display());
        assert_eq!(NpyStore.load(&path).unwrap().dim(), (500, 50));
    }
    assert!(!config.artifact_path(6).exists());

    // Each artifact holds exactly the gather of the combination it records
    for record in &report.artifacts {
        let expected = synthesize_gather(&record.parameters).unwrap();
        assert_eq!(NpyStore.load(&record.path).unwrap(), expected.data);
    }
}

#[test]
fn test_report_written_next_to_artifacts() {
    let temp_dir = TempDir::new().unwrap();
    let config = reference_config(temp_dir.path(), 2);

    let report = SweepDriver::new(&config, &NpyStore).run().unwrap();
    report.write_json(&config.report_path()).unwrap();

    let text = fs::read_to_string(config.report_path()).unwrap();
    let loaded: SweepReport = serde_json::from_str(&text).unwrap();
    assert_eq!(loaded, report);
    assert_eq!(loaded.artifacts.len(), 2);
}
