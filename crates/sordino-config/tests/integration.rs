//! Integration tests for sordino-config.

use sordino_config::{
    ConfigError, PipelineConfig, StageConfig, factory_pipelines, get_factory_pipeline,
    resolve_pipeline,
};
use sordino_core::AudioSignal;
use sordino_filters::{FilterSpec, ThresholdMode, threshold_filter};
use tempfile::TempDir;

fn two_tones() -> AudioSignal {
    let samples = (0..8000)
        .map(|i| {
            let t = f64::from(i) / 8000.0;
            (2.0 * std::f64::consts::PI * 440.0 * t).sin()
                + (2.0 * std::f64::consts::PI * 3000.0 * t).sin()
        })
        .collect();
    AudioSignal::new(8000, samples).unwrap()
}

#[test]
fn factory_pipelines_run_on_a_signal() {
    let signal = two_tones();
    for config in factory_pipelines() {
        let pipeline = config.to_pipeline().unwrap();
        let out = pipeline.run(&signal).unwrap();
        assert_eq!(out.len(), signal.len(), "pipeline '{}'", config.name);
    }
}

#[test]
fn lowpass_factory_matches_direct_filter() {
    let signal = two_tones();
    let via_config = get_factory_pipeline("lowpass")
        .unwrap()
        .to_pipeline()
        .unwrap()
        .run(&signal)
        .unwrap();
    let direct = threshold_filter(&signal, 1000.0, "low").unwrap();
    assert_eq!(via_config, direct);
}

#[test]
fn saved_file_resolves_by_path() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("custom.toml");

    let config = PipelineConfig::new("custom")
        .with_stage(FilterSpec::Threshold {
            threshold_hz: 200.0,
            mode: ThresholdMode::High,
        })
        .with_stage(StageConfig::NoiseGate {
            magnitude_threshold: 0.02,
        });
    config.save(&path).unwrap();

    let resolved = resolve_pipeline(path.to_str().unwrap()).unwrap();
    assert_eq!(resolved, config);
}

#[test]
fn factory_name_resolves_without_a_file() {
    assert_eq!(resolve_pipeline("adaptive").unwrap().name, "adaptive");
}

#[test]
fn rate_dependent_errors_surface_at_run_time() {
    // Valid without a rate, too wide for an 8 kHz signal
    let config = PipelineConfig::new("wide").with_stage(FilterSpec::bandpass(300.0, 6000.0));
    config.validate().unwrap();

    let pipeline = config.to_pipeline().unwrap();
    assert!(matches!(
        pipeline.run(&two_tones()),
        Err(sordino_core::Error::InvalidArgument(_))
    ));
}

#[test]
fn invalid_file_contents_fail_to_load() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.toml");
    std::fs::write(&path, "name = \"broken\"\n[[stages]]\ntype = \"bandpass\"\n").unwrap();
    // Missing band edges
    assert!(matches!(
        PipelineConfig::load(&path),
        Err(ConfigError::TomlParse(_))
    ));
}
