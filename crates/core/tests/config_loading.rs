//! Loading calibrations from configuration documents

use greenhouse_climate_core::{
    ClimateEngine, EngineConfig, EngineError, EnthalpyFormula, MagnusCoefficients,
};
use std::path::PathBuf;

#[ctor::ctor]
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

fn write_temp(name: &str, contents: &str) -> PathBuf {
    let path = std::env::temp_dir().join(format!("{}-{}", std::process::id(), name));
    std::fs::write(&path, contents).unwrap();
    path
}

#[test]
fn test_load_full_calibration_from_file() {
    let path = write_temp(
        "cucumber.json",
        r#"{
            "atmospheric_pressure": 98.5,
            "latent_heat": 2450.0,
            "magnus": { "c1": 0.611, "c2": 17.27, "c3": 237.3 },
            "drainage_fraction": 0.35,
            "min_hourly_transpiration": 0.05,
            "enthalpy_formula": "simplified",
            "radiation_to_daily": 40.0
        }"#,
    );
    let cfg = EngineConfig::from_path(&path).unwrap();
    std::fs::remove_file(&path).unwrap();

    assert_eq!(*cfg.atmospheric_pressure, 98.5);
    assert_eq!(cfg.latent_heat, 2450.0);
    assert_eq!(cfg.magnus, MagnusCoefficients::ROUNDED);
    assert_eq!(cfg.drainage_fraction, 0.35);
    assert_eq!(cfg.min_hourly_transpiration, 0.05);
    assert_eq!(cfg.enthalpy_formula, EnthalpyFormula::Simplified);
    assert_eq!(cfg.radiation_to_daily, 40.0);
    assert!(ClimateEngine::new(cfg).is_ok());
}

#[test]
fn test_partial_document_keeps_reference_values() {
    let cfg = EngineConfig::from_json_str(r#"{ "enthalpy_formula": "thermodynamic" }"#).unwrap();
    assert_eq!(cfg, EngineConfig::default());
}

#[test]
fn test_out_of_range_document_rejected() {
    let err = EngineConfig::from_json_str(
        r#"{ "enthalpy_formula": "simplified", "drainage_fraction": 1.0 }"#,
    )
    .unwrap_err();
    assert!(matches!(
        err,
        EngineError::Configuration { ref parameter, .. } if parameter == "drainage_fraction"
    ));

    let err = EngineConfig::from_json_str("not json").unwrap_err();
    assert!(err.is_configuration());
}

#[test]
fn test_calibrations_coexist() {
    let tomato = ClimateEngine::new(EngineConfig::default()).unwrap();
    let seedlings = ClimateEngine::new(
        EngineConfig::default()
            .with_drainage_fraction(0.1)
            .with_enthalpy_formula(EnthalpyFormula::Simplified),
    )
    .unwrap();

    assert_eq!(tomato.config().drainage_fraction, 0.3);
    assert_eq!(seedlings.config().drainage_fraction, 0.1);
    assert_ne!(tomato.config().enthalpy_formula, seedlings.config().enthalpy_formula);
}
