// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

#![allow(missing_docs)]
use serde::{Deserialize, Serialize};
use strata_config::{ConfigError, ConfigService, ConfigStore, FsConfigStore};

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
struct Sample {
    layer_z_step: f32,
    collapse_layers: bool,
}

#[test]
fn save_then_load_through_service() {
    let dir = tempfile::tempdir().unwrap();
    let service = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    let value = Sample {
        layer_z_step: 5.0,
        collapse_layers: true,
    };

    service.save("visualizer", &value).unwrap();
    assert!(dir.path().join("visualizer.json").exists());
    assert_eq!(service.load::<Sample>("visualizer").unwrap(), Some(value));
}

#[test]
fn missing_key_loads_as_none_or_default() {
    let dir = tempfile::tempdir().unwrap();
    let service = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    assert_eq!(service.load::<Sample>("absent").unwrap(), None);
    assert_eq!(
        service.load_or_default::<Sample>("absent").unwrap(),
        Sample::default()
    );
}

#[test]
fn partial_json_fills_defaults() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("partial.json"), br#"{"layer_z_step": 2.5}"#).unwrap();
    let service = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    let loaded: Sample = service.load_or_default("partial").unwrap();
    assert_eq!(loaded.layer_z_step, 2.5);
    assert!(!loaded.collapse_layers);
}

#[test]
fn keys_with_separators_are_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let store = FsConfigStore::at(dir.path()).unwrap();
    assert!(matches!(
        store.load_raw("../escape"),
        Err(ConfigError::InvalidKey(_))
    ));
    assert!(matches!(
        store.save_raw("", b"{}"),
        Err(ConfigError::InvalidKey(_))
    ));
}

#[test]
fn malformed_json_surfaces_serde_error() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("broken.json"), b"{ not json").unwrap();
    let service = ConfigService::new(FsConfigStore::at(dir.path()).unwrap());
    assert!(matches!(
        service.load::<Sample>("broken"),
        Err(ConfigError::Serde(_))
    ));
}
