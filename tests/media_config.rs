//! Integration tests for configuration loading.

#![allow(unsafe_code)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::fs;

use nowplay::config::Config;
use tempfile::TempDir;

fn write_config(temp_dir: &TempDir, content: &str) -> std::path::PathBuf {
    let path = temp_dir.path().join("config.toml");
    fs::write(&path, content).unwrap();
    path
}

#[test]
fn loads_config_with_all_fields() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[media]
poll_interval_ms = 250
ignored_clients = ["kdeconnect"]
video_clients = ["mpv"]
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.media.poll_interval_ms, 250);
    assert_eq!(config.media.ignored_clients, vec!["kdeconnect".to_string()]);
    assert_eq!(config.media.video_clients, vec!["mpv".to_string()]);
}

#[test]
fn partial_config_fills_in_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_config(
        &temp,
        r#"
[media]
poll_interval_ms = 500
"#,
    );

    let config = Config::load_from(&path).unwrap();

    assert_eq!(config.media.poll_interval_ms, 500);
    assert!(config.media.ignored_clients.is_empty());
    assert!(!config.media.video_clients.is_empty());
}

#[test]
fn empty_config_uses_defaults() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "");

    let config = Config::load_from(&path).unwrap();
    let defaults = Config::default();

    assert_eq!(config.media.poll_interval_ms, defaults.media.poll_interval_ms);
    assert_eq!(config.media.video_clients, defaults.media.video_clients);
}

#[test]
fn default_poll_interval_is_one_second() {
    assert_eq!(Config::default().media.poll_interval_ms, 1000);
}

#[test]
fn invalid_toml_reports_the_location() {
    let temp = TempDir::new().unwrap();
    let path = write_config(&temp, "[media\npoll_interval_ms = ");

    let error = Config::load_from(&path).unwrap_err();
    assert!(error.to_string().contains("failed to parse TOML"));
}

#[test]
fn load_resolves_the_xdg_config_directory() {
    let temp = TempDir::new().unwrap();
    let config_dir = temp.path().join("nowplay");
    fs::create_dir_all(&config_dir).unwrap();
    fs::write(
        config_dir.join("config.toml"),
        "[media]\npoll_interval_ms = 750\n",
    )
    .unwrap();

    unsafe {
        std::env::set_var("XDG_CONFIG_HOME", temp.path());
    }

    let config = Config::load().unwrap();
    assert_eq!(config.media.poll_interval_ms, 750);
}
