use std::io::Write;
use std::path::PathBuf;

use platform_shooter::compute::{GameSession, LEVEL_COUNT};
use platform_shooter::config::{ConfigSource, GameConfig, CONFIG_ENV};

use tempfile::NamedTempFile;

fn config_file(text: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("temp file");
    file.write_all(text.as_bytes()).expect("write config");
    file
}

#[test]
fn defaults() {
    let c = GameConfig::default();
    assert_eq!(c.viewport_width, 1200.0);
    assert_eq!(c.starting_lives, 3);
    assert_eq!(c.max_level, 3);
    assert_eq!(c.frame_ms, 16);
    assert_eq!(c.rng_seed, None);
    assert_eq!(c.log_file, PathBuf::from("platform_shooter.log"));
}

#[test]
fn missing_fields_take_defaults() {
    let c = GameConfig::parse("(starting_lives: 5)").expect("parse");
    assert_eq!(c.starting_lives, 5);
    assert_eq!(c.max_level, 3);
    assert_eq!(c.viewport_width, 1200.0);
}

#[test]
fn full_config_parses() {
    let c = GameConfig::parse(
        r#"(
            viewport_width: 800.0,
            starting_lives: 1,
            max_level: 2,
            frame_ms: 33,
            rng_seed: Some(7),
            log_file: "game.log",
        )"#,
    )
    .expect("parse");
    assert_eq!(c.viewport_width, 800.0);
    assert_eq!(c.starting_lives, 1);
    assert_eq!(c.max_level, 2);
    assert_eq!(c.frame_ms, 33);
    assert_eq!(c.rng_seed, Some(7));
    assert_eq!(c.log_file, PathBuf::from("game.log"));
}

#[test]
fn malformed_text_is_an_error() {
    assert!(GameConfig::parse("(starting_lives: \"many\")").is_err());
    assert!(GameConfig::parse("not ron at all").is_err());
}

#[test]
fn load_reads_file() {
    let file = config_file("(max_level: 1, rng_seed: Some(42))");
    let c = GameConfig::load(file.path()).expect("load");
    assert_eq!(c.max_level, 1);
    assert_eq!(c.rng_seed, Some(42));
}

#[test]
fn load_errors_name_the_file() {
    let file = config_file("(frame_ms: -1)");
    let err = GameConfig::load(file.path()).expect_err("bad config");
    let message = format!("{err:#}");
    assert!(message.contains("parsing config"));
    assert!(message.contains(&file.path().display().to_string()));
}

#[test]
fn load_missing_file_fails() {
    let dir = tempfile::tempdir().expect("temp dir");
    let err = GameConfig::load(&dir.path().join("absent.ron")).expect_err("missing");
    assert!(format!("{err:#}").contains("reading config"));
}

#[test]
fn env_var_selects_config_file() {
    let file = config_file("(starting_lives: 9)");
    std::env::set_var(CONFIG_ENV, file.path());
    let result = GameConfig::discover();
    std::env::remove_var(CONFIG_ENV);
    let (config, source) = result.expect("discover");
    assert_eq!(config.starting_lives, 9);
    assert_eq!(source, ConfigSource::Env(file.path().to_path_buf()));
}

#[test]
fn settings_flow_into_session() {
    let c = GameConfig::parse("(starting_lives: 4, max_level: 9, viewport_width: 640.0)")
        .expect("parse");
    let settings = c.session_settings();
    assert_eq!(settings.starting_lives, 4);
    assert_eq!(settings.viewport_width, 640.0);

    let session = GameSession::new(settings);
    assert_eq!(session.lives, 4);
    assert_eq!(session.settings.max_level, LEVEL_COUNT);
    assert_eq!(session.camera.viewport_width, 640.0);
}
