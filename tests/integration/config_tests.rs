use clap::Parser;
use figment::providers::{Format, Serialized, Toml};
use figment::Figment;
use hashdupe::cli::{Cli, ReportFormat};
use hashdupe::config::Config;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_config_defaults_extract() {
    // Figment without Env so parallel tests cannot interfere.
    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .extract()
        .unwrap();
    assert_eq!(config, Config::default());
    assert_eq!(config.output_file, PathBuf::from("duplicates.txt"));
}

#[test]
fn test_partial_toml_keeps_other_defaults() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "follow_symlinks = true\n").unwrap();

    let config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .extract()
        .unwrap();

    assert!(config.follow_symlinks);
    assert_eq!(config.format, ReportFormat::Text);
    assert_eq!(config.output_file, PathBuf::from("duplicates.txt"));
}

#[test]
fn test_unknown_format_value_rejected() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "format = \"xml\"\n").unwrap();

    let result: Result<Config, _> = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .extract();

    assert!(result.is_err());
}

#[test]
fn test_cli_beats_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "output_file = \"file.txt\"\nformat = \"json\"\n").unwrap();

    let mut config: Config = Figment::from(Serialized::defaults(Config::default()))
        .merge(Toml::file(&path))
        .extract()
        .unwrap();
    let cli = Cli::try_parse_from(["hashdupe", "-o", "cli.txt"]).unwrap();
    config.apply_cli(&cli);

    assert_eq!(config.output_file, PathBuf::from("cli.txt"));
    assert_eq!(config.format, ReportFormat::Json);
}

#[test]
fn test_default_path_is_toml() {
    if let Some(path) = Config::default_path() {
        assert_eq!(path.file_name().unwrap(), "config.toml");
    }
}
