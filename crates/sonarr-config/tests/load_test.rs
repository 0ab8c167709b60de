#![allow(clippy::unwrap_used)]
// Layering tests for config loading: environment < file < explicit.
//
// Every test that reads the environment runs inside a figment `Jail`, which
// serialises them and restores the environment afterwards.

use std::path::Path;

use figment::Jail;
use pretty_assertions::assert_eq;

use sonarr_config::{ConfigError, Settings, load, resolve};

#[test]
fn test_file_values_are_read() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
url = "http://sonarr.lan:8989"
api_key = "from-file"
timeout = 10
"#,
        )?;

        let settings = load(&Settings::default(), Some(Path::new("config.toml"))).unwrap();
        assert_eq!(settings.url.as_deref(), Some("http://sonarr.lan:8989"));
        assert_eq!(settings.api_key.as_deref(), Some("from-file"));
        assert_eq!(settings.timeout, Some(10));
        Ok(())
    });
}

#[test]
fn test_explicit_values_win_over_file() {
    Jail::expect_with(|jail| {
        jail.create_file(
            "config.toml",
            r#"
url = "http://sonarr.lan:8989"
api_key = "from-file"
"#,
        )?;
        let explicit = Settings {
            api_key: Some("explicit".into()),
            ..Default::default()
        };

        let settings = load(&explicit, Some(Path::new("config.toml"))).unwrap();
        assert_eq!(settings.url.as_deref(), Some("http://sonarr.lan:8989"));
        assert_eq!(settings.api_key.as_deref(), Some("explicit"));
        Ok(())
    });
}

#[test]
fn test_named_file_must_exist() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.toml");

    let err = load(&Settings::default(), Some(&missing)).unwrap_err();
    assert!(matches!(err, ConfigError::FileNotFound(_)));
}

#[test]
fn test_environment_is_lowest_layer() {
    Jail::expect_with(|jail| {
        jail.set_env("SONARR_URL", "http://env:8989");
        jail.set_env("SONARR_API_KEY", "from-env");
        jail.set_env("SONARR_EXTRA_HEADER_NAME", "X-Gate");
        jail.set_env("SONARR_EXTRA_HEADER_VALUE", "open");
        jail.create_file("config.toml", r#"url = "http://file:8989""#)?;

        let settings = load(&Settings::default(), Some(Path::new("config.toml"))).unwrap();
        assert_eq!(settings.url.as_deref(), Some("http://file:8989"));
        assert_eq!(settings.api_key.as_deref(), Some("from-env"));

        let config = settings.into_provider_config().unwrap();
        assert_eq!(config.extra_header.unwrap().name, "X-Gate");
        Ok(())
    });
}

#[test]
fn test_missing_url_is_reported() {
    Jail::expect_with(|jail| {
        jail.create_file("config.toml", r#"api_key = "k""#)?;

        let err = resolve(&Settings::default(), Some(Path::new("config.toml"))).unwrap_err();
        assert!(matches!(err, ConfigError::Missing { field: "url", .. }));
        Ok(())
    });
}
