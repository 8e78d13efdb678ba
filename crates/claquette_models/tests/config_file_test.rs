//! Loading configuration overrides from disk.

use claquette_core::LoggingOptions;
use claquette_error::ClaquetteErrorKind;
use claquette_models::ClaquetteConfig;
use std::io::Write;

fn toml_file(contents: &str) -> anyhow::Result<tempfile::NamedTempFile> {
    let mut file = tempfile::Builder::new().suffix(".toml").tempfile()?;
    file.write_all(contents.as_bytes())?;
    Ok(file)
}

#[test]
fn test_file_overrides_bundled_defaults() -> anyhow::Result<()> {
    let file = toml_file(
        r#"
[provider]
chat_model = "gpt-4o"
base_url = "http://localhost:9999"

[logging]
level = "debug"
json = true
"#,
    )?;

    let config = ClaquetteConfig::from_file(file.path())?;

    assert_eq!(config.provider.chat_model, "gpt-4o");
    assert_eq!(config.provider.base_url, "http://localhost:9999");
    // Untouched keys keep their bundled values.
    assert_eq!(config.provider.image_model, "dall-e-3");
    assert_eq!(config.provider.timeout_secs, 120);

    let options = LoggingOptions::from(&config.logging);
    assert_eq!(options.level, "debug");
    assert!(options.json);
    Ok(())
}

#[test]
fn test_zero_timeout_is_rejected() -> anyhow::Result<()> {
    let file = toml_file("[provider]\ntimeout_secs = 0\n")?;

    let err = ClaquetteConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err.kind(), ClaquetteErrorKind::Config(_)));
    Ok(())
}

#[test]
fn test_malformed_file_is_config_error() -> anyhow::Result<()> {
    let file = toml_file("[provider\nchat_model = ")?;

    let err = ClaquetteConfig::from_file(file.path()).unwrap_err();

    assert!(matches!(err.kind(), ClaquetteErrorKind::Config(_)));
    Ok(())
}
