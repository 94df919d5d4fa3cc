use std::path::Path;

use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::error::{Error, Result};

const ENV_PREFIX: &str = "LANDING";
const DEFAULT_FILE: &str = "landing";

/// Runtime knobs. The heuristic tables are fixed; these only bound resources.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    /// Max sections rendered to markup at once.
    pub render_concurrency: usize,
    /// Documents above this size are refused by the parser.
    pub max_input_bytes: usize,
    /// Section fragments above this size are refused by the renderer.
    pub max_fragment_bytes: usize,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            render_concurrency: 8,
            max_input_bytes: 4 * 1024 * 1024,
            max_fragment_bytes: 1024 * 1024,
        }
    }
}

impl Settings {
    /// Defaults, then `landing.toml` (optional) in the working directory, then
    /// `LANDING_*` environment variables.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Same as [`Settings::load`] but reads `file` instead of `landing.toml`.
    /// An explicitly named file must exist.
    pub fn load_from(file: Option<&Path>) -> Result<Self> {
        let file_source = match file {
            Some(path) => File::from(path).required(true),
            None => File::with_name(DEFAULT_FILE).required(false),
        };
        let cfg = with_defaults(Config::builder())
            .map_err(settings_error)?
            .add_source(file_source)
            .add_source(Environment::with_prefix(ENV_PREFIX).try_parsing(true))
            .build()
            .map_err(settings_error)?;

        let settings: Settings = cfg.try_deserialize().map_err(settings_error)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn validate(&self) -> Result<()> {
        if self.render_concurrency == 0 {
            return Err(Error::Settings(
                "render_concurrency must be greater than 0".into(),
            ));
        }
        if self.max_input_bytes == 0 {
            return Err(Error::Settings("max_input_bytes must be greater than 0".into()));
        }
        if self.max_fragment_bytes == 0 {
            return Err(Error::Settings(
                "max_fragment_bytes must be greater than 0".into(),
            ));
        }
        Ok(())
    }
}

fn with_defaults(
    builder: config::ConfigBuilder<config::builder::DefaultState>,
) -> std::result::Result<config::ConfigBuilder<config::builder::DefaultState>, ConfigError> {
    let d = Settings::default();
    builder
        .set_default("render_concurrency", d.render_concurrency as u64)?
        .set_default("max_input_bytes", d.max_input_bytes as u64)?
        .set_default("max_fragment_bytes", d.max_fragment_bytes as u64)
}

fn settings_error(e: ConfigError) -> Error {
    Error::Settings(e.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        assert!(Settings::default().validate().is_ok());
    }

    #[test]
    fn zero_concurrency_rejected() {
        let s = Settings {
            render_concurrency: 0,
            ..Settings::default()
        };
        assert!(matches!(s.validate(), Err(Error::Settings(_))));
    }

    #[test]
    fn zero_input_limit_rejected() {
        let s = Settings {
            max_input_bytes: 0,
            ..Settings::default()
        };
        assert!(s.validate().is_err());
    }

    #[test]
    fn defaults_survive_builder() {
        let cfg = with_defaults(Config::builder()).unwrap().build().unwrap();
        let s: Settings = cfg.try_deserialize().unwrap();
        assert_eq!(s, Settings::default());
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let missing = Path::new("tests/fixtures/does-not-exist.toml");
        assert!(matches!(
            Settings::load_from(Some(missing)),
            Err(Error::Settings(_))
        ));
    }
}
