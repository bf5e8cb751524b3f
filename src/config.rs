use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::constants::{DEFAULT_ERROR_PREVIEW_LIMIT, DEFAULT_MODEL_NAME};
use crate::error::{EvalError, Result};

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    pub loader: LoaderConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoaderConfig {
    /// Name attached to every loaded prediction set
    pub model_name: String,
    /// How many row diagnostics to echo after a load
    pub error_preview_limit: usize,
    pub delimiter: String,
}

impl Default for LoaderConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL_NAME.to_string(),
            error_preview_limit: DEFAULT_ERROR_PREVIEW_LIMIT,
            delimiter: ",".to_string(),
        }
    }
}

impl LoaderConfig {
    /// The delimiter as the single byte the CSV reader expects
    pub fn delimiter_byte(&self) -> Result<u8> {
        match self.delimiter.as_bytes() {
            [byte] if byte.is_ascii() => Ok(*byte),
            _ => Err(EvalError::Config(format!(
                "delimiter must be a single ASCII character, got '{}'",
                self.delimiter
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub directory: String,
    pub file_name: String,
    /// Used when RUST_LOG is unset
    pub default_filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            directory: "logs".to_string(),
            file_name: "value_eval.log".to_string(),
            default_filter: "value_eval=info".to_string(),
        }
    }
}

impl Config {
    pub fn load_from(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        let config_content = fs::read_to_string(config_path).map_err(|e| {
            EvalError::Config(format!(
                "Failed to read config file '{}': {}",
                config_path.display(),
                e
            ))
        })?;

        let config: Config = toml::from_str(&config_content)?;
        config.loader.delimiter_byte()?;
        Ok(config)
    }

    /// Like [`Config::load_from`], but a missing file yields the defaults
    pub fn load_or_default(config_path: impl AsRef<Path>) -> Result<Self> {
        let config_path = config_path.as_ref();
        if config_path.exists() {
            Self::load_from(config_path)
        } else {
            Ok(Self::default())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[loader]\nmodel_name = \"gpt-vision\"").unwrap();

        let config = Config::load_from(file.path()).unwrap();
        assert_eq!(config.loader.model_name, "gpt-vision");
        assert_eq!(config.loader.error_preview_limit, 5);
        assert_eq!(config.loader.delimiter_byte().unwrap(), b',');
        assert_eq!(config.logging.directory, "logs");
    }

    #[test]
    fn test_bad_delimiter_is_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "[loader]\ndelimiter = \";;\"").unwrap();

        let result = Config::load_from(file.path());
        assert!(matches!(result, Err(EvalError::Config(_))));
    }

    #[test]
    fn test_missing_file_falls_back_to_defaults() {
        let config = Config::load_or_default("/no/such/value_eval.toml").unwrap();
        assert_eq!(config.loader.model_name, "model");
        assert!(matches!(
            Config::load_from("/no/such/value_eval.toml"),
            Err(EvalError::Config(_))
        ));
    }
}
