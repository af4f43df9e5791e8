//! Configuration loading
//!
//! Priority (highest to lowest):
//! 1. Environment variables prefixed with `VOLTAGE_BINARY_`
//! 2. Config file (YAML, TOML or JSON, chosen by extension)
//! 3. Default values

use std::path::Path;

use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use figment::Figment;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bytes::{default_byte_order, set_default_byte_order, ByteOrder};
use crate::error::{BinaryError, Result};

/// Environment variable prefix, e.g. `VOLTAGE_BINARY_DEFAULT_BYTE_ORDER=big`
pub const ENV_PREFIX: &str = "VOLTAGE_BINARY_";

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BinaryConfig {
    /// Process-wide default byte order; host order when unset
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_byte_order: Option<ByteOrder>,
}

impl BinaryConfig {
    /// Layered figment without extracting it
    pub fn figment(path: Option<&Path>) -> Result<Figment> {
        let mut figment = Figment::from(Serialized::defaults(BinaryConfig::default()));

        if let Some(path) = path {
            if !path.exists() {
                return Err(BinaryError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            let extension = path
                .extension()
                .and_then(|s| s.to_str())
                .ok_or_else(|| BinaryError::config("Config file must have an extension"))?;
            figment = match extension {
                "yaml" | "yml" => figment.merge(Yaml::file(path)),
                "toml" => figment.merge(Toml::file(path)),
                "json" => figment.merge(Json::file(path)),
                _ => {
                    return Err(BinaryError::config(format!(
                        "Unsupported config file format: {}",
                        extension
                    )))
                },
            };
        }

        Ok(figment.merge(Env::prefixed(ENV_PREFIX)))
    }

    /// Load from defaults, an optional file and the environment
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config: BinaryConfig = Self::figment(path)?.extract()?;
        debug!(
            path = ?path,
            default_byte_order = ?config.default_byte_order,
            "Binary configuration loaded"
        );
        Ok(config)
    }

    /// Install the configured default byte order
    ///
    /// Returns the order in effect afterwards. Without a configured order the
    /// current default is left alone.
    pub fn apply(&self) -> Result<ByteOrder> {
        match self.default_byte_order {
            Some(order) => {
                set_default_byte_order(order)?;
                Ok(order)
            },
            None => Ok(default_byte_order()),
        }
    }
}

#[cfg(test)]
#[allow(clippy::disallowed_methods)] // Test code - unwrap is acceptable
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn write_config(suffix: &str, content: &str) -> NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_yaml_file() {
        let file = write_config(".yaml", "default_byte_order: big_endian\n");
        let figment = BinaryConfig::figment(Some(file.path())).unwrap();
        let config: BinaryConfig = figment.extract().unwrap();
        assert_eq!(config.default_byte_order, Some(ByteOrder::BigEndian));
    }

    #[test]
    fn test_aliases_accepted() {
        let file = write_config(".yml", "default_byte_order: DCBA\n");
        let config: BinaryConfig = BinaryConfig::figment(Some(file.path()))
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(config.default_byte_order, Some(ByteOrder::LittleEndian));
    }

    #[test]
    fn test_toml_file() {
        let file = write_config(".toml", "default_byte_order = \"little\"\n");
        let config: BinaryConfig = BinaryConfig::figment(Some(file.path()))
            .unwrap()
            .extract()
            .unwrap();
        assert_eq!(config.default_byte_order, Some(ByteOrder::LittleEndian));
    }

    #[test]
    fn test_defaults_without_file() {
        let config: BinaryConfig = Figment::from(Serialized::defaults(BinaryConfig::default()))
            .extract()
            .unwrap();
        assert_eq!(config, BinaryConfig::default());
    }

    #[test]
    fn test_invalid_order_is_config_error() {
        let file = write_config(".yaml", "default_byte_order: middle\n");
        let err = BinaryConfig::figment(Some(file.path()))
            .unwrap()
            .extract::<BinaryConfig>()
            .map_err(BinaryError::from)
            .unwrap_err();
        assert!(matches!(err, BinaryError::Config(_)));
    }

    #[test]
    fn test_missing_file_and_unknown_extension() {
        assert!(matches!(
            BinaryConfig::figment(Some(Path::new("/nonexistent/binary.yaml"))),
            Err(BinaryError::Config(_))
        ));

        let file = write_config(".ini", "default_byte_order=big\n");
        assert!(matches!(
            BinaryConfig::figment(Some(file.path())),
            Err(BinaryError::Config(_))
        ));
    }
}
