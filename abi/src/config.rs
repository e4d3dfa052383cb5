use std::fs;

use serde::{Deserialize, Serialize};

use crate::Error;

/// Application configuration, loaded from a YAML file. Paths may use `~`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub display: DisplayConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplayConfig {
    #[serde(default = "default_currency")]
    pub currency: String,
    /// How many bookings a compact calendar cell previews before showing an
    /// overflow marker.
    #[serde(default = "default_day_preview")]
    pub day_preview: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            currency: default_currency(),
            day_preview: default_day_preview(),
        }
    }
}

fn default_currency() -> String {
    "€".to_string()
}

fn default_day_preview() -> usize {
    4
}

impl Config {
    pub fn load(path: &str) -> Result<Self, Error> {
        let path = shellexpand::tilde(path);
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| Error::Config(e.to_string()))?;
        serde_yaml::from_str(&content).map_err(|e| Error::Config(e.to_string()))
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn config_should_fill_defaults() {
        let config: Config = serde_yaml::from_str("display: {}").unwrap();
        assert_eq!(config.display.currency, "€");
        assert_eq!(config.display.day_preview, 4);

        let config: Config = serde_yaml::from_str("display:\n  currency: EUR\n").unwrap();
        assert_eq!(config.display.currency, "EUR");
    }

    #[test]
    fn load_should_report_missing_file() {
        let err = Config::load("/nonexistent/config.yml").unwrap_err();
        assert!(matches!(err, Error::Config(_)));
    }
}
