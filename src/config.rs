use log::LevelFilter;
use serde::{Deserialize, Serialize};

use crate::types::WalletKind;
use crate::Result;

/// Adapter settings supplied by the host page.
///
/// Every field has a default, so `{}` is a valid configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AdapterConfig {
    /// Page opened when connect is attempted without Phantom installed.
    pub install_url: String,
    pub open_install_page: bool,
    pub log_level: LevelFilter,
    /// Install the `window.*Wallet*` entry points on bootstrap.
    pub expose_globals: bool,
}

impl Default for AdapterConfig {
    fn default() -> Self {
        Self {
            install_url: WalletKind::Phantom.install_url().to_string(),
            open_install_page: true,
            log_level: LevelFilter::Info,
            expose_globals: true,
        }
    }
}

impl AdapterConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::WalletError;

    #[test]
    fn test_empty_object_uses_defaults() {
        let config = AdapterConfig::from_json("{}").unwrap();
        assert_eq!(config, AdapterConfig::default());
        assert_eq!(config.install_url, "https://phantom.app/");
        assert!(config.open_install_page);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_partial_override() {
        let config =
            AdapterConfig::from_json(r#"{"openInstallPage": false, "logLevel": "debug"}"#).unwrap();
        assert!(!config.open_install_page);
        assert_eq!(config.log_level, LevelFilter::Debug);
        assert!(config.expose_globals);
    }

    #[test]
    fn test_invalid_json_is_configuration_error() {
        let err = AdapterConfig::from_json("{ not json").unwrap_err();
        assert!(matches!(err, WalletError::Configuration(_)));
    }
}
