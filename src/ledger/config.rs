//! Ledger gateway configuration

use serde::{Deserialize, Serialize};

fn default_channel() -> String {
    "mychannel".to_string()
}

fn default_contract() -> String {
    "easybook".to_string()
}

fn default_timeout_ms() -> u64 {
    3000
}

/// Where and how to reach the contract gateway
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerConfig {
    #[serde(default)]
    pub enabled: bool,

    /// Gateway base URL, e.g. `http://127.0.0.1:7050`
    #[serde(default)]
    pub endpoint: Option<String>,

    #[serde(default = "default_channel")]
    pub channel: String,

    #[serde(default = "default_contract")]
    pub contract: String,

    /// Per-call timeout
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            endpoint: None,
            channel: default_channel(),
            contract: default_contract(),
            timeout_ms: default_timeout_ms(),
        }
    }
}

impl LedgerConfig {
    /// URL of the contract's evaluate endpoint
    pub fn evaluate_url(&self) -> Option<String> {
        self.endpoint.as_ref().map(|endpoint| {
            format!(
                "{}/channels/{}/contracts/{}/evaluate",
                endpoint.trim_end_matches('/'),
                self.channel,
                self.contract
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config: LedgerConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, LedgerConfig::default());
        assert!(!config.enabled);
        assert!(config.evaluate_url().is_none());
    }

    #[test]
    fn test_evaluate_url() {
        let config = LedgerConfig {
            endpoint: Some("http://ledger:7050/".to_string()),
            ..Default::default()
        };
        assert_eq!(
            config.evaluate_url().as_deref(),
            Some("http://ledger:7050/channels/mychannel/contracts/easybook/evaluate")
        );
    }
}
