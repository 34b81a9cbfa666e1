use serde::Deserialize;
use wasm_bindgen::JsValue;

use crate::models::TokenConfig;

/// Global the page may set before the wasm bundle loads.
pub const CONFIG_GLOBAL: &str = "__WALLET_DASHBOARD_CONFIG__";

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct DashboardConfig {
    /// Name of the `window` property holding the JS chain client.
    pub client_namespace: String,
    pub tokens: Vec<TokenConfig>,
    pub account_poll_ms: u32,
    pub error_clear_ms: u32,
    pub balance: BalanceConfig,
    pub watcher: WatcherConfig,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            client_namespace: "walletDashboardClient".to_string(),
            tokens: Vec::new(),
            account_poll_ms: 1000,
            error_clear_ms: 8000,
            balance: BalanceConfig::default(),
            watcher: WatcherConfig::default(),
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct BalanceConfig {
    pub decimals: u8,
    pub precision: usize,
    pub native_precision: usize,
    pub highlight_ms: u32,
}

impl Default for BalanceConfig {
    fn default() -> Self {
        Self {
            decimals: 18,
            precision: 4,
            native_precision: 6,
            highlight_ms: 2000,
        }
    }
}

#[derive(Deserialize, Clone, Debug, PartialEq)]
#[serde(default)]
pub struct WatcherConfig {
    pub confirmations: u32,
    pub expiry_ms: u32,
    pub block_refresh_delay_ms: u32,
    /// `None` waits on the receipt for as long as the client does.
    pub receipt_timeout_ms: Option<u32>,
}

impl Default for WatcherConfig {
    fn default() -> Self {
        Self {
            confirmations: 1,
            expiry_ms: 5000,
            block_refresh_delay_ms: 1000,
            receipt_timeout_ms: None,
        }
    }
}

impl DashboardConfig {
    /// Reads the page-provided overrides, falling back to defaults.
    pub fn load() -> Self {
        let Some(window) = web_sys::window() else {
            return Self::default();
        };
        let raw = js_sys::Reflect::get(&window, &JsValue::from_str(CONFIG_GLOBAL))
            .unwrap_or(JsValue::UNDEFINED);
        if raw.is_undefined() || raw.is_null() {
            log::debug!("No {} found, using default config", CONFIG_GLOBAL);
            return Self::default();
        }
        match serde_wasm_bindgen::from_value::<DashboardConfig>(raw) {
            Ok(config) => {
                log::info!("Loaded dashboard config with {} token(s)", config.tokens.len());
                config
            }
            Err(e) => {
                log::warn!("Ignoring malformed {}: {}", CONFIG_GLOBAL, e);
                Self::default()
            }
        }
    }
}
