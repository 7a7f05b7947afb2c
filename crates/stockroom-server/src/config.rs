//! 設定の読み込み
//!
//! 優先順位（後勝ち）: デフォルト値 → `stockroom.toml` → `STOCKROOM_*` 環境変数。
//! 入れ子のキーは `__` で区切る（例: `STOCKROOM_BINDING__DAPR__ENDPOINT`）。
//! 文字列のキー（`STRING_KEYS`）は環境変数の値をそのまま使う（`007` や `123456` も文字列）。

use std::time::Duration;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use secrecy::Secret;
use serde::Deserialize;
use stockroom_core::app::{DEFAULT_CONTAINER, DEFAULT_STORE_TIMEOUT};
use stockroom_core::domain::{DEFAULT_QUANTITY, KeyStrategy};
use stockroom_core::impls::dapr::DEFAULT_ENDPOINT;
use thiserror::Error;

/// Env var naming the config file.
pub const CONFIG_PATH_ENV: &str = "STOCKROOM_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "stockroom.toml";
const ENV_PREFIX: &str = "STOCKROOM_";

/// String-typed keys. figment would otherwise parse `123456` into a number.
const STRING_KEYS: &[&str] = &[
    "server.host",
    "telemetry.log_level",
    "binding.name",
    "binding.dapr.endpoint",
    "binding.dapr.api_token",
    "binding.local.root",
];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load config: {0}")]
    Load(#[from] figment::Error),
}

/// サーバー設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

impl ServerConfig {
    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// ログ設定
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TelemetryConfig {
    pub log_level: String,
    pub json: bool,
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            json: false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    Dapr,
    Local,
    Memory,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct DaprConfig {
    pub endpoint: String,
    pub api_token: Option<Secret<String>>,
}

impl Default for DaprConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            api_token: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LocalConfig {
    pub root: String,
}

impl Default for LocalConfig {
    fn default() -> Self {
        Self {
            root: "./data".to_string(),
        }
    }
}

/// Output binding 設定
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct BindingConfig {
    /// Binding / container name.
    pub name: String,
    pub backend: BackendKind,
    pub store_timeout_ms: u64,
    pub dapr: DaprConfig,
    pub local: LocalConfig,
}

impl Default for BindingConfig {
    fn default() -> Self {
        Self {
            name: DEFAULT_CONTAINER.to_string(),
            backend: BackendKind::Dapr,
            store_timeout_ms: DEFAULT_STORE_TIMEOUT.as_millis() as u64,
            dapr: DaprConfig::default(),
            local: LocalConfig::default(),
        }
    }
}

impl BindingConfig {
    pub fn store_timeout(&self) -> Duration {
        Duration::from_millis(self.store_timeout_ms)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct InventoryConfig {
    pub default_quantity: u32,
    pub key_strategy: KeyStrategy,
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self {
            default_quantity: DEFAULT_QUANTITY,
            key_strategy: KeyStrategy::default(),
        }
    }
}

/// アプリケーション設定
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub binding: BindingConfig,
    pub inventory: InventoryConfig,
}

impl AppConfig {
    /// 設定ファイル（`STOCKROOM_CONFIG` で上書き可）と環境変数から読み込む
    pub fn load() -> Result<Self, ConfigError> {
        let path =
            std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Ok(Self::figment(&path).extract()?)
    }

    pub fn figment(path: &str) -> Figment {
        let env = Env::prefixed(ENV_PREFIX).split("__");
        let mut figment = Figment::new()
            .merge(Toml::file(path))
            .merge(env.clone().ignore(STRING_KEYS));
        for (key, value) in env.only(STRING_KEYS).iter() {
            figment = figment.merge(Serialized::default(key.as_str(), value));
        }
        figment
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;
    use secrecy::ExposeSecret;

    #[test]
    fn defaults_without_file_or_env() {
        Jail::expect_with(|_jail| {
            let config: AppConfig = AppConfig::figment("stockroom.toml").extract()?;
            assert_eq!(config.server.addr(), "0.0.0.0:8080");
            assert_eq!(config.binding.name, "inventory");
            assert_eq!(config.binding.backend, BackendKind::Dapr);
            assert_eq!(config.binding.dapr.endpoint, "http://127.0.0.1:3500");
            assert_eq!(config.binding.store_timeout(), Duration::from_secs(10));
            assert_eq!(config.inventory.default_quantity, 100);
            assert_eq!(config.inventory.key_strategy, KeyStrategy::Seconds);
            assert_eq!(config.telemetry.log_level, "info");
            assert!(!config.telemetry.json);
            Ok(())
        });
    }

    #[test]
    fn file_then_env_override() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "stockroom.toml",
                r#"
                [server]
                port = 9000

                [binding]
                backend = "local"
                store_timeout_ms = 2500

                [binding.local]
                root = "/var/lib/stockroom"

                [inventory]
                default_quantity = 12
                key_strategy = "unique"
                "#,
            )?;
            jail.set_env("STOCKROOM_SERVER__PORT", "9090");
            jail.set_env("STOCKROOM_BINDING__NAME", "warehouse");

            let config: AppConfig = AppConfig::figment("stockroom.toml").extract()?;
            assert_eq!(config.server.port, 9090);
            assert_eq!(config.binding.name, "warehouse");
            assert_eq!(config.binding.backend, BackendKind::Local);
            assert_eq!(config.binding.local.root, "/var/lib/stockroom");
            assert_eq!(config.binding.store_timeout(), Duration::from_millis(2500));
            assert_eq!(config.inventory.default_quantity, 12);
            assert_eq!(config.inventory.key_strategy, KeyStrategy::Unique);
            Ok(())
        });
    }

    #[test]
    fn api_token_is_redacted() {
        Jail::expect_with(|jail| {
            jail.set_env("STOCKROOM_BINDING__DAPR__API_TOKEN", "very-secret-token");

            let config: AppConfig = AppConfig::figment("stockroom.toml").extract()?;
            let token = config.binding.dapr.api_token.as_ref().unwrap();
            assert_eq!(token.expose_secret(), "very-secret-token");

            let debug_output = format!("{:?}", config.binding);
            assert!(!debug_output.contains("very-secret-token"));
            Ok(())
        });
    }

    #[test]
    fn numeric_looking_strings_stay_verbatim() {
        Jail::expect_with(|jail| {
            jail.set_env("STOCKROOM_BINDING__DAPR__API_TOKEN", "123456");
            jail.set_env("STOCKROOM_BINDING__NAME", "2024");
            jail.set_env("STOCKROOM_BINDING__LOCAL__ROOT", "007");
            jail.set_env("STOCKROOM_SERVER__HOST", "1.50");
            jail.set_env("STOCKROOM_SERVER__PORT", "9090");

            let config: AppConfig = AppConfig::figment("stockroom.toml").extract()?;
            let token = config.binding.dapr.api_token.as_ref().unwrap();
            assert_eq!(token.expose_secret(), "123456");
            assert_eq!(config.binding.name, "2024");
            assert_eq!(config.binding.local.root, "007");
            assert_eq!(config.server.host, "1.50");
            assert_eq!(config.server.port, 9090);
            Ok(())
        });
    }

    #[test]
    fn unknown_backend_is_an_error() {
        Jail::expect_with(|jail| {
            jail.set_env("STOCKROOM_BINDING__BACKEND", "s3");
            let result = AppConfig::figment("stockroom.toml").extract::<AppConfig>();
            assert!(result.is_err());
            Ok(())
        });
    }
}
