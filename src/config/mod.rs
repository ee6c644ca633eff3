mod basic;
mod panel;

pub use basic::BasicConfig;
pub use panel::PanelConfig;

use crate::error::ConfigError;
use crate::panel::EntityContext;
use crate::ui::AlertTiming;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Application configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Transport and logging settings (see `basic` table in config.toml).
    #[serde(default)]
    pub basic: BasicConfig,

    /// Which entity kind this host manages (see `panel` table in config.toml).
    #[serde(default)]
    pub panel: PanelConfig,
}

const DEFAULT_CONFIG_FILE: &str = "config.toml";
const ENV_PREFIX: &str = "DIRDESK_";

impl Config {
    /// Builds a Figment that merges defaults, a config TOML file and
    /// `DIRDESK_`-prefixed environment variables (`DIRDESK_PANEL__ENTITY_TYPE=vendors`).
    pub fn figment() -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        if PathBuf::from(DEFAULT_CONFIG_FILE).is_file() {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }
        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Loads configuration from defaults, `config.toml` if present and the environment.
    pub fn load() -> Result<Self, ConfigError> {
        let cfg: Self = Self::figment().extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.context()
            .map(|_| ())
            .map_err(|err| ConfigError::Invalid(err.to_string()))?;
        if self.panel.entity_name.trim().is_empty() {
            return Err(ConfigError::Invalid(
                "panel.entity_name must be set and non-empty".to_string(),
            ));
        }
        Ok(())
    }

    pub fn context(&self) -> Result<EntityContext, crate::PanelError> {
        EntityContext::new(&self.panel.entity_type, &self.panel.entity_name)
    }

    pub fn alert_timing(&self) -> AlertTiming {
        self.panel.alert_timing()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let cfg = Config::default();
        cfg.validate().expect("default config should validate");
        let ctx = cfg.context().unwrap();
        assert_eq!(ctx.token(), "partners");
        assert_eq!(ctx.name(), "Partner");
        assert_eq!(cfg.basic.base_url.as_str(), "http://127.0.0.1:5000/");
    }

    #[test]
    fn rejects_path_unsafe_token() {
        let mut cfg = Config::default();
        cfg.panel.entity_type = "../admin".to_string();
        assert!(matches!(cfg.validate(), Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn toml_overrides_defaults() {
        let cfg: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Toml::string(
                r#"
                [panel]
                entity_type = "vendors"
                entity_name = "Vendor"
                alert_visible_ms = 1000
                "#,
            ))
            .extract()
            .unwrap();

        assert_eq!(cfg.panel.entity_type, "vendors");
        assert_eq!(cfg.panel.alert_fade_ms, 300);
        assert_eq!(cfg.alert_timing().visible.as_millis(), 1000);
    }
}
