use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::ui::AlertTiming;

/// Entity panel configuration managed by Figment.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct PanelConfig {
    /// API path segment of the managed entity kind.
    /// TOML: `panel.entity_type`. Default: `partners`.
    #[serde(default = "default_entity_type")]
    pub entity_type: String,

    /// Singular display name used in alerts and headings.
    /// TOML: `panel.entity_name`. Default: `Partner`.
    #[serde(default = "default_entity_name")]
    pub entity_name: String,

    /// How long an alert stays fully visible.
    /// TOML: `panel.alert_visible_ms`. Default: `5000`.
    #[serde(default = "default_alert_visible_ms")]
    pub alert_visible_ms: u64,

    /// Fade-out duration before the alert is detached.
    /// TOML: `panel.alert_fade_ms`. Default: `300`.
    #[serde(default = "default_alert_fade_ms")]
    pub alert_fade_ms: u64,
}

impl PanelConfig {
    pub fn alert_timing(&self) -> AlertTiming {
        AlertTiming {
            visible: Duration::from_millis(self.alert_visible_ms),
            fade: Duration::from_millis(self.alert_fade_ms),
        }
    }
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self {
            entity_type: default_entity_type(),
            entity_name: default_entity_name(),
            alert_visible_ms: default_alert_visible_ms(),
            alert_fade_ms: default_alert_fade_ms(),
        }
    }
}

fn default_entity_type() -> String {
    "partners".to_string()
}

fn default_entity_name() -> String {
    "Partner".to_string()
}

fn default_alert_visible_ms() -> u64 {
    5000
}

fn default_alert_fade_ms() -> u64 {
    300
}
