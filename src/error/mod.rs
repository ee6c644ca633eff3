mod config;
mod panel;

pub use config::ConfigError;
pub use panel::PanelError;
