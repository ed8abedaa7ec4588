//! Application configuration module
//!
//! Scene tuning for the three widgets plus host-side UI preferences.

mod manager;

pub use manager::{ConfigError, ConfigManager, SharedConfig, create_shared_config};

use crystal_core::{SceneConfig, WidgetKind};
use serde::{Deserialize, Serialize};

/// UI theme
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum UiTheme {
    #[default]
    Dark,
    Light,
}

impl UiTheme {
    pub fn toggled(self) -> Self {
        match self {
            UiTheme::Dark => UiTheme::Light,
            UiTheme::Light => UiTheme::Dark,
        }
    }

    pub fn visuals(self) -> egui::Visuals {
        match self {
            UiTheme::Dark => egui::Visuals::dark(),
            UiTheme::Light => egui::Visuals::light(),
        }
    }
}

/// UI preferences
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UiConfig {
    pub theme: UiTheme,
    /// Attach the crystal field on startup
    pub field_enabled: bool,
    /// Attach the floating crystal on startup
    pub floating_enabled: bool,
    /// Attach the globe on startup
    pub globe_enabled: bool,
    /// Panel height in points; widgets are as wide as their column
    pub panel_height: f32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            theme: UiTheme::Dark,
            field_enabled: true,
            floating_enabled: true,
            globe_enabled: true,
            panel_height: 420.0,
        }
    }
}

impl UiConfig {
    pub fn enabled(&self, kind: WidgetKind) -> bool {
        match kind {
            WidgetKind::CrystalField => self.field_enabled,
            WidgetKind::FloatingCrystal => self.floating_enabled,
            WidgetKind::Globe => self.globe_enabled,
        }
    }

    pub fn set_enabled(&mut self, kind: WidgetKind, enabled: bool) {
        match kind {
            WidgetKind::CrystalField => self.field_enabled = enabled,
            WidgetKind::FloatingCrystal => self.floating_enabled = enabled,
            WidgetKind::Globe => self.globe_enabled = enabled,
        }
    }
}

/// Complete application configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AppConfig {
    /// Configuration format version
    #[serde(default)]
    pub version: u32,
    #[serde(default)]
    pub scene: SceneConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

impl AppConfig {
    /// Current configuration version
    pub const CURRENT_VERSION: u32 = 1;

    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self {
            version: Self::CURRENT_VERSION,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_config_fills_defaults() {
        let config: AppConfig = ron::from_str("(version: 1, ui: (theme: Light, field_enabled: false, floating_enabled: true, globe_enabled: true, panel_height: 300.0))")
            .expect("parse config");
        assert_eq!(config.ui.theme, UiTheme::Light);
        assert!(!config.ui.enabled(WidgetKind::CrystalField));
        assert_eq!(config.scene, SceneConfig::default());
    }

    #[test]
    fn test_theme_toggle() {
        assert_eq!(UiTheme::Dark.toggled(), UiTheme::Light);
        assert_eq!(UiTheme::Light.toggled().toggled(), UiTheme::Light);
    }

    #[test]
    fn test_set_enabled() {
        let mut ui = UiConfig::default();
        ui.set_enabled(WidgetKind::Globe, false);
        assert!(!ui.enabled(WidgetKind::Globe));
        assert!(ui.enabled(WidgetKind::FloatingCrystal));
    }
}
