//! Configuration and color scheme management for tabdeck.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.tabdeck/config.toml`
//! - Built-in color schemes (default, solarized-dark, nord, tokyo-night)
//!
//! # Configuration File
//!
//! The configuration file is located at `~/.tabdeck/config.toml`:
//!
//! ```toml
//! # Color scheme: default, solarized-dark, nord, tokyo-night
//! color_scheme = "tokyo-night"
//!
//! [status_bar]
//! visible = true
//!
//! [panel]
//! # Minimum panel width in terminal cells
//! min_width = 20
//! ```

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Color scheme name
    pub color_scheme: String,
    /// Status bar settings
    pub status_bar: StatusBarConfig,
    /// Panel settings
    pub panel: PanelConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            color_scheme: "default".to_string(),
            status_bar: StatusBarConfig::default(),
            panel: PanelConfig::default(),
        }
    }
}

/// Status bar configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusBarConfig {
    pub visible: bool,
}

impl Default for StatusBarConfig {
    fn default() -> Self {
        Self { visible: true }
    }
}

/// Panel configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PanelConfig {
    /// Minimum panel width in terminal cells
    pub min_width: u16,
}

impl Default for PanelConfig {
    fn default() -> Self {
        Self { min_width: 20 }
    }
}

impl Config {
    /// Load configuration from file, falling back to defaults when the
    /// file is missing or malformed.
    pub fn load() -> Self {
        if let Some(path) = Self::config_path() {
            if path.exists() {
                if let Ok(content) = fs::read_to_string(&path) {
                    if let Ok(config) = toml::from_str(&content) {
                        return config;
                    }
                }
            }
        }
        Self::default()
    }

    /// Get config file path
    fn config_path() -> Option<PathBuf> {
        home_dir().map(|home| home.join(".tabdeck").join("config.toml"))
    }

    /// Get the color scheme
    pub fn color_scheme(&self) -> ColorScheme {
        ColorScheme::by_name(&self.color_scheme)
    }
}

/// Color definition (RGB)
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Convert to crossterm Color
    pub fn to_crossterm(&self) -> crossterm::style::Color {
        crossterm::style::Color::Rgb {
            r: self.r,
            g: self.g,
            b: self.b,
        }
    }
}

/// Color scheme definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ColorScheme {
    pub name: String,

    // Tab bar colors
    pub tab_bar_bg: Color,
    pub tab_bar_fg: Color,
    pub tab_active_bg: Color,
    pub tab_active_fg: Color,
    pub tab_inactive_bg: Color,
    pub tab_inactive_fg: Color,

    // Status bar colors
    pub status_bar_bg: Color,
    pub status_bar_fg: Color,

    // Panel borders (the active variant highlights a divider under the
    // pointer or mid-resize)
    pub panel_border: Color,
    pub panel_border_active: Color,

    // Placeholder text (welcome view, "select content")
    pub placeholder_fg: Color,

    // Drag overlay (the floating tab label)
    pub overlay_bg: Color,
    pub overlay_fg: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::default_scheme()
    }
}

impl ColorScheme {
    /// Default color scheme
    pub fn default_scheme() -> Self {
        Self {
            name: "default".to_string(),

            tab_bar_bg: Color::new(40, 40, 40),
            tab_bar_fg: Color::new(180, 180, 180),
            tab_active_bg: Color::new(60, 60, 180),
            tab_active_fg: Color::new(255, 255, 255),
            tab_inactive_bg: Color::new(60, 60, 60),
            tab_inactive_fg: Color::new(150, 150, 150),

            status_bar_bg: Color::new(0, 100, 0),
            status_bar_fg: Color::new(255, 255, 255),

            panel_border: Color::new(80, 80, 80),
            panel_border_active: Color::new(100, 150, 255),

            placeholder_fg: Color::new(130, 130, 130),

            overlay_bg: Color::new(60, 60, 180),
            overlay_fg: Color::new(255, 255, 255),
        }
    }

    /// Solarized Dark scheme
    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark".to_string(),

            tab_bar_bg: Color::new(0, 43, 54),
            tab_bar_fg: Color::new(147, 161, 161),
            tab_active_bg: Color::new(38, 139, 210),
            tab_active_fg: Color::new(253, 246, 227),
            tab_inactive_bg: Color::new(7, 54, 66),
            tab_inactive_fg: Color::new(101, 123, 131),

            status_bar_bg: Color::new(7, 54, 66),
            status_bar_fg: Color::new(147, 161, 161),

            panel_border: Color::new(7, 54, 66),
            panel_border_active: Color::new(38, 139, 210),

            placeholder_fg: Color::new(88, 110, 117),

            overlay_bg: Color::new(38, 139, 210),
            overlay_fg: Color::new(253, 246, 227),
        }
    }

    /// Nord scheme
    pub fn nord() -> Self {
        Self {
            name: "nord".to_string(),

            tab_bar_bg: Color::new(46, 52, 64),
            tab_bar_fg: Color::new(216, 222, 233),
            tab_active_bg: Color::new(136, 192, 208),
            tab_active_fg: Color::new(46, 52, 64),
            tab_inactive_bg: Color::new(59, 66, 82),
            tab_inactive_fg: Color::new(147, 161, 181),

            status_bar_bg: Color::new(59, 66, 82),
            status_bar_fg: Color::new(216, 222, 233),

            panel_border: Color::new(59, 66, 82),
            panel_border_active: Color::new(136, 192, 208),

            placeholder_fg: Color::new(97, 110, 136),

            overlay_bg: Color::new(136, 192, 208),
            overlay_fg: Color::new(46, 52, 64),
        }
    }

    /// Tokyo Night scheme
    pub fn tokyo_night() -> Self {
        Self {
            name: "tokyo-night".to_string(),

            tab_bar_bg: Color::new(26, 27, 38),
            tab_bar_fg: Color::new(169, 177, 214),
            tab_active_bg: Color::new(122, 162, 247),
            tab_active_fg: Color::new(26, 27, 38),
            tab_inactive_bg: Color::new(36, 40, 59),
            tab_inactive_fg: Color::new(86, 95, 137),

            status_bar_bg: Color::new(36, 40, 59),
            status_bar_fg: Color::new(169, 177, 214),

            panel_border: Color::new(41, 46, 66),
            panel_border_active: Color::new(122, 162, 247),

            placeholder_fg: Color::new(86, 95, 137),

            overlay_bg: Color::new(122, 162, 247),
            overlay_fg: Color::new(26, 27, 38),
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "solarized-dark" | "solarized_dark" => Self::solarized_dark(),
            "nord" => Self::nord(),
            "tokyo-night" | "tokyo_night" | "tokyonight" => Self::tokyo_night(),
            _ => Self::default_scheme(),
        }
    }

    /// List available schemes
    pub fn list() -> Vec<&'static str> {
        vec!["default", "solarized-dark", "nord", "tokyo-night"]
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
