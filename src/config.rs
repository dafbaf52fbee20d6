//! Configuration and color scheme management for termfolio.
//!
//! This module provides:
//! - TOML configuration file loading from `~/.termfolio/config.toml`
//! - Built-in color schemes (crt, solarized, dracula, gruvbox, tokyo-night)
//!
//! # Configuration File
//!
//! The configuration file is located at `~/.termfolio/config.toml`:
//!
//! ```toml
//! # Startup language: "en" or "es"
//! language = "en"
//!
//! # Color scheme: crt, solarized-dark, dracula, gruvbox-dark, tokyo-night
//! color_scheme = "crt"
//!
//! [typing]
//! speed_ms = 15
//! newline_pause = 3
//!
//! [prompt]
//! user = "guest"
//! host = "portfolio"
//! ```
//!
//! Command line options override the file.

use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Main configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Startup language code
    pub language: Option<String>,
    /// Color scheme name
    pub color_scheme: String,
    /// Typewriter pacing
    pub typing: TypingConfig,
    /// Prompt identity
    pub prompt: PromptConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: None,
            color_scheme: "crt".to_string(),
            typing: TypingConfig::default(),
            prompt: PromptConfig::default(),
        }
    }
}

/// Typewriter pacing configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypingConfig {
    /// Delay per revealed character, in milliseconds
    pub speed_ms: u64,
    /// Multiplier applied to the delay after a line break
    pub newline_pause: u32,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            speed_ms: 15,
            newline_pause: 3,
        }
    }
}

/// Prompt identity shown in the echo line
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptConfig {
    pub user: String,
    pub host: String,
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            user: "guest".to_string(),
            host: "portfolio".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from file
    pub fn load() -> Self {
        if let Some(path) = Self::get_config_path() {
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

    /// Save configuration to file
    #[allow(dead_code)]
    pub fn save(&self) -> Result<(), String> {
        if let Some(path) = Self::get_config_path() {
            let content = toml::to_string_pretty(self)
                .map_err(|e| format!("Failed to serialize config: {}", e))?;
            fs::write(&path, content).map_err(|e| format!("Failed to write config: {}", e))?;
            Ok(())
        } else {
            Err("Could not determine config path".to_string())
        }
    }

    /// Get config file path
    fn get_config_path() -> Option<PathBuf> {
        if let Some(home) = home_dir() {
            let dir = home.join(".termfolio");
            if !dir.exists() {
                let _ = fs::create_dir_all(&dir);
            }
            return Some(dir.join("config.toml"));
        }
        None
    }

    /// Get the color scheme
    pub fn get_color_scheme(&self) -> ColorScheme {
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

    // Text roles
    pub text: Color,
    pub title: Color,
    pub subtitle: Color,
    pub highlight: Color,
    pub muted: Color,
    pub error: Color,
    pub link: Color,
    pub chip_fg: Color,
    pub chip_bg: Color,

    // Prompt fragments
    pub prompt_user: Color,
    pub prompt_path: Color,
    pub prompt_symbol: Color,
    pub command: Color,

    // Chrome
    pub header_bg: Color,
    pub header_fg: Color,
    pub button_fg: Color,
    pub button_active_bg: Color,
    pub button_active_fg: Color,

    // Skill bars
    pub bar_fill: Color,
    pub bar_empty: Color,

    // Landing hero accent
    pub accent: Color,
}

impl Default for ColorScheme {
    fn default() -> Self {
        Self::crt()
    }
}

impl ColorScheme {
    /// Default scheme: green phosphor on black
    pub fn crt() -> Self {
        Self {
            name: "crt".to_string(),

            text: Color::new(190, 210, 190),
            title: Color::new(80, 250, 123),
            subtitle: Color::new(140, 220, 170),
            highlight: Color::new(120, 255, 160),
            muted: Color::new(110, 130, 110),
            error: Color::new(255, 85, 85),
            link: Color::new(100, 200, 255),
            chip_fg: Color::new(10, 25, 10),
            chip_bg: Color::new(90, 190, 120),

            prompt_user: Color::new(80, 250, 123),
            prompt_path: Color::new(100, 200, 255),
            prompt_symbol: Color::new(190, 210, 190),
            command: Color::new(255, 255, 255),

            header_bg: Color::new(20, 30, 20),
            header_fg: Color::new(140, 200, 150),
            button_fg: Color::new(140, 200, 150),
            button_active_bg: Color::new(80, 250, 123),
            button_active_fg: Color::new(10, 25, 10),

            bar_fill: Color::new(80, 250, 123),
            bar_empty: Color::new(40, 60, 40),

            accent: Color::new(80, 250, 123),
        }
    }

    /// Solarized Dark scheme
    pub fn solarized_dark() -> Self {
        Self {
            name: "solarized-dark".to_string(),

            text: Color::new(147, 161, 161),
            title: Color::new(38, 139, 210),
            subtitle: Color::new(42, 161, 152),
            highlight: Color::new(181, 137, 0),
            muted: Color::new(88, 110, 117),
            error: Color::new(220, 50, 47),
            link: Color::new(38, 139, 210),
            chip_fg: Color::new(0, 43, 54),
            chip_bg: Color::new(42, 161, 152),

            prompt_user: Color::new(133, 153, 0),
            prompt_path: Color::new(38, 139, 210),
            prompt_symbol: Color::new(147, 161, 161),
            command: Color::new(253, 246, 227),

            header_bg: Color::new(7, 54, 66),
            header_fg: Color::new(147, 161, 161),
            button_fg: Color::new(147, 161, 161),
            button_active_bg: Color::new(38, 139, 210),
            button_active_fg: Color::new(253, 246, 227),

            bar_fill: Color::new(133, 153, 0),
            bar_empty: Color::new(7, 54, 66),

            accent: Color::new(38, 139, 210),
        }
    }

    /// Dracula scheme
    pub fn dracula() -> Self {
        Self {
            name: "dracula".to_string(),

            text: Color::new(248, 248, 242),
            title: Color::new(189, 147, 249),
            subtitle: Color::new(139, 233, 253),
            highlight: Color::new(241, 250, 140),
            muted: Color::new(98, 114, 164),
            error: Color::new(255, 85, 85),
            link: Color::new(139, 233, 253),
            chip_fg: Color::new(40, 42, 54),
            chip_bg: Color::new(189, 147, 249),

            prompt_user: Color::new(80, 250, 123),
            prompt_path: Color::new(139, 233, 253),
            prompt_symbol: Color::new(248, 248, 242),
            command: Color::new(255, 255, 255),

            header_bg: Color::new(68, 71, 90),
            header_fg: Color::new(248, 248, 242),
            button_fg: Color::new(248, 248, 242),
            button_active_bg: Color::new(189, 147, 249),
            button_active_fg: Color::new(40, 42, 54),

            bar_fill: Color::new(80, 250, 123),
            bar_empty: Color::new(68, 71, 90),

            accent: Color::new(189, 147, 249),
        }
    }

    /// Gruvbox Dark scheme
    pub fn gruvbox_dark() -> Self {
        Self {
            name: "gruvbox-dark".to_string(),

            text: Color::new(235, 219, 178),
            title: Color::new(215, 153, 33),
            subtitle: Color::new(152, 151, 26),
            highlight: Color::new(250, 189, 47),
            muted: Color::new(168, 153, 132),
            error: Color::new(204, 36, 29),
            link: Color::new(69, 133, 136),
            chip_fg: Color::new(40, 40, 40),
            chip_bg: Color::new(152, 151, 26),

            prompt_user: Color::new(152, 151, 26),
            prompt_path: Color::new(69, 133, 136),
            prompt_symbol: Color::new(235, 219, 178),
            command: Color::new(251, 241, 199),

            header_bg: Color::new(60, 56, 54),
            header_fg: Color::new(235, 219, 178),
            button_fg: Color::new(235, 219, 178),
            button_active_bg: Color::new(215, 153, 33),
            button_active_fg: Color::new(40, 40, 40),

            bar_fill: Color::new(152, 151, 26),
            bar_empty: Color::new(60, 56, 54),

            accent: Color::new(215, 153, 33),
        }
    }

    /// Tokyo Night scheme
    pub fn tokyo_night() -> Self {
        Self {
            name: "tokyo-night".to_string(),

            text: Color::new(169, 177, 214),
            title: Color::new(122, 162, 247),
            subtitle: Color::new(125, 207, 255),
            highlight: Color::new(158, 206, 106),
            muted: Color::new(86, 95, 137),
            error: Color::new(247, 118, 142),
            link: Color::new(125, 207, 255),
            chip_fg: Color::new(26, 27, 38),
            chip_bg: Color::new(122, 162, 247),

            prompt_user: Color::new(158, 206, 106),
            prompt_path: Color::new(122, 162, 247),
            prompt_symbol: Color::new(169, 177, 214),
            command: Color::new(192, 202, 245),

            header_bg: Color::new(36, 40, 59),
            header_fg: Color::new(169, 177, 214),
            button_fg: Color::new(169, 177, 214),
            button_active_bg: Color::new(122, 162, 247),
            button_active_fg: Color::new(26, 27, 38),

            bar_fill: Color::new(158, 206, 106),
            bar_empty: Color::new(36, 40, 59),

            accent: Color::new(122, 162, 247),
        }
    }

    /// Get scheme by name
    pub fn by_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "solarized-dark" | "solarized_dark" | "solarized" => Self::solarized_dark(),
            "dracula" => Self::dracula(),
            "gruvbox-dark" | "gruvbox_dark" | "gruvbox" => Self::gruvbox_dark(),
            "tokyo-night" | "tokyo_night" | "tokyonight" => Self::tokyo_night(),
            _ => Self::crt(),
        }
    }

    /// List available schemes
    pub fn list() -> Vec<&'static str> {
        vec![
            "crt",
            "solarized-dark",
            "dracula",
            "gruvbox-dark",
            "tokyo-night",
        ]
    }

    /// True when `name` resolves to a known scheme
    pub fn is_known(name: &str) -> bool {
        let lower = name.to_lowercase();
        Self::list().contains(&lower.as_str())
            || matches!(
                lower.as_str(),
                "solarized"
                    | "solarized_dark"
                    | "gruvbox"
                    | "gruvbox_dark"
                    | "tokyo_night"
                    | "tokyonight"
            )
    }
}

// Get home directory
fn home_dir() -> Option<PathBuf> {
    std::env::var_os("HOME")
        .or_else(|| std::env::var_os("USERPROFILE"))
        .map(PathBuf::from)
}
