//! Light and dark colour palettes.
//!
//! A `ThemeContext` is built once from config and handed to whatever renders;
//! the only mutation is `toggle()`.

use crate::Config;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

/// Named colours as hex strings
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub primary: &'static str,
    pub primary_light: &'static str,
    pub secondary: &'static str,
    pub accent: &'static str,
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_light: &'static str,
    pub warning: &'static str,
    pub error: &'static str,
}

pub const LIGHT: Palette = Palette {
    primary: "#4CAF50",
    primary_light: "#81C784",
    secondary: "#E8F5E9",
    accent: "#FF8A65",
    background: "#FAFFFE",
    surface: "#FFFFFF",
    text: "#2E3A2F",
    text_light: "#6B7B6C",
    warning: "#FFC107",
    error: "#F44336",
};

pub const DARK: Palette = Palette {
    primary: "#6c63ff",
    primary_light: "#8b82ff",
    secondary: "#16213e",
    accent: "#ff6b6b",
    background: "#0f0f23",
    surface: "#1e1e2d",
    text: "#e6e6fa",
    text_light: "#a0a0c0",
    warning: "#ffd93d",
    error: "#ff6b6b",
};

#[derive(Clone, Debug, Default)]
pub struct ThemeContext {
    mode: ThemeMode,
}

impl ThemeContext {
    pub fn new(mode: ThemeMode) -> Self {
        Self { mode }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(if config.ui.dark_mode {
            ThemeMode::Dark
        } else {
            ThemeMode::Light
        })
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    pub fn is_dark(&self) -> bool {
        self.mode == ThemeMode::Dark
    }

    pub fn palette(&self) -> &'static Palette {
        match self.mode {
            ThemeMode::Light => &LIGHT,
            ThemeMode::Dark => &DARK,
        }
    }

    pub fn toggle(&mut self) {
        self.mode = match self.mode {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        };
        tracing::debug!("Theme switched to {:?}", self.mode);
    }
}
