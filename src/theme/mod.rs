//! Light/dark theme preference shared between views
//!
//! The preference lives in an explicit [`ThemeContext`] handed to whoever
//! renders pages. Changes are published on a broadcast bus so other open
//! views can follow along.

use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tokio::sync::broadcast;

/// Topic carried by every theme notification
pub const THEME_TOPIC: &str = "theme";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemeMode {
    #[default]
    Light,
    Dark,
}

impl ThemeMode {
    pub fn toggled(self) -> Self {
        match self {
            ThemeMode::Light => ThemeMode::Dark,
            ThemeMode::Dark => ThemeMode::Light,
        }
    }
}

impl FromStr for ThemeMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(ThemeMode::Light),
            "dark" => Ok(ThemeMode::Dark),
            other => Err(format!("unknown theme mode: {}", other)),
        }
    }
}

/// Notification sent when the theme changes
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ThemeEvent {
    pub topic: &'static str,
    pub mode: ThemeMode,
}

/// Current theme plus the bus its changes are announced on
#[derive(Debug, Clone)]
pub struct ThemeContext {
    mode: ThemeMode,
    bus: broadcast::Sender<ThemeEvent>,
}

impl ThemeContext {
    pub fn new(mode: ThemeMode) -> Self {
        let (bus, _) = broadcast::channel(16);
        Self { mode, bus }
    }

    /// A context for another view that shares this one's bus
    pub fn attach(&self) -> Self {
        Self {
            mode: self.mode,
            bus: self.bus.clone(),
        }
    }

    pub fn mode(&self) -> ThemeMode {
        self.mode
    }

    /// Change the theme and notify subscribers; unchanged modes are not announced
    pub fn set(&mut self, mode: ThemeMode) {
        if self.mode == mode {
            return;
        }
        self.mode = mode;
        // No subscribers is fine
        let _ = self.bus.send(ThemeEvent {
            topic: THEME_TOPIC,
            mode,
        });
    }

    pub fn toggle(&mut self) -> ThemeMode {
        self.set(self.mode.toggled());
        self.mode
    }

    pub fn subscribe(&self) -> broadcast::Receiver<ThemeEvent> {
        self.bus.subscribe()
    }

    /// Apply a change announced by another view without re-broadcasting it
    pub fn apply(&mut self, event: &ThemeEvent) {
        if event.topic == THEME_TOPIC {
            self.mode = event.mode;
        }
    }
}

impl Default for ThemeContext {
    fn default() -> Self {
        Self::new(ThemeMode::default())
    }
}
