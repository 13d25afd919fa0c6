use std::path::PathBuf;

use anyhow::Context;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use log::warn;
use serde::{Deserialize, Serialize};

use crate::catalog::Catalog;
use crate::engine::kinematics::KinematicParams;
use crate::engine::layout::LaneParams;
use crate::surface::DEFAULT_UNIT;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub key_bindings: KeyBindings,
    pub kinematics: KinematicParams,
    pub lanes: LaneParams,
    /// Delay before the answers list shows itself after start.
    pub reveal_after_ms: u64,
    /// Target frame rate of the terminal scheduler.
    pub fps: u32,
    /// Canvas units covered by one terminal pixel.
    pub unit: f64,
    /// Optional JSON catalog replacing the built-in object types.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub catalog: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub add_object: String,
    pub remove_object: String,
    pub select_next: String,
    pub select_prev: String,
    pub edit_mass: String,
    pub edit_velocity: String,
    pub toggle_run: String,
    pub reset_all: String,
    pub toggle_quiz: String,
    pub answer: String,
    pub check_answers: String,
    pub clear_answers: String,
    pub reveal_answers: String,
    pub quit: String,
    pub confirm: String,
    pub cancel: String,
    pub move_up: String,
    pub move_down: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        KeyBindings {
            add_object: "a".into(),
            remove_object: "d".into(),
            select_next: "Down".into(),
            select_prev: "Up".into(),
            edit_mass: "m".into(),
            edit_velocity: "v".into(),
            toggle_run: "Space".into(),
            reset_all: "r".into(),
            toggle_quiz: "z".into(),
            answer: "g".into(),
            check_answers: "c".into(),
            clear_answers: "x".into(),
            reveal_answers: "s".into(),
            quit: "q".into(),
            confirm: "Enter".into(),
            cancel: "Esc".into(),
            move_up: "Up".into(),
            move_down: "Down".into(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            key_bindings: KeyBindings::default(),
            kinematics: KinematicParams::default(),
            lanes: LaneParams::default(),
            reveal_after_ms: 30_000,
            fps: 30,
            unit: DEFAULT_UNIT,
            catalog: None,
        }
    }
}

impl AppConfig {
    pub fn load() -> Self {
        let config_path = Self::config_path();
        match std::fs::read_to_string(&config_path) {
            Ok(json) => Self::from_json(&json),
            Err(_) => Self::default(),
        }
    }

    /// Parse a config document, falling back to the defaults when it is
    /// malformed.
    pub fn from_json(json: &str) -> Self {
        match serde_json::from_str(json) {
            Ok(config) => config,
            Err(e) => {
                warn!("invalid config ({e}), using defaults");
                Self::default()
            }
        }
    }

    /// The configured catalog file, or the built-in catalog.
    pub fn load_catalog(&self) -> anyhow::Result<Catalog> {
        let Some(path) = &self.catalog else {
            return Ok(Catalog::default());
        };
        Catalog::from_path(path).with_context(|| format!("Failed to load catalog {}", path.display()))
    }

    fn config_path() -> PathBuf {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        let mut path = PathBuf::from(home);
        path.push(".config");
        path.push("momentum-lab");
        path.push("config.json");
        path
    }
}

/// Check whether a crossterm `KeyEvent` matches a binding string from config.
pub fn matches_binding(binding: &str, event: &KeyEvent) -> bool {
    if let Some(rest) = binding.strip_prefix("Alt-") {
        return event.modifiers.contains(KeyModifiers::ALT) && matches_key(rest, event.code);
    }
    if let Some(rest) = binding.strip_prefix("Ctrl-") {
        return event.modifiers.contains(KeyModifiers::CONTROL) && matches_key(rest, event.code);
    }

    // Plain bindings must not fire on Ctrl or Alt chords.
    if event.modifiers.contains(KeyModifiers::CONTROL)
        || event.modifiers.contains(KeyModifiers::ALT)
    {
        return false;
    }
    matches_key(binding, event.code)
}

fn matches_key(name: &str, code: KeyCode) -> bool {
    match name {
        "Right" => code == KeyCode::Right,
        "Left" => code == KeyCode::Left,
        "Up" => code == KeyCode::Up,
        "Down" => code == KeyCode::Down,
        "Enter" => code == KeyCode::Enter,
        "Esc" => code == KeyCode::Esc,
        "Space" => code == KeyCode::Char(' '),
        "Tab" => code == KeyCode::Tab,
        "Backspace" => code == KeyCode::Backspace,
        "Delete" => code == KeyCode::Delete,
        "Home" => code == KeyCode::Home,
        "End" => code == KeyCode::End,
        s => {
            // "F1" through "F12"
            if let Some(n) = s.strip_prefix('F').and_then(|rest| rest.parse::<u8>().ok()) {
                return code == KeyCode::F(n);
            }
            let mut chars = s.chars();
            match (chars.next(), chars.next()) {
                (Some(c), None) => code == KeyCode::Char(c),
                _ => false,
            }
        }
    }
}
