use crate::action::Action;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Physical key name to action map.
///
/// Key names follow winit's `KeyCode` debug names (`KeyW`, `Escape`, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeyBindings {
    keys: BTreeMap<String, Action>,
}

impl Default for KeyBindings {
    fn default() -> Self {
        let keys = [
            ("KeyW", Action::Forward),
            ("KeyS", Action::Backward),
            ("KeyA", Action::Left),
            ("KeyD", Action::Right),
            ("KeyQ", Action::Up),
            ("KeyE", Action::Down),
            ("Escape", Action::Quit),
            ("KeyO", Action::EnableOrtho),
            ("KeyP", Action::EnablePerspective),
        ]
        .into_iter()
        .map(|(k, a)| (k.to_string(), a))
        .collect();
        Self { keys }
    }
}

impl KeyBindings {
    /// Bindings with no keys at all.
    pub fn empty() -> Self {
        Self {
            keys: BTreeMap::new(),
        }
    }

    pub fn bind(&mut self, key: impl Into<String>, action: Action) {
        self.keys.insert(key.into(), action);
    }

    pub fn action_for(&self, key: &str) -> Option<Action> {
        self.keys.get(key).copied()
    }

    /// Actions with no key bound to them.
    pub fn unbound_actions(&self) -> Vec<Action> {
        Action::ALL
            .into_iter()
            .filter(|a| !self.keys.values().any(|b| b == a))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Action)> {
        self.keys.iter().map(|(k, a)| (k.as_str(), *a))
    }
}
