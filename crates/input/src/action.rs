use serde::{Deserialize, Serialize};

/// A discrete command the window can report as pressed or released.
///
/// The set is fixed; key bindings map physical keys onto it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Action {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
    /// Request the window to close.
    Quit,
    /// Switch to the fixed orthographic volume.
    EnableOrtho,
    /// Switch back to perspective.
    EnablePerspective,
}

/// Camera-relative movement direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Forward,
    Backward,
    Left,
    Right,
    Up,
    Down,
}

impl Action {
    pub const ALL: [Action; 9] = [
        Action::Forward,
        Action::Backward,
        Action::Left,
        Action::Right,
        Action::Up,
        Action::Down,
        Action::Quit,
        Action::EnableOrtho,
        Action::EnablePerspective,
    ];

    /// Movement direction for the six movement actions.
    pub fn direction(self) -> Option<Direction> {
        match self {
            Action::Forward => Some(Direction::Forward),
            Action::Backward => Some(Direction::Backward),
            Action::Left => Some(Direction::Left),
            Action::Right => Some(Direction::Right),
            Action::Up => Some(Direction::Up),
            Action::Down => Some(Direction::Down),
            Action::Quit | Action::EnableOrtho | Action::EnablePerspective => None,
        }
    }
}
