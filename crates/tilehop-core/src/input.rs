use serde::{Deserialize, Serialize};

/// One of the five controls the core understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Control {
    Left,
    Right,
    Up,
    Down,
    Action,
}

impl Control {
    /// Map a keyboard key name to a control.
    ///
    /// Arrow keys and WASD move, Shift is an alias for down, and Space is the
    /// action key. Unknown keys map to `None`.
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "ArrowLeft" | "a" => Some(Control::Left),
            "ArrowRight" | "d" => Some(Control::Right),
            "ArrowUp" | "w" => Some(Control::Up),
            "ArrowDown" | "s" | "Shift" => Some(Control::Down),
            " " | "Space" => Some(Control::Action),
            _ => None,
        }
    }
}

/// A discrete press or release from the input collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InputEvent {
    Press(Control),
    Release(Control),
}

/// Latched control flags. The frame pass reads a copy of this at the start of
/// every tick.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
    pub action: bool,
}

impl InputState {
    pub fn apply(&mut self, event: InputEvent) {
        match event {
            InputEvent::Press(control) => self.set(control, true),
            InputEvent::Release(control) => self.set(control, false),
        }
    }

    pub fn set(&mut self, control: Control, pressed: bool) {
        let flag = match control {
            Control::Left => &mut self.left,
            Control::Right => &mut self.right,
            Control::Up => &mut self.up,
            Control::Down => &mut self.down,
            Control::Action => &mut self.action,
        };
        *flag = pressed;
    }

    pub fn is_pressed(&self, control: Control) -> bool {
        match control {
            Control::Left => self.left,
            Control::Right => self.right,
            Control::Up => self.up,
            Control::Down => self.down,
            Control::Action => self.action,
        }
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn any(&self) -> bool {
        self.left || self.right || self.up || self.down || self.action
    }
}
