//! Pointer, keyboard and wheel input
//!
//! Input is captured elsewhere and fed in as plain values: a pointer-lock
//! flag, mouse deltas in pixels, key names as reported by the platform, and
//! wheel deltas. Everything is ignored while the pointer is not locked.

use std::collections::HashSet;
use std::str::FromStr;

use super::ViewState;
use crate::coordinates::cartesian::Cartesian3;
use crate::quaternion::Quaternion;
use crate::SkyViewError;

/// A key the viewer responds to while it is held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    /// Roll counter-clockwise
    Comma,
    /// Roll clockwise
    Period,
    ArrowUp,
    ArrowDown,
    ArrowLeft,
    ArrowRight,
    /// Zoom in
    Z,
    /// Zoom out
    X,
    /// Step north in declination
    W,
    /// Step south in declination
    S,
    /// Step west in right ascension
    A,
    /// Step east in right ascension
    D,
}

impl Key {
    /// Parse a platform key name
    ///
    /// Shifted punctuation maps to its unshifted key and letters are matched
    /// case-insensitively, so holding shift never changes the action.
    pub fn from_key_name(name: &str) -> Option<Key> {
        match normalize_key_name(name).as_str() {
            "," => Some(Key::Comma),
            "." => Some(Key::Period),
            "arrowup" => Some(Key::ArrowUp),
            "arrowdown" => Some(Key::ArrowDown),
            "arrowleft" => Some(Key::ArrowLeft),
            "arrowright" => Some(Key::ArrowRight),
            "z" => Some(Key::Z),
            "x" => Some(Key::X),
            "w" => Some(Key::W),
            "s" => Some(Key::S),
            "a" => Some(Key::A),
            "d" => Some(Key::D),
            _ => None,
        }
    }
}

impl FromStr for Key {
    type Err = SkyViewError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Key::from_key_name(s).ok_or_else(|| SkyViewError::ParseError(format!("unknown key {:?}", s)))
    }
}

fn normalize_key_name(name: &str) -> String {
    name.replace('<', ",").replace('>', ".").to_lowercase()
}

/// Pointer-lock state and the set of held keys
#[derive(Debug, Clone, Default)]
pub struct InputState {
    pointer_locked: bool,
    held: HashSet<Key>,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pointer_locked(&self) -> bool {
        self.pointer_locked
    }

    pub fn set_pointer_locked(&mut self, locked: bool) {
        self.pointer_locked = locked;
    }

    /// Record a key going down; unknown keys are ignored
    pub fn key_down(&mut self, name: &str) {
        if let Some(key) = Key::from_key_name(name) {
            self.held.insert(key);
        }
    }

    /// Record a key going up
    pub fn key_up(&mut self, name: &str) {
        if let Some(key) = Key::from_key_name(name) {
            self.held.remove(&key);
        }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// +1 when only `positive` is held, -1 when only `negative` is, else 0
    pub fn axis(&self, positive: Key, negative: Key) -> f64 {
        match (self.is_held(positive), self.is_held(negative)) {
            (true, false) => 1.0,
            (false, true) => -1.0,
            _ => 0.0,
        }
    }

    /// Apply one frame's worth of held-key movement to the view
    pub fn apply_held_keys(&self, view: &mut ViewState) {
        if !self.pointer_locked {
            return;
        }
        let scale = key_step(view);

        let roll = self.axis(Key::Comma, Key::Period);
        if roll != 0.0 {
            view.rotate_local(&Quaternion::from_axis_angle(
                &Cartesian3::new(0.0, 0.0, 1.0),
                roll * scale,
            ));
        }

        let pitch = self.axis(Key::ArrowDown, Key::ArrowUp);
        if pitch != 0.0 {
            view.rotate_local(&Quaternion::from_axis_angle(
                &Cartesian3::new(1.0, 0.0, 0.0),
                pitch * scale,
            ));
        }

        let yaw = self.axis(Key::ArrowLeft, Key::ArrowRight);
        if yaw != 0.0 {
            view.rotate_local(&Quaternion::from_axis_angle(
                &Cartesian3::new(0.0, 1.0, 0.0),
                yaw * scale,
            ));
        }

        match self.axis(Key::Z, Key::X) {
            z if z > 0.0 => view.zoom_by(1.0 / view.config().key_zoom_scale),
            z if z < 0.0 => view.zoom_by(view.config().key_zoom_scale),
            _ => {}
        }

        let north = self.axis(Key::W, Key::S);
        if north != 0.0 {
            view.step_dec(north * scale);
        }

        let east = self.axis(Key::D, Key::A);
        if east != 0.0 {
            view.step_ra(east * scale);
        }
    }

    /// Handle a discrete key press
    ///
    /// `0` returns the view to its home orientation.
    pub fn key_press(&self, name: &str, view: &mut ViewState) {
        if self.pointer_locked && name == "0" {
            view.reset_orientation();
        }
    }

    /// Turn the view by a mouse movement of `dx`, `dy` pixels
    pub fn apply_mouse_move(&self, dx: f64, dy: f64, reversed: bool, view: &mut ViewState) {
        if !self.pointer_locked {
            return;
        }
        let sign = if reversed { -1.0 } else { 1.0 };
        let scale = view.config().movement_scale * view.zoom();
        let pitch =
            Quaternion::from_axis_angle(&Cartesian3::new(1.0, 0.0, 0.0), sign * dy / scale);
        let yaw =
            Quaternion::from_axis_angle(&Cartesian3::new(0.0, 1.0, 0.0), -sign * dx / scale);
        view.rotate_local(&pitch.multiply(&yaw));
    }

    /// Zoom by one wheel notch; negative `delta_y` zooms in
    pub fn apply_wheel(&self, delta_y: f64, view: &mut ViewState) {
        if !self.pointer_locked || delta_y == 0.0 {
            return;
        }
        let wheel_scale = view.config().wheel_scale;
        let factor = if delta_y < 0.0 {
            1.0 / wheel_scale
        } else {
            wheel_scale
        };
        view.zoom_by(factor);
    }
}

/// Angle moved per frame by a held key at the current zoom
pub fn key_step(view: &ViewState) -> f64 {
    1.0 / view.config().key_movement_scale / view.zoom()
}
