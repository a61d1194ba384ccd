use crate::action::{Action, Key};
use deskscene_common::CameraMovement;
use std::collections::HashSet;

/// Scroll units per pixel for touchpads that report pixel deltas.
const PIXELS_PER_LINE: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Scroll {
    Lines(f32),
    Pixels(f64),
}

impl Scroll {
    /// Vertical scroll in line units.
    pub fn lines(self) -> f32 {
        match self {
            Scroll::Lines(y) => y,
            Scroll::Pixels(y) => (y / PIXELS_PER_LINE) as f32,
        }
    }
}

/// Held keys plus the pointer-motion gate.
#[derive(Debug, Default)]
pub struct InputState {
    held: HashSet<Key>,
    motion_seeded: bool,
}

impl InputState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key transition. Returns the discrete action for a fresh press;
    /// auto-repeat never re-triggers it.
    pub fn key(&mut self, key: Key, pressed: bool, repeat: bool) -> Option<Action> {
        if !pressed {
            self.held.remove(&key);
            return None;
        }
        let fresh = self.held.insert(key) && !repeat;
        if fresh { Action::for_key(key) } else { None }
    }

    pub fn is_held(&self, key: Key) -> bool {
        self.held.contains(&key)
    }

    /// Movements for every held movement key.
    pub fn movements(&self) -> impl Iterator<Item = CameraMovement> + '_ {
        self.held.iter().filter_map(|k| k.movement())
    }

    /// Turn a raw pointer delta (y pointing down the screen) into a look
    /// offset with y pointing up.
    ///
    /// The first delta after start or `reset_motion` is swallowed so the
    /// camera does not jump when the pointer is first captured.
    pub fn mouse_motion(&mut self, dx: f64, dy: f64) -> Option<(f32, f32)> {
        if !self.motion_seeded {
            self.motion_seeded = true;
            return None;
        }
        Some((dx as f32, -dy as f32))
    }

    /// Swallow the next motion delta again, e.g. after focus is regained.
    pub fn reset_motion(&mut self) {
        self.motion_seeded = false;
    }

    /// Drop all held keys, e.g. when the window loses focus.
    pub fn release_all(&mut self) {
        self.held.clear();
    }
}
