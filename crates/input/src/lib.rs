//! Input mapping: raw key, pointer-motion and scroll events to camera input and actions.
//!
//! # Invariants
//! - Independent of the windowing library; the shell translates its own key codes.
//! - A discrete action fires once per physical press.

pub mod action;
pub mod state;

pub use action::{Action, Key, MouseButton, describe_button};
pub use state::{InputState, Scroll};

pub fn crate_info() -> &'static str {
    "deskscene-input v0.1.0"
}
