//! winit event translation into the windowing-agnostic input types.

use deskscene_input::{Key, MouseButton, Scroll};
use winit::event::{MouseButton as WinitButton, MouseScrollDelta};
use winit::keyboard::KeyCode;

pub fn map_key(code: KeyCode) -> Key {
    match code {
        KeyCode::KeyW => Key::W,
        KeyCode::KeyA => Key::A,
        KeyCode::KeyS => Key::S,
        KeyCode::KeyD => Key::D,
        KeyCode::KeyQ => Key::Q,
        KeyCode::KeyE => Key::E,
        KeyCode::KeyP => Key::P,
        KeyCode::Escape => Key::Escape,
        _ => Key::Other,
    }
}

pub fn map_button(button: WinitButton) -> MouseButton {
    match button {
        WinitButton::Left => MouseButton::Left,
        WinitButton::Middle => MouseButton::Middle,
        WinitButton::Right => MouseButton::Right,
        _ => MouseButton::Other,
    }
}

pub fn map_scroll(delta: MouseScrollDelta) -> Scroll {
    match delta {
        MouseScrollDelta::LineDelta(_, y) => Scroll::Lines(y),
        MouseScrollDelta::PixelDelta(pos) => Scroll::Pixels(pos.y),
    }
}
