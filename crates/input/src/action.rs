use deskscene_common::CameraMovement;

/// Keys the scene reacts to. Everything else maps to `Key::Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    W,
    A,
    S,
    D,
    Q,
    E,
    P,
    Escape,
    Other,
}

impl Key {
    /// Continuous movement while the key is held.
    pub fn movement(self) -> Option<CameraMovement> {
        match self {
            Key::W => Some(CameraMovement::Forward),
            Key::S => Some(CameraMovement::Backward),
            Key::A => Some(CameraMovement::Left),
            Key::D => Some(CameraMovement::Right),
            Key::E => Some(CameraMovement::Up),
            Key::Q => Some(CameraMovement::Down),
            _ => None,
        }
    }
}

/// A discrete action produced by a key press.
///
/// The window shell consumes actions, never raw key events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Switch between perspective and orthographic projection.
    ToggleProjection,
    /// Close the window and leave the event loop.
    Quit,
}

impl Action {
    pub fn for_key(key: Key) -> Option<Self> {
        match key {
            Key::P => Some(Action::ToggleProjection),
            Key::Escape => Some(Action::Quit),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MouseButton {
    Left,
    Middle,
    Right,
    Other,
}

/// Console line for a mouse button transition. Buttons have no scene effect.
pub fn describe_button(button: MouseButton, pressed: bool) -> &'static str {
    match (button, pressed) {
        (MouseButton::Left, true) => "left mouse button pressed",
        (MouseButton::Left, false) => "left mouse button released",
        (MouseButton::Middle, true) => "middle mouse button pressed",
        (MouseButton::Middle, false) => "middle mouse button released",
        (MouseButton::Right, true) => "right mouse button pressed",
        (MouseButton::Right, false) => "right mouse button released",
        (MouseButton::Other, _) => "unhandled mouse button event",
    }
}
