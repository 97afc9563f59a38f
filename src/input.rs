//! Per-frame mouse and keyboard state.
//!
//! [`Input`] separates instantaneous events (button released this frame) from
//! continuous state (button held). The window loop feeds it raw winit events
//! through [`Input::handle_event`]; tests and headless drivers use
//! [`press`](Input::press), [`release`](Input::release),
//! [`move_cursor`](Input::move_cursor) and the key equivalents instead.
//!
//! ```ignore
//! if input.mouse_held(MouseButton::Left) {
//!     if let Some(cursor) = input.cursor() {
//!         spawn_at(cursor);
//!     }
//! }
//! if input.clicked() {
//!     next_effect();
//! }
//! input.end_frame();
//! ```

use glam::Vec2;
use std::collections::HashSet;
use winit::event::{ElementState, MouseButton as WinitMouseButton, WindowEvent};
use winit::keyboard::{KeyCode as WinitKeyCode, PhysicalKey};

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

impl MouseButton {
    fn from_winit(button: WinitMouseButton) -> Option<Self> {
        match button {
            WinitMouseButton::Left => Some(MouseButton::Left),
            WinitMouseButton::Right => Some(MouseButton::Right),
            WinitMouseButton::Middle => Some(MouseButton::Middle),
            _ => None,
        }
    }
}

/// Keyboard keys the sandbox can react to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    // Letters
    A, B, C, D, E, F, G, H, I, J, K, L, M,
    N, O, P, Q, R, S, T, U, V, W, X, Y, Z,

    // Numbers
    Key0, Key1, Key2, Key3, Key4, Key5, Key6, Key7, Key8, Key9,

    Space, Enter, Escape, Tab, Backspace,

    Other,
}

impl KeyCode {
    /// The digit on a number key.
    pub fn digit(&self) -> Option<u8> {
        let digit = match self {
            KeyCode::Key0 => 0,
            KeyCode::Key1 => 1,
            KeyCode::Key2 => 2,
            KeyCode::Key3 => 3,
            KeyCode::Key4 => 4,
            KeyCode::Key5 => 5,
            KeyCode::Key6 => 6,
            KeyCode::Key7 => 7,
            KeyCode::Key8 => 8,
            KeyCode::Key9 => 9,
            _ => return None,
        };
        Some(digit)
    }
}

impl From<WinitKeyCode> for KeyCode {
    fn from(key: WinitKeyCode) -> Self {
        match key {
            WinitKeyCode::KeyA => KeyCode::A,
            WinitKeyCode::KeyB => KeyCode::B,
            WinitKeyCode::KeyC => KeyCode::C,
            WinitKeyCode::KeyD => KeyCode::D,
            WinitKeyCode::KeyE => KeyCode::E,
            WinitKeyCode::KeyF => KeyCode::F,
            WinitKeyCode::KeyG => KeyCode::G,
            WinitKeyCode::KeyH => KeyCode::H,
            WinitKeyCode::KeyI => KeyCode::I,
            WinitKeyCode::KeyJ => KeyCode::J,
            WinitKeyCode::KeyK => KeyCode::K,
            WinitKeyCode::KeyL => KeyCode::L,
            WinitKeyCode::KeyM => KeyCode::M,
            WinitKeyCode::KeyN => KeyCode::N,
            WinitKeyCode::KeyO => KeyCode::O,
            WinitKeyCode::KeyP => KeyCode::P,
            WinitKeyCode::KeyQ => KeyCode::Q,
            WinitKeyCode::KeyR => KeyCode::R,
            WinitKeyCode::KeyS => KeyCode::S,
            WinitKeyCode::KeyT => KeyCode::T,
            WinitKeyCode::KeyU => KeyCode::U,
            WinitKeyCode::KeyV => KeyCode::V,
            WinitKeyCode::KeyW => KeyCode::W,
            WinitKeyCode::KeyX => KeyCode::X,
            WinitKeyCode::KeyY => KeyCode::Y,
            WinitKeyCode::KeyZ => KeyCode::Z,

            WinitKeyCode::Digit0 | WinitKeyCode::Numpad0 => KeyCode::Key0,
            WinitKeyCode::Digit1 | WinitKeyCode::Numpad1 => KeyCode::Key1,
            WinitKeyCode::Digit2 | WinitKeyCode::Numpad2 => KeyCode::Key2,
            WinitKeyCode::Digit3 | WinitKeyCode::Numpad3 => KeyCode::Key3,
            WinitKeyCode::Digit4 | WinitKeyCode::Numpad4 => KeyCode::Key4,
            WinitKeyCode::Digit5 | WinitKeyCode::Numpad5 => KeyCode::Key5,
            WinitKeyCode::Digit6 | WinitKeyCode::Numpad6 => KeyCode::Key6,
            WinitKeyCode::Digit7 | WinitKeyCode::Numpad7 => KeyCode::Key7,
            WinitKeyCode::Digit8 | WinitKeyCode::Numpad8 => KeyCode::Key8,
            WinitKeyCode::Digit9 | WinitKeyCode::Numpad9 => KeyCode::Key9,

            WinitKeyCode::Space => KeyCode::Space,
            WinitKeyCode::Enter | WinitKeyCode::NumpadEnter => KeyCode::Enter,
            WinitKeyCode::Escape => KeyCode::Escape,
            WinitKeyCode::Tab => KeyCode::Tab,
            WinitKeyCode::Backspace => KeyCode::Backspace,

            _ => KeyCode::Other,
        }
    }
}

/// Input state tracking for keyboard and mouse.
#[derive(Debug, Default, Clone)]
pub struct Input {
    keys_held: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    keys_released: HashSet<KeyCode>,

    mouse_held: HashSet<MouseButton>,
    mouse_pressed: HashSet<MouseButton>,
    mouse_released: HashSet<MouseButton>,

    // None until the pointer first moves over the window
    cursor: Option<Vec2>,
}

impl Input {
    pub fn new() -> Self {
        Self::default()
    }

    // ========== Key Queries ==========

    /// Check if a key was pressed this frame (just went down).
    pub fn key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    /// Check if a key is currently held down.
    pub fn key_held(&self, key: KeyCode) -> bool {
        self.keys_held.contains(&key)
    }

    /// Check if a key was released this frame (just went up).
    pub fn key_released(&self, key: KeyCode) -> bool {
        self.keys_released.contains(&key)
    }

    /// Keys pressed this frame, in no particular order.
    pub fn keys_pressed(&self) -> impl Iterator<Item = KeyCode> + '_ {
        self.keys_pressed.iter().copied()
    }

    // ========== Mouse Queries ==========

    /// Check if a mouse button was pressed this frame.
    pub fn mouse_pressed(&self, button: MouseButton) -> bool {
        self.mouse_pressed.contains(&button)
    }

    /// Check if a mouse button is currently held down.
    pub fn mouse_held(&self, button: MouseButton) -> bool {
        self.mouse_held.contains(&button)
    }

    /// Check if a mouse button was released this frame.
    pub fn mouse_released(&self, button: MouseButton) -> bool {
        self.mouse_released.contains(&button)
    }

    /// The left button went up this frame.
    pub fn clicked(&self) -> bool {
        self.mouse_released(MouseButton::Left)
    }

    /// Cursor position in window pixels, origin top-left.
    pub fn cursor(&self) -> Option<Vec2> {
        self.cursor
    }

    // ========== State Changes ==========

    /// Clear per-frame events. Call once after each frame has been stepped.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.keys_released.clear();
        self.mouse_pressed.clear();
        self.mouse_released.clear();
    }

    pub fn press(&mut self, button: MouseButton) {
        if self.mouse_held.insert(button) {
            self.mouse_pressed.insert(button);
        }
    }

    pub fn release(&mut self, button: MouseButton) {
        if self.mouse_held.remove(&button) {
            self.mouse_released.insert(button);
        }
    }

    pub fn move_cursor(&mut self, position: Vec2) {
        self.cursor = Some(position);
    }

    pub fn press_key(&mut self, key: KeyCode) {
        // Only the first press counts; held keys auto-repeat
        if self.keys_held.insert(key) {
            self.keys_pressed.insert(key);
        }
    }

    pub fn release_key(&mut self, key: KeyCode) {
        self.keys_held.remove(&key);
        self.keys_released.insert(key);
    }

    /// Forget everything held without reporting any releases.
    pub fn lose_focus(&mut self) {
        self.mouse_held.clear();
        self.keys_held.clear();
    }

    /// Process a winit window event.
    pub fn handle_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::KeyboardInput { event, .. } => {
                if let PhysicalKey::Code(code) = event.physical_key {
                    let key = KeyCode::from(code);
                    match event.state {
                        ElementState::Pressed => self.press_key(key),
                        ElementState::Released => self.release_key(key),
                    }
                }
            }

            WindowEvent::MouseInput { state, button, .. } => {
                if let Some(button) = MouseButton::from_winit(*button) {
                    match state {
                        ElementState::Pressed => self.press(button),
                        ElementState::Released => self.release(button),
                    }
                }
            }

            WindowEvent::CursorMoved { position, .. } => {
                self.move_cursor(Vec2::new(position.x as f32, position.y as f32));
            }

            // Buttons released outside the window never report a release.
            // Dropping them silently keeps focus loss from reading as a click.
            WindowEvent::Focused(false) => self.lose_focus(),

            _ => {}
        }
    }
}
