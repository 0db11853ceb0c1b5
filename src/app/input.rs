use std::collections::HashSet;

use glam::Vec2;
use winit::event::{ElementState, MouseButton};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Per-frame snapshot of keyboard and mouse state.
///
/// Window events accumulate into this tracker during the poll phase; edge
/// sets (just pressed / just released) and the cursor delta are cleared by
/// [`end_frame`](Self::end_frame) once the frame has consumed them. OS
/// key-repeat events keep a key in the down set but never re-enter the
/// edge sets.
#[derive(Default, Debug, Clone)]
pub struct Input {
    /// Current cursor position in physical pixels.
    pub cursor_position: Vec2,
    /// Cursor displacement accumulated since the last frame.
    pub cursor_delta: Vec2,
    /// Window size in physical pixels.
    pub screen_size: Vec2,

    keys_down: HashSet<KeyCode>,
    keys_pressed: HashSet<KeyCode>,
    buttons_down: HashSet<MouseButton>,
    buttons_pressed: HashSet<MouseButton>,
    buttons_released: HashSet<MouseButton>,
}

impl Input {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    // ========================================================================
    // Event intake
    // ========================================================================

    pub fn handle_key(&mut self, physical_key: PhysicalKey, state: ElementState, repeat: bool) {
        let PhysicalKey::Code(code) = physical_key else {
            return;
        };

        match state {
            ElementState::Pressed => {
                if !repeat {
                    self.keys_pressed.insert(code);
                }
                self.keys_down.insert(code);
            }
            ElementState::Released => {
                self.keys_down.remove(&code);
            }
        }
    }

    pub fn handle_mouse_button(&mut self, state: ElementState, button: MouseButton) {
        match state {
            ElementState::Pressed => {
                self.buttons_pressed.insert(button);
                self.buttons_down.insert(button);
            }
            ElementState::Released => {
                self.buttons_down.remove(&button);
                self.buttons_released.insert(button);
            }
        }
    }

    pub fn handle_cursor_move(&mut self, x: f64, y: f64) {
        let new_position = Vec2::new(x as f32, y as f32);
        // The very first event has no previous position to diff against.
        if self.cursor_position != Vec2::ZERO {
            self.cursor_delta += new_position - self.cursor_position;
        }
        self.cursor_position = new_position;
    }

    pub fn handle_resize(&mut self, width: u32, height: u32) {
        self.screen_size = Vec2::new(width as f32, height as f32);
    }

    /// Clears edge state at the end of the frame; held keys and buttons
    /// persist.
    pub fn end_frame(&mut self) {
        self.keys_pressed.clear();
        self.buttons_pressed.clear();
        self.buttons_released.clear();
        self.cursor_delta = Vec2::ZERO;
    }

    // ========================================================================
    // Queries
    // ========================================================================

    #[must_use]
    pub fn is_key_down(&self, key: KeyCode) -> bool {
        self.keys_down.contains(&key)
    }

    /// `true` only on the frame the key went down (repeats excluded).
    #[must_use]
    pub fn was_key_pressed(&self, key: KeyCode) -> bool {
        self.keys_pressed.contains(&key)
    }

    #[must_use]
    pub fn is_button_down(&self, button: MouseButton) -> bool {
        self.buttons_down.contains(&button)
    }

    #[must_use]
    pub fn was_button_pressed(&self, button: MouseButton) -> bool {
        self.buttons_pressed.contains(&button)
    }

    #[must_use]
    pub fn was_button_released(&self, button: MouseButton) -> bool {
        self.buttons_released.contains(&button)
    }
}
