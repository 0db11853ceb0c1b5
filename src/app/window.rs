//! Window-side operations the camera drag control depends on.
//!
//! The scene layer never talks to a concrete windowing backend; it sees a
//! [`WindowSurface`] only. The winit-backed implementation lives here, and
//! tests substitute a recording mock.

use glam::Vec2;
use winit::dpi::PhysicalPosition;
use winit::window::{CursorGrabMode, Window};

/// Cursor operations required by drag-based camera control.
pub trait WindowSurface {
    /// Hides and confines the cursor while a drag is active.
    fn set_cursor_grab(&mut self, grab: bool);

    /// Moves the cursor back to `position` (in physical pixels) so a drag
    /// can continue past the window edges.
    fn warp_cursor(&mut self, position: Vec2);
}

/// [`WindowSurface`] backed by a winit window.
pub struct WinitSurface<'a> {
    window: &'a Window,
}

impl<'a> WinitSurface<'a> {
    #[must_use]
    pub fn new(window: &'a Window) -> Self {
        Self { window }
    }
}

impl WindowSurface for WinitSurface<'_> {
    fn set_cursor_grab(&mut self, grab: bool) {
        if grab {
            // Confined is unsupported on some platforms; fall back to Locked.
            if self.window.set_cursor_grab(CursorGrabMode::Confined).is_err()
                && let Err(err) = self.window.set_cursor_grab(CursorGrabMode::Locked)
            {
                log::warn!("cursor grab failed: {err}");
            }
            self.window.set_cursor_visible(false);
        } else {
            if let Err(err) = self.window.set_cursor_grab(CursorGrabMode::None) {
                log::warn!("releasing cursor grab failed: {err}");
            }
            self.window.set_cursor_visible(true);
        }
    }

    fn warp_cursor(&mut self, position: Vec2) {
        let target = PhysicalPosition::new(f64::from(position.x), f64::from(position.y));
        if let Err(err) = self.window.set_cursor_position(target) {
            log::warn!("cursor warp failed: {err}");
        }
    }
}
