use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Quat, Vec2, Vec3};
use winit::event::MouseButton;
use winit::keyboard::KeyCode;

use crate::app::input::Input;
use crate::app::window::WindowSurface;

/// Projection parameters, fixed at camera construction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Perspective {
        /// Vertical field of view in radians.
        fov_y: f32,
        aspect: f32,
        near: f32,
        far: f32,
    },
    Orthographic {
        left: f32,
        right: f32,
        bottom: f32,
        top: f32,
        near: f32,
        far: f32,
    },
}

impl Projection {
    /// Builds the projection matrix (wgpu depth range 0..1).
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Self::Perspective {
                fov_y,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov_y, aspect, near, far),
            Self::Orthographic {
                left,
                right,
                bottom,
                top,
                near,
                far,
            } => Mat4::orthographic_rh(left, right, bottom, top, near, far),
        }
    }
}

/// Free camera with an orthonormal basis and a look-at view matrix.
///
/// The projection matrix is computed once at construction and never changes.
/// The view matrix is rebuilt by [`update_view_matrix`](Self::update_view_matrix)
/// whenever position or orientation change; that call also re-orthogonalizes
/// the basis (normalize forward, re-derive right against world up, re-derive
/// up), so drift from accumulated drag input cannot build up.
#[derive(Debug, Clone, Copy)]
pub struct Camera {
    pub position: Vec3,
    pub forward: Vec3,
    pub up: Vec3,
    pub right: Vec3,

    projection: Mat4,
    view: Mat4,
}

impl Camera {
    #[must_use]
    pub fn new(projection: Projection, position: Vec3) -> Self {
        let mut camera = Self {
            position,
            forward: Vec3::NEG_Z,
            up: Vec3::Y,
            right: Vec3::X,
            projection: projection.matrix(),
            view: Mat4::IDENTITY,
        };
        camera.update_view_matrix();
        camera
    }

    #[inline]
    #[must_use]
    pub fn projection(&self) -> Mat4 {
        self.projection
    }

    #[inline]
    #[must_use]
    pub fn view(&self) -> Mat4 {
        self.view
    }

    #[inline]
    #[must_use]
    pub fn view_projection(&self) -> Mat4 {
        self.projection * self.view
    }

    /// Rebuilds the orthonormal basis and the look-at view matrix.
    pub fn update_view_matrix(&mut self) {
        self.forward = self.forward.normalize();
        self.right = self.forward.cross(Vec3::Y).normalize();
        self.up = self.right.cross(self.forward);

        self.view = Mat4::look_at_rh(self.position, self.position + self.forward, self.up);
    }
}

/// Pointer-drag and keyboard control state for a [`Camera`].
///
/// Left drag orbits (yaw/pitch), middle drag pans along the camera plane,
/// right drag dollies along the view direction. While a drag is active the
/// cursor is grabbed and warped back to the drag origin after every applied
/// step, so dragging is not bounded by the window edges.
#[derive(Debug, Clone, Copy)]
pub struct CameraController {
    /// Radians (or world units) per pixel of drag.
    pub sensitivity: f32,
    /// Keyboard fly speed in units per second.
    pub base_speed: f32,
    /// Multiplier applied while LeftShift is held.
    pub speed_modifier: f32,

    yaw: f32,
    pitch: f32,
    drag: Option<DragState>,
}

#[derive(Debug, Clone, Copy)]
struct DragState {
    button: MouseButton,
    start: Vec2,
}

/// Keep the pitch strictly inside +-PI/2 to avoid flipping over the pole.
const PITCH_LIMIT: f32 = FRAC_PI_2 - 0.01;

impl CameraController {
    #[must_use]
    pub fn new() -> Self {
        Self {
            sensitivity: 0.002,
            base_speed: 3.5,
            speed_modifier: 2.5,
            yaw: 0.0,
            pitch: 0.0,
            drag: None,
        }
    }

    #[inline]
    #[must_use]
    pub fn yaw(&self) -> f32 {
        self.yaw
    }

    #[inline]
    #[must_use]
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Consumes one frame of input and applies it to `camera`.
    pub fn update(
        &mut self,
        camera: &mut Camera,
        input: &mut Input,
        window: &mut dyn WindowSurface,
        dt: f32,
    ) {
        self.apply_keyboard(camera, input, dt);
        self.apply_drag(camera, input, window);
        camera.update_view_matrix();
    }

    fn apply_keyboard(&self, camera: &mut Camera, input: &Input, dt: f32) {
        let mut speed = self.base_speed * dt;
        if input.is_key_down(KeyCode::ShiftLeft) {
            speed *= self.speed_modifier;
        }

        let mut translation = Vec3::ZERO;
        if input.is_key_down(KeyCode::KeyW) {
            translation += camera.forward * speed;
        }
        if input.is_key_down(KeyCode::KeyS) {
            translation -= camera.forward * speed;
        }
        if input.is_key_down(KeyCode::KeyD) {
            translation += camera.right * speed;
        }
        if input.is_key_down(KeyCode::KeyA) {
            translation -= camera.right * speed;
        }
        if input.is_key_down(KeyCode::Space) {
            translation += Vec3::Y * speed;
        }
        if input.is_key_down(KeyCode::ControlLeft) {
            translation -= Vec3::Y * speed;
        }

        camera.position += translation;
    }

    fn apply_drag(&mut self, camera: &mut Camera, input: &mut Input, window: &mut dyn WindowSurface) {
        // A new press takes over the drag; the start position anchors both
        // the delta computation and the cursor warp.
        for button in [MouseButton::Left, MouseButton::Middle, MouseButton::Right] {
            if input.was_button_pressed(button) {
                self.drag = Some(DragState {
                    button,
                    start: input.cursor_position,
                });
                window.set_cursor_grab(true);
            }
        }

        let Some(drag) = self.drag else { return };

        if input.was_button_released(drag.button) {
            window.set_cursor_grab(false);
            self.drag = None;
            return;
        }

        let delta = input.cursor_position - drag.start;
        if delta == Vec2::ZERO {
            return;
        }

        window.warp_cursor(drag.start);
        input.cursor_position = drag.start;

        match drag.button {
            MouseButton::Left => {
                self.yaw += -delta.x * self.sensitivity;
                self.pitch += -delta.y * self.sensitivity;
                self.pitch = self.pitch.clamp(-PITCH_LIMIT, PITCH_LIMIT);

                let rotation = Quat::from_euler(glam::EulerRot::YXZ, self.yaw, self.pitch, 0.0);
                camera.forward = (rotation * Vec3::NEG_Z).normalize();
                camera.right = camera.forward.cross(Vec3::Y).normalize();
                camera.up = camera.right.cross(camera.forward);
            }
            MouseButton::Middle => {
                camera.position += -camera.right * delta.x * self.sensitivity;
                camera.position += camera.up * delta.y * self.sensitivity;
            }
            MouseButton::Right => {
                camera.position += -camera.forward * (-delta.x + delta.y) * self.sensitivity;
            }
            _ => {}
        }
    }
}

impl Default for CameraController {
    fn default() -> Self {
        Self::new()
    }
}

/// Camera payload of a scene node: the camera model plus its controller.
#[derive(Debug, Clone, Copy)]
pub struct CameraRig {
    pub camera: Camera,
    pub controller: CameraController,
}

impl CameraRig {
    #[must_use]
    pub fn new(camera: Camera) -> Self {
        Self {
            camera,
            controller: CameraController::new(),
        }
    }
}
