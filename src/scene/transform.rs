use glam::{EulerRot, Mat4, Quat, Vec3};

/// Local spatial state of a scene node.
///
/// Holds position, rotation (Euler angles in radians) and scale as plain
/// vectors. The transformation matrix is derived on demand from those three
/// vectors and never cached, so readers can never observe a stale matrix.
///
/// Rotation is applied first (the object spins about its own origin), then
/// translation, then scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Vec3,
    pub scale: Vec3,
}

impl Transform {
    #[must_use]
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    #[must_use]
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            ..Self::new()
        }
    }

    // ========================================================================
    // Single-axis mutators
    // ========================================================================

    pub fn translate_x(&mut self, x: f32) {
        self.position.x += x;
    }

    pub fn translate_y(&mut self, y: f32) {
        self.position.y += y;
    }

    pub fn translate_z(&mut self, z: f32) {
        self.position.z += z;
    }

    pub fn rotate_x(&mut self, x: f32) {
        self.rotation.x += x;
    }

    pub fn rotate_y(&mut self, y: f32) {
        self.rotation.y += y;
    }

    pub fn rotate_z(&mut self, z: f32) {
        self.rotation.z += z;
    }

    pub fn scale_x(&mut self, x: f32) {
        self.scale.x += x;
    }

    pub fn scale_y(&mut self, y: f32) {
        self.scale.y += y;
    }

    pub fn scale_z(&mut self, z: f32) {
        self.scale.z += z;
    }

    // ========================================================================
    // Derived matrix
    // ========================================================================

    /// Rotation as a quaternion: yaw about Y, pitch about X, roll about Z.
    #[must_use]
    pub fn rotation_quat(&self) -> Quat {
        Quat::from_euler(EulerRot::YXZ, self.rotation.y, self.rotation.x, self.rotation.z)
    }

    /// Computes the local transformation matrix from the three vectors.
    ///
    /// Column-vector composition `scale * translation * rotation`, so the
    /// rotation is applied first.
    #[must_use]
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_scale(self.scale)
            * Mat4::from_translation(self.position)
            * Mat4::from_quat(self.rotation_quat())
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::new()
    }
}
