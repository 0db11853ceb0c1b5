//! CPU-side mirrors of the shader uniform blocks.
//!
//! Every struct here is `#[repr(C)]` plain-old-data with explicit padding
//! and must stay field-for-field identical to its WGSL counterpart in
//! `shaders/`. The layout tests at the bottom pin the sizes.

use bytemuck::{Pod, Zeroable};
use glam::{Mat4, Vec3, Vec4};

use crate::scene::light::{Light, LightKind};

/// Maximum number of light records uploaded per frame.
pub const MAX_LIGHTS: usize = 256;

pub const LIGHT_KIND_POINT: u32 = 0;
pub const LIGHT_KIND_DIRECTIONAL: u32 = 1;

/// Per-frame camera block (bind group 0, binding 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct CameraUniforms {
    pub projection: Mat4,
    pub view: Mat4,
}

/// Per-pawn model block (bind group 1, binding 0).
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct ModelUniforms {
    pub model: Mat4,
}

/// Light-space matrix for shadow lookup (bind group 0, binding 2), also the
/// camera block of the shadow pass itself.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightSpaceUniforms {
    pub view_projection: Mat4,
}

/// One packed light record.
///
/// `position` carries a homogeneous position (w = 1) for point lights and a
/// homogeneous direction (w = 0) for directional lights, so every record has
/// the same stride and packing is branch-free per field.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct GpuLight {
    pub position: Vec4,
    pub color: Vec4,
    pub kind: u32,
    pub _pad: [u32; 3],
}

/// The full lighting block (bind group 0, binding 1): camera position for
/// specular terms, the active record count, and the fixed-capacity record
/// array.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LightingUniforms {
    pub camera_position: Vec4,
    pub count: u32,
    pub _pad: [u32; 3],
    pub lights: [GpuLight; MAX_LIGHTS],
}

impl Default for LightingUniforms {
    fn default() -> Self {
        Self::zeroed()
    }
}

/// Serializes `lights` into a [`LightingUniforms`] block.
///
/// `count = min(lights.len(), MAX_LIGHTS)`; lights past the capacity are
/// dropped without an error so the upload size stays bounded. Records past
/// `count` are left untouched and must not be read. Input order is
/// preserved.
#[must_use]
pub fn pack_lights(camera_position: Vec3, lights: &[Light]) -> LightingUniforms {
    let mut packed = LightingUniforms {
        camera_position: camera_position.extend(1.0),
        ..Default::default()
    };

    let count = lights.len().min(MAX_LIGHTS);
    for (record, light) in packed.lights[..count].iter_mut().zip(lights) {
        let (position, kind) = match light.kind {
            LightKind::Point { position } => (position.extend(1.0), LIGHT_KIND_POINT),
            LightKind::Directional { direction } => {
                (direction.extend(0.0), LIGHT_KIND_DIRECTIONAL)
            }
        };
        *record = GpuLight {
            position,
            color: light.color.extend(1.0),
            kind,
            _pad: [0; 3],
        };
    }
    packed.count = count as u32;

    packed
}
