//! CPU-side frame planning.
//!
//! Before any GPU command is recorded, the scene graph is walked once and
//! reduced to a [`FramePlan`]: camera matrices, the draw list in traversal
//! order, the packed light block, and the optional light-camera matrix for
//! the shadow pass. The pass recorders then consume the plan without
//! touching scene state, which keeps the pass sequence testable without a
//! GPU device.

use glam::{Mat4, Vec3};

use crate::errors::{EngineError, Result};
use crate::renderer::uniforms::{CameraUniforms, LightingUniforms, pack_lights};
use crate::scene::graph::SceneGraph;
use crate::scene::light::{Light, LightKind};
use crate::scene::node::NodeKind;
use crate::scene::NodeHandle;

/// Extent of the orthographic light camera, in world units per half-axis.
pub const SHADOW_EXTENT: f32 = 30.0;
/// Distance the light camera sits from the scene origin, against the light
/// direction.
pub const SHADOW_DISTANCE: f32 = 50.0;
pub const SHADOW_NEAR: f32 = 0.1;
pub const SHADOW_FAR: f32 = 150.0;

/// One pawn to draw, with its world matrix already derived.
#[derive(Debug, Clone, Copy)]
pub struct DrawItem {
    pub node: NodeHandle,
    pub model: Mat4,
}

/// The passes a frame steps through, in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassKind {
    Shadow,
    Main,
    Debug,
}

/// Everything one frame needs, extracted from the scene graph.
pub struct FramePlan {
    pub camera: CameraUniforms,
    pub camera_position: Vec3,
    /// Pawns in top-down traversal order; both depth and color passes draw
    /// this list.
    pub draws: Vec<DrawItem>,
    /// Light payloads in depth-first discovery order.
    pub lights: Vec<Light>,
    pub lighting: LightingUniforms,
    /// View-projection of the synthesized light camera; `None` when the
    /// scene has no directional light, which skips the shadow pass.
    pub light_view_projection: Option<Mat4>,
}

impl FramePlan {
    /// The pass sequence this plan produces.
    #[must_use]
    pub fn pass_sequence(&self, debug_pass: bool) -> Vec<PassKind> {
        let mut passes = Vec::with_capacity(3);
        if self.light_view_projection.is_some() {
            passes.push(PassKind::Shadow);
        }
        passes.push(PassKind::Main);
        if debug_pass {
            passes.push(PassKind::Debug);
        }
        passes
    }
}

/// Builds the frame plan: derives world transforms (parents before
/// children), collects pawn draws in the same order, packs the lights and
/// synthesizes the shadow camera.
///
/// Fails with [`EngineError::NoActiveCamera`] when the graph has no camera
/// node; a frame must not attempt partial rendering.
pub fn plan_frame(graph: &mut SceneGraph) -> Result<FramePlan> {
    let camera_handle = graph.active_camera().ok_or(EngineError::NoActiveCamera)?;

    graph.update_global_transforms();

    let mut draws = Vec::new();
    let mut lights = Vec::new();

    for handle in graph.traverse_topdown() {
        let Some(node) = graph.get(handle) else {
            continue;
        };
        match &node.kind {
            NodeKind::Pawn(_) => draws.push(DrawItem {
                node: handle,
                model: node.global_transform.matrix(),
            }),
            NodeKind::Light(light) => lights.push(*light),
            NodeKind::Group | NodeKind::Camera(_) => {}
        }
    }

    let camera = match graph.get(camera_handle).map(|node| &node.kind) {
        Some(NodeKind::Camera(rig)) => rig.camera,
        _ => return Err(EngineError::NoActiveCamera),
    };

    let lighting = pack_lights(camera.position, &lights);

    // Only the first directional light casts a shadow; the rest light the
    // scene without one.
    let light_view_projection = lights
        .iter()
        .find_map(|light| match light.kind {
            LightKind::Directional { direction } => Some(direction),
            LightKind::Point { .. } => None,
        })
        .map(directional_light_view_projection);

    Ok(FramePlan {
        camera: CameraUniforms {
            projection: camera.projection(),
            view: camera.view(),
        },
        camera_position: camera.position,
        draws,
        lights,
        lighting,
        light_view_projection,
    })
}

/// Synthesizes the orthographic light camera for a directional light: eye
/// placed against the light direction looking at the origin, square extents.
#[must_use]
pub fn directional_light_view_projection(direction: Vec3) -> Mat4 {
    let dir = if direction.length_squared() > 1e-6 {
        direction.normalize()
    } else {
        Vec3::NEG_Z
    };

    // Degenerate up vector when the light points straight down.
    let up = if dir.y.abs() > 0.99 { Vec3::X } else { Vec3::Y };

    let center = Vec3::ZERO;
    let eye = center - dir * SHADOW_DISTANCE;
    let view = Mat4::look_at_rh(eye, center, up);
    let proj = Mat4::orthographic_rh(
        -SHADOW_EXTENT,
        SHADOW_EXTENT,
        -SHADOW_EXTENT,
        SHADOW_EXTENT,
        SHADOW_NEAR,
        SHADOW_FAR,
    );
    proj * view
}
