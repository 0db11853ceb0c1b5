//! Scene graph: a strict tree of typed nodes with local and derived
//! world-space transforms.
//!
//! - [`Transform`]: local position / Euler rotation / scale, matrix on demand
//! - [`SceneObject`]: tagged node (Group, Pawn, Light, Camera) plus hierarchy header
//! - [`SceneGraph`]: arena-backed tree, append-only attach, traversal queries
//! - [`camera::Camera`]: projection/view model and drag-based control
//! - [`light::Light`]: point / directional light payloads

pub mod transform;
pub mod node;
pub mod graph;
pub mod camera;
pub mod light;

pub use transform::Transform;
pub use node::{NodeKind, NodeTag, Pawn, SceneObject};
pub use graph::SceneGraph;
pub use camera::{Camera, CameraRig};
pub use light::{Light, LightKind};

use slotmap::new_key_type;

new_key_type! {
    /// Stable handle to a node in a [`SceneGraph`] arena.
    pub struct NodeHandle;
}
