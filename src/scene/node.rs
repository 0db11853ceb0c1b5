use std::sync::Arc;

use crate::renderer::mesh::{Mesh, MeshBuffers};
use crate::scene::NodeHandle;
use crate::scene::camera::CameraRig;
use crate::scene::light::Light;
use crate::scene::transform::Transform;

/// Renderable payload: immutable mesh data plus its GPU buffers.
///
/// The buffer set is created by the renderer the first time the pawn is
/// drawn, so scenes can be built and inspected without a GPU device.
#[derive(Debug)]
pub struct Pawn {
    pub mesh: Arc<Mesh>,
    pub(crate) buffers: Option<MeshBuffers>,
}

impl Pawn {
    #[must_use]
    pub fn new(mesh: Arc<Mesh>) -> Self {
        Self {
            mesh,
            buffers: None,
        }
    }
}

/// Kind-specific payload of a scene node.
#[derive(Debug)]
pub enum NodeKind {
    /// Structural node, composes hierarchies, never drawn.
    Group,
    /// Mesh instance drawn by the shadow and main passes.
    Pawn(Pawn),
    Light(Light),
    Camera(CameraRig),
}

/// Discriminant of [`NodeKind`], used for kind-filtered queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeTag {
    Group,
    Pawn,
    Light,
    Camera,
}

/// A node in the scene graph.
///
/// Every node carries the hierarchy header (name, local transform, children,
/// parent back-reference) plus its kind payload. `global_transform` is
/// derived: position and rotation are the component-wise sums of the local
/// values along the path from the root, while scale stays local (scale does
/// not inherit). It is only meaningful after a parent-before-child traversal
/// in the current frame.
#[derive(Debug)]
pub struct SceneObject {
    /// Display name for tooling; never interpreted by the engine.
    pub name: String,
    pub transform: Transform,
    pub global_transform: Transform,
    pub kind: NodeKind,

    /// Non-owning back-reference, used only to walk ancestry.
    pub(crate) parent: Option<NodeHandle>,
    pub(crate) children: Vec<NodeHandle>,
}

impl SceneObject {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: NodeKind) -> Self {
        let transform = Transform::new();
        Self {
            name: name.into(),
            transform,
            global_transform: transform,
            kind,
            parent: None,
            children: Vec::new(),
        }
    }

    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self::new(name, NodeKind::Group)
    }

    #[must_use]
    pub fn pawn(name: impl Into<String>, mesh: Arc<Mesh>) -> Self {
        Self::new(name, NodeKind::Pawn(Pawn::new(mesh)))
    }

    #[must_use]
    pub fn light(name: impl Into<String>, light: Light) -> Self {
        Self::new(name, NodeKind::Light(light))
    }

    #[must_use]
    pub fn camera(name: impl Into<String>, rig: CameraRig) -> Self {
        Self::new(name, NodeKind::Camera(rig))
    }

    #[must_use]
    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = transform;
        self
    }

    #[inline]
    #[must_use]
    pub fn parent(&self) -> Option<NodeHandle> {
        self.parent
    }

    #[inline]
    #[must_use]
    pub fn children(&self) -> &[NodeHandle] {
        &self.children
    }

    #[must_use]
    pub fn tag(&self) -> NodeTag {
        match self.kind {
            NodeKind::Group => NodeTag::Group,
            NodeKind::Pawn(_) => NodeTag::Pawn,
            NodeKind::Light(_) => NodeTag::Light,
            NodeKind::Camera(_) => NodeTag::Camera,
        }
    }

    /// Derives the world transform from this node's local transform and the
    /// parent's already-derived world transform.
    ///
    /// Position and rotation accumulate; scale deliberately does not.
    pub(crate) fn derive_global(&mut self, parent_global: Option<Transform>) {
        self.global_transform = match parent_global {
            None => self.transform,
            Some(parent) => Transform {
                position: self.transform.position + parent.position,
                rotation: self.transform.rotation + parent.rotation,
                scale: self.transform.scale,
            },
        };
    }
}
