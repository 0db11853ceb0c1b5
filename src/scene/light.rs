use glam::Vec3;

/// Kind-specific light payload.
///
/// The payload is what the renderer packs for the GPU; the owning node's
/// transform is informational. A point light's `position` is refreshed from
/// the node's world position during [`SceneGraph::update`], so authoring a
/// point light under a moving parent behaves as expected.
///
/// [`SceneGraph::update`]: crate::scene::SceneGraph::update
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightKind {
    Point { position: Vec3 },
    Directional { direction: Vec3 },
}

/// Light component of a scene node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub color: Vec3,
    pub kind: LightKind,
}

impl Light {
    #[must_use]
    pub fn new_point(color: Vec3, position: Vec3) -> Self {
        Self {
            color,
            kind: LightKind::Point { position },
        }
    }

    #[must_use]
    pub fn new_directional(color: Vec3, direction: Vec3) -> Self {
        Self {
            color,
            kind: LightKind::Directional { direction },
        }
    }

    /// `true` for directional lights; these are the shadow-casting kind.
    #[must_use]
    pub fn is_directional(&self) -> bool {
        matches!(self.kind, LightKind::Directional { .. })
    }
}
