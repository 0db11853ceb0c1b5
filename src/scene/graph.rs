use std::collections::VecDeque;

use slotmap::SlotMap;

use crate::app::input::Input;
use crate::app::window::WindowSurface;
use crate::scene::NodeHandle;
use crate::scene::node::{NodeKind, NodeTag, SceneObject};
use crate::scene::light::LightKind;
use crate::scene::transform::Transform;

/// Arena-backed scene tree.
///
/// The graph owns every node by value in a slotmap; handles are stable for
/// the lifetime of the graph. The tree is append-only: [`attach`] wires a
/// child under a parent and there is no detach operation, so handles never
/// dangle.
///
/// World transforms are derived by [`update_global_transforms`], which
/// visits parents before children. Draw traversal uses the same order, so a
/// node is always drawn after its own world transform is current.
///
/// [`attach`]: Self::attach
/// [`update_global_transforms`]: Self::update_global_transforms
pub struct SceneGraph {
    nodes: SlotMap<NodeHandle, SceneObject>,
    root: NodeHandle,
}

impl SceneGraph {
    /// Creates a graph owning `root`. By convention the root is a Group.
    #[must_use]
    pub fn new(root: SceneObject) -> Self {
        let mut nodes = SlotMap::with_key();
        let root = nodes.insert(root);
        Self { nodes, root }
    }

    #[inline]
    #[must_use]
    pub fn root(&self) -> NodeHandle {
        self.root
    }

    #[inline]
    #[must_use]
    pub fn get(&self, handle: NodeHandle) -> Option<&SceneObject> {
        self.nodes.get(handle)
    }

    #[inline]
    #[must_use]
    pub fn get_mut(&mut self, handle: NodeHandle) -> Option<&mut SceneObject> {
        self.nodes.get_mut(handle)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Inserts `child` under `parent`, wiring the parent back-reference and
    /// appending to the parent's ordered child list.
    ///
    /// Falls back to the root when `parent` is not in this graph, which can
    /// only happen with a handle from another graph.
    pub fn attach(&mut self, parent: NodeHandle, child: SceneObject) -> NodeHandle {
        let parent = if self.nodes.contains_key(parent) {
            parent
        } else {
            log::warn!("attach: parent handle not in this graph, attaching to root");
            self.root
        };

        let handle = self.nodes.insert(child);
        self.nodes[handle].parent = Some(parent);
        self.nodes[parent].children.push(handle);
        handle
    }

    // ========================================================================
    // Queries
    // ========================================================================

    /// Breadth-first search from `start`, collecting nodes of `tag`.
    ///
    /// The start node itself is included when it matches.
    #[must_use]
    pub fn find_by_kind(&self, start: NodeHandle, tag: NodeTag) -> Vec<NodeHandle> {
        let mut found = Vec::new();
        let mut queue = VecDeque::from([start]);

        while let Some(handle) = queue.pop_front() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            if node.tag() == tag {
                found.push(handle);
            }
            queue.extend(node.children.iter().copied());
        }

        found
    }

    /// First node of `tag` in breadth-first order from the root.
    #[must_use]
    pub fn first_by_kind(&self, tag: NodeTag) -> Option<NodeHandle> {
        let mut queue = VecDeque::from([self.root]);

        while let Some(handle) = queue.pop_front() {
            let node = self.nodes.get(handle)?;
            if node.tag() == tag {
                return Some(handle);
            }
            queue.extend(node.children.iter().copied());
        }

        None
    }

    /// Depth-first pre-order over the whole tree (parents before children,
    /// children in insertion order). This is the order used for drawing and
    /// for light packing.
    #[must_use]
    pub fn traverse_topdown(&self) -> Vec<NodeHandle> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack = vec![self.root];

        while let Some(handle) = stack.pop() {
            let Some(node) = self.nodes.get(handle) else {
                continue;
            };
            order.push(handle);
            // Reverse so the first child is popped first.
            stack.extend(node.children.iter().rev().copied());
        }

        order
    }

    /// All light nodes in depth-first discovery order.
    #[must_use]
    pub fn collect_lights(&self) -> Vec<NodeHandle> {
        self.traverse_topdown()
            .into_iter()
            .filter(|&h| self.nodes[h].tag() == NodeTag::Light)
            .collect()
    }

    /// First camera node in breadth-first order, if any.
    #[must_use]
    pub fn active_camera(&self) -> Option<NodeHandle> {
        self.first_by_kind(NodeTag::Camera)
    }

    // ========================================================================
    // Per-frame update
    // ========================================================================

    /// Derives every node's world transform, parents before children.
    ///
    /// Must run before anything reads `global_transform` this frame; the
    /// derived values are not maintained incrementally.
    pub fn update_global_transforms(&mut self) {
        // Iterative traversal; the parent's world transform rides on the
        // stack so each node is visited exactly once.
        let mut stack: Vec<(NodeHandle, Option<Transform>)> = vec![(self.root, None)];

        while let Some((handle, parent_global)) = stack.pop() {
            let Some(node) = self.nodes.get_mut(handle) else {
                continue;
            };
            node.derive_global(parent_global);

            let global = node.global_transform;
            for &child in node.children.iter().rev() {
                stack.push((child, Some(global)));
            }
        }
    }

    /// Per-frame update pass: world transforms, light payload sync, and
    /// camera input.
    ///
    /// Point light payloads follow their node's world position; directional
    /// payloads keep their authored direction. Camera nodes consume the
    /// frame's input snapshot through their controller.
    pub fn update(&mut self, dt: f32, input: &mut Input, window: &mut dyn WindowSurface) {
        self.update_global_transforms();

        for (_, node) in &mut self.nodes {
            match &mut node.kind {
                NodeKind::Light(light) => {
                    if let LightKind::Point { position } = &mut light.kind {
                        *position = node.global_transform.position;
                    }
                }
                NodeKind::Camera(rig) => {
                    rig.controller.update(&mut rig.camera, input, window, dt);
                }
                NodeKind::Group | NodeKind::Pawn(_) => {}
            }
        }
    }
}
