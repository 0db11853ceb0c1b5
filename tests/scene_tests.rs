//! Scene graph tests
//!
//! Tests for:
//! - Attach wiring (parent back-reference, ordered children)
//! - Parent-before-child global transform derivation
//! - Scale non-inheritance
//! - Kind-filtered queries (BFS) vs light discovery order (DFS)
//! - Per-frame update: point light payload follows its node

use std::sync::Arc;

use glam::{Vec2, Vec3};
use trellis::app::window::WindowSurface;
use trellis::scene::node::{NodeKind, SceneObject};
use trellis::{Input, Light, Mesh, NodeTag, SceneGraph, Transform, Vertex};

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

fn tiny_mesh() -> Arc<Mesh> {
    Arc::new(Mesh::new(
        vec![
            Vertex::new([-0.5, -0.5, 0.0], [0.0, 0.0, 1.0]),
            Vertex::new([0.5, -0.5, 0.0], [0.0, 0.0, 1.0]),
            Vertex::new([0.0, 0.5, 0.0], [0.0, 0.0, 1.0]),
        ],
        vec![0, 1, 2],
    ))
}

fn at(position: Vec3) -> Transform {
    Transform::from_position(position)
}

/// Surface stub for update() in headless tests.
struct NullSurface;

impl WindowSurface for NullSurface {
    fn set_cursor_grab(&mut self, _grab: bool) {}
    fn warp_cursor(&mut self, _position: Vec2) {}
}

// ============================================================================
// Attach
// ============================================================================

#[test]
fn attach_wires_parent_and_children_in_order() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();

    let a = graph.attach(root, SceneObject::group("A"));
    let b = graph.attach(root, SceneObject::group("B"));
    let a1 = graph.attach(a, SceneObject::group("A1"));

    assert_eq!(graph.get(a).unwrap().parent(), Some(root));
    assert_eq!(graph.get(a1).unwrap().parent(), Some(a));
    assert_eq!(graph.get(root).unwrap().children(), &[a, b]);
    assert_eq!(graph.get(a).unwrap().children(), &[a1]);
    assert_eq!(graph.len(), 4);
}

#[test]
fn root_has_no_parent() {
    let graph = SceneGraph::new(SceneObject::group("Root"));
    assert_eq!(graph.get(graph.root()).unwrap().parent(), None);
}

// ============================================================================
// Global Transform Derivation
// ============================================================================

#[test]
fn nested_pawn_positions_accumulate() {
    // Root -> Pawn A at (1,0,0) -> Pawn B at (0,1,0); B lands at (1,1,0).
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();
    let a = graph.attach(
        root,
        SceneObject::pawn("A", tiny_mesh()).with_transform(at(Vec3::new(1.0, 0.0, 0.0))),
    );
    let b = graph.attach(
        a,
        SceneObject::pawn("B", tiny_mesh()).with_transform(at(Vec3::new(0.0, 1.0, 0.0))),
    );

    graph.update_global_transforms();

    let b_global = graph.get(b).unwrap().global_transform;
    assert!(vec3_approx(b_global.position, Vec3::new(1.0, 1.0, 0.0)));
}

#[test]
fn root_global_equals_local() {
    let mut graph = SceneGraph::new(
        SceneObject::group("Root").with_transform(at(Vec3::new(2.0, 3.0, 4.0))),
    );
    graph.update_global_transforms();

    let root = graph.get(graph.root()).unwrap();
    assert_eq!(root.global_transform, root.transform);
}

#[test]
fn rotations_accumulate_down_the_tree() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();

    let mut parent_transform = Transform::new();
    parent_transform.rotate_y(0.5);
    let parent = graph.attach(root, SceneObject::group("P").with_transform(parent_transform));

    let mut child_transform = Transform::new();
    child_transform.rotate_y(0.25);
    child_transform.rotate_x(-0.5);
    let child = graph.attach(
        parent,
        SceneObject::pawn("C", tiny_mesh()).with_transform(child_transform),
    );

    graph.update_global_transforms();

    let child_global = graph.get(child).unwrap().global_transform;
    assert!(vec3_approx(child_global.rotation, Vec3::new(-0.5, 0.75, 0.0)));
}

#[test]
fn scale_does_not_inherit() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();

    let mut parent_transform = Transform::new();
    parent_transform.scale = Vec3::splat(3.0);
    let parent = graph.attach(root, SceneObject::group("P").with_transform(parent_transform));

    let mut child_transform = Transform::new();
    child_transform.scale = Vec3::splat(2.0);
    child_transform.position = Vec3::new(1.0, 0.0, 0.0);
    let child = graph.attach(
        parent,
        SceneObject::pawn("C", tiny_mesh()).with_transform(child_transform),
    );

    graph.update_global_transforms();

    let child_global = graph.get(child).unwrap().global_transform;
    // Ancestor scale never composes into a node's world scale, and it does
    // not scale child offsets either.
    assert!(vec3_approx(child_global.scale, Vec3::splat(2.0)));
    assert!(vec3_approx(child_global.position, Vec3::new(1.0, 0.0, 0.0)));
}

#[test]
fn deep_chain_accumulates_without_recursion_limit() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let mut parent = graph.root();
    let depth = 500;
    for i in 0..depth {
        parent = graph.attach(
            parent,
            SceneObject::group(format!("N{i}")).with_transform(at(Vec3::new(1.0, 0.0, 0.0))),
        );
    }

    graph.update_global_transforms();

    let leaf = graph.get(parent).unwrap();
    assert!(approx_eq(leaf.global_transform.position.x, depth as f32));
}

// ============================================================================
// Queries
// ============================================================================

#[test]
fn find_by_kind_is_breadth_first() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();

    let group = graph.attach(root, SceneObject::group("G"));
    let deep_light = graph.attach(
        group,
        SceneObject::light("Deep", Light::new_point(Vec3::ONE, Vec3::ZERO)),
    );
    let shallow_light = graph.attach(
        root,
        SceneObject::light("Shallow", Light::new_point(Vec3::ONE, Vec3::ZERO)),
    );

    // BFS sees the shallow light before the nested one, even though the
    // nested subtree was attached first.
    let lights = graph.find_by_kind(root, NodeTag::Light);
    assert_eq!(lights, vec![shallow_light, deep_light]);
}

#[test]
fn collect_lights_is_depth_first() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();

    let group = graph.attach(root, SceneObject::group("G"));
    let deep_light = graph.attach(
        group,
        SceneObject::light("Deep", Light::new_point(Vec3::ONE, Vec3::ZERO)),
    );
    let shallow_light = graph.attach(
        root,
        SceneObject::light("Shallow", Light::new_point(Vec3::ONE, Vec3::ZERO)),
    );

    // Light packing order is depth-first discovery order.
    let lights = graph.collect_lights();
    assert_eq!(lights, vec![deep_light, shallow_light]);
}

#[test]
fn traverse_topdown_visits_parents_before_children() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();
    let a = graph.attach(root, SceneObject::group("A"));
    let a1 = graph.attach(a, SceneObject::group("A1"));
    let b = graph.attach(root, SceneObject::group("B"));

    let order = graph.traverse_topdown();
    assert_eq!(order, vec![root, a, a1, b]);
}

#[test]
fn find_by_kind_includes_matching_start() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();
    assert_eq!(graph.find_by_kind(root, NodeTag::Group), vec![root]);
}

// ============================================================================
// Per-frame Update
// ============================================================================

#[test]
fn update_moves_point_light_payload_to_world_position() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();

    let carrier = graph.attach(
        root,
        SceneObject::group("Carrier").with_transform(at(Vec3::new(0.0, 5.0, 0.0))),
    );
    let light = graph.attach(
        carrier,
        SceneObject::light("Lamp", Light::new_point(Vec3::ONE, Vec3::ZERO))
            .with_transform(at(Vec3::new(1.0, 0.0, 0.0))),
    );

    let mut input = Input::new();
    graph.update(1.0 / 60.0, &mut input, &mut NullSurface);

    let Some(NodeKind::Light(payload)) = graph.get(light).map(|n| &n.kind) else {
        panic!("light node lost its payload");
    };
    match payload.kind {
        trellis::LightKind::Point { position } => {
            assert!(vec3_approx(position, Vec3::new(1.0, 5.0, 0.0)));
        }
        trellis::LightKind::Directional { .. } => panic!("expected a point light"),
    }
}

#[test]
fn update_keeps_directional_payload_direction() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();
    let direction = Vec3::new(-0.5, -1.0, 0.0);

    let sun = graph.attach(
        root,
        SceneObject::light("Sun", Light::new_directional(Vec3::ONE, direction))
            .with_transform(at(Vec3::new(9.0, 9.0, 9.0))),
    );

    let mut input = Input::new();
    graph.update(1.0 / 60.0, &mut input, &mut NullSurface);

    let Some(NodeKind::Light(payload)) = graph.get(sun).map(|n| &n.kind) else {
        panic!("light node lost its payload");
    };
    match payload.kind {
        trellis::LightKind::Directional { direction: d } => assert!(vec3_approx(d, direction)),
        trellis::LightKind::Point { .. } => panic!("expected a directional light"),
    }
}
