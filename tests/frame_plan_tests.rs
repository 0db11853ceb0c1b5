//! Frame planning tests
//!
//! Tests for:
//! - Pass sequence: shadow (when a directional light exists) before main
//! - One depth draw item per pawn, shared by both passes, in traversal order
//! - Single shadow caster: only the first directional light is used
//! - Frame-start precondition: no camera is a hard error
//! - Light camera synthesis

use std::sync::Arc;

use glam::{Mat4, Vec3};
use trellis::renderer::extract::{
    PassKind, SHADOW_DISTANCE, directional_light_view_projection, plan_frame,
};
use trellis::scene::camera::{Camera, CameraRig, Projection};
use trellis::scene::node::SceneObject;
use trellis::{EngineError, Light, Mesh, SceneGraph, Transform, Vertex};

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

fn camera_rig() -> CameraRig {
    CameraRig::new(Camera::new(
        Projection::Perspective {
            fov_y: 1.0,
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 100.0,
        },
        Vec3::new(0.0, 2.0, 8.0),
    ))
}

fn scene_with_camera() -> SceneGraph {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();
    graph.attach(root, SceneObject::camera("Camera", camera_rig()));
    graph
}

// ============================================================================
// Pass Sequence
// ============================================================================

#[test]
fn directional_light_enables_shadow_pass_before_main() {
    let mut graph = scene_with_camera();
    let root = graph.root();
    graph.attach(
        root,
        SceneObject::light(
            "Sun",
            Light::new_directional(Vec3::ONE, Vec3::new(0.0, -1.0, -0.2)),
        ),
    );
    for name in ["P1", "P2", "P3"] {
        graph.attach(root, SceneObject::pawn(name, tiny_mesh()));
    }

    let plan = plan_frame(&mut graph).unwrap();

    assert!(plan.light_view_projection.is_some());
    // Three pawns -> three depth draws recorded before the three color
    // draws; both passes consume the same list.
    assert_eq!(plan.draws.len(), 3);
    assert_eq!(
        plan.pass_sequence(false),
        vec![PassKind::Shadow, PassKind::Main]
    );
    assert_eq!(
        plan.pass_sequence(true),
        vec![PassKind::Shadow, PassKind::Main, PassKind::Debug]
    );
}

#[test]
fn point_lights_alone_skip_the_shadow_pass() {
    let mut graph = scene_with_camera();
    let root = graph.root();
    graph.attach(
        root,
        SceneObject::light("Lamp", Light::new_point(Vec3::ONE, Vec3::new(0.0, 3.0, 0.0))),
    );
    graph.attach(root, SceneObject::pawn("P", tiny_mesh()));

    let plan = plan_frame(&mut graph).unwrap();

    assert!(plan.light_view_projection.is_none());
    assert_eq!(plan.pass_sequence(false), vec![PassKind::Main]);
    assert_eq!(plan.lighting.count, 1);
}

#[test]
fn empty_scene_has_no_lights_and_no_shadow() {
    let mut graph = scene_with_camera();

    let plan = plan_frame(&mut graph).unwrap();

    assert_eq!(plan.lighting.count, 0);
    assert!(plan.lights.is_empty());
    assert!(plan.draws.is_empty());
    assert!(plan.light_view_projection.is_none());
}

// ============================================================================
// Single Shadow Caster
// ============================================================================

#[test]
fn only_first_directional_light_casts_shadow() {
    let mut graph = scene_with_camera();
    let root = graph.root();
    let first_direction = Vec3::new(-1.0, -1.0, 0.0);

    graph.attach(
        root,
        SceneObject::light("Sun A", Light::new_directional(Vec3::ONE, first_direction)),
    );
    graph.attach(
        root,
        SceneObject::light(
            "Sun B",
            Light::new_directional(Vec3::ONE, Vec3::new(1.0, -1.0, 0.0)),
        ),
    );

    let plan = plan_frame(&mut graph).unwrap();

    // Both lights are packed, but the shadow camera follows the first one.
    assert_eq!(plan.lighting.count, 2);
    assert_eq!(
        plan.light_view_projection,
        Some(directional_light_view_projection(first_direction))
    );
}

#[test]
fn first_directional_follows_depth_first_discovery() {
    let mut graph = scene_with_camera();
    let root = graph.root();
    let nested_direction = Vec3::new(0.0, -1.0, 1.0);

    // Nested under the first child, so depth-first discovery finds it
    // before the root-level sun attached later.
    let group = graph.attach(root, SceneObject::group("G"));
    graph.attach(
        group,
        SceneObject::light("Nested Sun", Light::new_directional(Vec3::ONE, nested_direction)),
    );
    graph.attach(
        root,
        SceneObject::light(
            "Root Sun",
            Light::new_directional(Vec3::ONE, Vec3::new(1.0, -2.0, 0.0)),
        ),
    );

    let plan = plan_frame(&mut graph).unwrap();

    assert_eq!(
        plan.light_view_projection,
        Some(directional_light_view_projection(nested_direction))
    );
}

// ============================================================================
// Draw List
// ============================================================================

#[test]
fn draws_follow_topdown_traversal_order() {
    let mut graph = scene_with_camera();
    let root = graph.root();

    let a = graph.attach(
        root,
        SceneObject::pawn("A", tiny_mesh())
            .with_transform(Transform::from_position(Vec3::new(1.0, 0.0, 0.0))),
    );
    let a_child = graph.attach(
        a,
        SceneObject::pawn("A child", tiny_mesh())
            .with_transform(Transform::from_position(Vec3::new(0.0, 1.0, 0.0))),
    );
    let b = graph.attach(root, SceneObject::pawn("B", tiny_mesh()));

    let plan = plan_frame(&mut graph).unwrap();

    let order: Vec<_> = plan.draws.iter().map(|d| d.node).collect();
    assert_eq!(order, vec![a, a_child, b]);

    // Model matrices come from the freshly derived world transforms.
    let child_origin = plan.draws[1].model.transform_point3(Vec3::ZERO);
    assert!((child_origin - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-5);
}

#[test]
fn groups_lights_and_cameras_produce_no_draws() {
    let mut graph = scene_with_camera();
    let root = graph.root();
    graph.attach(root, SceneObject::group("G"));
    graph.attach(
        root,
        SceneObject::light("Lamp", Light::new_point(Vec3::ONE, Vec3::ZERO)),
    );

    let plan = plan_frame(&mut graph).unwrap();
    assert!(plan.draws.is_empty());
}

#[test]
fn camera_uniforms_mirror_the_active_camera() {
    let mut graph = scene_with_camera();

    let plan = plan_frame(&mut graph).unwrap();

    let rig = camera_rig();
    assert_eq!(plan.camera.projection, rig.camera.projection());
    assert_eq!(plan.camera.view, rig.camera.view());
    assert_eq!(plan.camera_position, rig.camera.position);
}

// ============================================================================
// Preconditions
// ============================================================================

#[test]
fn missing_camera_is_a_fatal_plan_error() {
    let mut graph = SceneGraph::new(SceneObject::group("Root"));
    let root = graph.root();
    graph.attach(root, SceneObject::pawn("P", tiny_mesh()));

    let result = plan_frame(&mut graph);
    assert!(matches!(result, Err(EngineError::NoActiveCamera)));
}

// ============================================================================
// Light Camera Synthesis
// ============================================================================

#[test]
fn light_camera_sees_the_scene_origin() {
    let vp = directional_light_view_projection(Vec3::new(-0.4, -1.0, -0.3));

    let clip = vp * Vec3::ZERO.extend(1.0);
    let ndc = clip / clip.w;
    assert!(ndc.x.abs() <= 1.0 && ndc.y.abs() <= 1.0);
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}

#[test]
fn light_camera_sits_against_the_light_direction() {
    let direction = Vec3::new(0.0, -1.0, -1.0).normalize();
    let vp = directional_light_view_projection(direction);

    // The synthesized eye point maps to the view origin, i.e. depth ~ 0.
    let eye = -direction * SHADOW_DISTANCE;
    let clip = vp * eye.extend(1.0);
    let ndc = clip / clip.w;
    assert!(ndc.z < 0.01);
}

#[test]
fn degenerate_straight_down_light_still_builds_a_matrix() {
    let vp = directional_light_view_projection(Vec3::new(0.0, -1.0, 0.0));
    assert!(vp != Mat4::ZERO);

    let clip = vp * Vec3::ZERO.extend(1.0);
    let ndc = clip / clip.w;
    assert!(ndc.z > 0.0 && ndc.z < 1.0);
}
