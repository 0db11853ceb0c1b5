//! Transform tests
//!
//! Tests for:
//! - Default values and single-axis additive mutators
//! - Matrix composition order (rotation, then translation, then scale)
//! - Euler-to-quaternion axis mapping

use glam::{Mat4, Vec3};
use trellis::Transform;

const EPSILON: f32 = 1e-5;

fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() < EPSILON
}

fn vec3_approx(a: Vec3, b: Vec3) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y) && approx_eq(a.z, b.z)
}

// ============================================================================
// Defaults & Mutators
// ============================================================================

#[test]
fn transform_default_is_identity() {
    let t = Transform::new();
    assert_eq!(t.position, Vec3::ZERO);
    assert_eq!(t.rotation, Vec3::ZERO);
    assert_eq!(t.scale, Vec3::ONE);
    assert!(t.matrix().abs_diff_eq(Mat4::IDENTITY, EPSILON));
}

#[test]
fn single_axis_mutators_are_additive() {
    let mut t = Transform::new();

    t.translate_x(1.0);
    t.translate_x(2.0);
    t.translate_y(-0.5);
    t.translate_z(4.0);
    assert!(vec3_approx(t.position, Vec3::new(3.0, -0.5, 4.0)));

    t.rotate_x(0.25);
    t.rotate_y(0.5);
    t.rotate_y(0.5);
    t.rotate_z(-1.0);
    assert!(vec3_approx(t.rotation, Vec3::new(0.25, 1.0, -1.0)));

    t.scale_x(1.0);
    t.scale_y(0.5);
    t.scale_z(-0.25);
    assert!(vec3_approx(t.scale, Vec3::new(2.0, 1.5, 0.75)));
}

#[test]
fn mutating_shared_transform_is_visible_to_readers() {
    let mut t = Transform::new();
    let before = t.matrix();
    t.translate_x(5.0);
    // No caching: the very next matrix read reflects the mutation.
    assert!(!t.matrix().abs_diff_eq(before, EPSILON));
    assert!(vec3_approx(
        t.matrix().transform_point3(Vec3::ZERO),
        Vec3::new(5.0, 0.0, 0.0)
    ));
}

// ============================================================================
// Matrix Composition
// ============================================================================

#[test]
fn translation_only_moves_origin() {
    let mut t = Transform::new();
    t.position = Vec3::new(10.0, 20.0, 30.0);
    let moved = t.matrix().transform_point3(Vec3::ZERO);
    assert!(vec3_approx(moved, Vec3::new(10.0, 20.0, 30.0)));
}

#[test]
fn rotation_is_applied_before_translation() {
    let mut t = Transform::new();
    t.rotation.y = std::f32::consts::FRAC_PI_2; // 90 degrees yaw
    t.position = Vec3::new(5.0, 0.0, 0.0);

    // The point rotates about the object's own origin first, then the
    // whole object translates.
    let p = t.matrix().transform_point3(Vec3::new(1.0, 0.0, 0.0));
    assert!(
        vec3_approx(p, Vec3::new(5.0, 0.0, -1.0)),
        "expected (5, 0, -1), got {p}"
    );
}

#[test]
fn scale_is_applied_after_translation() {
    let mut t = Transform::new();
    t.position = Vec3::new(1.0, 0.0, 0.0);
    t.scale = Vec3::splat(2.0);

    let p = t.matrix().transform_point3(Vec3::ZERO);
    assert!(vec3_approx(p, Vec3::new(2.0, 0.0, 0.0)));
}

#[test]
fn yaw_rotates_about_world_y() {
    let mut t = Transform::new();
    t.rotation.y = std::f32::consts::FRAC_PI_2;

    let forward = t.rotation_quat() * Vec3::NEG_Z;
    assert!(
        vec3_approx(forward, Vec3::NEG_X),
        "yaw of +90 degrees should turn -Z into -X, got {forward}"
    );
}

#[test]
fn pitch_rotates_about_world_x() {
    let mut t = Transform::new();
    t.rotation.x = std::f32::consts::FRAC_PI_2;

    let forward = t.rotation_quat() * Vec3::NEG_Z;
    assert!(
        vec3_approx(forward, Vec3::Y),
        "pitch of +90 degrees should turn -Z into +Y, got {forward}"
    );
}
