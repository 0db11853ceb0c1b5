//! Showcase scene: a spinning cube stack over a ground slab, one
//! shadow-casting sun plus two colored point lights, fly/drag camera.
//!
//! Controls:
//! - Left drag: look around
//! - Middle drag: pan, Right drag: dolly
//! - W/A/S/D + Space/LCtrl: fly, LShift: faster

use std::f32::consts::FRAC_PI_4;
use std::sync::Arc;

use glam::Vec3;

use trellis::scene::camera::{Camera, CameraRig, Projection};
use trellis::scene::node::SceneObject;
use trellis::{App, Light, Mesh, RendererSettings, Transform, Vertex};

/// Axis-aligned box mesh with face normals; the engine itself does not
/// generate primitives, applications supply mesh data.
fn box_mesh(half: Vec3) -> Mesh {
    let (x, y, z) = (half.x, half.y, half.z);

    let faces: [([f32; 3], [[f32; 3]; 4]); 6] = [
        // +Z
        ([0.0, 0.0, 1.0], [[-x, -y, z], [x, -y, z], [x, y, z], [-x, y, z]]),
        // -Z
        ([0.0, 0.0, -1.0], [[x, -y, -z], [-x, -y, -z], [-x, y, -z], [x, y, -z]]),
        // +Y
        ([0.0, 1.0, 0.0], [[-x, y, z], [x, y, z], [x, y, -z], [-x, y, -z]]),
        // -Y
        ([0.0, -1.0, 0.0], [[-x, -y, -z], [x, -y, -z], [x, -y, z], [-x, -y, z]]),
        // +X
        ([1.0, 0.0, 0.0], [[x, -y, z], [x, -y, -z], [x, y, -z], [x, y, z]]),
        // -X
        ([-1.0, 0.0, 0.0], [[-x, -y, -z], [-x, -y, z], [-x, y, z], [-x, y, -z]]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, corners) in faces {
        let base = vertices.len() as u32;
        for corner in corners {
            vertices.push(Vertex::new(corner, normal));
        }
        indices.extend([base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    Mesh::new(vertices, indices)
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let mut app = App::new().with_title("Trellis Showcase").with_settings(RendererSettings {
        draw_light_gizmos: true,
        ..Default::default()
    });

    app.set_setup_fn(|graph, _renderer| {
        let root = graph.root();

        // Ground slab.
        let slab = Arc::new(box_mesh(Vec3::new(8.0, 0.1, 8.0)));
        graph.attach(
            root,
            SceneObject::pawn("Ground", slab)
                .with_transform(Transform::from_position(Vec3::new(0.0, -1.1, 0.0))),
        );

        // A small stack of cubes under a spinning group.
        let cube = Arc::new(box_mesh(Vec3::splat(0.5)));
        let spinner = graph.attach(root, SceneObject::group("Spinner"));
        for (name, position) in [
            ("Cube A", Vec3::new(-1.5, 0.0, 0.0)),
            ("Cube B", Vec3::new(1.5, 0.0, 0.0)),
            ("Cube C", Vec3::new(0.0, 1.2, 0.0)),
        ] {
            graph.attach(
                spinner,
                SceneObject::pawn(name, cube.clone())
                    .with_transform(Transform::from_position(position)),
            );
        }

        // One sun (casts the shadow map) and two fill point lights.
        graph.attach(
            root,
            SceneObject::light(
                "Sun",
                Light::new_directional(Vec3::new(1.0, 0.95, 0.85), Vec3::new(-0.5, -1.0, -0.3)),
            ),
        );
        let warm = graph.attach(
            root,
            SceneObject::light(
                "Warm Fill",
                Light::new_point(Vec3::new(1.0, 0.4, 0.2), Vec3::ZERO),
            ),
        );
        if let Some(node) = graph.get_mut(warm) {
            node.transform.position = Vec3::new(3.0, 2.0, 3.0);
        }
        let cool = graph.attach(
            root,
            SceneObject::light(
                "Cool Fill",
                Light::new_point(Vec3::new(0.2, 0.5, 1.0), Vec3::ZERO),
            ),
        );
        if let Some(node) = graph.get_mut(cool) {
            node.transform.position = Vec3::new(-3.0, 2.0, -2.0);
        }

        // Camera looking at the stack from behind and above.
        let camera = Camera::new(
            Projection::Perspective {
                fov_y: FRAC_PI_4,
                aspect: 1280.0 / 720.0,
                near: 0.1,
                far: 200.0,
            },
            Vec3::new(0.0, 2.0, 8.0),
        );
        graph.attach(root, SceneObject::camera("Main Camera", CameraRig::new(camera)));
    });

    app.set_update_fn(|graph, _input, dt| {
        let spinner = graph
            .find_by_kind(graph.root(), trellis::NodeTag::Group)
            .into_iter()
            .find(|&h| graph.get(h).is_some_and(|n| n.name == "Spinner"));
        if let Some(spinner) = spinner
            && let Some(node) = graph.get_mut(spinner)
        {
            node.transform.rotate_y(dt * 0.6);
        }
    });

    app.run()?;
    Ok(())
}
