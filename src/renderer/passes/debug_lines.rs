use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use wgpu::util::DeviceExt;

use crate::renderer::pipeline::Pipelines;
use crate::scene::graph::SceneGraph;
use crate::scene::light::LightKind;
use crate::scene::node::NodeKind;

/// Vertex format of the debug line pipeline.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Pod, Zeroable)]
pub struct LineVertex {
    pub position: [f32; 3],
    pub color: [f32; 3],
}

impl LineVertex {
    const ATTRIBUTES: [wgpu::VertexAttribute; 2] =
        wgpu::vertex_attr_array![0 => Float32x3, 1 => Float32x3];

    #[must_use]
    pub fn layout() -> wgpu::VertexBufferLayout<'static> {
        wgpu::VertexBufferLayout {
            array_stride: std::mem::size_of::<Self>() as u64,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &Self::ATTRIBUTES,
        }
    }
}

/// Immediate-mode line drawing into the open debug pass.
///
/// Every [`draw_line`](Self::draw_line) uploads its two vertices and issues
/// the draw on the spot. Debug line volume is small, so the per-call buffer
/// is acceptable and keeps call-time data and draw strictly paired.
pub struct LineRecorder<'a, 'encoder> {
    device: &'a wgpu::Device,
    pass: &'a mut wgpu::RenderPass<'encoder>,
}

impl<'a, 'encoder> LineRecorder<'a, 'encoder> {
    pub(crate) fn new(device: &'a wgpu::Device, pass: &'a mut wgpu::RenderPass<'encoder>) -> Self {
        Self { device, pass }
    }

    /// Draws one world-space line segment in the given color.
    pub fn draw_line(&mut self, start: Vec3, end: Vec3, color: Vec3) {
        let vertices = [
            LineVertex {
                position: start.to_array(),
                color: color.to_array(),
            },
            LineVertex {
                position: end.to_array(),
                color: color.to_array(),
            },
        ];

        let buffer = self
            .device
            .create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Debug Line Vertices"),
                contents: bytemuck::cast_slice(&vertices),
                usage: wgpu::BufferUsages::VERTEX,
            });

        self.pass.set_vertex_buffer(0, buffer.slice(..));
        self.pass.draw(0..2, 0..1);
    }

    /// Axis cross at `center`, half-extent `size`.
    pub fn draw_cross(&mut self, center: Vec3, size: f32, color: Vec3) {
        self.draw_line(center - Vec3::X * size, center + Vec3::X * size, color);
        self.draw_line(center - Vec3::Y * size, center + Vec3::Y * size, color);
        self.draw_line(center - Vec3::Z * size, center + Vec3::Z * size, color);
    }
}

/// The optional line pass drawn over the finished main image.
pub struct DebugLinePass {
    bind_group: wgpu::BindGroup,
}

impl DebugLinePass {
    pub(crate) fn new(
        device: &wgpu::Device,
        pipelines: &Pipelines,
        camera_buffer: &wgpu::Buffer,
    ) -> Self {
        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Lines BindGroup"),
            layout: &pipelines.lines_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: camera_buffer.as_entire_binding(),
            }],
        });

        Self { bind_group }
    }

    /// Opens the line pass and hands a [`LineRecorder`] to `draw`.
    pub(crate) fn record(
        &self,
        device: &wgpu::Device,
        encoder: &mut wgpu::CommandEncoder,
        pipelines: &Pipelines,
        target: &wgpu::TextureView,
        draw: &mut dyn FnMut(&mut LineRecorder<'_, '_>),
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Debug Line Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Load,
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: None,
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&pipelines.lines);
        pass.set_bind_group(0, &self.bind_group, &[]);

        let mut recorder = LineRecorder::new(device, &mut pass);
        draw(&mut recorder);
    }
}

/// Draws a gizmo for every light in the graph: an axis cross at a point
/// light's position, a segment toward the origin for a directional light.
pub fn draw_light_gizmos(recorder: &mut LineRecorder<'_, '_>, graph: &SceneGraph) {
    for handle in graph.collect_lights() {
        let Some(NodeKind::Light(light)) = graph.get(handle).map(|n| &n.kind) else {
            continue;
        };
        match light.kind {
            LightKind::Point { position } => {
                recorder.draw_cross(position, 0.25, light.color);
            }
            LightKind::Directional { direction } => {
                let dir = direction.normalize_or_zero();
                recorder.draw_line(-dir * 4.0, Vec3::ZERO, light.color);
            }
        }
    }
}
