use crate::renderer::extract::FramePlan;
use crate::renderer::passes::shadow::ShadowPass;
use crate::renderer::pipeline::Pipelines;
use crate::renderer::uniforms::{CameraUniforms, LightSpaceUniforms, ModelUniforms};
use crate::scene::graph::SceneGraph;
use crate::scene::node::NodeKind;

/// The lit color pass against the swapchain.
///
/// Owns the per-frame uniform buffers (camera block and packed lights) and
/// the frame bind group that also references the shadow pass's map, sampler
/// and light-space matrix.
pub struct ForwardPass {
    pub(crate) camera_buffer: wgpu::Buffer,
    lighting_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ForwardPass {
    pub(crate) fn new(device: &wgpu::Device, pipelines: &Pipelines, shadow: &ShadowPass) -> Self {
        let camera_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Camera Uniforms"),
            size: std::mem::size_of::<CameraUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let lighting_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Lighting Uniforms"),
            size: std::mem::size_of::<crate::renderer::uniforms::LightingUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Frame BindGroup"),
            layout: &pipelines.frame_layout,
            entries: &[
                wgpu::BindGroupEntry {
                    binding: 0,
                    resource: camera_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 1,
                    resource: lighting_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 2,
                    resource: shadow.light_buffer.as_entire_binding(),
                },
                wgpu::BindGroupEntry {
                    binding: 3,
                    resource: wgpu::BindingResource::TextureView(&shadow.map_view),
                },
                wgpu::BindGroupEntry {
                    binding: 4,
                    resource: wgpu::BindingResource::Sampler(&shadow.sampler),
                },
            ],
        });

        Self {
            camera_buffer,
            lighting_buffer,
            bind_group,
        }
    }

    /// Uploads the frame-global uniforms. Without a shadow pass this frame,
    /// the light-space matrix is cleared so stale shadow lookups cannot
    /// darken anything.
    pub(crate) fn prepare(&self, queue: &wgpu::Queue, shadow: &ShadowPass, plan: &FramePlan) {
        queue.write_buffer(&self.camera_buffer, 0, bytemuck::bytes_of(&plan.camera));
        queue.write_buffer(&self.lighting_buffer, 0, bytemuck::bytes_of(&plan.lighting));

        if plan.light_view_projection.is_none() {
            queue.write_buffer(
                &shadow.light_buffer,
                0,
                bytemuck::bytes_of(&LightSpaceUniforms {
                    view_projection: glam::Mat4::ZERO,
                }),
            );
        }
    }

    /// Uploads each pawn's model matrix and (re-)uploads its mesh contents.
    ///
    /// Called once per frame before recording; also creates the GPU buffer
    /// set for pawns drawn for the first time.
    pub(crate) fn upload_draws(
        &self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        pipelines: &Pipelines,
        graph: &mut SceneGraph,
        plan: &FramePlan,
    ) {
        for item in &plan.draws {
            let Some(node) = graph.get_mut(item.node) else {
                continue;
            };
            let name = node.name.clone();
            let NodeKind::Pawn(pawn) = &mut node.kind else {
                continue;
            };

            if pawn.buffers.is_none() {
                pawn.buffers = Some(crate::renderer::mesh::MeshBuffers::new(
                    device,
                    &pipelines.model_layout,
                    &pawn.mesh,
                    &name,
                ));
            }
            let Some(buffers) = &pawn.buffers else {
                continue;
            };

            queue.write_buffer(
                &buffers.model_buffer,
                0,
                bytemuck::bytes_of(&ModelUniforms { model: item.model }),
            );
            queue.write_buffer(
                &buffers.vertex_buffer,
                0,
                bytemuck::cast_slice(&pawn.mesh.vertices),
            );
            queue.write_buffer(
                &buffers.index_buffer,
                0,
                bytemuck::cast_slice(&pawn.mesh.indices),
            );
        }
    }

    /// Records the main color pass: clear, one indexed draw per pawn in
    /// plan order, then the overlay callback inside the still-open pass.
    pub(crate) fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        pipelines: &Pipelines,
        target: &wgpu::TextureView,
        depth: &wgpu::TextureView,
        clear_color: wgpu::Color,
        graph: &SceneGraph,
        plan: &FramePlan,
        overlay: Option<&mut dyn FnMut(&mut wgpu::RenderPass<'_>)>,
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Main Pass"),
            color_attachments: &[Some(wgpu::RenderPassColorAttachment {
                view: target,
                resolve_target: None,
                ops: wgpu::Operations {
                    load: wgpu::LoadOp::Clear(clear_color),
                    store: wgpu::StoreOp::Store,
                },
                depth_slice: None,
            })],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: depth,
                depth_ops: Some(wgpu::Operations {
                    load: wgpu::LoadOp::Clear(1.0),
                    store: wgpu::StoreOp::Store,
                }),
                stencil_ops: None,
            }),
            timestamp_writes: None,
            occlusion_query_set: None,
            multiview_mask: None,
        });

        pass.set_pipeline(&pipelines.forward);
        pass.set_bind_group(0, &self.bind_group, &[]);

        for item in &plan.draws {
            let Some(NodeKind::Pawn(pawn)) = graph.get(item.node).map(|n| &n.kind) else {
                continue;
            };
            let Some(buffers) = &pawn.buffers else {
                continue;
            };

            pass.set_bind_group(1, &buffers.model_bind_group, &[]);
            pass.set_vertex_buffer(0, buffers.vertex_buffer.slice(..));
            pass.set_index_buffer(buffers.index_buffer.slice(..), wgpu::IndexFormat::Uint32);
            pass.draw_indexed(0..buffers.index_count, 0, 0..1);
        }

        // Widgets draw into the same pass, after the scene, before the pass
        // closes.
        if let Some(overlay) = overlay {
            overlay(&mut pass);
        }
    }
}
