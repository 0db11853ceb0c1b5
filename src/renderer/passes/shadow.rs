use glam::Mat4;

use crate::renderer::extract::DrawItem;
use crate::renderer::pipeline::Pipelines;
use crate::renderer::uniforms::LightSpaceUniforms;
use crate::scene::graph::SceneGraph;
use crate::scene::node::NodeKind;

/// Offscreen depth-only pass rendered from the light camera.
///
/// Owns the fixed-resolution shadow map, the comparison sampler the main
/// pass samples it with, and the light-space uniform buffer that is shared
/// between this pass (as its camera) and the main pass (for shadow lookup).
pub struct ShadowPass {
    pub(crate) map_view: wgpu::TextureView,
    pub(crate) sampler: wgpu::Sampler,
    pub(crate) light_buffer: wgpu::Buffer,
    bind_group: wgpu::BindGroup,
}

impl ShadowPass {
    pub(crate) fn new(
        device: &wgpu::Device,
        pipelines: &Pipelines,
        depth_format: wgpu::TextureFormat,
        map_size: u32,
    ) -> Self {
        let map = device.create_texture(&wgpu::TextureDescriptor {
            label: Some("Shadow Map"),
            size: wgpu::Extent3d {
                width: map_size,
                height: map_size,
                depth_or_array_layers: 1,
            },
            mip_level_count: 1,
            sample_count: 1,
            dimension: wgpu::TextureDimension::D2,
            format: depth_format,
            usage: wgpu::TextureUsages::RENDER_ATTACHMENT | wgpu::TextureUsages::TEXTURE_BINDING,
            view_formats: &[],
        });
        let map_view = map.create_view(&wgpu::TextureViewDescriptor::default());

        let sampler = device.create_sampler(&wgpu::SamplerDescriptor {
            label: Some("Shadow Comparison Sampler"),
            address_mode_u: wgpu::AddressMode::ClampToEdge,
            address_mode_v: wgpu::AddressMode::ClampToEdge,
            mag_filter: wgpu::FilterMode::Linear,
            min_filter: wgpu::FilterMode::Linear,
            compare: Some(wgpu::CompareFunction::LessEqual),
            ..Default::default()
        });

        let light_buffer = device.create_buffer(&wgpu::BufferDescriptor {
            label: Some("Light Space Uniforms"),
            size: std::mem::size_of::<LightSpaceUniforms>() as u64,
            usage: wgpu::BufferUsages::UNIFORM | wgpu::BufferUsages::COPY_DST,
            mapped_at_creation: false,
        });

        let bind_group = device.create_bind_group(&wgpu::BindGroupDescriptor {
            label: Some("Shadow Frame BindGroup"),
            layout: &pipelines.shadow_frame_layout,
            entries: &[wgpu::BindGroupEntry {
                binding: 0,
                resource: light_buffer.as_entire_binding(),
            }],
        });

        Self {
            map_view,
            sampler,
            light_buffer,
            bind_group,
        }
    }

    /// Uploads the light camera matrix for this frame.
    pub(crate) fn prepare(&self, queue: &wgpu::Queue, light_view_projection: Mat4) {
        queue.write_buffer(
            &self.light_buffer,
            0,
            bytemuck::bytes_of(&LightSpaceUniforms {
                view_projection: light_view_projection,
            }),
        );
    }

    /// Records one depth-only draw per pawn, in plan order.
    pub(crate) fn record(
        &self,
        encoder: &mut wgpu::CommandEncoder,
        pipelines: &Pipelines,
        graph: &SceneGraph,
        draws: &[DrawItem],
    ) {
        let mut pass = encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
            label: Some("Shadow Depth Pass"),
            color_attachments: &[],
            depth_stencil_attachment: Some(wgpu::RenderPassDepthStencilAttachment {
                view: &self.map_view,
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

        pass.set_pipeline(&pipelines.shadow);
        pass.set_bind_group(0, &self.bind_group, &[]);

        for item in draws {
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
    }
}
