//! Pipeline and bind-group-layout construction for the three passes.
//!
//! Shader programs arrive as stage-tagged WGSL source plus entry-point
//! names; the builtin set is embedded, but a caller may substitute its own
//! [`ShaderLibrary`] with the same binding interface.

use crate::renderer::mesh::Vertex;
use crate::renderer::passes::debug_lines::LineVertex;
use crate::renderer::uniforms::{
    CameraUniforms, LightSpaceUniforms, LightingUniforms, ModelUniforms,
};

/// One shader program: WGSL source and its entry points. `fs_entry` is
/// `None` for depth-only programs.
#[derive(Debug, Clone, Copy)]
pub struct ShaderSource<'a> {
    pub source: &'a str,
    pub vs_entry: &'a str,
    pub fs_entry: Option<&'a str>,
}

/// The shader programs consumed by the renderer, one per pipeline.
#[derive(Debug, Clone, Copy)]
pub struct ShaderLibrary<'a> {
    pub forward: ShaderSource<'a>,
    pub shadow: ShaderSource<'a>,
    pub lines: ShaderSource<'a>,
}

impl ShaderLibrary<'static> {
    /// The embedded default shader set.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            forward: ShaderSource {
                source: include_str!("shaders/forward.wgsl"),
                vs_entry: "vs_main",
                fs_entry: Some("fs_main"),
            },
            shadow: ShaderSource {
                source: include_str!("shaders/shadow.wgsl"),
                vs_entry: "vs_main",
                fs_entry: None,
            },
            lines: ShaderSource {
                source: include_str!("shaders/lines.wgsl"),
                vs_entry: "vs_main",
                fs_entry: Some("fs_main"),
            },
        }
    }
}

impl Default for ShaderLibrary<'static> {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Compiled pipelines plus the bind group layouts they share.
pub(crate) struct Pipelines {
    /// Group 0 of the main pass: camera, lighting, light-space matrix,
    /// shadow map and comparison sampler.
    pub frame_layout: wgpu::BindGroupLayout,
    /// Group 1 of the shadow and main passes: per-pawn model uniforms.
    pub model_layout: wgpu::BindGroupLayout,
    /// Group 0 of the shadow pass: the light camera matrix alone.
    pub shadow_frame_layout: wgpu::BindGroupLayout,
    /// Group 0 of the debug pass: camera uniforms alone.
    pub lines_layout: wgpu::BindGroupLayout,

    pub forward: wgpu::RenderPipeline,
    pub shadow: wgpu::RenderPipeline,
    pub lines: wgpu::RenderPipeline,
}

fn uniform_entry(binding: u32, visibility: wgpu::ShaderStages, size: u64) -> wgpu::BindGroupLayoutEntry {
    wgpu::BindGroupLayoutEntry {
        binding,
        visibility,
        ty: wgpu::BindingType::Buffer {
            ty: wgpu::BufferBindingType::Uniform,
            has_dynamic_offset: false,
            min_binding_size: wgpu::BufferSize::new(size),
        },
        count: None,
    }
}

impl Pipelines {
    pub(crate) fn new(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        shaders: &ShaderLibrary<'_>,
    ) -> Self {
        let frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Frame BindGroup Layout"),
            entries: &[
                uniform_entry(
                    0,
                    wgpu::ShaderStages::VERTEX,
                    std::mem::size_of::<CameraUniforms>() as u64,
                ),
                uniform_entry(
                    1,
                    wgpu::ShaderStages::FRAGMENT,
                    std::mem::size_of::<LightingUniforms>() as u64,
                ),
                uniform_entry(
                    2,
                    wgpu::ShaderStages::VERTEX,
                    std::mem::size_of::<LightSpaceUniforms>() as u64,
                ),
                wgpu::BindGroupLayoutEntry {
                    binding: 3,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Texture {
                        sample_type: wgpu::TextureSampleType::Depth,
                        view_dimension: wgpu::TextureViewDimension::D2,
                        multisampled: false,
                    },
                    count: None,
                },
                wgpu::BindGroupLayoutEntry {
                    binding: 4,
                    visibility: wgpu::ShaderStages::FRAGMENT,
                    ty: wgpu::BindingType::Sampler(wgpu::SamplerBindingType::Comparison),
                    count: None,
                },
            ],
        });

        let model_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Model BindGroup Layout"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX,
                std::mem::size_of::<ModelUniforms>() as u64,
            )],
        });

        let shadow_frame_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Shadow Frame BindGroup Layout"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX,
                std::mem::size_of::<LightSpaceUniforms>() as u64,
            )],
        });

        let lines_layout = device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
            label: Some("Lines BindGroup Layout"),
            entries: &[uniform_entry(
                0,
                wgpu::ShaderStages::VERTEX,
                std::mem::size_of::<CameraUniforms>() as u64,
            )],
        });

        let forward = Self::build_forward(
            device,
            surface_format,
            depth_format,
            &frame_layout,
            &model_layout,
            shaders.forward,
        );
        let shadow = Self::build_shadow(
            device,
            depth_format,
            &shadow_frame_layout,
            &model_layout,
            shaders.shadow,
        );
        let lines = Self::build_lines(device, surface_format, &lines_layout, shaders.lines);

        Self {
            frame_layout,
            model_layout,
            shadow_frame_layout,
            lines_layout,
            forward,
            shadow,
            lines,
        }
    }

    fn create_module(device: &wgpu::Device, label: &str, source: &str) -> wgpu::ShaderModule {
        device.create_shader_module(wgpu::ShaderModuleDescriptor {
            label: Some(label),
            source: wgpu::ShaderSource::Wgsl(source.into()),
        })
    }

    fn build_forward(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        depth_format: wgpu::TextureFormat,
        frame_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
        shader: ShaderSource<'_>,
    ) -> wgpu::RenderPipeline {
        let module = Self::create_module(device, "Forward Shader", shader.source);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Forward Pipeline Layout"),
            bind_group_layouts: &[frame_layout, model_layout],
            immediate_size: 0,
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Forward Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(shader.vs_entry),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[Vertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: shader.fs_entry,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::REPLACE),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn build_shadow(
        device: &wgpu::Device,
        depth_format: wgpu::TextureFormat,
        shadow_frame_layout: &wgpu::BindGroupLayout,
        model_layout: &wgpu::BindGroupLayout,
        shader: ShaderSource<'_>,
    ) -> wgpu::RenderPipeline {
        let module = Self::create_module(device, "Shadow Shader", shader.source);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Shadow Pipeline Layout"),
            bind_group_layouts: &[shadow_frame_layout, model_layout],
            immediate_size: 0,
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Shadow Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(shader.vs_entry),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[Vertex::layout()],
            },
            // Depth-only: no color targets, no fragment stage.
            fragment: None,
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::TriangleList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: Some(wgpu::Face::Back),
                ..Default::default()
            },
            depth_stencil: Some(wgpu::DepthStencilState {
                format: depth_format,
                depth_write_enabled: true,
                depth_compare: wgpu::CompareFunction::LessEqual,
                stencil: wgpu::StencilState::default(),
                bias: wgpu::DepthBiasState::default(),
            }),
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }

    fn build_lines(
        device: &wgpu::Device,
        surface_format: wgpu::TextureFormat,
        lines_layout: &wgpu::BindGroupLayout,
        shader: ShaderSource<'_>,
    ) -> wgpu::RenderPipeline {
        let module = Self::create_module(device, "Lines Shader", shader.source);
        let layout = device.create_pipeline_layout(&wgpu::PipelineLayoutDescriptor {
            label: Some("Lines Pipeline Layout"),
            bind_group_layouts: &[lines_layout],
            immediate_size: 0,
        });

        device.create_render_pipeline(&wgpu::RenderPipelineDescriptor {
            label: Some("Lines Pipeline"),
            layout: Some(&layout),
            vertex: wgpu::VertexState {
                module: &module,
                entry_point: Some(shader.vs_entry),
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                buffers: &[LineVertex::layout()],
            },
            fragment: Some(wgpu::FragmentState {
                module: &module,
                entry_point: shader.fs_entry,
                compilation_options: wgpu::PipelineCompilationOptions::default(),
                targets: &[Some(wgpu::ColorTargetState {
                    format: surface_format,
                    blend: Some(wgpu::BlendState::ALPHA_BLENDING),
                    write_mask: wgpu::ColorWrites::ALL,
                })],
            }),
            primitive: wgpu::PrimitiveState {
                topology: wgpu::PrimitiveTopology::LineList,
                front_face: wgpu::FrontFace::Ccw,
                cull_mode: None,
                ..Default::default()
            },
            // The debug pass has no depth attachment; lines draw over the
            // finished main image.
            depth_stencil: None,
            multisample: wgpu::MultisampleState::default(),
            multiview_mask: None,
            cache: None,
        })
    }
}
