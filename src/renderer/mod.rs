//! Multi-pass renderer.
//!
//! A frame steps through a fixed sequence: an offscreen shadow depth pass
//! (only when a directional light exists), the main lit color pass against
//! the swapchain, and an optional debug line pass. All buffer uploads for a
//! frame are issued before that frame's passes are recorded; ordering is
//! carried by program order, there are no explicit barriers.

pub mod context;
pub mod settings;
pub mod mesh;
pub mod uniforms;
pub mod extract;
pub mod pipeline;
pub mod passes;

use crate::errors::Result;
use crate::scene::graph::SceneGraph;

pub use context::GpuContext;
pub use extract::{DrawItem, FramePlan, PassKind, plan_frame};
pub use passes::LineRecorder;
pub use pipeline::{ShaderLibrary, ShaderSource};
pub use settings::RendererSettings;

use passes::debug_lines::{DebugLinePass, draw_light_gizmos};
use passes::forward::ForwardPass;
use passes::shadow::ShadowPass;
use pipeline::Pipelines;

/// Externally supplied hooks into the frame.
///
/// `overlay` runs inside the main pass after the scene draws and before the
/// pass ends; this is the seam a widget layer plugs into. `debug_lines`
/// runs in the debug pass with an immediate-mode [`LineRecorder`].
#[derive(Default)]
pub struct FrameCallbacks<'a> {
    pub overlay: Option<&'a mut dyn FnMut(&mut wgpu::RenderPass<'_>)>,
    pub debug_lines: Option<&'a mut dyn FnMut(&mut LineRecorder<'_, '_>)>,
}

/// Owns the GPU context, the compiled pipelines and the per-pass resources,
/// and drives the frame sequence.
pub struct Renderer {
    ctx: GpuContext,
    pub settings: RendererSettings,
    pipelines: Pipelines,
    shadow: ShadowPass,
    forward: ForwardPass,
    lines: DebugLinePass,
}

impl Renderer {
    /// Builds pipelines and pass resources on an initialized GPU context.
    #[must_use]
    pub fn new(ctx: GpuContext, settings: RendererSettings, shaders: &ShaderLibrary<'_>) -> Self {
        let pipelines = Pipelines::new(&ctx.device, ctx.config.format, ctx.depth_format, shaders);
        let shadow = ShadowPass::new(
            &ctx.device,
            &pipelines,
            ctx.depth_format,
            settings.shadow_map_size,
        );
        let forward = ForwardPass::new(&ctx.device, &pipelines, &shadow);
        let lines = DebugLinePass::new(&ctx.device, &pipelines, &forward.camera_buffer);

        Self {
            ctx,
            settings,
            pipelines,
            shadow,
            forward,
            lines,
        }
    }

    #[inline]
    #[must_use]
    pub fn device(&self) -> &wgpu::Device {
        &self.ctx.device
    }

    #[inline]
    #[must_use]
    pub fn queue(&self) -> &wgpu::Queue {
        &self.ctx.queue
    }

    #[inline]
    #[must_use]
    pub fn surface_size(&self) -> (u32, u32) {
        (self.ctx.config.width, self.ctx.config.height)
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.ctx.resize(width, height);
    }

    /// Renders one frame without external hooks.
    pub fn render(&mut self, graph: &mut SceneGraph) -> Result<()> {
        self.render_with(graph, FrameCallbacks::default())
    }

    /// Renders one frame: plan, upload, then shadow, main and debug passes
    /// in that order.
    pub fn render_with(
        &mut self,
        graph: &mut SceneGraph,
        callbacks: FrameCallbacks<'_>,
    ) -> Result<()> {
        if self.ctx.config.width == 0 || self.ctx.config.height == 0 {
            return Ok(());
        }

        // Frame-start preconditions (camera, graph shape) are checked here;
        // a failed plan renders nothing at all.
        let plan = extract::plan_frame(graph)?;

        let output = match self.ctx.surface.get_current_texture() {
            Ok(output) => output,
            Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                self.ctx.resize(self.ctx.config.width, self.ctx.config.height);
                return Ok(());
            }
            Err(wgpu::SurfaceError::Timeout) => return Ok(()),
            Err(err @ wgpu::SurfaceError::OutOfMemory) => return Err(err.into()),
            Err(err) => {
                log::error!("surface error: {err}");
                return Ok(());
            }
        };
        let view = output
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        // All uploads land before any pass is recorded.
        if let Some(light_vp) = plan.light_view_projection {
            self.shadow.prepare(&self.ctx.queue, light_vp);
        }
        self.forward.prepare(&self.ctx.queue, &self.shadow, &plan);
        self.forward.upload_draws(
            &self.ctx.device,
            &self.ctx.queue,
            &self.pipelines,
            graph,
            &plan,
        );

        let mut encoder = self
            .ctx
            .device
            .create_command_encoder(&wgpu::CommandEncoderDescriptor {
                label: Some("Render Encoder"),
            });

        if plan.light_view_projection.is_some() {
            self.shadow
                .record(&mut encoder, &self.pipelines, graph, &plan.draws);
        }

        self.forward.record(
            &mut encoder,
            &self.pipelines,
            &view,
            &self.ctx.depth_view,
            self.settings.clear_color,
            graph,
            &plan,
            callbacks.overlay,
        );

        let gizmos = self.settings.draw_light_gizmos;
        let mut user_lines = callbacks.debug_lines;
        if gizmos || user_lines.is_some() {
            self.lines.record(
                &self.ctx.device,
                &mut encoder,
                &self.pipelines,
                &view,
                &mut |recorder| {
                    if gizmos {
                        draw_light_gizmos(recorder, graph);
                    }
                    if let Some(draw) = user_lines.as_mut() {
                        draw(recorder);
                    }
                },
            );
        }

        self.ctx.queue.submit(std::iter::once(encoder.finish()));
        output.present();

        Ok(())
    }
}
