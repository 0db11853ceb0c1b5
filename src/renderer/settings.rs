//! Renderer configuration.
//!
//! [`RendererSettings`] is consumed once when the GPU context and the
//! renderer are created. Target frame rate and shadow resolution arrive
//! here as externally configured constants; the engine treats them as
//! opaque values.

/// Global configuration for renderer and frame-loop initialization.
#[derive(Debug, Clone)]
pub struct RendererSettings {
    /// Background clear color for the main pass.
    pub clear_color: wgpu::Color,

    /// Enable vertical synchronization.
    pub vsync: bool,

    /// GPU adapter selection preference.
    pub power_preference: wgpu::PowerPreference,

    /// Depth buffer texture format, shared by the main pass depth target
    /// and the shadow map.
    pub depth_format: wgpu::TextureFormat,

    /// Edge length of the square shadow map in texels.
    pub shadow_map_size: u32,

    /// Frame-rate cap enforced by sleeping at the end of each frame.
    pub target_fps: u32,

    /// Draw light gizmo lines in the debug pass.
    pub draw_light_gizmos: bool,
}

impl Default for RendererSettings {
    fn default() -> Self {
        Self {
            clear_color: wgpu::Color {
                r: 0.1,
                g: 0.1,
                b: 0.1,
                a: 1.0,
            },
            vsync: true,
            power_preference: wgpu::PowerPreference::HighPerformance,
            depth_format: wgpu::TextureFormat::Depth32Float,
            shadow_map_size: 1024,
            target_fps: 144,
            draw_light_gizmos: false,
        }
    }
}
