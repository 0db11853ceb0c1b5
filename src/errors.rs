//! Error types.
//!
//! All fallible public APIs return [`Result<T>`], an alias for
//! `std::result::Result<T, EngineError>`. Frame-start precondition
//! violations (no active camera, unusable surface) are reported as errors
//! so the application shell can log them and terminate; they are never
//! recovered mid-frame.

use thiserror::Error;

/// The main error type for the engine.
#[derive(Error, Debug)]
pub enum EngineError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the rendering surface for the window.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// The adapter offers no usable configuration for the surface.
    #[error("No default surface configuration available for this adapter")]
    SurfaceConfigUnavailable,

    /// The surface failed while acquiring the current frame.
    #[error("Surface error: {0}")]
    Surface(#[from] wgpu::SurfaceError),

    // ========================================================================
    // Frame Preconditions
    // ========================================================================
    /// The scene graph contains no camera node to render from.
    #[error("No camera node in the scene graph")]
    NoActiveCamera,

    // ========================================================================
    // Application Shell
    // ========================================================================
    /// Event loop error (winit).
    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

/// Alias for `Result<T, EngineError>`.
pub type Result<T> = std::result::Result<T, EngineError>;
