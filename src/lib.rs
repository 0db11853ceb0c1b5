#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::too_many_arguments)]

pub mod scene;
pub mod renderer;
pub mod app;
pub mod errors;
pub mod utils;

pub use scene::{NodeHandle, NodeTag, SceneGraph, SceneObject, Transform};
pub use scene::camera::{Camera, CameraController, CameraRig, Projection};
pub use scene::light::{Light, LightKind};
pub use renderer::Renderer;
pub use renderer::mesh::{Mesh, Vertex};
pub use renderer::settings::RendererSettings;
pub use renderer::pipeline::ShaderLibrary;
pub use app::App;
pub use app::input::Input;
pub use errors::{EngineError, Result};
