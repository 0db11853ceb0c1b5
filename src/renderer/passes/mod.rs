//! The per-frame pass sequence: shadow depth, forward color, debug lines.

pub mod shadow;
pub mod forward;
pub mod debug_lines;

pub use debug_lines::LineRecorder;
