//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization and growable instance
//! buffers.

/// Growable per-instance vertex buffers.
pub mod dynamic_buffer;
/// wgpu device, surface, queue and depth buffer initialization.
pub mod render_context;

pub use dynamic_buffer::InstanceBuffer;
pub use render_context::{FrameAcquire, RenderContext, RenderContextError};
