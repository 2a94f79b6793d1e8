//! GPU resource management utilities.
//!
//! Provides wgpu device/surface initialization, growable storage buffers,
//! host-side mirrors of the WGSL buffer layouts, and the particle/palette
//! bind groups shared by the render passes.

/// Growable GPU buffer with automatic reallocation.
pub mod dynamic_buffer;
/// Host-side mirrors of the WGSL buffer structs.
pub mod layout;
/// wgpu device, surface, and queue initialization.
pub mod render_context;
/// Particle and palette storage buffers with their bind groups.
pub mod scene_buffers;
