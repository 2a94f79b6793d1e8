//! Render passes: the domain border wireframe and the particle billboards.

/// Wireframe cube marking the simulation domain.
pub mod border;
/// Particle billboard pipelines (flat squares and discs).
pub mod particles;
/// Shared pipeline state helpers.
pub mod pipeline_util;

pub use border::BorderRenderer;
pub use particles::ParticleRenderer;
