//! Host-side mirrors of the WGSL buffer structs.
//!
//! The storage buffers bound by the shaders hold vec3 fields and
//! runtime-sized arrays, so offsets and padding are computed by `encase`
//! rather than hand-written `#[repr(C)]` structs. The encoded bytes must
//! match the `Particles` and `Colors` declarations in `assets/shaders/`.

use encase::ShaderType;
use glam::Vec3;

use crate::{error::PlifeError, scene::Scene};

/// One particle record. Matches the WGSL `Particle` struct layout:
/// position at offset 0, velocity at 16, id at 28; 32-byte stride.
#[derive(Debug, Clone, Copy, ShaderType)]
pub struct GpuParticle {
    /// World-space position.
    pub position: Vec3,
    /// Velocity; part of the shared layout but unread by the shaders.
    pub velocity: Vec3,
    /// Palette index. Must be below the palette length.
    pub id: u32,
}

/// Contents of the particle storage buffer (group 1, binding 0).
#[derive(Debug, ShaderType)]
pub struct GpuParticles {
    /// Scalar extent of the cubic simulation domain.
    pub world_size: f32,
    /// Live particle count.
    pub length: u32,
    /// Particle records, starting at offset 16.
    #[size(runtime)]
    pub particles: Vec<GpuParticle>,
}

/// Contents of the palette storage buffer (group 1, binding 1).
#[derive(Debug, ShaderType)]
pub struct GpuColors {
    /// Palette entry count.
    pub length: u32,
    /// RGB palette entries, starting at offset 16 with a 16-byte stride.
    #[size(runtime)]
    pub colors: Vec<Vec3>,
}

/// Encode the particle buffer contents for upload.
///
/// `length` always reflects the real particle count; an empty scene still
/// encodes one zeroed record because wgpu rejects zero-length array
/// bindings, and the border pass reads `world_size` from this buffer even
/// when nothing else is drawn.
pub fn encode_particles(scene: &Scene) -> Result<Vec<u8>, PlifeError> {
    let mut records: Vec<GpuParticle> = scene
        .particles
        .iter()
        .map(|p| GpuParticle {
            position: p.position,
            velocity: p.velocity,
            id: p.id,
        })
        .collect();
    if records.is_empty() {
        records.push(GpuParticle {
            position: Vec3::ZERO,
            velocity: Vec3::ZERO,
            id: 0,
        });
    }

    encode(&GpuParticles {
        world_size: scene.world_size,
        length: scene.particles.len() as u32,
        particles: records,
    })
}

/// Encode the palette buffer contents for upload.
pub fn encode_colors(palette: &[Vec3]) -> Result<Vec<u8>, PlifeError> {
    let mut colors = palette.to_vec();
    if colors.is_empty() {
        colors.push(Vec3::ZERO);
    }

    encode(&GpuColors {
        length: palette.len() as u32,
        colors,
    })
}

fn encode<T>(contents: &T) -> Result<Vec<u8>, PlifeError>
where
    T: ShaderType + encase::internal::WriteInto,
{
    let mut buffer = encase::StorageBuffer::new(Vec::new());
    buffer
        .write(contents)
        .map_err(|e| PlifeError::BufferEncode(e.to_string()))?;
    Ok(buffer.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::Particle;

    fn read_f32(bytes: &[u8], offset: usize) -> f32 {
        f32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn read_u32(bytes: &[u8], offset: usize) -> u32 {
        u32::from_le_bytes(bytes[offset..offset + 4].try_into().unwrap())
    }

    fn scene_with(particles: Vec<Particle>) -> Scene {
        Scene {
            world_size: 10.0,
            particles,
            palette: vec![Vec3::X, Vec3::Y],
        }
    }

    #[test]
    fn particle_buffer_matches_wgsl_layout() {
        let scene = scene_with(vec![
            Particle {
                position: Vec3::new(1.0, 2.0, 3.0),
                velocity: Vec3::new(4.0, 5.0, 6.0),
                id: 1,
            },
            Particle {
                position: Vec3::new(-1.0, -2.0, -3.0),
                velocity: Vec3::ZERO,
                id: 0,
            },
        ]);
        let bytes = encode_particles(&scene).unwrap();

        // 16-byte header + 32-byte stride per record.
        assert_eq!(bytes.len(), 16 + 2 * 32);
        assert_eq!(read_f32(&bytes, 0), 10.0);
        assert_eq!(read_u32(&bytes, 4), 2);

        // First record: position at 16, velocity at 32, id at 44.
        assert_eq!(read_f32(&bytes, 16), 1.0);
        assert_eq!(read_f32(&bytes, 20), 2.0);
        assert_eq!(read_f32(&bytes, 24), 3.0);
        assert_eq!(read_f32(&bytes, 32), 4.0);
        assert_eq!(read_u32(&bytes, 44), 1);

        // Second record starts one stride later.
        assert_eq!(read_f32(&bytes, 48), -1.0);
        assert_eq!(read_u32(&bytes, 76), 0);
    }

    #[test]
    fn empty_scene_encodes_zero_length_with_placeholder_record() {
        let scene = scene_with(vec![]);
        let bytes = encode_particles(&scene).unwrap();

        assert_eq!(bytes.len(), 16 + 32);
        assert_eq!(read_f32(&bytes, 0), 10.0);
        assert_eq!(read_u32(&bytes, 4), 0);
    }

    #[test]
    fn palette_buffer_matches_wgsl_layout() {
        let palette = vec![Vec3::new(1.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 0.5)];
        let bytes = encode_colors(&palette).unwrap();

        // 16-byte header + 16-byte stride per vec3 entry.
        assert_eq!(bytes.len(), 16 + 2 * 16);
        assert_eq!(read_u32(&bytes, 0), 2);
        assert_eq!(read_f32(&bytes, 16), 1.0);
        assert_eq!(read_f32(&bytes, 32), 0.0);
        assert_eq!(read_f32(&bytes, 40), 0.5);
    }
}
