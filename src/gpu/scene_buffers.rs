//! Particle and palette storage buffers shared by the render passes.
//!
//! One particle buffer serves every pass; the palette buffer is only bound
//! by the billboard passes. The border pass therefore gets its own bind
//! group layout with just the particle binding.

use wgpu::util::DeviceExt;

use crate::{
    error::PlifeError,
    gpu::{dynamic_buffer::DynamicBuffer, layout},
    scene::Scene,
};

/// GPU residency for a [`Scene`]: the particle storage buffer (re-uploaded
/// every frame), the palette storage buffer (uploaded once), and the bind
/// groups the render passes consume.
pub struct SceneBuffers {
    particles: DynamicBuffer,
    colors: wgpu::Buffer,
    border_layout: wgpu::BindGroupLayout,
    border_bind_group: wgpu::BindGroup,
    particle_layout: wgpu::BindGroupLayout,
    particle_bind_group: wgpu::BindGroup,
    particle_count: u32,
}

impl SceneBuffers {
    /// Upload the initial scene snapshot and build the bind groups.
    ///
    /// # Errors
    ///
    /// Returns [`PlifeError::BufferEncode`] if the scene cannot be encoded
    /// into the WGSL buffer layout.
    pub fn new(
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
    ) -> Result<Self, PlifeError> {
        scene.debug_validate();

        let particle_bytes = layout::encode_particles(scene)?;
        let color_bytes = layout::encode_colors(&scene.palette)?;

        let mut particles = DynamicBuffer::new(
            device,
            "Particle Storage Buffer",
            particle_bytes.len(),
            wgpu::BufferUsages::STORAGE,
        );
        let _ = particles.write(device, queue, &particle_bytes);

        let colors =
            device.create_buffer_init(&wgpu::util::BufferInitDescriptor {
                label: Some("Palette Storage Buffer"),
                contents: &color_bytes,
                usage: wgpu::BufferUsages::STORAGE,
            });

        let border_layout = create_storage_layout(device, "Border Data", 1);
        let particle_layout =
            create_storage_layout(device, "Particle Data", 2);
        let border_bind_group = create_border_bind_group(
            device,
            &border_layout,
            particles.buffer(),
        );
        let particle_bind_group = create_particle_bind_group(
            device,
            &particle_layout,
            particles.buffer(),
            &colors,
        );

        Ok(Self {
            particles,
            colors,
            border_layout,
            border_bind_group,
            particle_layout,
            particle_bind_group,
            particle_count: scene.particles.len() as u32,
        })
    }

    /// Re-upload the particle buffer from the current scene snapshot,
    /// recreating bind groups if the buffer was reallocated.
    ///
    /// # Errors
    ///
    /// Returns [`PlifeError::BufferEncode`] if the scene cannot be encoded.
    pub fn upload(
        &mut self,
        device: &wgpu::Device,
        queue: &wgpu::Queue,
        scene: &Scene,
    ) -> Result<(), PlifeError> {
        scene.debug_validate();

        let particle_bytes = layout::encode_particles(scene)?;
        let reallocated = self.particles.write(device, queue, &particle_bytes);
        if reallocated {
            self.border_bind_group = create_border_bind_group(
                device,
                &self.border_layout,
                self.particles.buffer(),
            );
            self.particle_bind_group = create_particle_bind_group(
                device,
                &self.particle_layout,
                self.particles.buffer(),
                &self.colors,
            );
        }
        self.particle_count = scene.particles.len() as u32;

        Ok(())
    }

    /// Bind group layout for the border pass (particles only).
    pub fn border_layout(&self) -> &wgpu::BindGroupLayout {
        &self.border_layout
    }

    /// Bind group layout for the billboard passes (particles + palette).
    pub fn particle_layout(&self) -> &wgpu::BindGroupLayout {
        &self.particle_layout
    }

    /// Bind group bound as group 1 in the border pass.
    pub fn border_bind_group(&self) -> &wgpu::BindGroup {
        &self.border_bind_group
    }

    /// Bind group bound as group 1 in the billboard passes.
    pub fn particle_bind_group(&self) -> &wgpu::BindGroup {
        &self.particle_bind_group
    }

    /// Live particle count from the last upload.
    pub fn particle_count(&self) -> u32 {
        self.particle_count
    }
}

fn create_storage_layout(
    device: &wgpu::Device,
    label: &str,
    binding_count: u32,
) -> wgpu::BindGroupLayout {
    let entries: Vec<wgpu::BindGroupLayoutEntry> = (0..binding_count)
        .map(|binding| wgpu::BindGroupLayoutEntry {
            binding,
            visibility: wgpu::ShaderStages::VERTEX
                | wgpu::ShaderStages::FRAGMENT,
            ty: wgpu::BindingType::Buffer {
                ty: wgpu::BufferBindingType::Storage { read_only: true },
                has_dynamic_offset: false,
                min_binding_size: None,
            },
            count: None,
        })
        .collect();

    device.create_bind_group_layout(&wgpu::BindGroupLayoutDescriptor {
        label: Some(&format!("{label} Layout")),
        entries: &entries,
    })
}

fn create_border_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    particles: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[wgpu::BindGroupEntry {
            binding: 0,
            resource: particles.as_entire_binding(),
        }],
        label: Some("Border Data Bind Group"),
    })
}

fn create_particle_bind_group(
    device: &wgpu::Device,
    layout: &wgpu::BindGroupLayout,
    particles: &wgpu::Buffer,
    colors: &wgpu::Buffer,
) -> wgpu::BindGroup {
    device.create_bind_group(&wgpu::BindGroupDescriptor {
        layout,
        entries: &[
            wgpu::BindGroupEntry {
                binding: 0,
                resource: particles.as_entire_binding(),
            },
            wgpu::BindGroupEntry {
                binding: 1,
                resource: colors.as_entire_binding(),
            },
        ],
        label: Some("Particle Data Bind Group"),
    })
}
