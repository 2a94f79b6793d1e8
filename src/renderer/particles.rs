//! Particle billboard passes.
//!
//! Both styles draw one 4-vertex triangle strip per particle with no vertex
//! buffer; the quad corner comes from the two low bits of the vertex index
//! and the particle record from the instance index. The square style
//! offsets in clip space after projection, the disc style offsets in view
//! space before projection and discards fragments outside the unit circle.

use crate::{
    gpu::render_context::RenderContext,
    options::ParticleStyle,
    renderer::pipeline_util,
};

/// Draws particles as camera-facing billboards in the selected style.
pub struct ParticleRenderer {
    square_pipeline: wgpu::RenderPipeline,
    disc_pipeline: wgpu::RenderPipeline,
}

impl ParticleRenderer {
    /// Build both billboard pipelines against the camera and particle
    /// layouts.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        particle_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let square_shader = context.device.create_shader_module(
            wgpu::include_wgsl!("../../assets/shaders/particles.wgsl"),
        );
        let disc_shader = context.device.create_shader_module(
            wgpu::include_wgsl!("../../assets/shaders/particle_discs.wgsl"),
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Particle Pipeline Layout"),
                bind_group_layouts: &[camera_layout, particle_layout],
                push_constant_ranges: &[],
            },
        );

        let square_pipeline = Self::create_pipeline(
            context,
            &pipeline_layout,
            &square_shader,
            "Particle Square Pipeline",
        );
        let disc_pipeline = Self::create_pipeline(
            context,
            &pipeline_layout,
            &disc_shader,
            "Particle Disc Pipeline",
        );

        Self {
            square_pipeline,
            disc_pipeline,
        }
    }

    fn create_pipeline(
        context: &RenderContext,
        layout: &wgpu::PipelineLayout,
        shader: &wgpu::ShaderModule,
        label: &str,
    ) -> wgpu::RenderPipeline {
        context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some(label),
                layout: Some(layout),
                vertex: wgpu::VertexState {
                    module: shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::fragment_targets(
                        context.format(),
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::TriangleStrip,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        )
    }

    /// Record the particle draw: 4 vertices per instance, one instance per
    /// particle. Skips the draw entirely when the scene holds no particles.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        style: ParticleStyle,
        camera_bind_group: &'a wgpu::BindGroup,
        particle_bind_group: &'a wgpu::BindGroup,
        particle_count: u32,
    ) {
        if particle_count == 0 {
            return;
        }

        let pipeline = match style {
            ParticleStyle::Square => &self.square_pipeline,
            ParticleStyle::Disc => &self.disc_pipeline,
        };

        render_pass.set_pipeline(pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, particle_bind_group, &[]);
        render_pass.draw(0..4, 0..particle_count);
    }
}
