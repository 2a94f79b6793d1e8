//! Wireframe cube outlining the simulation domain.
//!
//! The border is drawn as a non-indexed line list: 24 vertices covering the
//! 12 cube edges, one instance. The shader scales unit-cube corners by half
//! the world size read from the particle storage buffer, so the border
//! tracks the domain without any per-frame CPU work.

use crate::{
    gpu::render_context::RenderContext, renderer::pipeline_util,
};

/// Unit-cube edge endpoints, mirroring the corner table in
/// `assets/shaders/border.wgsl`. Consecutive pairs form one edge; each
/// corner of the cube appears exactly three times.
pub const EDGE_CORNERS: [[f32; 3]; 24] = [
    // Edges along x.
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, 1.0],
    // Edges along y.
    [-1.0, -1.0, -1.0],
    [-1.0, 1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, 1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [1.0, -1.0, 1.0],
    [1.0, 1.0, 1.0],
    // Edges along z.
    [-1.0, -1.0, -1.0],
    [-1.0, -1.0, 1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [-1.0, 1.0, 1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

/// Draws the domain border wireframe.
pub struct BorderRenderer {
    pipeline: wgpu::RenderPipeline,
}

impl BorderRenderer {
    /// Build the border pipeline against the camera and particle layouts.
    pub fn new(
        context: &RenderContext,
        camera_layout: &wgpu::BindGroupLayout,
        border_layout: &wgpu::BindGroupLayout,
    ) -> Self {
        let shader = context.device.create_shader_module(
            wgpu::include_wgsl!("../../assets/shaders/border.wgsl"),
        );

        let pipeline_layout = context.device.create_pipeline_layout(
            &wgpu::PipelineLayoutDescriptor {
                label: Some("Border Pipeline Layout"),
                bind_group_layouts: &[camera_layout, border_layout],
                push_constant_ranges: &[],
            },
        );

        let pipeline = context.device.create_render_pipeline(
            &wgpu::RenderPipelineDescriptor {
                label: Some("Border Pipeline"),
                layout: Some(&pipeline_layout),
                vertex: wgpu::VertexState {
                    module: &shader,
                    entry_point: Some("vs_main"),
                    buffers: &[],
                    compilation_options: Default::default(),
                },
                fragment: Some(wgpu::FragmentState {
                    module: &shader,
                    entry_point: Some("fs_main"),
                    targets: &pipeline_util::fragment_targets(
                        context.format(),
                    ),
                    compilation_options: Default::default(),
                }),
                primitive: wgpu::PrimitiveState {
                    topology: wgpu::PrimitiveTopology::LineList,
                    ..Default::default()
                },
                depth_stencil: Some(pipeline_util::depth_stencil_state()),
                multisample: wgpu::MultisampleState::default(),
                multiview: None,
                cache: None,
            },
        );

        Self { pipeline }
    }

    /// Record the border draw: 24 vertices, 1 instance.
    pub fn draw<'a>(
        &'a self,
        render_pass: &mut wgpu::RenderPass<'a>,
        camera_bind_group: &'a wgpu::BindGroup,
        border_bind_group: &'a wgpu::BindGroup,
    ) {
        render_pass.set_pipeline(&self.pipeline);
        render_pass.set_bind_group(0, camera_bind_group, &[]);
        render_pass.set_bind_group(1, border_bind_group, &[]);
        render_pass.draw(0..EDGE_CORNERS.len() as u32, 0..1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{HashMap, HashSet};

    fn key(corner: [f32; 3]) -> [i32; 3] {
        [corner[0] as i32, corner[1] as i32, corner[2] as i32]
    }

    #[test]
    fn corner_table_covers_all_twelve_edges() {
        let mut edges = HashSet::new();
        for pair in EDGE_CORNERS.chunks(2) {
            let (a, b) = (key(pair[0]), key(pair[1]));
            // Endpoints differ in exactly one axis.
            let differing =
                (0..3usize).filter(|&i| a[i] != b[i]).count();
            assert_eq!(differing, 1, "{a:?} -> {b:?} is not a cube edge");

            let edge = if a < b { (a, b) } else { (b, a) };
            assert!(edges.insert(edge), "duplicate edge {edge:?}");
        }
        assert_eq!(edges.len(), 12);
    }

    #[test]
    fn each_corner_appears_three_times() {
        let mut counts: HashMap<[i32; 3], usize> = HashMap::new();
        for corner in EDGE_CORNERS {
            *counts.entry(key(corner)).or_default() += 1;
        }

        assert_eq!(counts.len(), 8);
        for (corner, count) in counts {
            assert_eq!(count, 3, "corner {corner:?}");
        }
    }

    #[test]
    fn scaled_corners_span_half_world_size() {
        let world_size = 10.0_f32;
        for corner in EDGE_CORNERS {
            for axis in corner {
                let scaled = axis * world_size * 0.5;
                assert_eq!(scaled.abs(), world_size / 2.0);
            }
        }
    }
}
