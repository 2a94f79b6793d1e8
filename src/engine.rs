//! The render engine: owns the GPU context, scene, and render passes.

use std::sync::Arc;

use glam::Vec2;
use winit::{
    event::{ElementState, MouseButton, MouseScrollDelta, WindowEvent},
    window::Window,
};

use crate::{
    camera::CameraController,
    error::PlifeError,
    gpu::{render_context::RenderContext, scene_buffers::SceneBuffers},
    options::Options,
    renderer::{pipeline_util, BorderRenderer, ParticleRenderer},
    scene::Scene,
    util::FrameTiming,
};

/// Drives the particle viewer: advances the scene, uploads it, and records
/// the border and billboard passes into one render pass per frame.
pub struct RenderEngine {
    context: RenderContext,
    camera_controller: CameraController,
    buffers: SceneBuffers,
    border_renderer: BorderRenderer,
    particle_renderer: ParticleRenderer,
    depth_view: wgpu::TextureView,
    /// Frame delta timing and smoothed FPS.
    pub frame_timing: FrameTiming,
    options: Options,
    scene: Scene,
    last_mouse_pos: Option<Vec2>,
    paused: bool,
}

impl RenderEngine {
    /// Initialize the GPU context and all render resources for the given
    /// window.
    ///
    /// # Errors
    ///
    /// Returns [`PlifeError`] if GPU initialization or the initial scene
    /// upload fails.
    pub async fn new(
        window: Arc<Window>,
        initial_size: (u32, u32),
        options: Options,
    ) -> Result<Self, PlifeError> {
        let context = RenderContext::new(window, initial_size).await?;

        let scene = Scene::spawn(&options.world, &options.palette);
        log::info!(
            "spawned {} particles in a {} unit domain",
            scene.particles.len(),
            scene.world_size
        );

        let camera_controller = CameraController::new(
            &context,
            &options.camera,
            options.world.size,
        );
        let buffers =
            SceneBuffers::new(&context.device, &context.queue, &scene)?;

        let border_renderer = BorderRenderer::new(
            &context,
            &camera_controller.layout,
            buffers.border_layout(),
        );
        let particle_renderer = ParticleRenderer::new(
            &context,
            &camera_controller.layout,
            buffers.particle_layout(),
        );

        let depth_view = create_depth_view(
            &context.device,
            context.config.width,
            context.config.height,
        );

        Ok(Self {
            context,
            camera_controller,
            buffers,
            border_renderer,
            particle_renderer,
            depth_view,
            frame_timing: FrameTiming::new(),
            options,
            scene,
            last_mouse_pos: None,
            paused: false,
        })
    }

    /// Current options.
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Advance the scene and re-upload the particle buffer.
    ///
    /// # Errors
    ///
    /// Returns [`PlifeError::BufferEncode`] if the scene cannot be encoded
    /// for upload.
    pub fn update(&mut self, dt: f32) -> Result<(), PlifeError> {
        if !self.paused {
            self.scene.advect(dt);
            self.buffers.upload(
                &self.context.device,
                &self.context.queue,
                &self.scene,
            )?;
        }
        self.camera_controller.update_gpu(&self.context.queue);
        Ok(())
    }

    /// Render one frame.
    ///
    /// # Errors
    ///
    /// Returns [`wgpu::SurfaceError`] if the surface texture cannot be
    /// acquired; the caller decides whether to resize and retry.
    pub fn render(&mut self) -> Result<(), wgpu::SurfaceError> {
        let frame = self.context.get_next_frame()?;
        let view = frame
            .texture
            .create_view(&wgpu::TextureViewDescriptor::default());

        let mut encoder = self.context.create_encoder();
        {
            let [r, g, b] = self.options.display.background;
            let mut render_pass =
                encoder.begin_render_pass(&wgpu::RenderPassDescriptor {
                    label: Some("Scene Pass"),
                    color_attachments: &[Some(
                        wgpu::RenderPassColorAttachment {
                            view: &view,
                            depth_slice: None,
                            resolve_target: None,
                            ops: wgpu::Operations {
                                load: wgpu::LoadOp::Clear(wgpu::Color {
                                    r: f64::from(r),
                                    g: f64::from(g),
                                    b: f64::from(b),
                                    a: 1.0,
                                }),
                                store: wgpu::StoreOp::Store,
                            },
                        },
                    )],
                    depth_stencil_attachment: Some(
                        wgpu::RenderPassDepthStencilAttachment {
                            view: &self.depth_view,
                            depth_ops: Some(wgpu::Operations {
                                load: wgpu::LoadOp::Clear(1.0),
                                store: wgpu::StoreOp::Store,
                            }),
                            stencil_ops: None,
                        },
                    ),
                    timestamp_writes: None,
                    occlusion_query_set: None,
                });

            if self.options.display.show_border {
                self.border_renderer.draw(
                    &mut render_pass,
                    &self.camera_controller.bind_group,
                    self.buffers.border_bind_group(),
                );
            }
            self.particle_renderer.draw(
                &mut render_pass,
                self.options.display.particle_style,
                &self.camera_controller.bind_group,
                self.buffers.particle_bind_group(),
                self.buffers.particle_count(),
            );
        }

        self.context.submit(encoder);
        frame.present();
        let _ = self.frame_timing.end_frame();

        Ok(())
    }

    /// Reconfigure the surface, depth buffer, and camera aspect for a new
    /// window size.
    pub fn resize(&mut self, width: u32, height: u32) {
        if width == 0 || height == 0 {
            return;
        }
        self.context.resize(width, height);
        self.camera_controller.resize(width, height);
        self.depth_view =
            create_depth_view(&self.context.device, width, height);
    }

    /// Toggle the border wireframe.
    pub fn toggle_border(&mut self) {
        self.options.display.show_border = !self.options.display.show_border;
        log::info!("border: {}", self.options.display.show_border);
    }

    /// Switch between square and disc billboards.
    pub fn toggle_particle_style(&mut self) {
        self.options.display.particle_style =
            self.options.display.particle_style.toggled();
        log::info!(
            "particle style: {:?}",
            self.options.display.particle_style
        );
    }

    /// Pause or resume particle drift.
    pub fn toggle_pause(&mut self) {
        self.paused = !self.paused;
        log::info!("paused: {}", self.paused);
    }

    /// Route mouse events to the camera controller.
    pub fn handle_window_event(&mut self, event: &WindowEvent) {
        match event {
            WindowEvent::MouseInput { button, state, .. } => {
                if *button == MouseButton::Left {
                    self.camera_controller.mouse_pressed =
                        *state == ElementState::Pressed;
                    if !self.camera_controller.mouse_pressed {
                        self.last_mouse_pos = None;
                    }
                }
            }
            WindowEvent::CursorMoved { position, .. } => {
                let pos = Vec2::new(position.x as f32, position.y as f32);
                if self.camera_controller.mouse_pressed {
                    if let Some(last) = self.last_mouse_pos {
                        let delta = pos - last;
                        if self.camera_controller.shift_pressed {
                            self.camera_controller.pan(delta);
                        } else {
                            self.camera_controller.rotate(delta);
                        }
                    }
                    self.last_mouse_pos = Some(pos);
                }
            }
            WindowEvent::MouseWheel { delta, .. } => {
                let scroll = match delta {
                    MouseScrollDelta::LineDelta(_, y) => *y,
                    MouseScrollDelta::PixelDelta(pos) => pos.y as f32 * 0.01,
                };
                self.camera_controller.zoom(scroll);
            }
            WindowEvent::ModifiersChanged(modifiers) => {
                self.camera_controller.shift_pressed =
                    modifiers.state().shift_key();
            }
            _ => (),
        }
    }
}

fn create_depth_view(
    device: &wgpu::Device,
    width: u32,
    height: u32,
) -> wgpu::TextureView {
    let texture = device.create_texture(&wgpu::TextureDescriptor {
        label: Some("Depth Texture"),
        size: wgpu::Extent3d {
            width: width.max(1),
            height: height.max(1),
            depth_or_array_layers: 1,
        },
        mip_level_count: 1,
        sample_count: 1,
        dimension: wgpu::TextureDimension::D2,
        format: pipeline_util::DEPTH_FORMAT,
        usage: wgpu::TextureUsages::RENDER_ATTACHMENT,
        view_formats: &[],
    });
    texture.create_view(&wgpu::TextureViewDescriptor::default())
}
