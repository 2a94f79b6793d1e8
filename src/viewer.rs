//! Standalone particle viewer window backed by winit.
//!
//! ```no_run
//! # use plife::Viewer;
//! Viewer::builder()
//!     .with_title("particles")
//!     .build()
//!     .run()
//!     .unwrap();
//! ```
//!
//! Keys: `B` toggles the border, `P` toggles the billboard style, `Space`
//! pauses the drift.

use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use winit::{
    application::ApplicationHandler,
    event::{ElementState, WindowEvent},
    event_loop::{ActiveEventLoop, ControlFlow, EventLoop},
    keyboard::{KeyCode, PhysicalKey},
    window::{Window, WindowId},
};

use crate::{engine::RenderEngine, error::PlifeError, options::Options};

// ── Builder ──────────────────────────────────────────────────────────────

/// Fluent builder for [`Viewer`].
pub struct ViewerBuilder {
    options: Option<Options>,
    title: String,
}

impl ViewerBuilder {
    fn new() -> Self {
        Self {
            options: None,
            title: "Plife".into(),
        }
    }

    /// Override the default options.
    #[must_use]
    pub fn with_options(mut self, options: Options) -> Self {
        self.options = Some(options);
        self
    }

    /// Set the window title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Consume the builder and produce a [`Viewer`].
    #[must_use]
    pub fn build(self) -> Viewer {
        Viewer {
            options: self.options,
            title: self.title,
        }
    }
}

// ── Viewer ───────────────────────────────────────────────────────────────

/// A standalone window that displays the particle scene.
///
/// Construct via [`Viewer::builder`], then call [`run`](Self::run) to
/// enter the event loop.
pub struct Viewer {
    options: Option<Options>,
    title: String,
}

impl Viewer {
    /// Start a new builder.
    #[must_use]
    pub fn builder() -> ViewerBuilder {
        ViewerBuilder::new()
    }

    /// Open the window and run the event loop. Blocks until the window is
    /// closed.
    ///
    /// # Errors
    ///
    /// Returns [`PlifeError::Viewer`] if the event loop cannot be created
    /// or exits with an error.
    pub fn run(self) -> Result<(), PlifeError> {
        let event_loop = EventLoop::new()
            .map_err(|e| PlifeError::Viewer(e.to_string()))?;
        event_loop.set_control_flow(ControlFlow::Poll);

        let mut app = ViewerApp {
            window: None,
            engine: None,
            last_frame_time: Instant::now(),
            last_title_update: Instant::now(),
            options: self.options,
            title: self.title,
        };

        event_loop
            .run_app(&mut app)
            .map_err(|e| PlifeError::Viewer(e.to_string()))
    }
}

// ── Winit app ────────────────────────────────────────────────────────────

/// Internal winit application handler.
struct ViewerApp {
    window: Option<Arc<Window>>,
    engine: Option<RenderEngine>,
    last_frame_time: Instant,
    last_title_update: Instant,
    options: Option<Options>,
    title: String,
}

/// How often the window title FPS readout refreshes.
const TITLE_UPDATE_INTERVAL: Duration = Duration::from_millis(250);

/// Window title with the smoothed FPS appended.
fn title_with_fps(base: &str, fps: f32) -> String {
    format!("{base} | {fps:.0} FPS")
}

/// Clamp the wgpu surface size to non-zero dimensions.
fn viewport_size(inner: winit::dpi::PhysicalSize<u32>) -> (u32, u32) {
    (inner.width.max(1), inner.height.max(1))
}

impl ApplicationHandler for ViewerApp {
    fn resumed(&mut self, event_loop: &ActiveEventLoop) {
        if self.window.is_some() {
            return;
        }

        let monitor = event_loop
            .primary_monitor()
            .or_else(|| event_loop.available_monitors().next());
        let attrs = if let Some(mon) = &monitor {
            let mon_size = mon.size();
            let scale = mon.scale_factor();
            #[allow(clippy::cast_possible_truncation)]
            let logical_w = (mon_size.width as f64 / scale * 0.75) as u32;
            #[allow(clippy::cast_possible_truncation)]
            let logical_h = (mon_size.height as f64 / scale * 0.75) as u32;
            Window::default_attributes()
                .with_title(&self.title)
                .with_inner_size(winit::dpi::LogicalSize::new(
                    logical_w, logical_h,
                ))
        } else {
            Window::default_attributes().with_title(&self.title)
        };

        let window = match event_loop.create_window(attrs) {
            Ok(w) => Arc::new(w),
            Err(e) => {
                log::error!("failed to create window: {e}");
                event_loop.exit();
                return;
            }
        };

        let (vp_w, vp_h) = viewport_size(window.inner_size());
        let options = self.options.take().unwrap_or_default();

        let engine = match pollster::block_on(RenderEngine::new(
            window.clone(),
            (vp_w, vp_h),
            options,
        )) {
            Ok(e) => e,
            Err(e) => {
                log::error!("failed to initialize engine: {e}");
                event_loop.exit();
                return;
            }
        };

        window.request_redraw();
        self.window = Some(window);
        self.engine = Some(engine);
    }

    fn window_event(
        &mut self,
        event_loop: &ActiveEventLoop,
        _id: WindowId,
        event: WindowEvent,
    ) {
        if matches!(event, WindowEvent::CloseRequested) {
            event_loop.exit();
            return;
        }

        let (Some(window), Some(engine)) =
            (self.window.as_ref(), self.engine.as_mut())
        else {
            return;
        };

        match event {
            WindowEvent::Resized(event_size) => {
                let (vp_w, vp_h) = viewport_size(event_size);
                engine.resize(vp_w, vp_h);
            }

            WindowEvent::RedrawRequested => {
                let now = Instant::now();
                let dt =
                    now.duration_since(self.last_frame_time).as_secs_f32();
                self.last_frame_time = now;

                if let Err(e) = engine.update(dt) {
                    log::error!("update error: {e}");
                }
                match engine.render() {
                    Ok(()) => {}
                    Err(
                        wgpu::SurfaceError::Outdated
                        | wgpu::SurfaceError::Lost,
                    ) => {
                        let (vp_w, vp_h) =
                            viewport_size(window.inner_size());
                        engine.resize(vp_w, vp_h);
                    }
                    Err(e) => {
                        log::error!("render error: {e:?}");
                    }
                }

                // Refresh the FPS readout at ~4 Hz.
                if now.duration_since(self.last_title_update)
                    >= TITLE_UPDATE_INTERVAL
                {
                    window.set_title(&title_with_fps(
                        &self.title,
                        engine.frame_timing.fps(),
                    ));
                    self.last_title_update = now;
                }

                window.request_redraw();
            }

            WindowEvent::KeyboardInput { event, .. } => {
                if event.state != ElementState::Pressed {
                    return;
                }
                let PhysicalKey::Code(code) = event.physical_key else {
                    return;
                };
                match code {
                    KeyCode::KeyB => engine.toggle_border(),
                    KeyCode::KeyP => engine.toggle_particle_style(),
                    KeyCode::Space => engine.toggle_pause(),
                    _ => (),
                }
            }

            event => {
                engine.handle_window_event(&event);
                window.request_redraw();
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::title_with_fps;

    #[test]
    fn title_includes_rounded_fps() {
        assert_eq!(title_with_fps("Plife", 59.6), "Plife | 60 FPS");
        assert_eq!(title_with_fps("Plife", 240.2), "Plife | 240 FPS");
    }
}
