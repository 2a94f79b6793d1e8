// -- Lint policy ---------------------------------------------------------
// This is the single source of truth for crate-wide lints.

// Broad lint groups
#![deny(clippy::all)]
// No panicking in library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::todo)]
#![deny(clippy::unimplemented)]
// No debug/print artifacts
#![deny(clippy::dbg_macro)]
#![deny(clippy::print_stdout)]
#![deny(clippy::print_stderr)]
// Import hygiene
#![deny(clippy::wildcard_imports)]
// Documentation
#![warn(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]
// Unused / redundant code
#![warn(unused_qualifications)]

//! GPU-accelerated 3D particle-life visualization built on wgpu.
//!
//! Renders a particle population as camera-facing billboards with
//! palette-indexed coloring, plus a wireframe cube outlining the simulation
//! domain. Three render passes share one camera uniform and one particle
//! storage buffer; each pass expands its geometry on the GPU from vertex and
//! instance indices alone, so no per-particle geometry is ever generated on
//! the CPU.
//!
//! # Key entry points
//!
//! - [`Viewer`] — standalone window and event loop
//! - [`engine::RenderEngine`] — per-frame pass composition
//! - [`options::Options`] — runtime configuration (world, display, camera,
//!   palette), with TOML presets
//! - [`scene::Scene`] — the CPU-side particle snapshot uploaded each frame

pub mod camera;
pub mod engine;
pub mod error;
pub mod gpu;
pub mod options;
pub mod renderer;
pub mod scene;
pub mod util;
pub mod viewer;

pub use error::PlifeError;
pub use viewer::Viewer;
