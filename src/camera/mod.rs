//! Perspective camera and orbit controls.

/// Orbit controller owning the camera uniform buffer and bind group.
pub mod controller;
/// Camera state and the GPU uniform it produces.
pub mod core;

pub use controller::CameraController;
pub use core::{Camera, CameraUniform};
