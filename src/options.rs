//! Viewer options with TOML support.
//!
//! All tweakable settings (world, display, camera, palette) live here. Every
//! sub-struct uses `#[serde(default)]` so a partial TOML file overriding a
//! single section works correctly.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::PlifeError;

/// Top-level options container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Simulation domain and particle population.
    pub world: WorldOptions,
    /// Render toggles.
    pub display: DisplayOptions,
    /// Camera projection and control speeds.
    pub camera: CameraOptions,
    /// Particle color palette.
    pub palette: PaletteOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`PlifeError::Io`] if the file cannot be read and
    /// [`PlifeError::OptionsParse`] if it is not valid TOML.
    pub fn load(path: &Path) -> Result<Self, PlifeError> {
        let content = std::fs::read_to_string(path)?;
        let options: Self = toml::from_str(&content).map_err(|e| {
            PlifeError::OptionsParse(format!(
                "failed to parse {}: {e}",
                path.display()
            ))
        })?;
        options.validate()?;
        Ok(options)
    }

    /// Reject values the renderer cannot represent: the scene wraps
    /// positions modulo the world size and indexes the palette by
    /// particle id, so both must be usable.
    fn validate(&self) -> Result<(), PlifeError> {
        if !(self.world.size.is_finite() && self.world.size > 0.0) {
            return Err(PlifeError::OptionsParse(format!(
                "world.size must be positive and finite, got {}",
                self.world.size
            )));
        }
        if self.palette.colors.is_empty() {
            return Err(PlifeError::OptionsParse(
                "palette.colors must not be empty".into(),
            ));
        }
        Ok(())
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`PlifeError::OptionsParse`] if serialization fails and
    /// [`PlifeError::Io`] if the file cannot be written.
    pub fn save(&self, path: &Path) -> Result<(), PlifeError> {
        let content = toml::to_string_pretty(self).map_err(|e| {
            PlifeError::OptionsParse(format!(
                "failed to serialize options: {e}"
            ))
        })?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, content)?;
        Ok(())
    }
}

/// Simulation domain and particle population.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct WorldOptions {
    /// Scalar extent of the cubic domain.
    pub size: f32,
    /// Number of particles to spawn.
    pub particle_count: usize,
    /// Maximum per-axis drift speed at spawn.
    pub max_drift_speed: f32,
}

impl Default for WorldOptions {
    fn default() -> Self {
        Self {
            size: 10.0,
            particle_count: 1000,
            max_drift_speed: 0.5,
        }
    }
}

/// Billboard style for the particle pass.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ParticleStyle {
    /// Flat clip-space squares.
    Square,
    /// View-space quads masked to discs.
    #[default]
    Disc,
}

impl ParticleStyle {
    /// The other style; used by the runtime toggle.
    pub fn toggled(self) -> Self {
        match self {
            Self::Square => Self::Disc,
            Self::Disc => Self::Square,
        }
    }
}

/// Render toggles.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DisplayOptions {
    /// Whether to draw the domain border wireframe.
    pub show_border: bool,
    /// Billboard style for the particle pass.
    pub particle_style: ParticleStyle,
    /// Clear color, linear RGB.
    pub background: [f32; 3],
}

impl Default for DisplayOptions {
    fn default() -> Self {
        Self {
            show_border: true,
            particle_style: ParticleStyle::default(),
            background: [0.1, 0.1, 0.1],
        }
    }
}

/// Camera projection and control speeds.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CameraOptions {
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
    /// Orbit speed in radians per pixel of mouse motion.
    pub rotate_speed: f32,
    /// Pan speed in world units per pixel.
    pub pan_speed: f32,
    /// Zoom speed per scroll line.
    pub zoom_speed: f32,
}

impl Default for CameraOptions {
    fn default() -> Self {
        Self {
            fovy: 45.0,
            znear: 0.1,
            zfar: 100.0,
            rotate_speed: 0.01,
            pan_speed: 0.01,
            zoom_speed: 0.05,
        }
    }
}

/// Particle color palette, indexed by particle id.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PaletteOptions {
    /// RGB palette entries.
    pub colors: Vec<[f32; 3]>,
}

impl Default for PaletteOptions {
    fn default() -> Self {
        Self {
            colors: vec![
                [0.9, 0.2, 0.2],
                [0.2, 0.9, 0.2],
                [0.2, 0.4, 0.9],
                [0.9, 0.8, 0.2],
                [0.7, 0.3, 0.9],
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn options_round_trip_through_toml() {
        let mut options = Options::default();
        options.world.particle_count = 42;
        options.display.particle_style = ParticleStyle::Square;
        options.palette.colors = vec![[1.0, 0.0, 0.0]];

        let toml_str = toml::to_string_pretty(&options).unwrap();
        let parsed: Options = toml::from_str(&toml_str).unwrap();

        assert_eq!(parsed, options);
    }

    #[test]
    fn partial_toml_uses_defaults_for_missing_sections() {
        let parsed: Options = toml::from_str(
            r#"
            [world]
            size = 25.0
            "#,
        )
        .unwrap();

        assert_eq!(parsed.world.size, 25.0);
        // Unspecified fields and sections fall back to defaults.
        assert_eq!(
            parsed.world.particle_count,
            WorldOptions::default().particle_count
        );
        assert_eq!(parsed.display, DisplayOptions::default());
        assert_eq!(parsed.camera, CameraOptions::default());
    }

    #[test]
    fn empty_palette_fails_validation() {
        let parsed: Options = toml::from_str(
            r#"
            [palette]
            colors = []
            "#,
        )
        .unwrap();

        assert!(parsed.validate().is_err());
    }

    #[test]
    fn non_positive_world_size_fails_validation() {
        for toml_str in ["[world]\nsize = 0.0", "[world]\nsize = -5.0"] {
            let parsed: Options = toml::from_str(toml_str).unwrap();
            assert!(parsed.validate().is_err(), "{toml_str}");
        }
    }

    #[test]
    fn default_options_pass_validation() {
        Options::default().validate().unwrap();
    }

    #[test]
    fn particle_style_parses_snake_case() {
        let parsed: Options = toml::from_str(
            r#"
            [display]
            particle_style = "square"
            "#,
        )
        .unwrap();

        assert_eq!(parsed.display.particle_style, ParticleStyle::Square);
        assert_eq!(parsed.display.particle_style.toggled(), ParticleStyle::Disc);
    }
}
