//! Scene settings
//!
//! Compiled defaults mirror `consts`. Native builds can override them from a
//! JSON file; the web build reads LocalStorage.

use glam::DVec2;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::*;
use crate::sim::Circle;

/// Settings load/validation failures
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("failed to read settings: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid setting `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    // === Scene ===
    /// Rigid body radius (pixels)
    pub circle_radius: f64,
    /// Constant applied force
    pub force: DVec2,
    /// Compass angle of the initial application point (degrees)
    pub initial_angle_deg: f64,

    // === Loop ===
    pub tick_rate_hz: u32,

    // === Drawing ===
    /// Length multiplier for force/torque lines
    pub vector_scale: f64,
    pub stroke_width: f64,
    pub point_radius: f64,
    pub halo_radius: f64,
    pub text_position: DVec2,
    pub text_scale: f64,

    /// Native display size (pixels)
    pub window_size: [u32; 2],
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            circle_radius: CIRCLE_RADIUS,
            force: DVec2::from_array(FORCE),
            initial_angle_deg: INITIAL_ANGLE_DEG,

            tick_rate_hz: TICK_RATE_HZ,

            vector_scale: VECTOR_SCALE,
            stroke_width: STROKE_WIDTH,
            point_radius: POINT_RADIUS,
            halo_radius: HALO_RADIUS,
            text_position: DVec2::from_array(TEXT_POSITION),
            text_scale: TEXT_SCALE,

            window_size: WINDOW_SIZE,
        }
    }
}

impl Settings {
    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "torque_viz_settings";

    /// The session circle, centered at `center`
    pub fn circle(&self, center: DVec2) -> Circle {
        Circle::new(center, self.circle_radius)
    }

    /// Center of the configured display
    pub fn display_center(&self) -> DVec2 {
        DVec2::new(
            f64::from(self.window_size[0]),
            f64::from(self.window_size[1]),
        ) / 2.0
    }

    pub fn validate(&self) -> Result<(), SettingsError> {
        if !self.circle_radius.is_finite() || self.circle_radius <= 0.0 {
            return Err(SettingsError::Invalid {
                field: "circle_radius",
                reason: "must be a positive finite number",
            });
        }
        if self.tick_rate_hz == 0 || self.tick_rate_hz > MAX_TICK_RATE_HZ {
            return Err(SettingsError::Invalid {
                field: "tick_rate_hz",
                reason: "must be between 1 and 1000",
            });
        }
        if !self.force.is_finite() {
            return Err(SettingsError::Invalid {
                field: "force",
                reason: "must be finite",
            });
        }
        if !self.initial_angle_deg.is_finite() {
            return Err(SettingsError::Invalid {
                field: "initial_angle_deg",
                reason: "must be finite",
            });
        }
        Ok(())
    }

    /// Parse and validate settings from JSON
    pub fn from_json(json: &str) -> Result<Self, SettingsError> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load settings from a JSON file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load settings from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(settings) => {
                        log::info!("Loaded settings from LocalStorage");
                        return settings;
                    }
                    Err(e) => log::warn!("Ignoring stored settings: {}", e),
                }
            }
        }

        log::info!("Using default settings");
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let s = Settings::default();
        s.validate().unwrap();
        assert_eq!(s.circle_radius, 300.0);
        assert_eq!(s.force, DVec2::new(0.0, -1.0));
        assert_eq!(s.tick_rate_hz, 60);
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let s = Settings::from_json(r#"{ "circle_radius": 120.0, "force": [1.0, 0.0] }"#).unwrap();
        assert_eq!(s.circle_radius, 120.0);
        assert_eq!(s.force, DVec2::new(1.0, 0.0));
        assert_eq!(s.vector_scale, VECTOR_SCALE);
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = Settings::from_json(r#"{ "circle_radius": 0.0 }"#).unwrap_err();
        assert!(matches!(
            err,
            SettingsError::Invalid {
                field: "circle_radius",
                ..
            }
        ));
    }

    #[test]
    fn test_rejects_zero_tick_rate() {
        let err = Settings::from_json(r#"{ "tick_rate_hz": 0 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "tick_rate_hz", .. }));
    }

    #[test]
    fn test_rejects_huge_tick_rate() {
        let err = Settings::from_json(r#"{ "tick_rate_hz": 4000000000 }"#).unwrap_err();
        assert!(matches!(err, SettingsError::Invalid { field: "tick_rate_hz", .. }));
        Settings::from_json(r#"{ "tick_rate_hz": 1000 }"#).unwrap();
    }

    #[test]
    fn test_rejects_malformed_json() {
        assert!(matches!(
            Settings::from_json("{ not json"),
            Err(SettingsError::Json(_))
        ));
    }

    #[test]
    fn test_circle_and_center() {
        let s = Settings::default();
        let c = s.circle(s.display_center());
        assert_eq!(c.center, DVec2::new(640.0, 400.0));
        assert_eq!(c.radius, 300.0);
    }

    #[cfg(not(target_arch = "wasm32"))]
    #[test]
    fn test_load_missing_file_is_io_error() {
        let err = Settings::load_from("/nonexistent/torque-viz.json").unwrap_err();
        assert!(matches!(err, SettingsError::Io(_)));
    }
}
