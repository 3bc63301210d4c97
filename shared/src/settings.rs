//! Walkthrough settings.
//!
//! Read once at startup from a RON file (`assets/settings.ron` in the client).
//! Every field has a default, so a partial file only overrides what it names.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    Orientation, PlayerController, PlayerState, MOUSE_SENSITIVITY, PLAYER_COLLISION_RADIUS,
    PLAYER_EYE_HEIGHT, PLAYER_HEIGHT, PLAYER_MOVE_SPEED, PLAYER_TURN_SPEED, PLAYER_WIDTH,
};

#[derive(Resource, Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub player: PlayerSettings,
    pub world: WorldSettings,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerSettings {
    /// World units per tick
    pub move_speed: f32,
    /// Radians per tick (Q/E)
    pub turn_speed: f32,
    pub collision_radius: f32,
    /// Radians per pixel of pointer motion
    pub mouse_sensitivity: f32,
    pub height: f32,
    pub width: f32,
    /// Camera height above the floor
    pub eye_height: f32,
}

impl Default for PlayerSettings {
    fn default() -> Self {
        Self {
            move_speed: PLAYER_MOVE_SPEED,
            turn_speed: PLAYER_TURN_SPEED,
            collision_radius: PLAYER_COLLISION_RADIUS,
            mouse_sensitivity: MOUSE_SENSITIVITY,
            height: PLAYER_HEIGHT,
            width: PLAYER_WIDTH,
            eye_height: PLAYER_EYE_HEIGHT,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorldSettings {
    /// Diameter of the round room
    pub room_width: f32,
    pub room_height: f32,
    /// Boundary disk radius as a fraction of the room radius
    pub boundary_scale: f32,
    pub column_count: u32,
    pub column_radius: f32,
    /// Column ring radius as a fraction of the room radius
    pub column_ring_scale: f32,
    pub window_count: u32,
    pub window_radius: f32,
    pub window_ring_scale: f32,
}

impl Default for WorldSettings {
    fn default() -> Self {
        Self {
            room_width: 15.0,
            room_height: 4.0,
            boundary_scale: 0.85,
            column_count: 8,
            column_radius: 0.3,
            column_ring_scale: 0.9,
            window_count: 8,
            window_radius: 0.8,
            window_ring_scale: 0.95,
        }
    }
}

impl WorldSettings {
    #[inline]
    pub fn room_radius(&self) -> f32 {
        self.room_width * 0.5
    }

    /// Slightly smaller than the wall so the player never clips into it.
    #[inline]
    pub fn boundary_radius(&self) -> f32 {
        self.room_radius() * self.boundary_scale
    }
}

impl Settings {
    /// Body centre at spawn, a few steps in front of the statue.
    pub fn spawn_position(&self) -> Vec3 {
        Vec3::new(0.0, self.player.height * 0.5, 3.0)
    }

    pub fn player_state(&self) -> PlayerState {
        PlayerState::new(self.spawn_position(), self.player.collision_radius)
            .with_move_speed(self.player.move_speed)
            .with_turn_speed(self.player.turn_speed)
            .with_mouse_sensitivity(self.player.mouse_sensitivity)
    }

    pub fn player_controller(&self) -> PlayerController {
        PlayerController::new(self.player_state(), Orientation::default())
            .with_eye_offset(self.player.eye_height - self.player.height * 0.5)
    }

    pub fn validate(&self) -> Result<(), String> {
        let p = &self.player;
        let w = &self.world;

        if !(p.collision_radius.is_finite() && p.collision_radius > 0.0) {
            return Err(format!(
                "player.collision_radius must be positive (got {})",
                p.collision_radius
            ));
        }
        for (name, value) in [
            ("player.move_speed", p.move_speed),
            ("player.turn_speed", p.turn_speed),
            ("player.mouse_sensitivity", p.mouse_sensitivity),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be a non-negative number (got {value})"));
            }
        }
        if !(p.height.is_finite() && p.height > 0.0) {
            return Err(format!("player.height must be positive (got {})", p.height));
        }
        if !(w.room_width.is_finite() && w.room_width > 0.0)
            || !(w.room_height.is_finite() && w.room_height > 0.0)
        {
            return Err(format!(
                "room size must be positive (got {} x {})",
                w.room_width, w.room_height
            ));
        }
        if !(w.boundary_scale.is_finite() && w.boundary_scale > 0.0 && w.boundary_scale <= 1.0) {
            return Err(format!(
                "world.boundary_scale must be in (0, 1] (got {})",
                w.boundary_scale
            ));
        }
        Ok(())
    }
}

/// Parse and validate settings from RON text.
pub fn load_settings_from_str(text: &str) -> Result<Settings, String> {
    let settings: Settings =
        ron::from_str(text).map_err(|e| format!("RON parse failed: {e}"))?;
    settings.validate()?;
    Ok(settings)
}

/// Parse and validate settings from a RON file.
pub fn load_settings_from_file(path: impl AsRef<Path>) -> Result<Settings, String> {
    let path = path.as_ref();
    let text = std::fs::read_to_string(path).map_err(|e| format!("failed to read {path:?}: {e}"))?;
    load_settings_from_str(&text).map_err(|e| format!("{path:?}: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_office() {
        let settings = Settings::default();
        assert!(settings.validate().is_ok());
        assert_eq!(settings.world.boundary_radius(), 7.5 * 0.85);
        assert_eq!(settings.player.collision_radius, 0.25);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let settings =
            load_settings_from_str("(player: (move_speed: 0.2), world: (room_width: 20.0))")
                .expect("valid settings");
        assert_eq!(settings.player.move_speed, 0.2);
        assert_eq!(settings.player.mouse_sensitivity, MOUSE_SENSITIVITY);
        assert_eq!(settings.world.room_width, 20.0);
        assert_eq!(settings.world.room_height, 4.0);
    }

    #[test]
    fn test_empty_file_is_default() {
        assert_eq!(load_settings_from_str("()"), Ok(Settings::default()));
    }

    #[test]
    fn test_rejects_bad_radius() {
        let err = load_settings_from_str("(player: (collision_radius: 0.0))").unwrap_err();
        assert!(err.contains("collision_radius"));
    }

    #[test]
    fn test_rejects_bad_boundary_scale() {
        let err = load_settings_from_str("(world: (boundary_scale: 1.5))").unwrap_err();
        assert!(err.contains("boundary_scale"));
    }

    #[test]
    fn test_parse_error_is_reported() {
        let err = load_settings_from_str("(player: (move_speed: \"fast\"))").unwrap_err();
        assert!(err.starts_with("RON parse failed"));
    }

    #[test]
    fn test_missing_file() {
        let err = load_settings_from_file("/definitely/not/here/settings.ron").unwrap_err();
        assert!(err.contains("failed to read"));
    }

    #[test]
    fn test_round_trip_through_ron() {
        let mut settings = Settings::default();
        settings.player.turn_speed = 0.07;
        let text = ron::ser::to_string_pretty(&settings, ron::ser::PrettyConfig::default())
            .expect("serialize");
        assert_eq!(load_settings_from_str(&text), Ok(settings));
    }

    #[test]
    fn test_controller_from_settings() {
        let settings = Settings::default();
        let controller = settings.player_controller();
        assert_eq!(controller.position(), Vec3::new(0.0, 0.9, 3.0));
        assert_eq!(controller.collision_radius(), 0.25);
        assert!((controller.head_transform().translation.y - 0.8).abs() < 1e-6);
    }
}
