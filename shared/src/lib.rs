//! Rotunda core: collision queries and first-person movement for the round
//! office walkthrough.
//!
//! Everything here is renderer-agnostic. The client builds an
//! [`ObstacleRegistry`] from the [`world::office_layout`], feeds key
//! transitions into an [`InputState`] and calls [`PlayerController::tick`]
//! once per frame.

pub mod input;
pub mod movement;
pub mod obstacles;
pub mod orientation;
pub mod player;
pub mod settings;
pub mod world;

pub use input::{InputAction, InputState};
pub use movement::{MoveOutcome, PlayerController};
pub use obstacles::{
    ContactResult, HitCallback, Obstacle, ObstacleId, ObstacleRegistry, ObstacleShape,
    DEFAULT_BOUNDING_RADIUS,
};
pub use orientation::{Orientation, PITCH_LIMIT};
pub use player::*;
pub use settings::{load_settings_from_file, load_settings_from_str, Settings};
pub use world::{office_layout, ObstacleDescriptor, OfficeLayout, OfficePiece};
