//! Client-side game systems
//!
//! Organized into submodules for maintainability.

mod player;
mod statue;
mod world;

// Re-export everything for easy access from main.rs
pub use player::*;
pub use statue::*;
pub use world::*;
