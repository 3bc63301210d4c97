//! UI module

pub mod instructions;
pub mod styles;

pub use instructions::InstructionsPlugin;
