//! **atomic-session** — Tile-based rendering engine for small handheld displays (session runtime).
//!
//! The small pieces every game loop leans on: fixed-rate frame pacing,
//! per-button press debouncing, and bell-curve random sampling.

pub mod gate;
pub mod pace;
pub mod sample;

pub use gate::PressGate;
pub use pace::FramePacer;
pub use sample::bell_curve;
