//! **atomic-core** — Tile-based rendering engine for small handheld displays (core types).
//!
//! This crate provides the foundational types shared across the *atomic*
//! ecosystem: packed RGB565 colour, pixel-to-tile coordinate math, byte-level
//! framebuffer compositing, monospaced text layout, and the surface / button
//! / console contracts a frontend implements and a game consumes.

pub mod color;
pub mod console;
pub mod coords;
pub mod fb;
pub mod font;
pub mod input;
pub mod surface;
pub mod text;

pub use color::{HexColorError, Rgb565};
pub use console::{Console, Game};
pub use coords::{TILE_SIZE, TileBounds, covered_tile_bounds, pixel_to_tile};
pub use fb::{BlitError, FrameBuffer};
pub use font::Font;
pub use input::{Button, ButtonPad, is_pressed};
pub use surface::{BufferSurface, Surface, draw_text};
pub use text::{justified_origin, text_size, wrap_text};

/// The engine version games declare requirements against.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
