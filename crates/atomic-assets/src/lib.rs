//! **atomic-assets** — Tile-based rendering engine for small handheld displays (asset formats).
//!
//! The on-disk formats games ship: raw `.tile` pixel images, `.tm`
//! tile-character maps, `info.json` metadata, the per-session tile
//! registry, and the image-to-tileset slicer.

pub mod info;
pub mod registry;
pub mod slicer;
pub mod tile;
pub mod tilemap;

pub use info::GameInfo;
pub use registry::TileRegistry;
pub use slicer::{slice_image, tile_id};
pub use tile::TileBuf;
pub use tilemap::Tilemap;
