//! zfont: bitmap font conversion for GZDoom.
//! Decodes BMF, FON1 and FON2 fonts, writes glyphs as indexed PNGs with
//! `grAB` offsets, and reads Doom WAD picture lumps.

pub mod bmf;
pub mod codepage;
mod error;
pub mod export;
pub mod fon1;
pub mod fon2;
mod font;
mod glyph;
pub mod palette;
pub mod picture;
pub mod png;
mod reader;
mod rle;
pub mod wad;

pub use codepage::Codepage;
pub use error::{FontError, Result};
pub use export::{export_font, ExportOptions, ExportedFile};
pub use font::{Font, FontKind};
pub use glyph::{FontMetrics, Glyph, GlyphSet};
pub use palette::{ColorLookup, Palette, Rgb};
pub use picture::DoomPicture;
pub use png::{PngChunk, PngChunkList};
pub use wad::DoomWad;

// Test utilities
pub mod test_support;
