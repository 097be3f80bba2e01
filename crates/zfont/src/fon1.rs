//! FON1: monospaced 256 character console font with a grayscale palette.
use crate::{
    error::{FontError, Result},
    glyph::{FontMetrics, Glyph, GlyphSet},
    palette::{ColorLookup, Palette},
    reader::ByteReader,
    rle,
};

pub const FON1_MAGIC: &[u8; 4] = b"FON1";

#[derive(Clone, Debug)]
pub struct Fon1Font {
    palette: Palette,
    glyphs: GlyphSet,
    metrics: FontMetrics,
    /// Set when the glyph data ended early and trailing glyphs were zero filled
    pub truncated: bool,
}

impl Fon1Font {
    pub fn detect(bytes: &[u8]) -> bool {
        bytes.starts_with(FON1_MAGIC)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !Self::detect(bytes) {
            return Err(FontError::FormatMismatch("FON1"));
        }
        let mut r = ByteReader::at(bytes, FON1_MAGIC.len())?;
        let width = r.u16_le("fon1 width")?;
        let height = r.u16_le("fon1 height")?;
        let size = width as usize * height as usize;

        let mut glyphs = GlyphSet::new();
        let mut truncated = false;
        for code in 0..=255u8 {
            let expanded = rle::expand(&mut r, size);
            if expanded.truncated && !truncated {
                log::warn!("fon1: glyph data ends inside character {code}, zero filling the rest");
                truncated = true;
            }
            glyphs.insert(
                code,
                Glyph::new(width as usize, height as usize, expanded.pixels),
            );
        }

        Ok(Self {
            palette: Palette::grayscale(),
            glyphs,
            metrics: FontMetrics {
                font_height: height as u32,
                space_width: width as u32,
                global_kerning: 0,
                monospace: true,
                cell_width: Some(width as u32),
                console_translation: true,
            },
            truncated,
        })
    }

    pub fn is_ready(&self) -> bool {
        true
    }

    pub fn cell_width(&self) -> usize {
        self.metrics.space_width as usize
    }

    pub fn cell_height(&self) -> usize {
        self.metrics.font_height as usize
    }

    pub fn glyph(&self, code: u8) -> Option<&Glyph> {
        self.glyphs.get(code)
    }

    pub fn glyphs(&self) -> &GlyphSet {
        &self.glyphs
    }

    pub fn palette(&self) -> &Palette {
        &self.palette
    }

    pub fn metrics(&self) -> &FontMetrics {
        &self.metrics
    }

    pub fn color_lookup(&self) -> ColorLookup {
        ColorLookup::ZeroTransparent
    }
}
