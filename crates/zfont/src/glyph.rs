use crate::palette::{ColorLookup, Palette};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Glyph {
    /// Raster width in pixels
    pub width: usize,
    /// Raster height in pixels
    pub height: usize,
    /// Horizontal drawing-origin adjustment
    pub x_offset: i32,
    /// Vertical drawing-origin adjustment
    pub y_offset: i32,
    /// Pen movement after drawing; `None` means the raster width
    pub advance: Option<u32>,
    /// `width * height` palette indices, row-major
    pub pixels: Vec<u8>,
}

impl Glyph {
    pub fn new(width: usize, height: usize, pixels: Vec<u8>) -> Self {
        Self {
            width,
            height,
            pixels,
            ..Default::default()
        }
    }

    /// Zero-area glyphs only carry metrics and are never exported.
    pub fn is_blank(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    pub fn advance(&self) -> u32 {
        self.advance.unwrap_or(self.width as u32)
    }

    pub fn row(&self, y: usize) -> &[u8] {
        &self.pixels[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.pixels.chunks_exact(self.width.max(1)).take(self.height)
    }

    /// Drops all-zero rows from the top and bottom, moving `y_offset` down by
    /// the rows removed from the top. Returns `None` if every row is zero.
    pub fn cropped_vertically(&self) -> Option<Glyph> {
        if self.is_blank() {
            return None;
        }
        let is_empty = |row: &[u8]| row.iter().all(|p| *p == 0);
        let top = (0..self.height).find(|y| !is_empty(self.row(*y)))?;
        let bottom = (0..self.height).rev().find(|y| !is_empty(self.row(*y)))?;
        Some(Glyph {
            width: self.width,
            height: bottom - top + 1,
            x_offset: self.x_offset,
            y_offset: self.y_offset + top as i32,
            advance: self.advance,
            pixels: self.pixels[top * self.width..(bottom + 1) * self.width].to_vec(),
        })
    }

    /// Resolves the raster through `palette` into RGBA8.
    pub fn to_rgba(&self, palette: &Palette, lookup: ColorLookup) -> Vec<u8> {
        self.pixels
            .iter()
            .flat_map(|p| palette.rgba(*p, lookup))
            .collect()
    }
}

/// Glyphs keyed by byte code point. Re-inserting a code point replaces the
/// earlier glyph.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GlyphSet {
    glyphs: Vec<Option<Glyph>>,
}

impl Default for GlyphSet {
    fn default() -> Self {
        Self {
            glyphs: vec![None; 256],
        }
    }
}

impl GlyphSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, code: u8, glyph: Glyph) -> Option<Glyph> {
        self.glyphs[code as usize].replace(glyph)
    }

    pub fn get(&self, code: u8) -> Option<&Glyph> {
        self.glyphs[code as usize].as_ref()
    }

    /// Number of defined code points, blank glyphs included.
    pub fn len(&self) -> usize {
        self.glyphs.iter().filter(|g| g.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Defined glyphs in code point order.
    pub fn iter(&self) -> impl Iterator<Item = (u8, &Glyph)> {
        self.glyphs
            .iter()
            .enumerate()
            .filter_map(|(i, g)| g.as_ref().map(|glyph| (i as u8, glyph)))
    }
}

/// Font-wide values written to `font.inf`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct FontMetrics {
    pub font_height: u32,
    pub space_width: u32,
    pub global_kerning: i32,
    pub monospace: bool,
    /// Cell width for fonts exported as fixed-size sheets
    pub cell_width: Option<u32>,
    /// Font uses the console colour translation in GZDoom
    pub console_translation: bool,
}

impl FontMetrics {
    /// Key/value lines for the GZDoom `font.inf` lump.
    pub fn describe(&self) -> String {
        let mut out = format!("SpaceWidth {}\n", self.space_width);
        match self.cell_width {
            Some(cell_width) => {
                out.push_str(&format!("CellSize {}, {}\n", cell_width, self.font_height))
            }
            None => out.push_str(&format!("FontHeight {}\n", self.font_height)),
        }
        if self.global_kerning != 0 {
            out.push_str(&format!("Kerning {}\n", self.global_kerning));
        }
        if self.console_translation {
            out.push_str("TranslationType Console\n");
        }
        out
    }
}

/// `floor(sum(widths) * 2 / (count * 3))`, the space width used when a font
/// defines neither a space nor an `N`.
pub(crate) fn average_space_width(widths: impl Iterator<Item = u32>) -> u32 {
    let (total, count) = widths.fold((0u64, 0u64), |(t, c), w| (t + w as u64, c + 1));
    if count == 0 {
        return 0;
    }
    (total * 2 / (count * 3)) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn describe_writes_every_set_key() {
        let metrics = FontMetrics {
            font_height: 9,
            space_width: 4,
            global_kerning: -1,
            monospace: true,
            cell_width: Some(8),
            console_translation: true,
        };
        assert_eq!(
            metrics.describe(),
            "SpaceWidth 4\nCellSize 8, 9\nKerning -1\nTranslationType Console\n"
        );
    }
}
