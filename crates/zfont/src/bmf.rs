//! ByteMap Font (BMF) decoder.
//!
//! Layout, all values little endian:
//!
//! ```text
//! E1 E6 D5 1A            magic
//! u8  version
//! u8  line height
//! i8  size over base line, i8 size under base line (ignored)
//! i8  add space after each char (global kerning)
//! i8  inner size (ignored)
//! u8  used colours
//! u8  highest used colour
//! 4   reserved
//! u8  palette entries, followed by that many 6-bit RGB triples
//! u8  info length, followed by the info text
//! u16 character count
//! per character: u8 code, u8 w, u8 h, i8 x, i8 y, u8 shift, w*h pixels
//! ```
use crate::{
    error::{FontError, Result},
    glyph::{average_space_width, FontMetrics, Glyph, GlyphSet},
    palette::{ColorLookup, Palette, Rgb, VGA_TO_RGB},
    reader::ByteReader,
};

pub const BMF_MAGIC: [u8; 4] = [0xE1, 0xE6, 0xD5, 0x1A];

#[derive(Clone, Debug)]
pub struct BmfFont {
    pub version: u8,
    pub used_colors: u8,
    pub largest_used_color: u8,
    palette: Palette,
    glyphs: GlyphSet,
    metrics: FontMetrics,
}

impl BmfFont {
    pub fn detect(bytes: &[u8]) -> bool {
        bytes.starts_with(&BMF_MAGIC)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        if !Self::detect(bytes) {
            return Err(FontError::FormatMismatch("BMF"));
        }
        let mut r = ByteReader::at(bytes, BMF_MAGIC.len())?;
        let version = r.u8("bmf version")?;
        let font_height = r.u8("bmf line height")? as u32;
        r.skip(2, "bmf base line sizes")?;
        let global_kerning = r.i8("bmf kerning")? as i32;
        r.skip(1, "bmf inner size")?;
        let used_colors = r.u8("bmf used colours")?;
        let largest_used_color = r.u8("bmf highest used colour")?;
        r.skip(4, "bmf reserved")?;

        // a declared 255 gives 256 entries
        let palette_size = r.u8("bmf palette size")? as usize + 1;
        let mut colors = Vec::with_capacity(palette_size);
        colors.push(Rgb::default());
        for _ in 1..palette_size {
            let [red, green, blue] = r.array::<3>("bmf palette")?;
            colors.push(Rgb::new(
                VGA_TO_RGB(red),
                VGA_TO_RGB(green),
                VGA_TO_RGB(blue),
            ));
        }

        let info_len = r.u8("bmf info length")? as usize;
        r.skip(info_len, "bmf info text")?;
        let char_count = r.u16_le("bmf character count")?;

        let mut glyphs = GlyphSet::new();
        let mut space_width = 0u32;
        for _ in 0..char_count {
            let code = r.u8("bmf character code")?;
            let width = r.u8("bmf character width")? as usize;
            let height = r.u8("bmf character height")? as usize;
            let x_offset = r.i8("bmf character x offset")? as i32;
            let y_offset = r.i8("bmf character y offset")? as i32;
            let shift = r.u8("bmf character shift")? as u32;
            let pixels = r.bytes(width * height, "bmf character pixels")?.to_vec();

            if code == b' ' {
                space_width = shift;
            } else if code == b'N' && space_width == 0 {
                space_width = shift;
            }
            if glyphs
                .insert(
                    code,
                    Glyph {
                        width,
                        height,
                        x_offset,
                        y_offset,
                        advance: Some(shift),
                        pixels,
                    },
                )
                .is_some()
            {
                log::debug!("bmf: character {code} defined twice, keeping the later one");
            }
        }

        if space_width == 0 {
            space_width = average_space_width(glyphs.iter().map(|(_, g)| g.width as u32));
        }
        log::debug!(
            "bmf: version {version}, {} glyphs, {} palette entries, space width {space_width}",
            glyphs.len(),
            palette_size
        );

        Ok(Self {
            version,
            used_colors,
            largest_used_color,
            palette: Palette::new(colors),
            glyphs,
            metrics: FontMetrics {
                font_height,
                space_width,
                global_kerning,
                monospace: false,
                cell_width: None,
                console_translation: false,
            },
        })
    }

    /// Usable once at least one glyph was decoded.
    pub fn is_ready(&self) -> bool {
        !self.glyphs.is_empty()
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
        ColorLookup::LargestUsed(self.largest_used_color)
    }
}
