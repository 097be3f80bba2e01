//! Colour tables shared by all font decoders.

/// Expands a 6-bit VGA DAC component (0..=63) to 8 bits.
pub type VgaScale = fn(u8) -> u8;

/// `v * 255 / 63`, exact at both ends of the range.
pub fn vga_scale_multiply(v: u8) -> u8 {
    (v as u16 * 255 / 63) as u8
}

/// `v << 2 | v >> 4`, the bit-replication variant. Differs from
/// [`vga_scale_multiply`] by at most one step.
pub fn vga_scale_shift(v: u8) -> u8 {
    let v = v & 0x3F;
    (v << 2) | (v >> 4)
}

/// Scaling applied to BMF palettes.
pub const VGA_TO_RGB: VgaScale = vga_scale_multiply;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn gray(c: u8) -> Self {
        Self { r: c, g: c, b: c }
    }
}

/// How a decoder turns a raw pixel byte into a palette entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorLookup {
    /// BMF: clamp to `largest_used - 1` unless it is zero, out of range
    /// falls back to entry 0.
    LargestUsed(u8),
    /// FON1/FON2: index 0 and anything past the table are transparent.
    ZeroTransparent,
}

/// Fixed-size colour table. Entry [`Palette::TRANSPARENT`] is the
/// conventional transparent colour.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Palette {
    colors: Vec<Rgb>,
}

impl Palette {
    pub const TRANSPARENT: usize = 0;

    pub fn new(colors: Vec<Rgb>) -> Self {
        Self { colors }
    }

    /// 256 entries `(c, c, c)`.
    pub fn grayscale() -> Self {
        Self::new((0..=255).map(Rgb::gray).collect())
    }

    /// Reads `count` packed RGB triples.
    pub fn from_rgb_bytes(bytes: &[u8]) -> Self {
        Self::new(
            bytes
                .chunks_exact(3)
                .map(|c| Rgb::new(c[0], c[1], c[2]))
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.colors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    pub fn colors(&self) -> &[Rgb] {
        &self.colors
    }

    pub fn get(&self, index: usize) -> Option<Rgb> {
        self.colors.get(index).copied()
    }

    /// Maps a raw pixel byte to the palette index that should be drawn, or
    /// `None` for a transparent pixel. The returned index is always inside
    /// the table.
    pub fn resolve(&self, pixel: u8, lookup: ColorLookup) -> Option<usize> {
        if self.colors.is_empty() {
            return None;
        }
        match lookup {
            ColorLookup::LargestUsed(largest) => {
                let mut index = pixel as usize;
                if largest != 0 {
                    index = index.min(largest as usize - 1);
                }
                if index >= self.colors.len() {
                    index = 0;
                }
                Some(index)
            }
            ColorLookup::ZeroTransparent => {
                let index = pixel as usize;
                (index != 0 && index < self.colors.len()).then_some(index)
            }
        }
    }

    /// RGBA for a raw pixel byte. Entry 0 is rendered fully transparent.
    pub fn rgba(&self, pixel: u8, lookup: ColorLookup) -> [u8; 4] {
        match self.resolve(pixel, lookup) {
            Some(Self::TRANSPARENT) | None => [0, 0, 0, 0],
            Some(index) => {
                let c = self.colors[index];
                [c.r, c.g, c.b, 255]
            }
        }
    }
}
