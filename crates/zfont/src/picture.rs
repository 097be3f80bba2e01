//! Doom picture ("patch") format: column offsets pointing at runs of posts.
use crate::{
    error::{FontError, Result},
    palette::Palette,
    reader::ByteReader,
};

const END_OF_COLUMN: u8 = 0xFF;

/// One vertical run of pixels in a column.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Post {
    /// Absolute row of the first pixel
    pub y: u32,
    pub pixels: Vec<u8>,
}

/// A picture lump. Columns are decoded on demand from the borrowed data.
#[derive(Clone, Debug)]
pub struct DoomPicture<'a> {
    pub width: u16,
    pub height: u16,
    pub x_offset: i16,
    pub y_offset: i16,
    data: &'a [u8],
    column_offsets: Vec<u32>,
}

impl<'a> DoomPicture<'a> {
    pub fn parse(data: &'a [u8]) -> Result<Self> {
        let mut r = ByteReader::new(data);
        let width = r.u16_le("picture width")?;
        let height = r.u16_le("picture height")?;
        let x_offset = r.i16_le("picture x offset")?;
        let y_offset = r.i16_le("picture y offset")?;
        let column_offsets = (0..width)
            .map(|_| r.u32_le("picture column offsets"))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            width,
            height,
            x_offset,
            y_offset,
            data,
            column_offsets,
        })
    }

    /// Posts of column `x`. A top delta lower than the previous one continues
    /// from it (DeePsea tall patches).
    pub fn column(&self, x: usize) -> Result<Vec<Post>> {
        let Some(offset) = self.column_offsets.get(x) else {
            return Err(FontError::MalformedHeader(format!(
                "picture has no column {x}"
            )));
        };
        let mut r = ByteReader::at(self.data, *offset as usize)?;
        let mut posts = Vec::new();
        let mut previous: Option<u8> = None;
        loop {
            let top_delta = r.u8("picture post top delta")?;
            if top_delta == END_OF_COLUMN {
                break;
            }
            let y = match previous {
                Some(prev) if top_delta < prev => prev as u32 + top_delta as u32,
                _ => top_delta as u32,
            };
            let len = r.u8("picture post length")? as usize;
            r.skip(1, "picture post padding")?;
            let pixels = r.bytes(len, "picture post pixels")?.to_vec();
            r.skip(1, "picture post padding")?;
            posts.push(Post { y, pixels });
            previous = Some(top_delta);
        }
        Ok(posts)
    }

    /// Paints every post onto a `width * height` canvas, handing each
    /// visible pixel to `put(index_in_canvas, palette_index)`.
    fn composite(&self, mut put: impl FnMut(usize, u8)) -> Result<()> {
        let (width, height) = (self.width as usize, self.height as usize);
        for x in 0..width {
            for post in self.column(x)? {
                for (i, pixel) in post.pixels.iter().enumerate() {
                    let y = post.y as usize + i;
                    if y >= height {
                        break;
                    }
                    put(y * width + x, *pixel);
                }
            }
        }
        Ok(())
    }

    /// Palette indices, with pixels no post covers set to `fill`.
    pub fn to_indexed(&self, fill: u8) -> Result<Vec<u8>> {
        let mut canvas = vec![fill; self.width as usize * self.height as usize];
        self.composite(|i, p| canvas[i] = p)?;
        Ok(canvas)
    }

    /// RGBA8 through a 256 colour palette; uncovered pixels have alpha 0.
    pub fn render_rgba(&self, palette: &Palette) -> Result<Vec<u8>> {
        let mut canvas = vec![0u8; self.width as usize * self.height as usize * 4];
        self.composite(|i, p| {
            if let Some(c) = palette.get(p as usize) {
                canvas[i * 4..i * 4 + 4].copy_from_slice(&[c.r, c.g, c.b, 255]);
            }
        })?;
        Ok(canvas)
    }
}
