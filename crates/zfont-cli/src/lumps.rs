use anyhow::{anyhow, Context, Result};
use clap::Subcommand;
use std::{
    fs,
    path::{Path, PathBuf},
};
use zfont::{png::PngChunkList, DoomPicture, DoomWad};

/// Index Doom editing tools conventionally treat as transparent
const DEFAULT_TRANSPARENT: u8 = 247;

#[derive(Subcommand)]
pub enum WadCmd {
    /// List lump names, offsets and sizes
    List { wad: PathBuf },
    /// Write a picture lump as indexed PNG using the WAD's PLAYPAL
    Picture {
        wad: PathBuf,
        lump: String,
        #[arg(short, long)]
        output: PathBuf,
        /// Palette index for pixels no post covers
        #[arg(long, default_value_t = DEFAULT_TRANSPARENT)]
        transparent: u8,
    },
}

fn open(path: &Path) -> Result<DoomWad> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    DoomWad::from_bytes(bytes).with_context(|| format!("parsing {}", path.display()))
}

pub fn run(command: WadCmd) -> Result<()> {
    match command {
        WadCmd::List { wad } => {
            let wad = open(&wad)?;
            for lump in wad.lumps() {
                println!("{:<8} {:>10} {:>10}", lump.name, lump.offset, lump.size);
            }
        }
        WadCmd::Picture {
            wad,
            lump,
            output,
            transparent,
        } => {
            let wad = open(&wad)?;
            let palette = wad
                .playpal()?
                .ok_or_else(|| anyhow!("WAD has no PLAYPAL lump"))?;
            let data = wad
                .lump(&lump)?
                .ok_or_else(|| anyhow!("no lump named {lump}"))?;
            let picture =
                DoomPicture::parse(data).with_context(|| format!("decoding picture {lump}"))?;
            let pixels = picture.to_indexed(transparent)?;
            let mut png = PngChunkList::from_raster(
                picture.width as u32,
                picture.height as u32,
                &palette,
                transparent as usize,
                &pixels,
            )?;
            png.set_offset(picture.x_offset as i32, picture.y_offset as i32);
            fs::write(&output, png.to_bytes())
                .with_context(|| format!("writing {}", output.display()))?;
            log::info!(
                "{lump}: {}x{} picture written to {}",
                picture.width,
                picture.height,
                output.display()
            );
        }
    }
    Ok(())
}
