use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use flexi_logger::Logger;
use std::{
    fs,
    path::{Path, PathBuf},
};
use zfont::{export_font, png::PngChunkList, Codepage, ExportOptions, Font};

use crate::lumps::WadCmd;
mod lumps;

#[derive(Parser)]
#[command(name = "zfont", about = "Convert legacy bitmap fonts to GZDoom Unicode fonts")]
struct Cli {
    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Convert BMF/FON1/FON2 fonts into PNG glyphs plus font.inf
    Convert {
        #[arg(required = true)]
        fonts: Vec<PathBuf>,
        #[arg(short, long, default_value = ".")]
        out_dir: PathBuf,
        /// Byte to Unicode mapping used for file names (latin1, windows-1252)
        #[arg(long, default_value = "latin1")]
        codepage: Codepage,
    },
    /// Inspect font metadata
    Inspect { font: PathBuf },
    /// Add or replace the grAB offset chunk of a PNG
    Grab {
        png: PathBuf,
        #[arg(long, allow_hyphen_values = true)]
        x: i32,
        #[arg(long, allow_hyphen_values = true)]
        y: i32,
        /// Defaults to rewriting the input file
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Doom WAD lumps and pictures
    Wad {
        #[command(subcommand)]
        command: WadCmd,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    let _logger = Logger::try_with_env_or_str(level)?.start()?;

    match cli.command {
        Cmd::Convert {
            fonts,
            out_dir,
            codepage,
        } => convert(&fonts, &out_dir, &ExportOptions { codepage }),
        Cmd::Inspect { font } => inspect(&font),
        Cmd::Grab { png, x, y, output } => grab(&png, x, y, output.as_deref()),
        Cmd::Wad { command } => lumps::run(command),
    }
}

fn convert(fonts: &[PathBuf], out_dir: &Path, options: &ExportOptions) -> Result<()> {
    let mut failed = 0;
    for path in fonts {
        match convert_one(path, out_dir, options) {
            Ok(0) => log::warn!("{}: no glyphs to export", path.display()),
            Ok(count) => log::info!("{}: wrote {count} files", path.display()),
            Err(err) => {
                log::error!("{}: {err:#}", path.display());
                failed += 1;
            }
        }
    }
    if failed > 0 {
        bail!("{failed} of {} fonts failed to convert", fonts.len());
    }
    Ok(())
}

fn convert_one(path: &Path, out_dir: &Path, options: &ExportOptions) -> Result<usize> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let font = Font::load(&bytes)?;
    let files = export_font(&font, options)?;
    if files.is_empty() {
        return Ok(0);
    }
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_else(|| "font".to_string());
    let target = out_dir.join("fonts").join(stem);
    fs::create_dir_all(&target).with_context(|| format!("creating {}", target.display()))?;
    for file in &files {
        let dest = target.join(&file.name);
        fs::write(&dest, &file.bytes).with_context(|| format!("writing {}", dest.display()))?;
    }
    Ok(files.len())
}

fn inspect(path: &Path) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let font = Font::load(&bytes)?;
    println!("{} font: {}", font.kind().name(), path.display());
    println!("  Defined characters: {}", font.glyphs().len());
    println!("  Palette entries: {}", font.palette().len());
    for line in font.metrics().describe().lines() {
        println!("  {line}");
    }
    Ok(())
}

fn grab(path: &Path, x: i32, y: i32, output: Option<&Path>) -> Result<()> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let mut png = PngChunkList::parse(&bytes)?;
    png.set_offset(x, y);
    let output = output.unwrap_or(path);
    fs::write(output, png.to_bytes()).with_context(|| format!("writing {}", output.display()))?;
    log::info!("{}: grAB {x}, {y}", output.display());
    Ok(())
}
