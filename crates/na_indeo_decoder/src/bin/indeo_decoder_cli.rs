//! Simple CLI wrapper for the library.
//!
//! Usage:
//!   indeo-decoder --codec iv50 --width 320 --height 240 --out frames/ --png f0.bin f1.bin ...

use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use log::{info, warn};

use indeo_decoder::{DecoderConfig, FrameOutput, IndeoDecoder, IndeoVersion, YuvFrame};

#[derive(Parser, Debug)]
#[command(name = "indeo-decoder")]
#[command(about = "Decode raw Indeo 4/5 frame payloads to YUV410P or PNG.")]
struct Cli {
    /// IV41 or IV50
    #[arg(long, default_value = "iv50")]
    codec: IndeoVersion,

    #[arg(long, default_value_t = 320)]
    width: u32,

    #[arg(long, default_value_t = 240)]
    height: u32,

    #[arg(short, long)]
    out: Option<PathBuf>,

    #[arg(long)]
    yuv: bool,

    #[arg(long)]
    png: bool,

    /// One compressed frame per file, decoded in the order given.
    #[arg(required = true)]
    frames: Vec<PathBuf>,
}

fn main() -> Result<()> {
    env_logger::init();

    let mut cli = Cli::parse();
    if cli.out.is_some() && !cli.yuv && !cli.png {
        cli.yuv = true;
    }
    if let Some(dir) = &cli.out {
        fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;
    }

    let mut dec = IndeoDecoder::new(DecoderConfig {
        version: cli.codec,
        width:   cli.width,
        height:  cli.height,
    })?;

    let mut shown = 0u64;
    for (idx, path) in cli.frames.iter().enumerate() {
        let data = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
        let frame = match dec.decode_frame(&data) {
            Ok(FrameOutput::Picture(df)) => &df.frame,
            Ok(FrameOutput::RepeatPrevious) => match dec.current_frame() {
                Some(df) => &df.frame,
                None => continue,
            },
            Err(e) => {
                warn!("frame {idx} ({}): {e}", path.display());
                continue;
            }
        };
        shown += 1;

        if let Some(dir) = &cli.out {
            if cli.yuv {
                write_yuv_frame(&dir.join(format!("frame_{:06}.yuv", idx)), frame)?;
            }
            if cli.png {
                write_png_frame(&dir.join(format!("frame_{:06}.png", idx)), frame)?;
            }
        }
    }

    info!("{shown} of {} frames produced a picture", cli.frames.len());
    if shown == 0 {
        return Err(anyhow!("no frame could be decoded"));
    }
    Ok(())
}

fn write_yuv_frame(path: &Path, frame: &YuvFrame) -> Result<()> {
    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut w = BufWriter::new(file);
    w.write_all(&frame.to_planar_u8())?;
    w.flush()?;
    Ok(())
}

fn write_png_frame(path: &Path, frame: &YuvFrame) -> Result<()> {
    // YUV410p (BT.601-ish) -> RGB for debug output.
    let w = frame.width as usize;
    let h = frame.height as usize;
    let cw = frame.chroma_width as usize;

    let mut rgb = vec![0u8; w * h * 3];
    for y in 0..h {
        for x in 0..w {
            let yy = frame.y[y * w + x] as i32;
            let uv_idx = (y / 4) * cw + (x / 4);
            let cb = frame.u[uv_idx] as i32;
            let cr = frame.v[uv_idx] as i32;

            let c = yy - 16;
            let d = cb - 128;
            let e = cr - 128;

            let r = (298 * c + 409 * e + 128) >> 8;
            let g = (298 * c - 100 * d - 208 * e + 128) >> 8;
            let b = (298 * c + 516 * d + 128) >> 8;

            let o = (y * w + x) * 3;
            rgb[o] = r.clamp(0, 255) as u8;
            rgb[o + 1] = g.clamp(0, 255) as u8;
            rgb[o + 2] = b.clamp(0, 255) as u8;
        }
    }

    let file = File::create(path).with_context(|| format!("creating {}", path.display()))?;
    let mut enc = png::Encoder::new(BufWriter::new(file), frame.width, frame.height);
    enc.set_color(png::ColorType::Rgb);
    enc.set_depth(png::BitDepth::Eight);
    let mut writer = enc.write_header().context("PNG header")?;
    writer.write_image_data(&rgb).context("PNG data")?;
    Ok(())
}
