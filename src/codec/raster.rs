//! QR symbol rasterization and image encoding.
//!
//! Every frame is rendered at the same version, so all symbols share one size. Stacked output is a
//! single PNG with the symbols top to bottom; animated output is an APNG that loops forever (a
//! single frame is written as a plain PNG).

use std::io::Cursor;

use image::{GenericImage as _, GrayImage, ImageFormat, Luma};
use qrcode::{Color, EcLevel, QrCode, Version};
use rayon::prelude::*;

use crate::foundation::core::{MAX_QR_VERSION, MIN_QR_VERSION};
use crate::foundation::error::{ViewerError, ViewerResult};

use super::{RenderMode, RenderOpts};

const DARK: Luma<u8> = Luma([0]);
const LIGHT: Luma<u8> = Luma([255]);

pub fn render(frames: &[String], version: u8, opts: &RenderOpts) -> ViewerResult<Vec<u8>> {
    if frames.is_empty() {
        return Err(ViewerError::render("no frames to render"));
    }
    if !(MIN_QR_VERSION..=MAX_QR_VERSION).contains(&version) {
        return Err(ViewerError::render(format!("QR version {version} out of range")));
    }
    if opts.scale == 0 {
        return Err(ViewerError::render("scale must be >= 1"));
    }

    let symbols = frames
        .par_iter()
        .map(|f| rasterize(f, version, opts.scale, opts.margin))
        .collect::<ViewerResult<Vec<_>>>()?;

    match opts.mode {
        RenderMode::Stacked => encode_png(&stack(&symbols)?),
        RenderMode::Animated if symbols.len() == 1 => encode_png(&symbols[0]),
        RenderMode::Animated => encode_apng(&symbols, opts.frame_delay_ms),
    }
}

/// One frame as a grayscale symbol with quiet zone.
pub fn rasterize(frame: &str, version: u8, scale: u32, margin: u32) -> ViewerResult<GrayImage> {
    let code = QrCode::with_version(frame.as_bytes(), Version::Normal(i16::from(version)), EcLevel::L)
        .map_err(|e| ViewerError::render(format!("frame does not fit version {version}: {e}")))?;
    let modules = u32::try_from(code.width())
        .map_err(|_| ViewerError::render("symbol width overflow"))?;
    let colors = code.to_colors();

    let side = (modules + 2 * margin) * scale;
    let mut img = GrayImage::from_pixel(side, side, LIGHT);
    for (i, color) in colors.iter().enumerate() {
        if *color != Color::Dark {
            continue;
        }
        let i = i as u32;
        let (mx, my) = (i % modules + margin, i / modules + margin);
        for dy in 0..scale {
            for dx in 0..scale {
                img.put_pixel(mx * scale + dx, my * scale + dy, DARK);
            }
        }
    }
    Ok(img)
}

fn stack(symbols: &[GrayImage]) -> ViewerResult<GrayImage> {
    let (w, h) = symbols[0].dimensions();
    let total_h = u32::try_from(symbols.len())
        .ok()
        .and_then(|n| n.checked_mul(h))
        .ok_or_else(|| ViewerError::render("stacked image too tall"))?;
    let mut canvas = GrayImage::from_pixel(w, total_h, LIGHT);
    for (i, sym) in symbols.iter().enumerate() {
        canvas
            .copy_from(sym, 0, i as u32 * h)
            .map_err(|e| ViewerError::render(format!("stack frame {i}: {e}")))?;
    }
    Ok(canvas)
}

fn encode_png(img: &GrayImage) -> ViewerResult<Vec<u8>> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(|e| ViewerError::render(format!("encode png: {e}")))?;
    Ok(buf)
}

fn encode_apng(symbols: &[GrayImage], frame_delay_ms: u16) -> ViewerResult<Vec<u8>> {
    let apng_err = |e: png::EncodingError| ViewerError::render(format!("encode apng: {e}"));
    let (w, h) = symbols[0].dimensions();
    let num_frames =
        u32::try_from(symbols.len()).map_err(|_| ViewerError::render("too many frames"))?;

    let mut buf = Vec::new();
    {
        let mut enc = png::Encoder::new(&mut buf, w, h);
        enc.set_color(png::ColorType::Grayscale);
        enc.set_depth(png::BitDepth::Eight);
        enc.set_animated(num_frames, 0).map_err(apng_err)?;
        enc.set_frame_delay(frame_delay_ms, 1000).map_err(apng_err)?;
        let mut writer = enc.write_header().map_err(apng_err)?;
        for sym in symbols {
            writer.write_image_data(sym.as_raw()).map_err(apng_err)?;
        }
        writer.finish().map_err(apng_err)?;
    }
    Ok(buf)
}

#[cfg(test)]
#[path = "../../tests/unit/codec/raster.rs"]
mod tests;
