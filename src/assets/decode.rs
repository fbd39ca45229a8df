use std::sync::Arc;

use anyhow::Context;

use crate::{MazeResult, assets::store::PreparedImage};

/// Decode encoded image bytes (PNG, JPEG, WebP) and convert to premultiplied RGBA8.
pub fn decode_image(bytes: &[u8]) -> MazeResult<PreparedImage> {
    let dyn_img = image::load_from_memory(bytes).context("decode image from memory")?;
    let rgba = dyn_img.to_rgba8();
    let (width, height) = rgba.dimensions();

    let mut rgba8_premul = rgba.into_raw();
    premultiply_rgba8_in_place(&mut rgba8_premul);

    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(rgba8_premul),
    })
}

/// Resample a prepared image to exactly `width × height` pixels.
///
/// Uses a triangle filter on the premultiplied bytes, which keeps edges free of dark fringes.
pub fn resize_premul(src: &PreparedImage, width: u32, height: u32) -> MazeResult<PreparedImage> {
    let buf = image::RgbaImage::from_raw(src.width, src.height, src.rgba8_premul.to_vec())
        .context("prepared image byte length does not match its dimensions")?;
    let out = image::imageops::resize(
        &buf,
        width.max(1),
        height.max(1),
        image::imageops::FilterType::Triangle,
    );
    let (width, height) = out.dimensions();
    Ok(PreparedImage {
        width,
        height,
        rgba8_premul: Arc::new(out.into_raw()),
    })
}

fn premultiply_rgba8_in_place(rgba: &mut [u8]) {
    for px in rgba.chunks_exact_mut(4) {
        let a = px[3] as u16;
        if a == 0 {
            px[0] = 0;
            px[1] = 0;
            px[2] = 0;
            continue;
        }
        px[0] = ((px[0] as u16 * a + 127) / 255) as u8;
        px[1] = ((px[1] as u16 * a + 127) / 255) as u8;
        px[2] = ((px[2] as u16 * a + 127) / 255) as u8;
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/decode.rs"]
mod tests;
