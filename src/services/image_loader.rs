//! Source image preparation.
//!
//! A photograph (PNG, JPEG or BMP) is decoded, flattened onto white,
//! centre-cropped to the grid's aspect ratio and box-filtered down (or up) to
//! exactly one pixel per grid cell.

use crate::error::AppError;
use image::{imageops, Rgba, RgbaImage};
use pattern_engine::{GridConfig, PixelBuffer};

/// Decode an image into opaque RGBA8
///
/// Transparent pixels are composited against white.
pub fn decode_image(bytes: &[u8]) -> Result<RgbaImage, AppError> {
    let decoded = image::load_from_memory(bytes)?;
    tracing::debug!(
        width = decoded.width(),
        height = decoded.height(),
        color = ?decoded.color(),
        "Decoded image"
    );

    let mut rgba = decoded.to_rgba8();
    for pixel in rgba.pixels_mut() {
        *pixel = flatten_alpha(*pixel);
    }
    Ok(rgba)
}

/// Composite one RGBA pixel against white
fn flatten_alpha(pixel: Rgba<u8>) -> Rgba<u8> {
    let [r, g, b, a] = pixel.0;
    if a == 255 {
        return pixel;
    }
    let a = a as u16;
    let blend = |c: u8| ((c as u16 * a + 255 * (255 - a) + 127) / 255) as u8;
    Rgba([blend(r), blend(g), blend(b), 255])
}

/// Largest centred region of `image` with the aspect ratio `width:height`
///
/// Returns `(x, y, w, h)` in source pixels; `w` and `h` are at least 1.
pub fn center_crop(image_width: u32, image_height: u32, width: u32, height: u32) -> (u32, u32, u32, u32) {
    let (iw, ih, w, h) = (image_width as u64, image_height as u64, width as u64, height as u64);
    // Compare iw / ih against w / h without floats
    let (cw, ch) = if iw * h > ih * w {
        ((ih * w / h).max(1), ih)
    } else {
        (iw, (iw * h / w).max(1))
    };
    let (cw, ch) = (cw as u32, ch as u32);
    ((image_width - cw) / 2, (image_height - ch) / 2, cw, ch)
}

/// Decode an image and reduce it to one RGBA pixel per grid cell
///
/// Resampling is an area average (`imageops::thumbnail`), so every cell is
/// the mean of the source pixels it covers.
pub fn prepare_pixels(bytes: &[u8], grid: &GridConfig) -> Result<PixelBuffer, AppError> {
    grid.validate().map_err(|e| AppError::Pattern(e.into()))?;
    let image = decode_image(bytes)?;
    let (image_width, image_height) = image.dimensions();
    if image_width == 0 || image_height == 0 {
        return Err(AppError::ImageTooSmall {
            width: image_width as usize,
            height: image_height as usize,
        });
    }

    let (target_width, target_height) = (grid.width as u32, grid.height as u32);
    let (x, y, w, h) = center_crop(image_width, image_height, target_width, target_height);
    let cropped = imageops::crop_imm(&image, x, y, w, h).to_image();
    let resized = imageops::thumbnail(&cropped, target_width, target_height);
    tracing::info!(
        source = %format!("{image_width}x{image_height}"),
        crop = %format!("{w}x{h}+{x}+{y}"),
        grid = %format!("{}x{}", grid.width, grid.height),
        "Prepared source pixels"
    );

    PixelBuffer::new(resized.into_raw(), grid.width, grid.height)
        .map_err(|e| AppError::Pattern(e.into()))
}
