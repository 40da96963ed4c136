// Conversions from decoded images to channel-first arrays

use std::path::Path;

use image::imageops::{self, FilterType};
use image::{DynamicImage, GrayImage, Luma, RgbImage};

use pictor_core::{Array, Result};

/// Open and decode an image file, converting to 8-bit RGB.
///
/// The file handle is closed before this returns.
pub fn open_rgb(path: &Path) -> Result<RgbImage> {
    Ok(image::open(path)?.to_rgb8())
}

/// Open and decode a segmentation mask as an 8-bit luma image holding 0
/// for background and 1 for any nonzero source pixel.
///
/// 16-bit grey masks are tested on their native values: narrowing them to
/// 8 bits first would rescale small label ids to zero.
pub fn open_mask(path: &Path) -> Result<GrayImage> {
    Ok(foreground(&image::open(path)?))
}

fn foreground(img: &DynamicImage) -> GrayImage {
    match img {
        DynamicImage::ImageLuma16(_) | DynamicImage::ImageLumaA16(_) => {
            let wide = img.to_luma16();
            GrayImage::from_fn(wide.width(), wide.height(), |x, y| {
                Luma([u8::from(wide.get_pixel(x, y).0[0] != 0)])
            })
        }
        _ => {
            let mut narrow = img.to_luma8();
            for p in narrow.pixels_mut() {
                p.0[0] = u8::from(p.0[0] != 0);
            }
            narrow
        }
    }
}

/// Convert an RGB image from interleaved [H, W, C] to a planar `[3, H, W]`
/// array. Values keep their 0..=255 range.
pub fn image_to_chw(img: &RgbImage) -> Result<Array> {
    let (w, h) = img.dimensions();
    let npix = (w * h) as usize;
    let raw = img.as_raw();
    let mut data = vec![0.0f32; 3 * npix];
    for i in 0..npix {
        data[i] = raw[i * 3] as f32;
        data[npix + i] = raw[i * 3 + 1] as f32;
        data[2 * npix + i] = raw[i * 3 + 2] as f32;
    }
    Array::from_vec(data, (3, h as usize, w as usize))
}

/// Binarise a single-channel mask into a `[1, H, W]` array: any nonzero
/// pixel becomes 1, zero stays 0.
pub fn mask_to_binary(mask: &GrayImage) -> Result<Array> {
    let (w, h) = mask.dimensions();
    let data: Vec<f32> = mask
        .as_raw()
        .iter()
        .map(|&v| if v != 0 { 1.0 } else { 0.0 })
        .collect();
    Array::from_vec(data, (1, h as usize, w as usize))
}

/// Resize an RGB image to `size × size` with a bilinear filter.
pub fn resize_rgb_square(img: &RgbImage, size: u32) -> RgbImage {
    imageops::resize(img, size, size, FilterType::Triangle)
}

/// Resize a mask to `size × size` with nearest-neighbour sampling, so no
/// new intermediate values appear along label boundaries.
pub fn resize_mask_square(mask: &GrayImage, size: u32) -> GrayImage {
    imageops::resize(mask, size, size, FilterType::Nearest)
}
