//! In-process image fixtures for unit tests.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage, Rgba, RgbaImage};
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> RgbImage {
    RgbImage::from_fn(width, height, |x, y| {
        Rgb([
            (x * 255 / width.max(1)) as u8,
            (y * 255 / height.max(1)) as u8,
            128,
        ])
    })
}

/// Deterministic high-entropy pixels (LCG), so compression has work to do.
fn noise(width: u32, height: u32) -> RgbImage {
    let mut state: u32 = 0x2545_F491;
    RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state = state.wrapping_mul(1_664_525).wrapping_add(1_013_904_223);
            (state >> 24) as u8
        };
        Rgb([next(), next(), next()])
    })
}

fn to_png(image: DynamicImage) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    image.write_to(&mut buffer, ImageFormat::Png).unwrap();
    buffer.into_inner()
}

fn to_jpeg(image: DynamicImage, quality: u8) -> Vec<u8> {
    let mut buffer = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buffer, quality);
    image.write_with_encoder(encoder).unwrap();
    buffer
}

pub fn gradient_png(width: u32, height: u32) -> Vec<u8> {
    to_png(DynamicImage::ImageRgb8(gradient(width, height)))
}

pub fn gradient_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    to_jpeg(DynamicImage::ImageRgb8(gradient(width, height)), quality)
}

pub fn noise_jpeg(width: u32, height: u32, quality: u8) -> Vec<u8> {
    to_jpeg(DynamicImage::ImageRgb8(noise(width, height)), quality)
}

/// PNG with a semi-transparent alpha channel.
pub fn rgba_png(width: u32, height: u32) -> Vec<u8> {
    let image = RgbaImage::from_fn(width, height, |x, y| {
        Rgba([(x % 256) as u8, (y % 256) as u8, 200, ((x + y) % 256) as u8])
    });
    to_png(DynamicImage::ImageRgba8(image))
}

pub fn dimensions_of(data: &[u8]) -> (u32, u32) {
    image::load_from_memory(data).unwrap().to_rgb8().dimensions()
}
