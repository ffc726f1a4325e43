//! Test fixtures: images generated in-process.

use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat, Rgb, RgbImage};
use std::io::Cursor;

fn gradient(width: u32, height: u32) -> DynamicImage {
    DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
        Rgb([(x * 255 / width) as u8, (y * 255 / height) as u8, 90])
    }))
}

pub fn create_test_png(width: u32, height: u32) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    gradient(width, height)
        .write_to(&mut buffer, ImageFormat::Png)
        .expect("Failed to encode PNG");
    buffer.into_inner()
}

pub fn create_test_jpeg(width: u32, height: u32) -> Vec<u8> {
    encode_jpeg(gradient(width, height), 90)
}

/// High-entropy JPEG at maximum quality.
pub fn create_noisy_jpeg(width: u32, height: u32) -> Vec<u8> {
    let mut state: u32 = 7;
    let image = RgbImage::from_fn(width, height, |_, _| {
        let mut next = || {
            state = state.wrapping_mul(1_103_515_245).wrapping_add(12_345);
            (state >> 16) as u8
        };
        Rgb([next(), next(), next()])
    });
    encode_jpeg(DynamicImage::ImageRgb8(image), 100)
}

fn encode_jpeg(image: DynamicImage, quality: u8) -> Vec<u8> {
    let mut buffer = Vec::new();
    image
        .write_with_encoder(JpegEncoder::new_with_quality(&mut buffer, quality))
        .expect("Failed to encode JPEG");
    buffer
}

pub fn dimensions_of(data: &[u8]) -> (u32, u32) {
    let image = image::load_from_memory(data).expect("Failed to decode output");
    (image.width(), image.height())
}

pub fn is_jpeg(data: &[u8]) -> bool {
    data.starts_with(&[0xFF, 0xD8, 0xFF])
}

pub fn is_png(data: &[u8]) -> bool {
    data.starts_with(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A])
}
