use image::GrayImage;
use imageproc::contrast::equalize_histogram;
use tempfile::NamedTempFile;

use crate::utils::IdCheckError;

pub struct ImageProcessor;

impl ImageProcessor {
    /// Decode a photographed card, clean it up for OCR and write it to a
    /// temporary PNG. The file is removed when the handle drops.
    pub fn prepare_for_ocr(image_data: &[u8]) -> Result<NamedTempFile, IdCheckError> {
        let img = image::load_from_memory(image_data)
            .map_err(|e| IdCheckError::ImageProcessing(format!("Failed to decode image: {}", e)))?;
        let processed = Self::preprocess_image(img.to_luma8());

        let temp_file = tempfile::Builder::new()
            .suffix(".png")
            .tempfile()
            .map_err(|e| IdCheckError::ImageProcessing(format!("Failed to create temporary file: {}", e)))?;
        processed
            .save(temp_file.path())
            .map_err(|e| IdCheckError::ImageProcessing(format!("Failed to write temporary file: {}", e)))?;

        Ok(temp_file)
    }

    fn preprocess_image(gray: GrayImage) -> GrayImage {
        // Phone photos of laminated cards come out flat; spread the histogram
        let equalized = equalize_histogram(&gray);
        Self::enhance_contrast(equalized)
    }

    fn enhance_contrast(mut img: GrayImage) -> GrayImage {
        for pixel in img.pixels_mut() {
            let value = pixel[0];
            pixel[0] = if value < 128 {
                value.saturating_sub(20)
            } else {
                value.saturating_add(20)
            };
        }
        img
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageOutputFormat, Luma};
    use std::io::Cursor;

    #[test]
    fn test_prepare_writes_png() {
        let img = GrayImage::from_fn(32, 16, |x, _| Luma([(x * 8) as u8]));
        let mut encoded = Cursor::new(Vec::new());
        image::DynamicImage::ImageLuma8(img)
            .write_to(&mut encoded, ImageOutputFormat::Png)
            .unwrap();

        let prepared = ImageProcessor::prepare_for_ocr(encoded.get_ref()).unwrap();
        let decoded = image::open(prepared.path()).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (32, 16));
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(ImageProcessor::prepare_for_ocr(b"not an image").is_err());
    }

    #[test]
    fn test_contrast_pushes_away_from_midpoint() {
        let img = GrayImage::from_fn(2, 1, |x, _| Luma([if x == 0 { 100 } else { 200 }]));
        let out = ImageProcessor::enhance_contrast(img);
        assert_eq!(out.get_pixel(0, 0)[0], 80);
        assert_eq!(out.get_pixel(1, 0)[0], 220);
    }
}
