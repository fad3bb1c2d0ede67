use log::{debug, info};
use std::path::Path;
use tesseract::Tesseract;

use crate::processing::ImageProcessor;
use crate::utils::IdCheckError;

/// File kinds accepted for OCR.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    Pdf,
    Jpeg,
    Png,
}

impl InputFormat {
    pub fn from_path(path: &Path) -> Result<Self, IdCheckError> {
        let mime = mime_guess::from_path(path).first();
        match mime.as_ref().map(|m| m.essence_str()) {
            Some("application/pdf") => Ok(InputFormat::Pdf),
            Some("image/jpeg") => Ok(InputFormat::Jpeg),
            Some("image/png") => Ok(InputFormat::Png),
            _ => Err(IdCheckError::UnsupportedFormat(
                path.extension()
                    .and_then(|ext| ext.to_str())
                    .map(|ext| format!(".{}", ext.to_lowercase()))
                    .unwrap_or_else(|| path.display().to_string()),
            )),
        }
    }

    pub fn mime_type(&self) -> &'static str {
        match self {
            InputFormat::Pdf => "application/pdf",
            InputFormat::Jpeg => "image/jpeg",
            InputFormat::Png => "image/png",
        }
    }
}

/// Turns a document file into one text string. May return an empty string
/// when nothing legible was found.
pub trait OcrEngine {
    fn extract_text(&self, file_data: &[u8], format: InputFormat) -> Result<String, IdCheckError>;
}

/// Tesseract for images, the embedded text layer for PDFs.
pub struct TesseractEngine {
    languages: String,
    datapath: Option<String>,
}

impl TesseractEngine {
    pub fn new(languages: impl Into<String>, datapath: Option<String>) -> Self {
        TesseractEngine {
            languages: languages.into(),
            datapath,
        }
    }

    fn recognize_image(&self, image_data: &[u8]) -> Result<String, IdCheckError> {
        let prepared = ImageProcessor::prepare_for_ocr(image_data)?;
        let path_str = prepared
            .path()
            .to_str()
            .ok_or_else(|| IdCheckError::Ocr("Could not convert path to string".to_string()))?;

        let mut tess = Tesseract::new(self.datapath.as_deref(), Some(self.languages.as_str()))
            .map_err(|e| IdCheckError::Ocr(format!("Failed to initialize Tesseract: {}", e)))?;
        tess.set_page_seg_mode(tesseract::PageSegMode::PsmAuto);

        let mut tess = tess
            .set_image(path_str)
            .map_err(|e| IdCheckError::Ocr(format!("Failed to set image: {}", e)))?;
        tess.get_text()
            .map_err(|e| IdCheckError::Ocr(format!("Failed to extract text: {}", e)))
    }

    fn read_pdf_text(pdf_data: &[u8]) -> Result<String, IdCheckError> {
        pdf_extract::extract_text_from_mem(pdf_data)
            .map_err(|e| IdCheckError::Ocr(format!("Failed to read PDF text: {}", e)))
    }
}

impl OcrEngine for TesseractEngine {
    fn extract_text(&self, file_data: &[u8], format: InputFormat) -> Result<String, IdCheckError> {
        info!("Running OCR on {} input ({} bytes)", format.mime_type(), file_data.len());
        let text = match format {
            InputFormat::Pdf => Self::read_pdf_text(file_data)?,
            InputFormat::Jpeg | InputFormat::Png => self.recognize_image(file_data)?,
        };
        debug!("OCR result:\n{}", text);
        Ok(text)
    }
}
