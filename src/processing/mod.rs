pub mod classifier;
pub mod extractors;
pub mod image;
pub mod normalize;
pub mod ocr;

pub use classifier::DocumentClassifier;
pub use extractors::{canonical_gender, FieldExtractor, IdentifierExtractor};
pub use self::image::ImageProcessor;
pub use normalize::NormalizedLines;
pub use ocr::{InputFormat, OcrEngine, TesseractEngine};
