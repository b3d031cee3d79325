//! OCR engine interface.
//!
//! The engine turns a receipt image into a plain text transcript. Everything
//! downstream works on that transcript only.

#[cfg(feature = "native")]
mod tesseract;

#[cfg(feature = "native")]
pub use tesseract::TesseractCli;

use std::path::Path;

use crate::error::OcrError;

/// Language hint for Japanese receipts.
pub const JAPANESE: &str = "jpn";

/// Text recognition capability.
pub trait OcrEngine: Send + Sync {
    /// Recognize the text in `image` using the `language` hint.
    fn recognize(&self, image: &Path, language: &str) -> Result<String, OcrError>;
}

impl<T: OcrEngine + ?Sized> OcrEngine for Box<T> {
    fn recognize(&self, image: &Path, language: &str) -> Result<String, OcrError> {
        (**self).recognize(image, language)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::amount::extract_amount;
    use std::collections::HashMap;
    use std::path::PathBuf;

    struct CannedOcr(HashMap<PathBuf, String>);

    impl OcrEngine for CannedOcr {
        fn recognize(&self, image: &Path, _language: &str) -> Result<String, OcrError> {
            self.0
                .get(image)
                .cloned()
                .ok_or_else(|| OcrError::InvalidImage(image.display().to_string()))
        }
    }

    #[test]
    fn test_engine_feeds_extraction() {
        let engine: Box<dyn OcrEngine> = Box::new(CannedOcr(HashMap::from([(
            PathBuf::from("a.jpg"),
            "歯科医院\n領収金額 5,230".to_string(),
        )])));

        let text = engine.recognize(Path::new("a.jpg"), JAPANESE).unwrap();
        assert_eq!(extract_amount(&text), 5230);
        assert!(engine.recognize(Path::new("b.jpg"), JAPANESE).is_err());
    }
}
