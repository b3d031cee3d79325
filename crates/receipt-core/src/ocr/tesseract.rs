//! OCR through the external `tesseract` executable.

use std::path::Path;
use std::process::Command;
use std::time::Instant;

use tracing::{debug, warn};

use super::OcrEngine;
use crate::error::OcrError;

/// Runs `tesseract <image> stdout -l <language>`.
#[derive(Debug, Clone)]
pub struct TesseractCli {
    program: String,
}

impl TesseractCli {
    /// Use `tesseract` from `PATH`.
    pub fn new() -> Self {
        Self::with_program("tesseract")
    }

    /// Use a specific executable.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }
}

impl Default for TesseractCli {
    fn default() -> Self {
        Self::new()
    }
}

impl OcrEngine for TesseractCli {
    fn recognize(&self, image: &Path, language: &str) -> Result<String, OcrError> {
        if !image.is_file() {
            return Err(OcrError::InvalidImage(image.display().to_string()));
        }

        let start = Instant::now();
        let output = Command::new(&self.program)
            .arg(image)
            .arg("stdout")
            .arg("-l")
            .arg(language)
            .output()
            .map_err(|source| OcrError::Launch {
                program: self.program.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!("{} failed on {}: {}", self.program, image.display(), stderr);
            return Err(OcrError::Failed {
                status: output.status.to_string(),
                stderr,
            });
        }

        let text = String::from_utf8(output.stdout).map_err(|_| OcrError::Encoding)?;

        debug!(
            "OCR of {} produced {} lines in {:?}",
            image.display(),
            text.lines().count(),
            start.elapsed()
        );

        Ok(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_missing_image() {
        let engine = TesseractCli::new();
        let err = engine
            .recognize(Path::new("/definitely/not/here.jpg"), "jpn")
            .unwrap_err();
        assert!(matches!(err, OcrError::InvalidImage(_)));
    }

    #[test]
    fn test_missing_program() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("r.png");
        fs::write(&image, b"not really a png").unwrap();

        let engine = TesseractCli::with_program("receipt-no-such-ocr-binary");
        let err = engine.recognize(&image, "jpn").unwrap_err();
        assert!(matches!(err, OcrError::Launch { .. }));
    }

    #[cfg(unix)]
    #[test]
    fn test_command_line() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("r.png");
        fs::write(&image, b"").unwrap();

        // echo prints the arguments it receives
        let engine = TesseractCli::with_program("echo");
        let text = engine.recognize(&image, "jpn").unwrap();
        assert_eq!(text.trim(), format!("{} stdout -l jpn", image.display()));
    }

    #[cfg(unix)]
    #[test]
    fn test_nonzero_exit() {
        let dir = tempfile::tempdir().unwrap();
        let image = dir.path().join("r.png");
        fs::write(&image, b"").unwrap();

        let engine = TesseractCli::with_program("false");
        let err = engine.recognize(&image, "jpn").unwrap_err();
        assert!(matches!(err, OcrError::Failed { .. }));
    }
}
