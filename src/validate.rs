//! Pre-submission checks for the selected document.
//!
//! The server enforces the same limits; failing fast here avoids shipping a
//! 50 MB file over the wire just to get a 400 back.

use std::fs;
use std::path::Path;
use thiserror::Error;

/// Upload size limit, matching the server's `MAX_CONTENT_LENGTH`.
pub const MAX_UPLOAD_BYTES: u64 = 50 * 1024 * 1024;

pub const ALLOWED_EXTENSIONS: [&str; 2] = ["pdf", "epub"];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Select a PDF or EPUB file first")]
    MissingFile,
    #[error("Only PDF and EPUB files are supported")]
    UnsupportedType,
    #[error("File is larger than the 50 MB upload limit")]
    TooLarge,
}

/// Validate the document at `path` before submission. No side effects.
pub fn validate_upload(path: &Path) -> Result<(), ValidationError> {
    if path.as_os_str().is_empty() {
        return Err(ValidationError::MissingFile);
    }
    let meta = fs::metadata(path).map_err(|_| ValidationError::MissingFile)?;
    if !meta.is_file() {
        return Err(ValidationError::MissingFile);
    }
    check_extension(path)?;
    check_size(meta.len())
}

fn check_extension(path: &Path) -> Result<(), ValidationError> {
    let ext = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .ok_or(ValidationError::UnsupportedType)?;
    if ALLOWED_EXTENSIONS.contains(&ext.as_str()) {
        Ok(())
    } else {
        Err(ValidationError::UnsupportedType)
    }
}

fn check_size(len: u64) -> Result<(), ValidationError> {
    if len > MAX_UPLOAD_BYTES {
        Err(ValidationError::TooLarge)
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn rejects_unsupported_extensions() {
        for name in ["book.txt", "book.mobi", "book.pdf.exe", "book"] {
            assert_eq!(
                check_extension(&PathBuf::from(name)),
                Err(ValidationError::UnsupportedType),
                "{name} should be rejected"
            );
        }
    }

    #[test]
    fn accepts_pdf_and_epub_case_insensitively() {
        for name in ["book.pdf", "book.epub", "BOOK.PDF", "Book.Epub"] {
            assert_eq!(check_extension(&PathBuf::from(name)), Ok(()));
        }
    }

    #[test]
    fn rejects_files_over_the_limit() {
        assert_eq!(check_size(MAX_UPLOAD_BYTES), Ok(()));
        assert_eq!(
            check_size(MAX_UPLOAD_BYTES + 1),
            Err(ValidationError::TooLarge)
        );
    }

    #[test]
    fn empty_path_is_missing_file() {
        assert_eq!(
            validate_upload(&PathBuf::new()),
            Err(ValidationError::MissingFile)
        );
    }

    #[test]
    fn nonexistent_path_is_missing_file() {
        assert_eq!(
            validate_upload(&PathBuf::from("/no/such/file.pdf")),
            Err(ValidationError::MissingFile)
        );
    }
}
