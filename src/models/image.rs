use std::fmt;
use std::path::{Path, PathBuf};

/// Errors raised while selecting an image for analysis.
#[derive(Debug)]
pub enum ImageError {
    /// Path does not exist or is not a regular file
    NotFound(PathBuf),
    /// File type is not an image
    NotAnImage { path: PathBuf, mime: String },
    /// I/O error while reading the file
    IoError(PathBuf, std::io::Error),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            ImageError::NotAnImage { path, mime } => write!(
                f,
                "Please upload an image file. '{}' looks like {}",
                path.display(),
                mime
            ),
            ImageError::IoError(path, e) => {
                write!(f, "Failed to read '{}': {}", path.display(), e)
            }
        }
    }
}

impl std::error::Error for ImageError {}

/// An image file selected for upload.
///
/// Only files whose MIME type starts with `image/` can be constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageUpload {
    path: PathBuf,
    file_name: String,
    mime: String,
}

impl ImageUpload {
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ImageError> {
        let path = path.as_ref().to_path_buf();
        if !path.is_file() {
            return Err(ImageError::NotFound(path));
        }

        let mime = guess_mime(&path);
        if !mime.starts_with("image/") {
            return Err(ImageError::NotAnImage { path, mime });
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "upload".to_string());

        Ok(Self {
            path,
            file_name,
            mime,
        })
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub fn mime(&self) -> &str {
        &self.mime
    }

    /// Reads the image bytes for upload.
    pub async fn read(&self) -> Result<Vec<u8>, ImageError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|e| ImageError::IoError(self.path.clone(), e))
    }
}

impl fmt::Display for ImageUpload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Selected file: {}", self.file_name)
    }
}

fn guess_mime(path: &Path) -> String {
    mime_guess::from_path(path)
        .first_or_octet_stream()
        .essence_str()
        .to_string()
}
