//! # Sketch Files
//!
//! A [`SketchFile`] is a candidate upload: a file name, the media type the
//! file declares, and its bytes. The declared type comes from the file
//! extension and is never checked against the content, matching how a file
//! picker reports types.

use std::fmt;
use std::fs;
use std::path::Path;

use crate::errors::{VasthraError, VasthraResult};

/// Media types the generation service accepts
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MediaType {
    Png,
    Jpeg,
}

impl MediaType {
    pub const ALL: &'static [MediaType] = &[MediaType::Png, MediaType::Jpeg];

    /// Parse an exact declared media type. Anything else is not accepted.
    pub fn from_declared(declared: &str) -> Option<Self> {
        match declared {
            "image/png" => Some(MediaType::Png),
            "image/jpeg" => Some(MediaType::Jpeg),
            _ => None,
        }
    }

    pub fn mime(&self) -> &'static str {
        match self {
            MediaType::Png => "image/png",
            MediaType::Jpeg => "image/jpeg",
        }
    }

    /// File extensions offered by the file picker filter
    pub fn extensions(&self) -> &'static [&'static str] {
        match self {
            MediaType::Png => &["png"],
            MediaType::Jpeg => &["jpg", "jpeg"],
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mime())
    }
}

/// Every extension the picker should offer
pub fn picker_extensions() -> Vec<&'static str> {
    MediaType::ALL
        .iter()
        .flat_map(|m| m.extensions().iter().copied())
        .collect()
}

/// Declared media type for a file name, derived from its extension.
///
/// Unknown extensions map to `application/octet-stream`.
pub fn declared_type_for(file_name: &str) -> &'static str {
    let ext = Path::new(file_name)
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" | "jpe" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        "tif" | "tiff" => "image/tiff",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

/// A candidate sketch file chosen by the user
#[derive(Clone, PartialEq, Eq)]
pub struct SketchFile {
    /// File name only (e.g., "peacock.png")
    pub name: String,
    /// Media type the file declares
    pub declared_type: String,
    /// File contents
    pub bytes: Vec<u8>,
}

impl SketchFile {
    pub fn new(name: impl Into<String>, declared_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        SketchFile {
            name: name.into(),
            declared_type: declared_type.into(),
            bytes,
        }
    }

    /// Read a file from disk, declaring its type from the extension
    pub fn from_path(path: &Path) -> VasthraResult<Self> {
        let bytes = fs::read(path).map_err(|e| {
            VasthraError::file_error("read sketch", path.display().to_string(), e.to_string())
        })?;

        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| "sketch".to_string());
        let declared_type = declared_type_for(&name);

        Ok(SketchFile::new(name, declared_type, bytes))
    }

    /// Check the declared type against the accepted set
    pub fn media_type(&self) -> VasthraResult<MediaType> {
        MediaType::from_declared(&self.declared_type)
            .ok_or_else(|| VasthraError::invalid_media_type(&self.name, &self.declared_type))
    }
}

// Keep the bytes out of debug output
impl fmt::Debug for SketchFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SketchFile")
            .field("name", &self.name)
            .field("declared_type", &self.declared_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_only_exact_png_and_jpeg_accepted() {
        assert_eq!(MediaType::from_declared("image/png"), Some(MediaType::Png));
        assert_eq!(MediaType::from_declared("image/jpeg"), Some(MediaType::Jpeg));
        assert_eq!(MediaType::from_declared("image/jpg"), None);
        assert_eq!(MediaType::from_declared("IMAGE/PNG"), None);
        assert_eq!(MediaType::from_declared("image/gif"), None);
        assert_eq!(MediaType::from_declared(""), None);
    }

    #[test]
    fn test_declared_type_from_extension() {
        assert_eq!(declared_type_for("sketch.PNG"), "image/png");
        assert_eq!(declared_type_for("sketch.jpg"), "image/jpeg");
        assert_eq!(declared_type_for("sketch.jpeg"), "image/jpeg");
        assert_eq!(declared_type_for("sketch.gif"), "image/gif");
        assert_eq!(declared_type_for("sketch"), "application/octet-stream");
    }

    #[test]
    fn test_declared_type_is_not_sniffed() {
        // PNG magic bytes behind a .txt name are still rejected
        let file = SketchFile::new("notes.txt", declared_type_for("notes.txt"), vec![0x89, b'P', b'N', b'G']);
        assert_eq!(
            file.media_type(),
            Err(VasthraError::invalid_media_type("notes.txt", "text/plain"))
        );
    }

    #[test]
    fn test_from_path_reads_name_and_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("peacock.jpeg");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(b"jpeg-bytes").unwrap();

        let sketch = SketchFile::from_path(&path).unwrap();
        assert_eq!(sketch.name, "peacock.jpeg");
        assert_eq!(sketch.declared_type, "image/jpeg");
        assert_eq!(sketch.bytes, b"jpeg-bytes");
        assert_eq!(sketch.media_type(), Ok(MediaType::Jpeg));
    }

    #[test]
    fn test_from_path_missing_file() {
        let err = SketchFile::from_path(Path::new("/nonexistent/sketch.png")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_picker_extensions() {
        assert_eq!(picker_extensions(), vec!["png", "jpg", "jpeg"]);
    }
}
