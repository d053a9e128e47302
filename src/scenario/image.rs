//! Image loading for image scenarios.

use crate::error::{Error, Result};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::path::{Path, PathBuf};

/// Image shown to the model in `image_input`.
pub const TIRES_IMAGE: &str = "tires.jpeg";
/// Chart returned by the tool in `image_in_tool`.
pub const PLOT_IMAGE: &str = "plot.png";

/// A base64-encoded image and its media type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    pub data: String,
    pub media_type: &'static str,
}

impl ImageData {
    /// `data:` URL form used by OpenAI `image_url` parts.
    pub fn data_url(&self) -> String {
        format!("data:{};base64,{}", self.media_type, self.data)
    }
}

/// Media type from the file extension; unknown extensions are treated as JPEG.
pub fn media_type_for(path: &Path) -> &'static str {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase);
    match ext.as_deref() {
        Some("png") => "image/png",
        Some("gif") => "image/gif",
        Some("webp") => "image/webp",
        _ => "image/jpeg",
    }
}

/// Read an image file and base64-encode it.
pub fn load_image(path: &Path) -> Result<ImageData> {
    if !path.exists() {
        return Err(Error::ImageNotFound(path.to_path_buf()));
    }
    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "Loaded image");
    Ok(ImageData {
        data: STANDARD.encode(bytes),
        media_type: media_type_for(path),
    })
}

/// Directory the scenario images are read from.
#[derive(Debug, Clone)]
pub struct Assets {
    dir: PathBuf,
}

impl Assets {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn tires(&self) -> Result<ImageData> {
        load_image(&self.dir.join(TIRES_IMAGE))
    }

    pub fn plot(&self) -> Result<ImageData> {
        load_image(&self.dir.join(PLOT_IMAGE))
    }
}

impl Default for Assets {
    fn default() -> Self {
        Self::new(".")
    }
}
