//! Error types for border detection and the request pipeline around it.
use imageproc::image::ImageError;
use thiserror::Error;

use crate::border::ContentRect;

pub type Result<T> = std::result::Result<T, Error>;

/// Failures of the locate/crop core.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CropError {
    #[error("no content found: all {width}x{height} pixels are border pixels")]
    NoContentFound { width: u32, height: u32 },

    #[error("rectangle {rect} lies outside the {width}x{height} image")]
    InvalidRectangle {
        rect: ContentRect,
        width: u32,
        height: u32,
    },
}

/// Failures of a whole decode, crop, encode request.
#[derive(Debug, Error)]
pub enum Error {
    #[error("no image data provided")]
    EmptyInput,

    #[error("failed to decode image: {0}")]
    Decode(#[source] ImageError),

    #[error(transparent)]
    Crop(#[from] CropError),

    #[error("failed to encode {format}: {source}")]
    Encode {
        format: &'static str,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Whether the failure was caused by the submitted image rather than by the service.
    pub fn is_client_error(&self) -> bool {
        matches!(self, Error::EmptyInput | Error::Decode(_) | Error::Crop(_))
    }
}
