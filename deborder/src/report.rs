//! JSON response envelope: `{ "status", "message", "errors" }`

use serde::Serialize;

use crate::border::ContentRect;
use crate::error::{CropError, Error};
use crate::pipeline::ProcessedImage;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Status {
    #[serde(rename = "OK")]
    Ok,
    #[serde(rename = "Bad Request")]
    BadRequest,
    #[serde(rename = "Internal Server Error")]
    InternalServerError,
}

impl Status {
    pub fn code(self) -> u16 {
        match self {
            Status::Ok => 200,
            Status::BadRequest => 400,
            Status::InternalServerError => 500,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CropSummary {
    pub rect: Option<ContentRect>,
    pub source_dimensions: (u32, u32),
    pub dimensions: (u32, u32),
    pub format: &'static str,
}

impl From<&ProcessedImage> for CropSummary {
    fn from(img: &ProcessedImage) -> Self {
        CropSummary {
            rect: img.rect,
            source_dimensions: img.source_dimensions,
            dimensions: img.dimensions,
            format: img.format.name(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Envelope {
    pub status: Status,
    pub message: String,
    pub errors: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub crop: Option<CropSummary>,
}

impl Envelope {
    pub fn ok(message: impl Into<String>, img: &ProcessedImage) -> Self {
        Envelope {
            status: Status::Ok,
            message: message.into(),
            errors: None,
            crop: Some(img.into()),
        }
    }

    pub fn bad_request(message: impl Into<String>, err: &dyn std::error::Error) -> Self {
        Envelope {
            status: Status::BadRequest,
            message: message.into(),
            errors: Some(err.to_string()),
            crop: None,
        }
    }

    pub fn internal(message: impl Into<String>, err: &dyn std::error::Error) -> Self {
        Envelope {
            status: Status::InternalServerError,
            message: message.into(),
            errors: Some(err.to_string()),
            crop: None,
        }
    }

    /// Envelope for a failed request, with a status chosen by who caused the failure.
    pub fn from_error(err: &Error) -> Self {
        let message = summary(err);
        if err.is_client_error() {
            Self::bad_request(message, err)
        } else {
            Self::internal(message, err)
        }
    }

    pub fn to_json(&self) -> String {
        // only strings, integers and options: serialization cannot fail
        serde_json::to_string(self).unwrap_or_default()
    }
}

fn summary(err: &Error) -> &'static str {
    match err {
        Error::EmptyInput => "Image not provided",
        Error::Decode(_) => "Invalid image format",
        Error::Crop(CropError::NoContentFound { .. }) => "Image has no content to keep",
        Error::Crop(CropError::InvalidRectangle { .. }) => "Invalid crop rectangle",
        Error::Encode { .. } => "Failed to encode output",
        Error::Config(_) => "Invalid configuration",
        Error::Io(_) => "Failed to write output",
    }
}
