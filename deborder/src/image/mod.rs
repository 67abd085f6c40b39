//! Decoding and encoding around the border core

mod decode;
mod encode;

// Re-export public API
pub use decode::decode;
pub use encode::{
    compress_to_jpeg, compress_to_png, compress_to_webp, encode_image, write_image,
    PngCompression,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ImageFormat {
    Png { compression: PngCompression },
    Jpeg { quality: u8 },
    WebP { quality: u8 },
}

impl Default for ImageFormat {
    fn default() -> Self {
        ImageFormat::Png {
            compression: PngCompression::Default,
        }
    }
}

impl ImageFormat {
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png { .. } => "png",
            ImageFormat::Jpeg { .. } => "jpg",
            ImageFormat::WebP { .. } => "webp",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ImageFormat::Png { .. } => "png",
            ImageFormat::Jpeg { .. } => "jpeg",
            ImageFormat::WebP { .. } => "webp",
        }
    }
}
