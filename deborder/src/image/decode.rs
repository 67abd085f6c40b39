//! Image decoding

use imageproc::image::{load_from_memory, DynamicImage};

use crate::error::{Error, Result};

/// Decode image from memory, guessing the format from its content
pub fn decode(data: &[u8]) -> Result<DynamicImage> {
    if data.is_empty() {
        return Err(Error::EmptyInput);
    }
    load_from_memory(data).map_err(Error::Decode)
}
