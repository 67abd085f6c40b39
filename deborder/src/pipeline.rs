//! One request: decode, locate, crop, encode

use std::time::Instant;

use imageproc::image::{DynamicImage, GenericImageView};

use crate::border::{self, ContentRect, PureBlack, Scan, ScanObserver};
use crate::config::{CropConfig, EmptyImagePolicy};
use crate::error::{CropError, Error, Result};
use crate::image::{self, ImageFormat};

#[derive(Debug, Clone)]
pub struct ProcessedImage {
    pub data: Vec<u8>,
    pub dimensions: (u32, u32),
    pub source_dimensions: (u32, u32),
    /// `None` when the image had no content and was kept as is.
    pub rect: Option<ContentRect>,
    pub format: ImageFormat,
}

/// Decode `data`, strip its black border and encode the result.
///
/// When `observer` is given the scan runs sequentially and reports every pixel to it.
pub fn process(
    data: &[u8],
    config: &CropConfig,
    observer: Option<&mut dyn ScanObserver>,
) -> Result<ProcessedImage> {
    let img = image::decode(data)?;
    process_image(&img, config, observer)
}

pub fn process_image(
    img: &DynamicImage,
    config: &CropConfig,
    observer: Option<&mut dyn ScanObserver>,
) -> Result<ProcessedImage> {
    let source_dimensions = img.dimensions();
    log::info!(
        "Removing border from {}x{} {:?} image",
        source_dimensions.0,
        source_dimensions.1,
        img.color()
    );

    let scan = match observer {
        Some(observer) => Scan::Observed(observer),
        None if config.parallel => Scan::Parallel,
        None => Scan::Sequential,
    };

    let start = Instant::now();
    let located = border::locate_dynamic(img, &PureBlack, scan);
    log::debug!("Border scan took {:?}", start.elapsed());

    let (rect, cropped) = match located {
        Ok(rect) => {
            log::debug!("Content rectangle: {rect}");
            (Some(rect), border::crop_dynamic(img, rect)?)
        }
        Err(CropError::NoContentFound { width, height })
            if config.empty_policy == EmptyImagePolicy::KeepOriginal =>
        {
            log::warn!("No content in {width}x{height} image, keeping it unchanged");
            (None, img.clone())
        }
        Err(e) => return Err(Error::Crop(e)),
    };

    let data = image::encode_image(&cropped, config.image_format)?;
    let dimensions = cropped.dimensions();
    log::info!(
        "Cropped to {}x{} ({} bytes as {})",
        dimensions.0,
        dimensions.1,
        data.len(),
        config.image_format.name()
    );

    Ok(ProcessedImage {
        data,
        dimensions,
        source_dimensions,
        rect,
        format: config.image_format,
    })
}
