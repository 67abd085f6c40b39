//! Copying a content rectangle into a new image

use imageproc::image::{imageops, DynamicImage, GenericImageView, ImageBuffer, Pixel};

use super::{locate_content, ContentRect};
use crate::error::CropError;

/// Owned pixel buffer produced by `crop`.
pub type Cropped<P> = ImageBuffer<P, Vec<<P as Pixel>::Subpixel>>;

/// Copy the pixels inside `rect` into a new, independently owned image.
pub fn crop<I>(img: &I, rect: ContentRect) -> Result<Cropped<I::Pixel>, CropError>
where
    I: GenericImageView + 'static,
{
    let (width, height) = img.dimensions();
    if !rect.fits_within(width, height) {
        return Err(CropError::InvalidRectangle {
            rect,
            width,
            height,
        });
    }

    Ok(imageops::crop_imm(
        img,
        rect.min_x(),
        rect.min_y(),
        rect.width(),
        rect.height(),
    )
    .to_image())
}

/// Crop a decoded image, keeping its pixel representation.
pub fn crop_dynamic(img: &DynamicImage, rect: ContentRect) -> Result<DynamicImage, CropError> {
    with_buffer!(img, buf => crop(buf, rect).map(DynamicImage::from))
}

/// Locate the non-black content of `img` and crop to it.
pub fn remove_border(img: &DynamicImage) -> Result<(ContentRect, DynamicImage), CropError> {
    let rect = with_buffer!(img, buf => locate_content(buf))?;
    let cropped = crop_dynamic(img, rect)?;
    Ok((rect, cropped))
}
