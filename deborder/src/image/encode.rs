//! Image encoding: PNG, JPEG, WebP

use imageproc::image::{ColorType, DynamicImage, GenericImageView};
use webp::WebPMemory;

use super::ImageFormat;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum PngCompression {
    Fast,
    Default,
    Best,
}

/// Compress an image to JPEG format with the specified quality
pub fn compress_to_jpeg<W>(img: &DynamicImage, writer: &mut W, quality: u8) -> Result<()>
where
    W: std::io::Write,
{
    use imageproc::image::codecs::jpeg::JpegEncoder;

    // JPEG has no alpha and no 16-bit mode
    let converted;
    let img = match img.color() {
        ColorType::L8 | ColorType::Rgb8 => img,
        _ => {
            converted = DynamicImage::from(img.to_rgb8());
            &converted
        }
    };

    img.write_with_encoder(JpegEncoder::new_with_quality(writer, quality.clamp(1, 100)))
        .map_err(|e| Error::Encode {
            format: "jpeg",
            source: Box::new(e),
        })
}

/// Compress an image to PNG format with the specified compression level
pub fn compress_to_png<W>(
    img: &DynamicImage,
    writer: &mut W,
    compression: PngCompression,
) -> Result<()>
where
    W: std::io::Write,
{
    use imageproc::image::codecs::png::{CompressionType, FilterType, PngEncoder};

    let compression_type = match compression {
        PngCompression::Fast => CompressionType::Fast,
        PngCompression::Default => CompressionType::Default,
        PngCompression::Best => CompressionType::Best,
    };

    // PNG stores at most 16 bits per channel
    let converted;
    let img = match img.color() {
        ColorType::Rgb32F => {
            converted = DynamicImage::from(img.to_rgb16());
            &converted
        }
        ColorType::Rgba32F => {
            converted = DynamicImage::from(img.to_rgba16());
            &converted
        }
        _ => img,
    };

    let is_grayscale = matches!(
        img.color(),
        ColorType::L8 | ColorType::La8 | ColorType::L16 | ColorType::La16
    );

    let encoder = PngEncoder::new_with_quality(
        writer,
        compression_type,
        if is_grayscale {
            FilterType::NoFilter
        } else {
            FilterType::Adaptive
        },
    );

    img.write_with_encoder(encoder).map_err(|e| Error::Encode {
        format: "png",
        source: Box::new(e),
    })
}

/// Compress an image to WebP format with the specified quality
pub fn compress_to_webp(img: &DynamicImage, quality: u8) -> Result<WebPMemory> {
    let img = if img.color().has_alpha() {
        DynamicImage::from(img.to_rgba8())
    } else {
        DynamicImage::from(img.to_rgb8())
    };
    let encoder = webp::Encoder::from_image(&img).map_err(|e| Error::Encode {
        format: "webp",
        source: e.into(),
    })?;
    Ok(encoder.encode(quality.min(100) as f32))
}

/// Encode `img` into `writer` using `format`.
pub fn write_image<W>(img: &DynamicImage, writer: &mut W, format: ImageFormat) -> Result<()>
where
    W: std::io::Write,
{
    match format {
        ImageFormat::Png { compression } => compress_to_png(img, writer, compression),
        ImageFormat::Jpeg { quality } => compress_to_jpeg(img, writer, quality),
        ImageFormat::WebP { quality } => {
            let webp_data = compress_to_webp(img, quality)?;
            std::io::Write::write_all(writer, &webp_data)?;
            Ok(())
        }
    }
}

/// Encode `img` into a fresh buffer.
pub fn encode_image(img: &DynamicImage, format: ImageFormat) -> Result<Vec<u8>> {
    let (width, height) = img.dimensions();
    let mut buffer = Vec::with_capacity((width as usize) * (height as usize));
    write_image(img, &mut buffer, format)?;
    log::trace!("Encoded {width}x{height} image as {}", format.name());
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::image::{ImageBuffer, Rgba, RgbaImage};

    fn sample() -> DynamicImage {
        let img: RgbaImage =
            ImageBuffer::from_fn(5, 3, |x, y| Rgba([x as u8 * 40, y as u8 * 60, 9, 200]));
        DynamicImage::ImageRgba8(img)
    }

    #[test]
    fn png_is_lossless() {
        let img = sample();
        let bytes = encode_image(
            &img,
            ImageFormat::Png {
                compression: PngCompression::Best,
            },
        )
        .unwrap();

        assert!(bytes.starts_with(b"\x89PNG"));
        let decoded = imageproc::image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.to_rgba8(), img.to_rgba8());
    }

    #[test]
    fn jpeg_accepts_alpha_input() {
        let bytes = encode_image(&sample(), ImageFormat::Jpeg { quality: 90 }).unwrap();
        assert!(bytes.starts_with(&[0xFF, 0xD8]));
    }

    #[test]
    fn webp_output_has_riff_header() {
        let bytes = encode_image(&sample(), ImageFormat::WebP { quality: 80 }).unwrap();
        assert!(bytes.starts_with(b"RIFF"));
        assert_eq!(&bytes[8..12], b"WEBP");
    }

    #[test]
    fn float_images_encode_as_png() {
        let img = DynamicImage::ImageRgb32F(ImageBuffer::from_pixel(
            2,
            2,
            imageproc::image::Rgb([1.0, 0.5, 0.0]),
        ));
        let bytes = encode_image(&img, ImageFormat::default()).unwrap();
        let decoded = imageproc::image::load_from_memory(&bytes).unwrap();
        assert_eq!(decoded.color(), ColorType::Rgb16);
    }
}
