//! Content bounds: one full scan, min/max reduction

use imageproc::image::{DynamicImage, GenericImageView};
use rayon::prelude::*;

use super::{BorderClassifier, ContentRect, PixelClass, PureBlack};
use crate::error::CropError;

/// Receives the classification of every pixel visited by an observed scan,
/// in row-major order.
pub trait ScanObserver {
    fn observe(&mut self, x: u32, y: u32, class: PixelClass);
}

impl<F: FnMut(u32, u32, PixelClass)> ScanObserver for F {
    fn observe(&mut self, x: u32, y: u32, class: PixelClass) {
        self(x, y, class)
    }
}

/// How `locate_dynamic` walks the image.
pub enum Scan<'a> {
    Sequential,
    /// Rows are scanned on the rayon pool and their bounds reduced.
    Parallel,
    /// Sequential, reporting each pixel to the observer.
    Observed(&'a mut dyn ScanObserver),
}

/// Running bounds, starting inverted so the first content pixel sets all four.
#[derive(Debug, Clone, Copy)]
struct Bounds {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl Bounds {
    fn empty() -> Self {
        Bounds {
            min_x: u32::MAX,
            min_y: u32::MAX,
            max_x: u32::MIN,
            max_y: u32::MIN,
        }
    }

    #[inline]
    fn include(&mut self, x: u32, y: u32) {
        self.min_x = self.min_x.min(x);
        self.max_x = self.max_x.max(x);
        self.min_y = self.min_y.min(y);
        self.max_y = self.max_y.max(y);
    }

    fn merge(self, other: Bounds) -> Bounds {
        Bounds {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }

    /// `None` while no content pixel has been included.
    fn into_rect(self) -> Option<ContentRect> {
        ContentRect::new(self.min_x, self.min_y, self.max_x, self.max_y)
    }
}

/// Tight bounding box of all non-black pixels.
pub fn locate_content<I: GenericImageView>(img: &I) -> Result<ContentRect, CropError> {
    locate_content_with(img, &PureBlack)
}

pub fn locate_content_with<I, C>(img: &I, classifier: &C) -> Result<ContentRect, CropError>
where
    I: GenericImageView,
    C: BorderClassifier,
{
    locate_content_observed(img, classifier, &mut |_: u32, _: u32, _: PixelClass| {})
}

/// Single sequential pass that also reports every pixel's classification.
pub fn locate_content_observed<I, C, O>(
    img: &I,
    classifier: &C,
    observer: &mut O,
) -> Result<ContentRect, CropError>
where
    I: GenericImageView,
    C: BorderClassifier,
    O: ScanObserver + ?Sized,
{
    let (width, height) = img.dimensions();
    let mut bounds = Bounds::empty();

    for y in 0..height {
        for x in 0..width {
            let class = classifier.classify(&img.get_pixel(x, y));
            observer.observe(x, y, class);
            if class.is_content() {
                bounds.include(x, y);
            }
        }
    }

    bounds
        .into_rect()
        .ok_or(CropError::NoContentFound { width, height })
}

/// Row-parallel scan; gives the same rectangle as the sequential one.
pub fn locate_content_par<I, C>(img: &I, classifier: &C) -> Result<ContentRect, CropError>
where
    I: GenericImageView + Sync,
    C: BorderClassifier + Sync,
{
    let (width, height) = img.dimensions();

    let bounds = (0..height)
        .into_par_iter()
        .map(|y| {
            let mut row = Bounds::empty();
            for x in 0..width {
                if classifier.classify(&img.get_pixel(x, y)).is_content() {
                    row.include(x, y);
                }
            }
            row
        })
        .reduce(Bounds::empty, Bounds::merge);

    bounds
        .into_rect()
        .ok_or(CropError::NoContentFound { width, height })
}

/// Locate content in a decoded image using its native pixel type.
pub fn locate_dynamic<C>(
    img: &DynamicImage,
    classifier: &C,
    scan: Scan<'_>,
) -> Result<ContentRect, CropError>
where
    C: BorderClassifier + Sync,
{
    match scan {
        Scan::Sequential => with_buffer!(img, buf => locate_content_with(buf, classifier)),
        Scan::Parallel => with_buffer!(img, buf => locate_content_par(buf, classifier)),
        Scan::Observed(observer) => {
            with_buffer!(img, buf => locate_content_observed(buf, classifier, observer))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::image::{ImageBuffer, Luma, Rgb, RgbImage, Rgba};

    fn black_with(width: u32, height: u32, content: &[(u32, u32)]) -> RgbImage {
        ImageBuffer::from_fn(width, height, |x, y| {
            if content.contains(&(x, y)) {
                Rgb([255, 255, 255])
            } else {
                Rgb([0, 0, 0])
            }
        })
    }

    #[test]
    fn single_pixel_gives_point_rect() {
        let img = black_with(5, 5, &[(2, 2)]);
        assert_eq!(locate_content(&img), Ok(ContentRect::new(2, 2, 2, 2).unwrap()));
    }

    #[test]
    fn diagonal_pixels_span_the_rect() {
        let img = black_with(4, 3, &[(1, 0), (2, 2)]);
        assert_eq!(locate_content(&img), Ok(ContentRect::new(1, 0, 2, 2).unwrap()));
    }

    #[test]
    fn content_touching_every_edge_is_full_image() {
        let img = black_with(6, 4, &[(0, 1), (5, 2), (3, 0), (2, 3)]);
        assert_eq!(locate_content(&img), Ok(ContentRect::full(6, 4).unwrap()));
    }

    #[test]
    fn all_black_is_no_content() {
        let img = black_with(3, 2, &[]);
        assert_eq!(
            locate_content(&img),
            Err(CropError::NoContentFound {
                width: 3,
                height: 2
            })
        );
    }

    #[test]
    fn zero_sized_image_is_no_content() {
        let img = RgbImage::new(0, 0);
        assert_eq!(
            locate_content(&img),
            Err(CropError::NoContentFound {
                width: 0,
                height: 0
            })
        );
    }

    #[test]
    fn alpha_does_not_make_content() {
        let img: ImageBuffer<Rgba<u8>, _> = ImageBuffer::from_fn(3, 3, |x, y| {
            if (x, y) == (1, 2) {
                Rgba([0, 9, 0, 0])
            } else {
                Rgba([0, 0, 0, 255])
            }
        });
        assert_eq!(locate_content(&img), Ok(ContentRect::new(1, 2, 1, 2).unwrap()));
    }

    #[test]
    fn parallel_matches_sequential() {
        let img: ImageBuffer<Luma<u8>, _> = ImageBuffer::from_fn(37, 23, |x, y| {
            // sparse, irregular content
            if (x * 7 + y * 13) % 29 == 0 && x > 4 && y > 2 && x < 31 {
                Luma([200])
            } else {
                Luma([0])
            }
        });

        let sequential = locate_content_with(&img, &PureBlack);
        let parallel = locate_content_par(&img, &PureBlack);
        assert!(sequential.is_ok());
        assert_eq!(sequential, parallel);

        let empty = RgbImage::new(8, 8);
        assert_eq!(
            locate_content_par(&empty, &PureBlack),
            Err(CropError::NoContentFound {
                width: 8,
                height: 8
            })
        );
    }

    #[test]
    fn observer_sees_every_pixel_in_row_major_order() {
        let img = black_with(3, 2, &[(2, 0)]);
        let mut seen = Vec::new();
        let mut record = |x: u32, y: u32, class: PixelClass| seen.push((x, y, class));
        let rect = locate_content_observed(&img, &PureBlack, &mut record);

        assert_eq!(rect, Ok(ContentRect::new(2, 0, 2, 0).unwrap()));
        assert_eq!(
            seen,
            vec![
                (0, 0, PixelClass::Border),
                (1, 0, PixelClass::Border),
                (2, 0, PixelClass::Content),
                (0, 1, PixelClass::Border),
                (1, 1, PixelClass::Border),
                (2, 1, PixelClass::Border),
            ]
        );
    }

    #[test]
    fn dynamic_scan_keeps_sixteen_bit_precision() {
        let buf: ImageBuffer<Rgb<u16>, _> = ImageBuffer::from_fn(4, 4, |x, y| {
            if (x, y) == (3, 1) {
                Rgb([0, 1, 0])
            } else {
                Rgb([0, 0, 0])
            }
        });
        let img = DynamicImage::ImageRgb16(buf);

        let expected = ContentRect::new(3, 1, 3, 1).unwrap();
        assert_eq!(locate_dynamic(&img, &PureBlack, Scan::Sequential), Ok(expected));
        assert_eq!(locate_dynamic(&img, &PureBlack, Scan::Parallel), Ok(expected));

        let mut count = 0;
        let mut counter = |_x: u32, _y: u32, _class: PixelClass| count += 1;
        assert_eq!(
            locate_dynamic(&img, &PureBlack, Scan::Observed(&mut counter)),
            Ok(expected)
        );
        assert_eq!(count, 16);
    }
}
