//! Black border detection: pixel classification, content bounds and cropping

/// Run `$body` with `$buf` bound to the concrete pixel buffer inside a `DynamicImage`,
/// so work happens on the native channel type instead of a lossy 8-bit view.
macro_rules! with_buffer {
    ($img:expr, $buf:ident => $body:expr) => {
        match $img {
            DynamicImage::ImageLuma8($buf) => $body,
            DynamicImage::ImageLumaA8($buf) => $body,
            DynamicImage::ImageRgb8($buf) => $body,
            DynamicImage::ImageRgba8($buf) => $body,
            DynamicImage::ImageLuma16($buf) => $body,
            DynamicImage::ImageLumaA16($buf) => $body,
            DynamicImage::ImageRgb16($buf) => $body,
            DynamicImage::ImageRgba16($buf) => $body,
            DynamicImage::ImageRgb32F($buf) => $body,
            DynamicImage::ImageRgba32F($buf) => $body,
            other => {
                let $buf = &other.to_rgba32f();
                $body
            }
        }
    };
}

mod classify;
mod crop;
mod locate;

pub use classify::{BorderClassifier, PixelClass, PureBlack};
pub use crop::{crop, crop_dynamic, remove_border, Cropped};
pub use locate::{
    locate_content, locate_content_observed, locate_content_par, locate_content_with,
    locate_dynamic, Scan, ScanObserver,
};

use std::fmt;

/// Inclusive bounding box of content pixels.
///
/// Always satisfies `min_x <= max_x` and `min_y <= max_y`; an empty or inverted
/// rectangle cannot be constructed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize)]
pub struct ContentRect {
    min_x: u32,
    min_y: u32,
    max_x: u32,
    max_y: u32,
}

impl ContentRect {
    pub fn new(min_x: u32, min_y: u32, max_x: u32, max_y: u32) -> Option<Self> {
        (min_x <= max_x && min_y <= max_y).then_some(Self {
            min_x,
            min_y,
            max_x,
            max_y,
        })
    }

    /// Rectangle covering a whole `width` x `height` image, `None` if it has no pixels.
    pub fn full(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Self::new(0, 0, width - 1, height - 1)
    }

    pub fn min_x(&self) -> u32 {
        self.min_x
    }

    pub fn min_y(&self) -> u32 {
        self.min_y
    }

    pub fn max_x(&self) -> u32 {
        self.max_x
    }

    pub fn max_y(&self) -> u32 {
        self.max_y
    }

    pub fn width(&self) -> u32 {
        self.max_x - self.min_x + 1
    }

    pub fn height(&self) -> u32 {
        self.max_y - self.min_y + 1
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }

    pub fn contains(&self, x: u32, y: u32) -> bool {
        (self.min_x..=self.max_x).contains(&x) && (self.min_y..=self.max_y).contains(&y)
    }

    /// Whether every pixel of the rectangle exists in a `width` x `height` image.
    pub fn fits_within(&self, width: u32, height: u32) -> bool {
        self.max_x < width && self.max_y < height
    }
}

impl fmt::Display for ContentRect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {})-({}, {})",
            self.min_x, self.min_y, self.max_x, self.max_y
        )
    }
}
