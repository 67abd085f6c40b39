//! Pixel classification: border or content

use std::fmt;

use imageproc::image::{Pixel, Primitive};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PixelClass {
    Border,
    Content,
}

impl PixelClass {
    pub fn is_content(self) -> bool {
        self == PixelClass::Content
    }

    pub fn as_str(self) -> &'static str {
        match self {
            PixelClass::Border => "border",
            PixelClass::Content => "content",
        }
    }
}

impl fmt::Display for PixelClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decides which pixels belong to the border being removed.
pub trait BorderClassifier {
    fn classify<P: Pixel>(&self, pixel: &P) -> PixelClass;
}

/// Pure black is border: red, green and blue all exactly zero, alpha ignored.
///
/// The comparison happens on the pixel's own channel type, so a 16-bit
/// channel holding 1 is content even though it would round to 0 in 8 bits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PureBlack;

impl BorderClassifier for PureBlack {
    #[inline]
    fn classify<P: Pixel>(&self, pixel: &P) -> PixelClass {
        let zero = <P::Subpixel as Primitive>::DEFAULT_MIN_VALUE;
        if pixel.to_rgb().0.iter().all(|&c| c == zero) {
            PixelClass::Border
        } else {
            PixelClass::Content
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use imageproc::image::{Luma, LumaA, Rgb, Rgba};

    #[test]
    fn black_is_border_regardless_of_alpha() {
        assert_eq!(PureBlack.classify(&Rgba([0u8, 0, 0, 255])), PixelClass::Border);
        assert_eq!(PureBlack.classify(&Rgba([0u8, 0, 0, 0])), PixelClass::Border);
        assert_eq!(PureBlack.classify(&LumaA([0u8, 17])), PixelClass::Border);
    }

    #[test]
    fn any_nonzero_channel_is_content() {
        assert_eq!(PureBlack.classify(&Rgb([1u8, 0, 0])), PixelClass::Content);
        assert_eq!(PureBlack.classify(&Rgb([0u8, 1, 0])), PixelClass::Content);
        assert_eq!(PureBlack.classify(&Rgb([0u8, 0, 1])), PixelClass::Content);
        assert_eq!(PureBlack.classify(&Rgb([255u8, 255, 255])), PixelClass::Content);
        assert_eq!(PureBlack.classify(&Luma([128u8])), PixelClass::Content);
    }

    #[test]
    fn transparent_non_black_is_content() {
        assert_eq!(PureBlack.classify(&Rgba([10u8, 20, 30, 0])), PixelClass::Content);
    }

    #[test]
    fn high_bit_depth_is_compared_exactly() {
        assert_eq!(PureBlack.classify(&Rgb([0u16, 0, 1])), PixelClass::Content);
        assert_eq!(PureBlack.classify(&Luma([0u16])), PixelClass::Border);
        assert_eq!(PureBlack.classify(&Rgb([0.0f32, 0.0, 0.0])), PixelClass::Border);
        assert_eq!(PureBlack.classify(&Rgba([0.0f32, 1e-6, 0.0, 1.0])), PixelClass::Content);
    }
}
