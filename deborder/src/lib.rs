pub mod border;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod image;
pub mod pipeline;
pub mod report;

// Re-export commonly used types
pub use border::{
    crop, crop_dynamic, locate_content, locate_content_with, locate_dynamic, remove_border,
    BorderClassifier, ContentRect, PixelClass, PureBlack, Scan, ScanObserver,
};
pub use config::{CropConfig, EmptyImagePolicy};
pub use diagnostics::BorderLog;
pub use error::{CropError, Error, Result};
pub use image::{ImageFormat, PngCompression};
pub use pipeline::{process, process_image, ProcessedImage};
pub use report::Envelope;
