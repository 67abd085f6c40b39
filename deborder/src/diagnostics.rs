//! Per-pixel classification log, written to a sink owned by the request

use std::io::{self, Write};

use crate::border::{PixelClass, ScanObserver};

/// Writes one `border (x, y)` or `content (x, y)` line per scanned pixel.
///
/// Write errors do not interrupt the scan: the first one is kept, later
/// pixels are skipped, and `finish` reports it.
pub struct BorderLog<W: Write> {
    writer: W,
    border_only: bool,
    border: u64,
    content: u64,
    error: Option<io::Error>,
}

impl<W: Write> BorderLog<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            border_only: false,
            border: 0,
            content: 0,
            error: None,
        }
    }

    /// Only record border pixels; content pixels are still counted.
    pub fn border_only(mut self, border_only: bool) -> Self {
        self.border_only = border_only;
        self
    }

    pub fn border_count(&self) -> u64 {
        self.border
    }

    pub fn content_count(&self) -> u64 {
        self.content
    }

    /// Flush and hand back the writer, or the first write error.
    pub fn finish(mut self) -> io::Result<W> {
        if let Some(e) = self.error.take() {
            return Err(e);
        }
        self.writer.flush()?;
        Ok(self.writer)
    }
}

impl<W: Write> ScanObserver for BorderLog<W> {
    fn observe(&mut self, x: u32, y: u32, class: PixelClass) {
        match class {
            PixelClass::Border => self.border += 1,
            PixelClass::Content => self.content += 1,
        }

        if self.error.is_some() || (self.border_only && class.is_content()) {
            return;
        }

        if let Err(e) = writeln!(self.writer, "{class} ({x}, {y})") {
            self.error = Some(e);
        }
    }
}
