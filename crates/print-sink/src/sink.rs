//! The page sink boundary.

use image::DynamicImage;
use layout_engine::{PhysicalSize, Rect, Resolution, Size};

use crate::Result;
use crate::page::PageCanvas;

/// Job-level page configuration, fixed before the first page begins.
#[derive(Debug, Clone, Copy)]
pub struct PageSpec {
    /// Physical paper size in millimeters.
    pub size: PhysicalSize,
    pub resolution: Resolution,
    /// Collated sets the printer produces; never a render loop.
    pub copies: u32,
    /// Opaque darkness value passed through to drivers that accept one.
    pub darkness: Option<u8>,
}

impl PageSpec {
    pub fn new(size: PhysicalSize, resolution: Resolution) -> Self {
        Self {
            size,
            resolution,
            copies: 1,
            darkness: None,
        }
    }

    pub fn with_copies(mut self, copies: u32) -> Self {
        self.copies = copies;
        self
    }

    pub fn with_darkness(mut self, darkness: u8) -> Self {
        self.darkness = Some(darkness);
        self
    }

    /// Page raster size in pixels.
    pub fn canvas_size(&self) -> Size {
        self.size.to_px(self.resolution)
    }
}

/// A destination for rendered pages.
///
/// Lifecycle: one [`begin`](PageSink::begin), then any number of
/// [`draw`](PageSink::draw) and [`page_break`](PageSink::page_break) calls,
/// then exactly one [`end`](PageSink::end). `end` consumes the final page
/// and must release the sink's resources on every path, including after a
/// mid-job failure.
pub trait PageSink {
    /// Start a job, returning the first blank page.
    fn begin(&mut self, spec: &PageSpec) -> Result<PageCanvas>;

    /// Draw content into the current page at `dest`.
    fn draw(&mut self, page: &mut PageCanvas, content: &DynamicImage, dest: Rect) -> Result<()>;

    /// Finish the current page and reset it to a fresh blank one.
    fn page_break(&mut self, page: &mut PageCanvas) -> Result<()>;

    /// Finish the final page and submit or release the job.
    fn end(&mut self, page: PageCanvas) -> Result<()>;
}
