//! In-memory sink for dry runs and tests.

use image::{DynamicImage, RgbaImage};
use layout_engine::Rect;
use tracing::{debug, info};

use crate::Result;
use crate::page::PageCanvas;
use crate::sink::{PageSink, PageSpec};

/// Collects finished pages instead of printing them.
///
/// A trailing page that never received content is dropped at `end`, so a
/// job whose final images were all skipped does not emit a blank page.
#[derive(Debug, Default)]
pub struct MemorySink {
    spec: Option<PageSpec>,
    pages: Vec<RgbaImage>,
    dirty: bool,
    finished: bool,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Finished pages, in order.
    pub fn pages(&self) -> &[RgbaImage] {
        &self.pages
    }

    pub fn spec(&self) -> Option<&PageSpec> {
        self.spec.as_ref()
    }

    /// True once `end` has run.
    pub fn finished(&self) -> bool {
        self.finished
    }
}

impl PageSink for MemorySink {
    fn begin(&mut self, spec: &PageSpec) -> Result<PageCanvas> {
        self.spec = Some(*spec);
        self.pages.clear();
        self.dirty = false;
        self.finished = false;
        debug!(page = %spec.canvas_size(), copies = spec.copies, "Dry-run job started");
        Ok(PageCanvas::new(spec.canvas_size()))
    }

    fn draw(&mut self, page: &mut PageCanvas, content: &DynamicImage, dest: Rect) -> Result<()> {
        page.draw(content, dest);
        self.dirty = true;
        Ok(())
    }

    fn page_break(&mut self, page: &mut PageCanvas) -> Result<()> {
        self.pages.push(page.image().clone());
        page.clear();
        self.dirty = false;
        Ok(())
    }

    fn end(&mut self, page: PageCanvas) -> Result<()> {
        if self.dirty {
            self.pages.push(page.into_image());
            self.dirty = false;
        }
        self.finished = true;
        info!(pages = self.pages.len(), "Dry-run job finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use layout_engine::{PhysicalSize, Resolution};

    fn test_spec() -> PageSpec {
        PageSpec::new(PhysicalSize::new(100.0, 50.0), Resolution::new(254.0))
    }

    fn solid_image(width: u32, height: u32) -> DynamicImage {
        DynamicImage::ImageRgba8(RgbaImage::from_pixel(width, height, Rgba([0, 0, 0, 255])))
    }

    #[test]
    fn test_collects_pages_in_order() {
        let mut sink = MemorySink::new();
        let mut page = sink.begin(&test_spec()).unwrap();

        sink.draw(&mut page, &solid_image(10, 10), Rect::new(0, 0, 10, 10))
            .unwrap();
        sink.page_break(&mut page).unwrap();
        sink.draw(&mut page, &solid_image(10, 10), Rect::new(20, 0, 10, 10))
            .unwrap();
        sink.end(page).unwrap();

        assert!(sink.finished());
        assert_eq!(sink.pages().len(), 2);
        // First page drew at x=0, second at x=20.
        assert_eq!(sink.pages()[0].get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
        assert_eq!(sink.pages()[1].get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
        assert_eq!(sink.pages()[1].get_pixel(20, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_untouched_final_page_is_dropped() {
        let mut sink = MemorySink::new();
        let page = sink.begin(&test_spec()).unwrap();
        sink.end(page).unwrap();

        assert!(sink.finished());
        assert!(sink.pages().is_empty());
    }

    #[test]
    fn test_page_break_resets_page() {
        let mut sink = MemorySink::new();
        let mut page = sink.begin(&test_spec()).unwrap();

        sink.draw(&mut page, &solid_image(10, 10), Rect::new(0, 0, 10, 10))
            .unwrap();
        sink.page_break(&mut page).unwrap();

        assert_eq!(page.image().get_pixel(0, 0), &Rgba([255, 255, 255, 255]));
    }
}
