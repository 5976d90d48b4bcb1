//! CUPS printing via `lpr`.
//!
//! Finished pages are spooled as PNG files and submitted together as one
//! job, so the copy count applies to the whole batch and page order is
//! preserved. The spool directory is removed on every exit path.

use std::path::PathBuf;
use std::process::Command;

use image::DynamicImage;
use layout_engine::Rect;
use tracing::{debug, info};

use crate::page::PageCanvas;
use crate::sink::{PageSink, PageSpec};
use crate::{Result, SinkError};

/// Spools finished pages and submits them to a CUPS printer with `lpr`.
#[derive(Debug)]
pub struct CupsSink {
    printer: String,
    spool_dir: PathBuf,
    pages: Vec<PathBuf>,
    spec: Option<PageSpec>,
    dirty: bool,
}

impl CupsSink {
    pub fn new(printer: impl Into<String>) -> Self {
        Self {
            printer: printer.into(),
            spool_dir: std::env::temp_dir().join("printdesk-spool"),
            pages: Vec::new(),
            spec: None,
            dirty: false,
        }
    }

    /// Use a custom spool directory.
    pub fn with_spool_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.spool_dir = dir.into();
        self
    }

    fn flush_page(&mut self, page: &PageCanvas) -> Result<()> {
        let path = self
            .spool_dir
            .join(format!("page_{:03}.png", self.pages.len() + 1));
        let rgb = DynamicImage::ImageRgba8(page.image().clone()).to_rgb8();
        rgb.save(&path)?;
        debug!(path = %path.display(), "Spooled page");
        self.pages.push(path);
        self.dirty = false;
        Ok(())
    }

    fn submit(&mut self, spec: &PageSpec, page: &PageCanvas) -> Result<()> {
        if self.dirty {
            self.flush_page(page)?;
        }
        if self.pages.is_empty() {
            info!("No pages drawn, nothing to print");
            return Ok(());
        }

        let args = lpr_args(&self.printer, spec, &self.pages);
        debug!(?args, "Submitting lpr job");
        let output = Command::new("lpr")
            .args(&args)
            .output()
            .map_err(|source| SinkError::CommandLaunch {
                command: "lpr".to_string(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(SinkError::CommandFailed {
                command: "lpr".to_string(),
                stderr,
            });
        }

        info!(
            printer = %self.printer,
            pages = self.pages.len(),
            copies = spec.copies,
            "Print job submitted"
        );
        Ok(())
    }

    fn cleanup(&mut self) {
        for path in self.pages.drain(..) {
            let _ = std::fs::remove_file(path);
        }
        let _ = std::fs::remove_dir(&self.spool_dir);
    }
}

impl PageSink for CupsSink {
    fn begin(&mut self, spec: &PageSpec) -> Result<PageCanvas> {
        std::fs::create_dir_all(&self.spool_dir)?;
        self.pages.clear();
        self.dirty = false;
        self.spec = Some(*spec);

        let size = spec.canvas_size();
        info!(
            printer = %self.printer,
            page = %size,
            copies = spec.copies,
            "Print job started"
        );
        Ok(PageCanvas::new(size))
    }

    fn draw(&mut self, page: &mut PageCanvas, content: &DynamicImage, dest: Rect) -> Result<()> {
        page.draw(content, dest);
        self.dirty = true;
        Ok(())
    }

    fn page_break(&mut self, page: &mut PageCanvas) -> Result<()> {
        self.flush_page(page)?;
        page.clear();
        Ok(())
    }

    fn end(&mut self, page: PageCanvas) -> Result<()> {
        let spec = self.spec.take().ok_or(SinkError::NotStarted)?;
        let result = self.submit(&spec, &page);
        self.cleanup();
        result
    }
}

/// Build the `lpr` argument list for one spooled job.
fn lpr_args(printer: &str, spec: &PageSpec, pages: &[PathBuf]) -> Vec<String> {
    let media = format!(
        "Custom.{:.0}x{:.0}mm",
        spec.size.width_mm, spec.size.height_mm
    );
    let mut args = vec![
        "-P".to_string(),
        printer.to_string(),
        "-#".to_string(),
        spec.copies.to_string(),
        "-o".to_string(),
        format!("media={media}"),
    ];
    if let Some(darkness) = spec.darkness {
        args.push("-o".to_string());
        args.push(format!("Darkness={darkness}"));
    }
    args.extend(pages.iter().map(|p| p.display().to_string()));
    args
}
