//! Print job model.
//!
//! A job is an immutable spec (images, page geometry, copies) plus the
//! state machine and report types the sequencer drives it through.

use std::path::PathBuf;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use layout_engine::{FitPolicy, LayoutError, Margins, PhysicalSize, RatioSpec, Resolution};

/// How each image becomes page content.
#[derive(Debug, Clone, Copy)]
pub enum RenderMode {
    /// Scale the image into the margin-bounded page area with the given policy.
    Page(FitPolicy),
    /// Pad the image to an aspect target first, then place the padded canvas
    /// contain-centered in the page area.
    Padded(RatioSpec),
}

/// Everything a print job needs, fixed before the first page renders.
#[derive(Debug, Clone)]
pub struct PrintJobSpec {
    pub images: Vec<PathBuf>,
    pub copies: u32,
    pub size: PhysicalSize,
    pub margins: Margins,
    pub resolution: Resolution,
    pub mode: RenderMode,
    pub darkness: Option<u8>,
}

impl PrintJobSpec {
    /// Reject impossible jobs before any sink resource is acquired.
    pub fn validate(&self) -> Result<(), JobError> {
        if self.images.is_empty() {
            return Err(JobError::NoImages);
        }
        if self.copies == 0 {
            return Err(JobError::ZeroCopies);
        }
        self.size.validate()?;
        self.margins.validate()?;
        self.resolution.validate()?;
        Ok(())
    }
}

/// Lifecycle of a job. `Completed`, `Cancelled` and `Failed` are terminal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum JobState {
    Idle,
    Validating,
    Rendering { current: usize },
    Finalizing,
    Completed,
    Cancelled,
    Failed(String),
}

/// Cooperative cancellation flag. The sequencer checks it at image
/// boundaries only, so a page in flight always finishes.
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.flag.store(true, Ordering::Relaxed);
    }

    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::Relaxed)
    }
}

/// What happened to one source image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageOutcome {
    Printed,
    Skipped { reason: String },
}

/// Per-image entry in the job report.
#[derive(Debug, Clone)]
pub struct PageReport {
    pub image: PathBuf,
    pub outcome: PageOutcome,
}

/// Summary of a finished job, one entry per image that was reached.
#[derive(Debug, Clone)]
pub struct JobReport {
    pub state: JobState,
    pub pages: Vec<PageReport>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl JobReport {
    pub fn printed_count(&self) -> usize {
        self.pages
            .iter()
            .filter(|page| page.outcome == PageOutcome::Printed)
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.pages.len() - self.printed_count()
    }

    pub fn skipped(&self) -> impl Iterator<Item = &PageReport> {
        self.pages
            .iter()
            .filter(|page| matches!(page.outcome, PageOutcome::Skipped { .. }))
    }
}

/// Errors that abort a job. Decode failures never appear here; they are
/// demoted to `PageOutcome::Skipped` entries in the report.
#[derive(Debug, thiserror::Error)]
pub enum JobError {
    #[error("No images to print")]
    NoImages,

    #[error("Copies must be at least 1")]
    ZeroCopies,

    #[error(transparent)]
    Layout(#[from] LayoutError),

    #[error(transparent)]
    Sink(#[from] print_sink::SinkError),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn job(images: Vec<PathBuf>) -> PrintJobSpec {
        PrintJobSpec {
            images,
            copies: 1,
            size: PhysicalSize::new(105.0, 55.0),
            margins: Margins::default(),
            resolution: Resolution::new(300.0),
            mode: RenderMode::Page(FitPolicy::ContainCentered),
            darkness: None,
        }
    }

    #[test]
    fn test_validate_accepts_basic_job() {
        assert!(job(vec![PathBuf::from("a.png")]).validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_empty_image_list() {
        let err = job(vec![]).validate().unwrap_err();
        assert!(matches!(err, JobError::NoImages));
    }

    #[test]
    fn test_validate_rejects_zero_copies() {
        let mut spec = job(vec![PathBuf::from("a.png")]);
        spec.copies = 0;
        assert!(matches!(spec.validate().unwrap_err(), JobError::ZeroCopies));
    }

    #[test]
    fn test_validate_rejects_bad_page_size() {
        let mut spec = job(vec![PathBuf::from("a.png")]);
        spec.size = PhysicalSize::new(0.0, 55.0);
        assert!(matches!(spec.validate().unwrap_err(), JobError::Layout(_)));
    }

    #[test]
    fn test_validate_rejects_out_of_range_resolution() {
        let mut spec = job(vec![PathBuf::from("a.png")]);
        spec.resolution = Resolution::new(72.0);
        assert!(matches!(spec.validate().unwrap_err(), JobError::Layout(_)));
    }

    #[test]
    fn test_cancel_token_is_shared() {
        let token = CancelToken::new();
        let clone = token.clone();
        assert!(!clone.is_cancelled());
        token.cancel();
        assert!(clone.is_cancelled());
    }

    #[test]
    fn test_report_counts() {
        let report = JobReport {
            state: JobState::Completed,
            pages: vec![
                PageReport {
                    image: PathBuf::from("a.png"),
                    outcome: PageOutcome::Printed,
                },
                PageReport {
                    image: PathBuf::from("b.png"),
                    outcome: PageOutcome::Skipped {
                        reason: "decode failed".to_string(),
                    },
                },
                PageReport {
                    image: PathBuf::from("c.png"),
                    outcome: PageOutcome::Printed,
                },
            ],
            started_at: Utc::now(),
            finished_at: Utc::now(),
        };
        assert_eq!(report.printed_count(), 2);
        assert_eq!(report.skipped_count(), 1);
        assert_eq!(
            report.skipped().next().map(|p| p.image.clone()),
            Some(PathBuf::from("b.png"))
        );
    }
}
