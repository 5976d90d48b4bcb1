//! Job sequencer.
//!
//! Drives one job start to finish: validate, render each image onto its
//! own page, finalize the sink. An image that fails to decode is skipped
//! and reported; the job keeps going. Sink failures abort the job, but
//! the sink is still released before the error surfaces.

use chrono::Utc;
use image::DynamicImage;
use layout_engine::{FitPolicy, LayoutError, Size, pad_image, plan_page};
use print_sink::{PageCanvas, PageSink, PageSpec};
use tracing::{debug, error, info, warn};

use crate::job::{
    CancelToken, JobError, JobReport, JobState, PageOutcome, PageReport, PrintJobSpec, RenderMode,
};

/// Run a print job against a sink.
///
/// `Ok` carries the report for completed and cancelled jobs. Validation
/// and sink errors come back as `Err` after the sink has been released.
pub fn run_job(
    spec: &PrintJobSpec,
    sink: &mut dyn PageSink,
    cancel: &CancelToken,
) -> Result<JobReport, JobError> {
    let started_at = Utc::now();
    let mut state = JobState::Idle;
    let mut pages = Vec::new();

    transition(&mut state, JobState::Validating);
    if let Err(e) = spec.validate() {
        transition(&mut state, JobState::Failed(e.to_string()));
        error!(error = %e, "Print job rejected");
        return Err(e);
    }

    let mut page_spec = PageSpec::new(spec.size, spec.resolution).with_copies(spec.copies);
    if let Some(darkness) = spec.darkness {
        page_spec = page_spec.with_darkness(darkness);
    }

    let mut page = match sink.begin(&page_spec) {
        Ok(page) => page,
        Err(e) => {
            transition(&mut state, JobState::Failed(e.to_string()));
            error!(error = %e, "Print job failed before the first page");
            return Err(e.into());
        }
    };

    let render_result = render_images(spec, sink, &mut page, cancel, &mut state, &mut pages);

    transition(&mut state, JobState::Finalizing);
    let end_result = sink.end(page);

    match (render_result, end_result) {
        (Ok(cancelled), Ok(())) => {
            let final_state = if cancelled { JobState::Cancelled } else { JobState::Completed };
            transition(&mut state, final_state.clone());
            let report = JobReport {
                state: final_state,
                pages,
                started_at,
                finished_at: Utc::now(),
            };
            info!(
                printed = report.printed_count(),
                skipped = report.skipped_count(),
                state = ?report.state,
                "Print job finished"
            );
            Ok(report)
        }
        (Err(e), end_result) => {
            if let Err(end_err) = end_result {
                warn!(error = %end_err, "Sink release also failed");
            }
            transition(&mut state, JobState::Failed(e.to_string()));
            error!(error = %e, "Print job failed");
            Err(e)
        }
        (Ok(_), Err(end_err)) => {
            transition(&mut state, JobState::Failed(end_err.to_string()));
            error!(error = %end_err, "Print job failed during finalization");
            Err(end_err.into())
        }
    }
}

/// Render every image in order. Returns `Ok(true)` when the job was
/// cancelled at an image boundary, `Ok(false)` when it ran to the end.
fn render_images(
    spec: &PrintJobSpec,
    sink: &mut dyn PageSink,
    page: &mut PageCanvas,
    cancel: &CancelToken,
    state: &mut JobState,
    pages: &mut Vec<PageReport>,
) -> Result<bool, JobError> {
    let mut rendered = 0usize;

    for (index, path) in spec.images.iter().enumerate() {
        if cancel.is_cancelled() {
            info!(
                completed = rendered,
                remaining = spec.images.len() - index,
                "Print job cancelled at image boundary"
            );
            return Ok(true);
        }

        transition(state, JobState::Rendering { current: index });

        let img = match image::open(path) {
            Ok(img) => img,
            Err(source) => {
                let err = LayoutError::Decode { path: path.clone(), source };
                warn!(image = %path.display(), error = %err, "Skipping undecodable image");
                pages.push(PageReport {
                    image: path.clone(),
                    outcome: PageOutcome::Skipped { reason: err.to_string() },
                });
                continue;
            }
        };

        // Break only once a page actually holds content, so skipped
        // images never leave a blank page behind.
        if rendered > 0 {
            sink.page_break(page)?;
        }
        render_one(spec, sink, page, &img)?;
        pages.push(PageReport { image: path.clone(), outcome: PageOutcome::Printed });
        rendered += 1;
        debug!(image = %path.display(), page = rendered, "Rendered page");
    }

    Ok(false)
}

fn render_one(
    spec: &PrintJobSpec,
    sink: &mut dyn PageSink,
    page: &mut PageCanvas,
    img: &DynamicImage,
) -> Result<(), JobError> {
    let source = Size::new(img.width(), img.height());

    match spec.mode {
        RenderMode::Page(policy) => {
            let placement = plan_page(source, spec.size, spec.margins, spec.resolution, policy)?;
            if policy == FitPolicy::ContainCentered {
                page.fill_white(placement.fill_rect());
            }
            sink.draw(page, img, placement.content_rect())?;
        }
        RenderMode::Padded(target) => {
            let (canvas, plan) = pad_image(img, &target)?;
            let padded = DynamicImage::ImageRgba8(canvas);
            let placement = plan_page(
                plan.canvas,
                spec.size,
                spec.margins,
                spec.resolution,
                FitPolicy::ContainCentered,
            )?;
            page.fill_white(placement.fill_rect());
            sink.draw(page, &padded, placement.content_rect())?;
        }
    }

    Ok(())
}

fn transition(state: &mut JobState, next: JobState) {
    debug!(from = ?state, to = ?next, "Job state");
    *state = next;
}
