//! # Uploader
//!
//! State behind the upload screen: the selected sketch, the inline error and
//! the busy flag. Network work happens outside; this type only decides what
//! to send and what a generation result means for the screen.
//!
//! ```text
//! select ──▶ [selected] ──begin_generate──▶ [busy] ──finish_generate──▶ Route::ViewDesigns
//!                 ▲                            │
//!                 └──────── error shown ◀──────┘ (failure clears busy)
//! ```

use tracing::{info, warn};

use crate::errors::{VasthraResult, INVALID_TYPE_MESSAGE, NO_FILE_MESSAGE};
use crate::generation::GenerationOutcome;
use crate::handoff::Route;
use crate::sketch::SketchFile;

/// Button label while idle
pub const GENERATE_LABEL: &str = "Generate Design";
/// Button label while a request is in flight
pub const PROCESSING_LABEL: &str = "Processing...";

#[derive(Debug, Clone, Default)]
pub struct Uploader {
    selected: Option<SketchFile>,
    error: Option<String>,
    busy: bool,
}

impl Uploader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selected(&self) -> Option<&SketchFile> {
        self.selected.as_ref()
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn is_busy(&self) -> bool {
        self.busy
    }

    /// Reset and Generate are both disabled while busy
    pub fn controls_enabled(&self) -> bool {
        !self.busy
    }

    pub fn generate_label(&self) -> &'static str {
        if self.busy {
            PROCESSING_LABEL
        } else {
            GENERATE_LABEL
        }
    }

    /// Offer a dropped or picked file. `None` means the file could not be read.
    ///
    /// Returns whether the candidate was accepted. A rejected candidate also
    /// clears any earlier valid selection. Ignored while busy, so the file
    /// being uploaded stays selected.
    pub fn select(&mut self, candidate: Option<SketchFile>) -> bool {
        if self.busy {
            warn!("Ignoring sketch selection while a generation is in flight");
            return false;
        }

        match candidate.map(|file| file.media_type().map(|_| file)) {
            Some(Ok(file)) => {
                info!(file = %file.name, "Sketch selected");
                self.selected = Some(file);
                self.error = None;
                true
            }
            Some(Err(e)) => {
                warn!(error = %e, "Sketch rejected");
                self.reject();
                false
            }
            None => {
                self.reject();
                false
            }
        }
    }

    /// Record a candidate that could not be read or typed
    pub fn reject(&mut self) {
        self.selected = None;
        self.error = Some(INVALID_TYPE_MESSAGE.to_string());
    }

    /// Clear selection and error. Ignored while busy.
    pub fn reset(&mut self) {
        if self.busy {
            return;
        }
        self.selected = None;
        self.error = None;
    }

    /// Start a generation. Yields the file to upload, or `None` when nothing
    /// should be sent: already busy, or no file selected (which sets the
    /// local error without any request).
    pub fn begin_generate(&mut self) -> Option<SketchFile> {
        if self.busy {
            return None;
        }

        let Some(file) = self.selected.clone() else {
            self.error = Some(NO_FILE_MESSAGE.to_string());
            return None;
        };

        self.busy = true;
        self.error = None;
        Some(file)
    }

    /// Apply the result of the request started by [`begin_generate`].
    ///
    /// Success yields the navigation to the viewer and leaves busy set, the
    /// screen is replaced next. Failure shows its message and clears busy.
    /// Results that arrive while not busy are dropped.
    ///
    /// [`begin_generate`]: Uploader::begin_generate
    pub fn finish_generate(&mut self, result: VasthraResult<GenerationOutcome>) -> Option<Route> {
        if !self.busy {
            warn!("Ignoring generation result with no request in flight");
            return None;
        }

        match result.and_then(GenerationOutcome::into_record) {
            Ok(record) => Some(Route::ViewDesigns(record)),
            Err(e) => {
                self.error = Some(e.user_message());
                self.busy = false;
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{VasthraError, GENERATION_FAILED_MESSAGE, SERVER_ERROR_MESSAGE};
    use crate::handoff::DesignRecord;

    fn png() -> SketchFile {
        SketchFile::new("peacock.png", "image/png", vec![1, 2, 3])
    }

    fn jpeg() -> SketchFile {
        SketchFile::new("lotus.jpg", "image/jpeg", vec![4, 5, 6])
    }

    fn busy_uploader() -> Uploader {
        let mut uploader = Uploader::new();
        uploader.select(Some(png()));
        uploader.begin_generate().unwrap();
        uploader
    }

    #[test]
    fn test_accepts_png_and_jpeg() {
        let mut uploader = Uploader::new();
        assert!(uploader.select(Some(png())));
        assert_eq!(uploader.selected(), Some(&png()));
        assert!(uploader.select(Some(jpeg())));
        assert_eq!(uploader.selected(), Some(&jpeg()));
        assert_eq!(uploader.error(), None);
    }

    #[test]
    fn test_rejected_type_clears_prior_selection() {
        for declared in ["image/gif", "image/webp", "application/pdf", "image/jpg", ""] {
            let mut uploader = Uploader::new();
            uploader.select(Some(png()));

            let accepted = uploader.select(Some(SketchFile::new("x", declared, vec![])));

            assert!(!accepted, "{declared} should be rejected");
            assert_eq!(uploader.selected(), None);
            assert_eq!(uploader.error(), Some(INVALID_TYPE_MESSAGE));
        }
    }

    #[test]
    fn test_unreadable_candidate_is_rejected() {
        let mut uploader = Uploader::new();
        uploader.select(Some(png()));
        assert!(!uploader.select(None));
        assert_eq!(uploader.selected(), None);
        assert_eq!(uploader.error(), Some(INVALID_TYPE_MESSAGE));
    }

    #[test]
    fn test_valid_selection_clears_error() {
        let mut uploader = Uploader::new();
        uploader.select(Some(SketchFile::new("a.gif", "image/gif", vec![])));
        assert!(uploader.error().is_some());

        uploader.select(Some(png()));
        assert_eq!(uploader.error(), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut uploader = Uploader::new();
        uploader.select(Some(SketchFile::new("a.gif", "image/gif", vec![])));
        uploader.reset();
        assert_eq!(uploader.selected(), None);
        assert_eq!(uploader.error(), None);

        uploader.select(Some(png()));
        uploader.reset();
        assert_eq!(uploader.selected(), None);
    }

    #[test]
    fn test_generate_without_file_sends_nothing() {
        let mut uploader = Uploader::new();
        assert_eq!(uploader.begin_generate(), None);
        assert_eq!(uploader.error(), Some(NO_FILE_MESSAGE));
        assert!(!uploader.is_busy());
    }

    #[test]
    fn test_generate_enters_busy_and_clears_error() {
        let mut uploader = Uploader::new();
        uploader.begin_generate();
        uploader.select(Some(png()));
        uploader.error = Some("stale".to_string());

        assert_eq!(uploader.begin_generate(), Some(png()));
        assert!(uploader.is_busy());
        assert!(!uploader.controls_enabled());
        assert_eq!(uploader.error(), None);
        assert_eq!(uploader.generate_label(), PROCESSING_LABEL);
    }

    #[test]
    fn test_busy_blocks_duplicate_submit_and_reset() {
        let mut uploader = busy_uploader();

        assert_eq!(uploader.begin_generate(), None);
        uploader.reset();
        assert_eq!(uploader.selected(), Some(&png()));
    }

    #[test]
    fn test_busy_ignores_new_selection() {
        let mut uploader = busy_uploader();

        assert!(!uploader.select(Some(jpeg())));
        assert!(!uploader.select(Some(SketchFile::new("a.gif", "image/gif", vec![]))));
        assert!(!uploader.select(None));

        assert_eq!(uploader.selected(), Some(&png()));
        assert_eq!(uploader.error(), None);
        assert!(uploader.is_busy());
    }

    #[test]
    fn test_success_navigates_once_with_both_paths() {
        let mut uploader = busy_uploader();
        let record = DesignRecord::new("/media/gen1.png", "/media/orig1.png");

        let route = uploader.finish_generate(Ok(GenerationOutcome::Generated(record.clone())));
        assert_eq!(route, Some(Route::ViewDesigns(record.clone())));

        // A duplicate completion cannot navigate again once the flow is done
        uploader.busy = false;
        assert_eq!(uploader.finish_generate(Ok(GenerationOutcome::Generated(record))), None);
    }

    #[test]
    fn test_rejection_shows_detail_or_fallback() {
        let mut uploader = busy_uploader();
        let route = uploader.finish_generate(Ok(GenerationOutcome::Rejected {
            detail: Some("Sketch too small".to_string()),
        }));
        assert_eq!(route, None);
        assert_eq!(uploader.error(), Some("Sketch too small"));
        assert!(!uploader.is_busy());

        let mut uploader = busy_uploader();
        let route = uploader.finish_generate(Ok(GenerationOutcome::Rejected { detail: None }));
        assert_eq!(route, None);
        assert_eq!(uploader.error(), Some(GENERATION_FAILED_MESSAGE));
    }

    #[test]
    fn test_server_error_clears_busy() {
        let mut uploader = busy_uploader();
        let route = uploader.finish_generate(Err(VasthraError::HttpStatus {
            url: "http://localhost:8000/generate/".to_string(),
            status: 502,
        }));

        assert_eq!(route, None);
        assert_eq!(uploader.error(), Some(SERVER_ERROR_MESSAGE));
        assert!(uploader.controls_enabled());
        assert_eq!(uploader.generate_label(), GENERATE_LABEL);
        // The selection survives so the user can retry
        assert_eq!(uploader.selected(), Some(&png()));
    }
}
