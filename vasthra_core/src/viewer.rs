//! # Viewer
//!
//! State behind the results screen. A [`Viewer`] only exists once
//! [`Viewer::enter`] has accepted a complete [`DesignRecord`]; a missing
//! record turns into a redirect to the upload screen instead.

use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::errors::VasthraResult;
use crate::handoff::{DesignRecord, Route, ViewerEntry};

/// The two images on the results screen
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageKind {
    OriginalSketch,
    GeneratedDesign,
}

impl ImageKind {
    pub const ALL: &'static [ImageKind] = &[ImageKind::OriginalSketch, ImageKind::GeneratedDesign];

    pub fn title(&self) -> &'static str {
        match self {
            ImageKind::OriginalSketch => "Original Sketch",
            ImageKind::GeneratedDesign => "Generated Design",
        }
    }

    /// Text shown until the image is available
    pub fn placeholder(&self) -> &'static str {
        match self {
            ImageKind::OriginalSketch => "Loading sketch...",
            ImageKind::GeneratedDesign => "Loading generated design...",
        }
    }
}

/// Load state of one image
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ImageSlot {
    #[default]
    Loading,
    Loaded(Vec<u8>),
    /// The fetch failed; the placeholder stays up
    Failed,
}

#[derive(Debug, Clone)]
pub struct Viewer {
    record: DesignRecord,
    original: ImageSlot,
    generated: ImageSlot,
}

impl Viewer {
    /// Guarded entry. `Missing` redirects to [`Route::Upload`].
    pub fn enter(entry: ViewerEntry) -> Result<Viewer, Route> {
        match entry {
            ViewerEntry::Ready(record) => {
                info!(
                    generated = record.generated_image(),
                    original = record.original_sketch(),
                    "Viewing design"
                );
                Ok(Viewer {
                    record,
                    original: ImageSlot::Loading,
                    generated: ImageSlot::Loading,
                })
            }
            ViewerEntry::Missing => {
                info!("No design to view, returning to upload");
                Err(Route::Upload)
            }
        }
    }

    pub fn record(&self) -> &DesignRecord {
        &self.record
    }

    /// Server-relative path of an image
    pub fn path(&self, kind: ImageKind) -> &str {
        match kind {
            ImageKind::OriginalSketch => self.record.original_sketch(),
            ImageKind::GeneratedDesign => self.record.generated_image(),
        }
    }

    /// Absolute address of an image on the service
    pub fn image_url(&self, kind: ImageKind, config: &ServiceConfig) -> String {
        config.resolve_url(self.path(kind))
    }

    /// Images that still need fetching. Empty paths are never requested.
    pub fn pending_fetches(&self) -> Vec<(ImageKind, String)> {
        ImageKind::ALL
            .iter()
            .filter(|kind| self.slot(**kind) == &ImageSlot::Loading)
            .filter(|kind| !self.path(**kind).is_empty())
            .map(|kind| (*kind, self.path(*kind).to_string()))
            .collect()
    }

    pub fn slot(&self, kind: ImageKind) -> &ImageSlot {
        match kind {
            ImageKind::OriginalSketch => &self.original,
            ImageKind::GeneratedDesign => &self.generated,
        }
    }

    /// Bytes of an image, once loaded
    pub fn image(&self, kind: ImageKind) -> Option<&[u8]> {
        match self.slot(kind) {
            ImageSlot::Loaded(bytes) => Some(bytes),
            _ => None,
        }
    }

    /// Store the result of fetching `path`. Failures are logged only.
    ///
    /// Returns whether the result was applied. A result for a path this
    /// viewer does not show, or for a slot that is no longer loading, is
    /// stale and dropped.
    pub fn set_image(&mut self, kind: ImageKind, path: &str, result: VasthraResult<Vec<u8>>) -> bool {
        if self.path(kind) != path || self.slot(kind) != &ImageSlot::Loading {
            info!(image = kind.title(), path, "Dropping stale image fetch");
            return false;
        }

        let slot = match result {
            Ok(bytes) => ImageSlot::Loaded(bytes),
            Err(e) => {
                warn!(image = kind.title(), error = %e, "Image fetch failed");
                ImageSlot::Failed
            }
        };

        match kind {
            ImageKind::OriginalSketch => self.original = slot,
            ImageKind::GeneratedDesign => self.generated = slot,
        }
        true
    }

    /// Download is offered once the generated path is known
    pub fn can_download(&self) -> bool {
        !self.record.generated_image().is_empty()
    }

    /// Path to re-fetch for a download, if download is enabled
    pub fn download_path(&self) -> Option<&str> {
        self.can_download().then(|| self.record.generated_image())
    }

    /// Back to the upload screen. Nothing is cleaned up.
    pub fn new_design(&self) -> Route {
        Route::Upload
    }
}
