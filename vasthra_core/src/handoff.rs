//! # Design Handoff
//!
//! The upload screen hands its result to the viewer as one immutable
//! [`DesignRecord`] carried inside [`Route::ViewDesigns`]. There is no
//! ambient store between the screens: the record either travels with the
//! navigation or does not exist.
//!
//! ## Example
//!
//! ```rust
//! use vasthra_core::handoff::ViewerEntry;
//!
//! let json = r#"{"generated_image":"/media/gen1.png","original_sketch":"/media/orig1.png"}"#;
//! match ViewerEntry::from_json(Some(json)) {
//!     ViewerEntry::Ready(record) => assert_eq!(record.generated_image(), "/media/gen1.png"),
//!     ViewerEntry::Missing => unreachable!(),
//! }
//! ```

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::errors::{VasthraError, VasthraResult};

/// The pair of server-relative image paths produced by one generation.
///
/// Fields are private so both paths are always set in the same construction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DesignRecord {
    generated_image: String,
    original_sketch: String,
}

impl DesignRecord {
    pub fn new(generated_image: impl Into<String>, original_sketch: impl Into<String>) -> Self {
        DesignRecord {
            generated_image: generated_image.into(),
            original_sketch: original_sketch.into(),
        }
    }

    pub fn generated_image(&self) -> &str {
        &self.generated_image
    }

    pub fn original_sketch(&self) -> &str {
        &self.original_sketch
    }

    /// Serialize to the JSON record form
    pub fn to_json(&self) -> VasthraResult<String> {
        serde_json::to_string(self).map_err(|e| VasthraError::serialization(e.to_string()))
    }

    /// Parse from the JSON record form
    pub fn from_json(json: &str) -> VasthraResult<Self> {
        serde_json::from_str(json).map_err(|e| VasthraError::serialization(e.to_string()))
    }
}

/// Result of checking the viewer's entry precondition
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEntry {
    /// A complete record is available
    Ready(DesignRecord),
    /// No record, or one that could not be read
    Missing,
}

impl ViewerEntry {
    /// Check a serialized record. Absent and unparseable input are both
    /// treated as an expired handoff, not as errors.
    pub fn from_json(stored: Option<&str>) -> Self {
        let Some(json) = stored else {
            return ViewerEntry::Missing;
        };

        match DesignRecord::from_json(json) {
            Ok(record) => ViewerEntry::Ready(record),
            Err(e) => {
                warn!(error = %e, "Discarding unreadable design record");
                ViewerEntry::Missing
            }
        }
    }
}

/// The two screens of the application
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// Sketch upload screen
    Upload,
    /// Result viewer, carrying the record it displays
    ViewDesigns(DesignRecord),
}

impl Route {
    /// Path-style name of the route, for logs
    pub fn name(&self) -> &'static str {
        match self {
            Route::Upload => "/",
            Route::ViewDesigns(_) => "/view-designs",
        }
    }
}
