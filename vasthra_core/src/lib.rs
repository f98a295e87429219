//! # vasthra_core - Sketch-to-Design Client Library
//!
//! `vasthra_core` holds everything behind the VasthraAI Studio screens: which
//! sketches may be uploaded, how the generation service is called, how its
//! answer moves from the upload screen to the viewer, and how a design is
//! saved locally. The GUI and CLI are thin shells over these types.
//!
//! ## Flow
//!
//! ```text
//! SketchFile ─▶ Uploader ─▶ GenerationClient::generate ─▶ Route::ViewDesigns(DesignRecord)
//!                                                                  │
//!                               save_design ◀─ fetch_image ◀─ Viewer::enter
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use vasthra_core::generation::{interpret_response, GenerationOutcome};
//! use vasthra_core::handoff::{Route, ViewerEntry};
//! use vasthra_core::viewer::{ImageKind, Viewer};
//! use vasthra_core::ServiceConfig;
//!
//! let body = r#"{"success": true, "generated_image": "/media/gen1.png", "original_sketch": "/media/orig1.png"}"#;
//! let GenerationOutcome::Generated(record) = interpret_response(body).unwrap() else {
//!     panic!("expected a design");
//! };
//!
//! let viewer = Viewer::enter(ViewerEntry::Ready(record)).unwrap();
//! let config = ServiceConfig::default();
//! assert_eq!(
//!     viewer.image_url(ImageKind::GeneratedDesign, &config),
//!     "http://localhost:8000/media/gen1.png"
//! );
//! assert_eq!(Viewer::enter(ViewerEntry::Missing).unwrap_err(), Route::Upload);
//! ```
//!
//! ## Modules
//!
//! - [`sketch`] - Candidate files and accepted media types
//! - [`uploader`] - Upload screen state
//! - [`generation`] - HTTP client for the generation service
//! - [`handoff`] - The design record and screen routes
//! - [`viewer`] - Results screen state
//! - [`download`] - Atomic saving of downloaded designs
//! - [`config`] - Service address and download settings
//! - [`errors`] - Structured error types
//! - [`logging`] - Subscriber setup for the binaries

pub mod config;
pub mod download;
pub mod errors;
pub mod generation;
pub mod handoff;
pub mod logging;
pub mod sketch;
pub mod uploader;
pub mod viewer;

// Re-export commonly used types at crate root for convenience
pub use config::ServiceConfig;
pub use errors::{VasthraError, VasthraResult};
pub use generation::{GenerationClient, GenerationOutcome};
pub use handoff::{DesignRecord, Route, ViewerEntry};
pub use sketch::{MediaType, SketchFile};
pub use uploader::Uploader;
pub use viewer::{ImageKind, Viewer};
