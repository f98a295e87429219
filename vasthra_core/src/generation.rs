//! Client for the remote generation service.
//!
//! Two calls: a multipart upload of the sketch to the fixed generate
//! endpoint, and plain GETs of the server-relative image paths it returns.
//! Neither call sets a timeout; generation on the service can be slow.

use reqwest::multipart::{Form, Part};
use serde::Deserialize;
use tracing::{info, warn};

use crate::config::ServiceConfig;
use crate::errors::{VasthraError, VasthraResult};
use crate::handoff::DesignRecord;
use crate::sketch::SketchFile;

/// Current application version (from Cargo.toml)
pub const CURRENT_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Multipart field the service reads the sketch from
const FILE_FIELD: &str = "file";

/// What the service said about one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationOutcome {
    /// The design was produced; both paths are present
    Generated(DesignRecord),
    /// The service answered but flagged failure
    Rejected { detail: Option<String> },
}

impl GenerationOutcome {
    /// Fold a rejection into an error, keeping the server detail
    pub fn into_record(self) -> VasthraResult<DesignRecord> {
        match self {
            GenerationOutcome::Generated(record) => Ok(record),
            GenerationOutcome::Rejected { detail } => Err(VasthraError::GenerationRejected { detail }),
        }
    }
}

#[derive(Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    success: bool,
    generated_image: Option<String>,
    original_sketch: Option<String>,
    detail: Option<String>,
}

/// Decode a generate response body.
///
/// A missing `success` flag counts as failure. A success flag without both
/// image paths is a malformed response, never a half-filled record.
pub fn interpret_response(body: &str) -> VasthraResult<GenerationOutcome> {
    let response: GenerateResponse = serde_json::from_str(body)
        .map_err(|e| VasthraError::malformed(format!("Failed to parse response: {e}")))?;

    if !response.success {
        return Ok(GenerationOutcome::Rejected {
            detail: response.detail,
        });
    }

    match (response.generated_image, response.original_sketch) {
        (Some(generated), Some(original)) => {
            Ok(GenerationOutcome::Generated(DesignRecord::new(generated, original)))
        }
        _ => Err(VasthraError::malformed(
            "success response without generated_image and original_sketch",
        )),
    }
}

/// HTTP client bound to one service address
#[derive(Debug, Clone)]
pub struct GenerationClient {
    http: reqwest::Client,
    config: ServiceConfig,
}

impl GenerationClient {
    pub fn new(config: ServiceConfig) -> VasthraResult<Self> {
        let http = reqwest::Client::builder()
            .user_agent(format!("VasthraStudio/{}", CURRENT_VERSION))
            .build()
            .map_err(|e| VasthraError::ConfigError {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;
        Ok(Self::with_http(config, http))
    }

    /// Use a preconfigured reqwest client
    pub fn with_http(config: ServiceConfig, http: reqwest::Client) -> Self {
        GenerationClient { http, config }
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    /// Upload a sketch and decode the service's answer
    pub async fn generate(&self, sketch: &SketchFile) -> VasthraResult<GenerationOutcome> {
        let media_type = sketch.media_type()?;
        let url = self.config.generate_url();

        let part = Part::bytes(sketch.bytes.clone())
            .file_name(sketch.name.clone())
            .mime_str(media_type.mime())
            .map_err(|_| VasthraError::invalid_media_type(&sketch.name, &sketch.declared_type))?;
        let form = Form::new().part(FILE_FIELD, part);

        info!(file = %sketch.name, bytes = sketch.bytes.len(), %url, "Uploading sketch");

        let response = self
            .http
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(|e| VasthraError::transport(&url, e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            warn!(status, %url, "Generation request failed");
            return Err(VasthraError::HttpStatus { url, status });
        }

        let body = response
            .text()
            .await
            .map_err(|e| VasthraError::transport(&url, e.to_string()))?;

        let outcome = interpret_response(&body)?;
        match &outcome {
            GenerationOutcome::Generated(record) => info!(
                generated = record.generated_image(),
                original = record.original_sketch(),
                "Design generated"
            ),
            GenerationOutcome::Rejected { detail } => {
                warn!(detail = detail.as_deref().unwrap_or("-"), "Generation rejected")
            }
        }
        Ok(outcome)
    }

    /// Fetch an image by its server-relative path
    pub async fn fetch_image(&self, path: &str) -> VasthraResult<Vec<u8>> {
        let url = self.config.resolve_url(path);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|e| VasthraError::transport(&url, e.to_string()))?;

        if !response.status().is_success() {
            return Err(VasthraError::HttpStatus {
                url,
                status: response.status().as_u16(),
            });
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| VasthraError::transport(&url, e.to_string()))?;

        info!(%url, bytes = bytes.len(), "Fetched image");
        Ok(bytes.to_vec())
    }
}
