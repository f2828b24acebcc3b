//! Generative client port for multimodal analysis and image generation APIs.

use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

use crate::error::FusionError;

/// An image carried inline in a request or response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InlineImage {
    /// MIME type of the image (e.g., `"image/png"`).
    pub mime_type: String,
    /// Base64-encoded image bytes, without any data URI header.
    pub data: String,
}

/// A single-turn request that pairs one image with an instruction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentRequest {
    /// The resolved model identifier (e.g., `"gemini-2.5-flash-image"`).
    pub model: String,
    /// The image sent ahead of the instruction.
    pub image: InlineImage,
    /// Instruction text.
    pub instruction: String,
}

/// One part of a candidate: text, inline image data, or neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Part {
    /// Text content, if this part carries text.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    /// Inline image payload, if this part carries an image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inline_data: Option<InlineImage>,
}

/// A candidate output and its parts.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Candidate {
    /// Parts in the order the service returned them.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// Response of a generation call.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GenerateResponse {
    /// Candidate outputs in the order the service returned them.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// Boxed future type returned by [`GenerativeClient::analyze`].
pub type AnalyzeFuture<'a> = Pin<Box<dyn Future<Output = Result<String, FusionError>> + Send + 'a>>;

/// Boxed future type returned by [`GenerativeClient::generate`].
pub type GenerateFuture<'a> =
    Pin<Box<dyn Future<Output = Result<GenerateResponse, FusionError>> + Send + 'a>>;

/// Talks to an external multimodal generation service.
pub trait GenerativeClient: Send + Sync {
    /// Ask the service to describe an image. The returned text may be empty.
    fn analyze(&self, request: &ContentRequest) -> AnalyzeFuture<'_>;

    /// Ask the service to produce new content from an image and instruction.
    fn generate(&self, request: &ContentRequest) -> GenerateFuture<'_>;
}
