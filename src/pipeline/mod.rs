//! Two-stage style transfer: describe the reference style, then regenerate the subject.
//!
//! The style image is only ever sent to the analysis call. The generation call
//! receives the identity image and text alone, so the style reaches the output
//! through the written description and never as pixels.

pub mod prompt;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::error::FusionError;
use crate::intake::{strip_data_uri_prefix, to_data_uri, EncodedImage};
use crate::ports::{ContentRequest, GenerateResponse, GenerativeClient, InlineImage};

pub use prompt::TransformationMode;
use prompt::{
    analysis_instruction, generation_instruction, ANALYSIS_FAILED_FALLBACK, NO_STYLE_FALLBACK,
};

/// Everything one generation attempt needs. Immutable once built.
#[derive(Debug, Clone)]
pub struct GenerationRequest {
    identity: EncodedImage,
    style: Option<EncodedImage>,
    mode: TransformationMode,
    instruction: String,
}

impl GenerationRequest {
    /// Build a request, rejecting it when no identity image was supplied.
    ///
    /// # Errors
    ///
    /// Returns a validation error if `identity` is `None`.
    pub fn new(
        identity: Option<EncodedImage>,
        style: Option<EncodedImage>,
        mode: TransformationMode,
        instruction: impl Into<String>,
    ) -> Result<Self, FusionError> {
        let identity = identity.ok_or_else(|| {
            FusionError::Validation("an identity image is required (--identity)".into())
        })?;
        Ok(Self { identity, style, mode, instruction: instruction.into() })
    }

    /// The subject image.
    #[must_use]
    pub fn identity(&self) -> &EncodedImage {
        &self.identity
    }

    /// The optional style reference.
    #[must_use]
    pub fn style(&self) -> Option<&EncodedImage> {
        self.style.as_ref()
    }

    /// The transformation mode.
    #[must_use]
    pub fn mode(&self) -> TransformationMode {
        self.mode
    }

    /// Free-text instruction from the user, possibly empty.
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }
}

/// The result of a successful run.
#[derive(Debug, Clone)]
pub struct GeneratedImage {
    /// `data:<mime>;base64,<data>` for the produced image.
    pub data_uri: String,
    /// When the image was received.
    pub timestamp: DateTime<Utc>,
}

/// Runs requests against a [`GenerativeClient`].
pub struct StylePipeline<'a> {
    client: &'a dyn GenerativeClient,
    analysis_model: String,
    generation_model: String,
}

impl<'a> StylePipeline<'a> {
    /// Create a pipeline using the given client and resolved model names.
    pub fn new(
        client: &'a dyn GenerativeClient,
        analysis_model: impl Into<String>,
        generation_model: impl Into<String>,
    ) -> Self {
        Self {
            client,
            analysis_model: analysis_model.into(),
            generation_model: generation_model.into(),
        }
    }

    /// Describe the style, then regenerate the identity image in it.
    ///
    /// Style analysis failures fall back to a fixed description. Generation
    /// failures, including a response without an image, are returned.
    ///
    /// # Errors
    ///
    /// Returns an error if the generation call fails or yields no image.
    pub async fn generate_transformed_image(
        &self,
        request: &GenerationRequest,
    ) -> Result<GeneratedImage, FusionError> {
        let style_description = self.describe_style(request).await;

        let generate = ContentRequest {
            model: self.generation_model.clone(),
            image: outbound(&request.identity),
            instruction: generation_instruction(
                &style_description,
                &request.instruction,
                request.mode,
            ),
        };
        info!(model = %generate.model, mode = ?request.mode, "generating image");
        let response = self.client.generate(&generate).await?;

        let data_uri = first_image_data_uri(&response)?;
        Ok(GeneratedImage { data_uri, timestamp: Utc::now() })
    }

    async fn describe_style(&self, request: &GenerationRequest) -> String {
        let Some(style) = &request.style else {
            debug!("no style image, using default description");
            return NO_STYLE_FALLBACK.to_string();
        };

        let analyze = ContentRequest {
            model: self.analysis_model.clone(),
            image: outbound(style),
            instruction: analysis_instruction(request.mode),
        };
        info!(model = %analyze.model, "analyzing style reference");

        match self.client.analyze(&analyze).await {
            Ok(text) if !text.trim().is_empty() => {
                debug!(description = %text.trim(), "style description");
                text.trim().to_string()
            }
            Ok(_) => {
                warn!("style analysis returned no text, falling back to default styling");
                ANALYSIS_FAILED_FALLBACK.to_string()
            }
            Err(e) => {
                warn!(error = %e, "style analysis failed, falling back to default styling");
                ANALYSIS_FAILED_FALLBACK.to_string()
            }
        }
    }
}

/// Return the first inline image in a response as a data URI.
///
/// # Errors
///
/// Returns [`FusionError::NoImageProduced`] when no part carries image data.
pub fn first_image_data_uri(response: &GenerateResponse) -> Result<String, FusionError> {
    response
        .candidates
        .iter()
        .flat_map(|candidate| &candidate.parts)
        .find_map(|part| part.inline_data.as_ref())
        .map(to_data_uri)
        .ok_or(FusionError::NoImageProduced)
}

fn outbound(image: &EncodedImage) -> InlineImage {
    InlineImage {
        mime_type: image.inline.mime_type.clone(),
        data: strip_data_uri_prefix(&image.inline.data).to_string(),
    }
}
