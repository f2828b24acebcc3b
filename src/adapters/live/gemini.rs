//! Live adapter for the Gemini `generateContent` API.

use std::time::Duration;

use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::error::FusionError;
use crate::ports::generative_client::{
    AnalyzeFuture, Candidate, ContentRequest, GenerateFuture, GenerateResponse, GenerativeClient,
    InlineImage, Part,
};

const GEMINI_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/models";

/// Live Gemini client that calls the Google AI API.
pub struct GeminiClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl GeminiClient {
    /// Create a new Gemini client with the given API key.
    ///
    /// `timeout` bounds each request end to end; `None` waits indefinitely.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed.
    pub fn new(api_key: String, timeout: Option<Duration>) -> Result<Self, FusionError> {
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        Ok(Self { client: builder.build()?, api_key, base_url: GEMINI_API_BASE.to_string() })
    }

    /// Point the client at a different API root.
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn generate_content(
        &self,
        request: &ContentRequest,
        response_modalities: Option<&[&str]>,
    ) -> Result<GeminiResponse, FusionError> {
        let url = format!("{}/{}:generateContent", self.base_url, request.model);
        let body = request_body(request, response_modalities);

        debug!(%url, "sending generateContent");
        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        let response_text = response.text().await?;
        parse_response(status.as_u16(), &response_text)
    }
}

impl GenerativeClient for GeminiClient {
    fn analyze(&self, request: &ContentRequest) -> AnalyzeFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let parsed = self.generate_content(&request, None).await?;
            Ok(parsed.text())
        })
    }

    fn generate(&self, request: &ContentRequest) -> GenerateFuture<'_> {
        let request = request.clone();
        Box::pin(async move {
            let parsed = self.generate_content(&request, Some(&["IMAGE"])).await?;
            Ok(parsed.into())
        })
    }
}

fn request_body(request: &ContentRequest, response_modalities: Option<&[&str]>) -> serde_json::Value {
    let mut body = serde_json::json!({
        "contents": [{
            "parts": [
                {
                    "inlineData": {
                        "mimeType": request.image.mime_type,
                        "data": request.image.data,
                    }
                },
                {"text": request.instruction}
            ]
        }]
    });

    if let Some(modalities) = response_modalities {
        body["generationConfig"] = serde_json::json!({ "responseModalities": modalities });
    }

    body
}

/// Map an HTTP status and body onto a parsed response or an `Api` error.
fn parse_response(status: u16, body: &str) -> Result<GeminiResponse, FusionError> {
    if !(200..300).contains(&status) {
        return Err(FusionError::Api { status, message: body.to_string() });
    }

    serde_json::from_str(body).map_err(|e| FusionError::Api {
        status,
        message: format!("Failed to parse response: {e}. Body: {}", truncate(body)),
    })
}

fn truncate(text: &str) -> String {
    match text.char_indices().nth(500) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}

// --- Gemini API response types ---

#[derive(Deserialize)]
struct GeminiResponse {
    #[serde(default)]
    candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Concatenated text parts of the first candidate.
    fn text(&self) -> String {
        self.candidates
            .first()
            .and_then(|c| c.content.as_ref())
            .map(|content| {
                content.parts.iter().filter_map(|p| p.text.as_deref()).collect::<String>()
            })
            .unwrap_or_default()
    }
}

impl From<GeminiResponse> for GenerateResponse {
    fn from(response: GeminiResponse) -> Self {
        let candidates = response
            .candidates
            .into_iter()
            .map(|candidate| Candidate {
                parts: candidate
                    .content
                    .map(|content| content.parts.into_iter().map(Part::from).collect())
                    .unwrap_or_default(),
            })
            .collect();
        Self { candidates }
    }
}

#[derive(Deserialize)]
struct GeminiCandidate {
    content: Option<GeminiContent>,
}

#[derive(Deserialize)]
struct GeminiContent {
    #[serde(default)]
    parts: Vec<GeminiPart>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiPart {
    text: Option<String>,
    inline_data: Option<GeminiInlineData>,
}

impl From<GeminiPart> for Part {
    fn from(part: GeminiPart) -> Self {
        Self {
            text: part.text,
            inline_data: part
                .inline_data
                .map(|inline| InlineImage { mime_type: inline.mime_type, data: inline.data }),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiInlineData {
    mime_type: String,
    data: String,
}
