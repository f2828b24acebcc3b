//! Recording adapter for the `GenerativeClient` port.

use std::sync::{Arc, Mutex};

use super::record_result;
use crate::cassette::recorder::CassetteRecorder;
use crate::ports::generative_client::{
    AnalyzeFuture, ContentRequest, GenerateFuture, GenerativeClient,
};

/// Port name under which generative client calls are recorded.
pub const PORT: &str = "generative_client";

/// Records analysis and generation calls while delegating to an inner client.
pub struct RecordingGenerativeClient {
    inner: Box<dyn GenerativeClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingGenerativeClient {
    /// Creates a new recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn GenerativeClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl GenerativeClient for RecordingGenerativeClient {
    fn analyze(&self, request: &ContentRequest) -> AnalyzeFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.analyze(&request_clone).await;
            record_result(&recorder, PORT, "analyze", &request_clone, &result);
            result
        })
    }

    fn generate(&self, request: &ContentRequest) -> GenerateFuture<'_> {
        let request_clone = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.generate(&request_clone).await;
            record_result(&recorder, PORT, "generate", &request_clone, &result);
            result
        })
    }
}
