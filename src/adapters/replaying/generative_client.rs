//! Replaying adapter for the `GenerativeClient` port.

use std::sync::{Arc, Mutex};

use super::{next_output, replay_result};
use crate::adapters::recording::generative_client::PORT;
use crate::cassette::replayer::CassetteReplayer;
use crate::error::FusionError;
use crate::ports::generative_client::{
    AnalyzeFuture, ContentRequest, GenerateFuture, GenerateResponse, GenerativeClient,
};

/// Serves recorded analysis and generation results from a cassette.
pub struct ReplayingGenerativeClient {
    replayer: Arc<Mutex<CassetteReplayer>>,
}

impl ReplayingGenerativeClient {
    /// Create a replaying client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: Arc<Mutex<CassetteReplayer>>) -> Self {
        Self { replayer }
    }
}

impl GenerativeClient for ReplayingGenerativeClient {
    fn analyze(&self, _request: &ContentRequest) -> AnalyzeFuture<'_> {
        let output = next_output(&self.replayer, PORT, "analyze");
        Box::pin(async move { replay_result::<String>(output).map_err(FusionError::Replayed) })
    }

    fn generate(&self, _request: &ContentRequest) -> GenerateFuture<'_> {
        let output = next_output(&self.replayer, PORT, "generate");
        Box::pin(async move {
            replay_result::<GenerateResponse>(output).map_err(FusionError::Replayed)
        })
    }
}
