//! Service context that bundles all port trait objects.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::adapters::live::gemini::GeminiClient;
use crate::adapters::recording::generative_client::RecordingGenerativeClient;
use crate::adapters::replaying::generative_client::ReplayingGenerativeClient;
use crate::cassette::config::load_cassette;
use crate::cassette::recorder::CassetteRecorder;
use crate::config::Config;
use crate::error::FusionError;
use crate::ports::GenerativeClient;

/// Bundles all port trait objects into a single context.
pub struct ServiceContext {
    /// Generative service client port.
    pub client: Box<dyn GenerativeClient>,
}

/// Handle to a recording session that must be finished after use.
pub struct RecordingSession {
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingSession {
    /// Finish the recording and write the cassette to disk.
    ///
    /// The context that produced this session must be dropped first.
    ///
    /// # Errors
    ///
    /// Returns an error if the recorder is still shared or the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, FusionError> {
        let recorder = Arc::try_unwrap(self.recorder)
            .map_err(|_| FusionError::Config("recording client still holds the recorder".into()))?
            .into_inner()
            .map_err(|e| FusionError::Config(format!("recorder lock poisoned: {e}")))?;
        recorder.finish()
    }
}

impl ServiceContext {
    /// Create a live Gemini context.
    ///
    /// # Errors
    ///
    /// Returns an error if no API key is configured or the HTTP client cannot be built.
    pub fn live(config: &Config) -> Result<Self, FusionError> {
        let key = config.gemini_key().ok_or_else(|| FusionError::MissingApiKey {
            provider: "Gemini".into(),
            env_var: "GEMINI_API_KEY".into(),
        })?;
        let mut client = GeminiClient::new(key, config.gemini.timeout())?;
        if let Some(base_url) = &config.gemini.base_url {
            client = client.with_base_url(base_url.trim_end_matches('/'));
        }
        Ok(Self { client: Box::new(client) })
    }

    /// Create a recording context that wraps a live client with a recorder.
    ///
    /// # Errors
    ///
    /// Returns an error if the live context cannot be created.
    pub fn recording(config: &Config) -> Result<(Self, RecordingSession), FusionError> {
        let live_ctx = Self::live(config)?;

        let timestamp = chrono::Utc::now().format("%Y-%m-%dT%H-%M-%S").to_string();
        let path = PathBuf::from(".stylefusion/cassettes")
            .join(&timestamp)
            .join("generative_client.cassette.yaml");
        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(
            path,
            format!("{timestamp}-generative_client"),
            get_commit_hash(),
        )));

        let client = RecordingGenerativeClient::new(live_ctx.client, Arc::clone(&recorder));
        Ok((Self { client: Box::new(client) }, RecordingSession { recorder }))
    }

    /// Create a replaying context from a cassette file. No API key is needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be loaded.
    pub fn replaying(path: &Path) -> Result<Self, FusionError> {
        let replayer = Arc::new(Mutex::new(load_cassette(path)?));
        Ok(Self { client: Box::new(ReplayingGenerativeClient::new(replayer)) })
    }
}

/// Get the current git commit hash, or "unknown" if unavailable.
fn get_commit_hash() -> String {
    std::process::Command::new("git")
        .args(["rev-parse", "HEAD"])
        .output()
        .ok()
        .filter(|o| o.status.success())
        .and_then(|o| String::from_utf8(o.stdout).ok())
        .map_or_else(|| "unknown".to_string(), |s| s.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn replaying_missing_cassette_is_config_error() {
        let err = ServiceContext::replaying(Path::new("/nonexistent/x.cassette.yaml")).err().unwrap();
        assert!(matches!(err, FusionError::Config(_)));
    }

    #[test]
    fn recording_session_writes_cassette() {
        let dir = std::env::temp_dir().join("stylefusion_context_session_test");
        let path = dir.join("empty.cassette.yaml");
        let session = RecordingSession {
            recorder: Arc::new(Mutex::new(CassetteRecorder::new(&path, "empty", "abc"))),
        };
        assert_eq!(session.finish().unwrap(), path);
        assert!(path.exists());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
