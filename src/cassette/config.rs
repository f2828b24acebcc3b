//! Loading cassettes from disk.

use std::path::Path;

use super::format::Cassette;
use super::replayer::CassetteReplayer;
use crate::error::FusionError;

/// Load a cassette file and create a replayer.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_cassette(path: &Path) -> Result<CassetteReplayer, FusionError> {
    let content = std::fs::read_to_string(path).map_err(|e| {
        FusionError::Config(format!("Failed to read cassette {}: {e}", path.display()))
    })?;
    let cassette: Cassette = serde_yaml::from_str(&content).map_err(|e| {
        FusionError::Config(format!("Failed to parse cassette {}: {e}", path.display()))
    })?;
    tracing::debug!(
        cassette = %cassette.name,
        interactions = cassette.interactions.len(),
        "cassette loaded"
    );
    Ok(CassetteReplayer::new(&cassette))
}
