//! Replaying adapters that serve recorded interactions from cassettes.

pub mod generative_client;

use std::sync::{Arc, Mutex};

use crate::cassette::replayer::CassetteReplayer;

/// Retrieve the next recorded output for a given port and method.
///
/// # Panics
///
/// Panics if the replayer lock is poisoned or the cassette has no more
/// interactions for the port and method.
pub(crate) fn next_output(
    replayer: &Arc<Mutex<CassetteReplayer>>,
    port: &str,
    method: &str,
) -> serde_json::Value {
    let mut guard = replayer.lock().expect("replayer lock poisoned");
    guard.next_interaction(port, method).output
}

/// Deserialize a replayed output as `Result<T, String>`.
pub(crate) fn replay_result<T: serde::de::DeserializeOwned>(
    output: serde_json::Value,
) -> Result<T, String> {
    if let Some(err_val) = output.get("Err").or_else(|| output.get("err")) {
        return Err(err_val.as_str().unwrap_or("replayed error").to_string());
    }
    let value = output.get("Ok").or_else(|| output.get("ok")).cloned().unwrap_or(output);
    serde_json::from_value(value).map_err(|e| format!("malformed cassette output: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn replay_ok_and_err() {
        let ok: Result<String, String> = replay_result(json!({"Ok": "text"}));
        assert_eq!(ok.unwrap(), "text");

        let err: Result<String, String> = replay_result(json!({"Err": "API error (500): boom"}));
        assert_eq!(err.unwrap_err(), "API error (500): boom");
    }

    #[test]
    fn replay_bare_value_and_mismatch() {
        let bare: Result<u32, String> = replay_result(json!(7));
        assert_eq!(bare.unwrap(), 7);

        let wrong: Result<u32, String> = replay_result(json!({"Ok": "seven"}));
        assert!(wrong.unwrap_err().contains("malformed cassette output"));
    }
}
