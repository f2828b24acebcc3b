//! Implementations of the generative client port.
//!
//! - `live/` — the Gemini HTTP API
//! - `recording/` — wraps a live client and writes a cassette
//! - `replaying/` — serves responses from a cassette, no network

pub mod live;
pub mod recording;
pub mod replaying;
