//! Port traits at the edge of the application core.
//!
//! The pipeline only sees these traits; concrete clients live in
//! `src/adapters/`.

pub mod generative_client;

pub use generative_client::{ContentRequest, GenerateResponse, GenerativeClient, InlineImage};
