//! Unified error type for stylefusion.

use thiserror::Error;

/// Errors that can occur while preparing or running a style transfer.
#[derive(Debug, Error)]
pub enum FusionError {
    /// The generative API returned an error response.
    #[error("API error ({status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Error message from the API.
        message: String,
    },

    /// A failure recorded in a cassette, shown as it was originally rendered.
    #[error("{0}")]
    Replayed(String),

    /// A network error occurred.
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration error.
    #[error("Config error: {0}")]
    Config(String),

    /// Invalid argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// The request is missing something it needs before it can be dispatched.
    #[error("Invalid request: {0}")]
    Validation(String),

    /// An input file could not be used as an image.
    #[error("Invalid image: {0}")]
    InvalidImage(String),

    /// A string was not a base64 data URI.
    #[error("Invalid data URI: {0}")]
    InvalidDataUri(String),

    /// The generation call succeeded but carried no inline image.
    #[error("Generation completed but no image data was returned")]
    NoImageProduced,

    /// Image format conversion error.
    #[error("Image conversion error: {0}")]
    ImageConversion(String),

    /// No API key configured for the provider.
    #[error("No API key for {provider}. Set {env_var} or add it to config file.")]
    MissingApiKey {
        /// The provider name.
        provider: String,
        /// The environment variable name.
        env_var: String,
    },
}
