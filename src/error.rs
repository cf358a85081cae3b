use thiserror::Error;

/// SDK-specific errors
#[derive(Error, Debug)]
pub enum SdkError {
    /// Local validation failed before anything was encoded or sent.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Encoded or signed action does not fit the engine's size bound.
    #[error("Action too large: {size} bytes exceeds limit of {max} bytes")]
    SizeLimit { size: usize, max: usize },

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Rate limited: {0}")]
    RateLimited(String),

    /// The engine answered with an error receipt.
    #[error("Could not {action}, reason: {reason}")]
    Engine { action: String, reason: String },

    /// The engine answered with a receipt of another kind than requested.
    #[error("Could not {action}, unexpected receipt: {actual}")]
    UnexpectedReceipt { action: String, actual: String },

    #[error("Decode error: {0}")]
    Decode(String),

    #[error("Keypair error: {0}")]
    Keypair(String),

    #[error("Signing error: {0}")]
    Signing(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Decimal conversion error: {0}")]
    DecimalConversion(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl SdkError {
    /// True for failures a calling layer may retry (transport-level only).
    pub fn is_transient(&self) -> bool {
        matches!(self, SdkError::RateLimited(_))
    }
}

impl From<reqwest::Error> for SdkError {
    fn from(err: reqwest::Error) -> Self {
        SdkError::Transport(err.to_string())
    }
}

impl From<prost::DecodeError> for SdkError {
    fn from(err: prost::DecodeError) -> Self {
        SdkError::Decode(err.to_string())
    }
}

impl From<serde_json::Error> for SdkError {
    fn from(err: serde_json::Error) -> Self {
        SdkError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for SdkError {
    fn from(err: std::io::Error) -> Self {
        SdkError::Keypair(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, SdkError>;
