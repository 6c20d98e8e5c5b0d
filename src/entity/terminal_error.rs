#[derive(Debug, thiserror::Error)]
pub enum TerminalError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("{service} API error: {message}")]
    Api { service: &'static str, message: String },

    #[error("Failed to decode response: {0}")]
    Decode(String),

    #[error("Invalid amount")]
    InvalidAmount,

    #[error("Wallet not connected")]
    WalletNotConnected,

    #[error("No quote available, request a quote first")]
    NoQuote,

    #[error("No token selected")]
    NoTokenSelected,

    #[error("Failed to sign transaction: {0}")]
    Signing(String),

    #[error("Failed to send transaction: {0}")]
    Broadcast(String),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl TerminalError {
    pub fn api(service: &'static str, message: impl Into<String>) -> Self {
        TerminalError::Api {
            service,
            message: message.into(),
        }
    }
}
