use pico_link::transport::TransportError;
use pico_link_core::radio::RadioError;

/// Errors that stop a host runtime before the exchange starts.
#[derive(Debug, thiserror::Error)]
pub enum HostError {
    #[error("Invalid radio settings: {0}")]
    Radio(RadioError),

    #[error("Transport error: {0}")]
    Transport(TransportError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<TransportError> for HostError {
    fn from(error: TransportError) -> Self {
        HostError::Transport(error)
    }
}

impl From<RadioError> for HostError {
    fn from(error: RadioError) -> Self {
        HostError::Radio(error)
    }
}
