use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum NotifierError {
    #[error("invalid recipient address: {0}")]
    InvalidRecipient(String),

    #[error("delivery failed: {0}")]
    Delivery(String),
}

/// Sends the "you are registered" message. Failures never affect the
/// submission outcome.
#[async_trait]
pub trait ConfirmationNotifierPort: Send + Sync {
    async fn send_confirmation(&self, email: &str, full_name: &str) -> Result<(), NotifierError>;
}
