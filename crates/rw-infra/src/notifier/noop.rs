use async_trait::async_trait;
use rw_core::ports::{ConfirmationNotifierPort, NotifierError};
use tracing::debug;

/// Notifier used when confirmation messages are disabled.
pub struct NoopNotifier;

#[async_trait]
impl ConfirmationNotifierPort for NoopNotifier {
    async fn send_confirmation(&self, _email: &str, _full_name: &str) -> Result<(), NotifierError> {
        debug!("confirmation suppressed");
        Ok(())
    }
}
