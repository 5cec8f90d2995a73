use std::sync::Arc;

use rw_core::ports::{ConfirmationNotifierPort, NotifierError};
use tokio::task::JoinHandle;
use tracing::{info, warn};

/// Use case for the post-registration confirmation message.
///
/// Errors are logged, never surfaced: the registration already succeeded.
pub struct SendConfirmation {
    notifier: Arc<dyn ConfirmationNotifierPort>,
}

impl SendConfirmation {
    pub fn new(notifier: Arc<dyn ConfirmationNotifierPort>) -> Self {
        Self { notifier }
    }

    pub async fn execute(&self, email: &str, full_name: &str) -> Result<(), NotifierError> {
        self.notifier.send_confirmation(email, full_name).await?;
        info!("confirmation sent");
        Ok(())
    }

    /// Sends in the background.
    pub fn spawn(self: &Arc<Self>, email: String, full_name: String) -> JoinHandle<()> {
        let this = Arc::clone(self);
        tokio::spawn(async move {
            if let Err(err) = this.execute(&email, &full_name).await {
                warn!(error = %err, "confirmation could not be sent");
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;

    struct FailingNotifier;

    #[async_trait]
    impl ConfirmationNotifierPort for FailingNotifier {
        async fn send_confirmation(&self, _email: &str, _full_name: &str) -> Result<(), NotifierError> {
            Err(NotifierError::Delivery("smtp down".into()))
        }
    }

    #[tokio::test]
    async fn spawned_failure_is_swallowed() {
        let use_case = Arc::new(SendConfirmation::new(Arc::new(FailingNotifier)));

        let handle = use_case.spawn("a@x.com".into(), "Ada".into());

        assert!(handle.await.is_ok(), "task must not panic on delivery failure");
        assert!(use_case.execute("a@x.com", "Ada").await.is_err());
    }
}
