use async_trait::async_trait;
use std::sync::Mutex;

/// Delivers a verification code to its owner (SMS, email, ...).
///
/// Delivery is fire-and-forget from the caller's point of view; errors are
/// only logged.
#[async_trait]
pub trait CodeNotifier: Send + Sync {
    async fn notify(&self, identifier: &str, code: &str) -> Result<(), anyhow::Error>;
}

/// Writes the code to the log instead of sending it anywhere.
#[derive(Clone, Default)]
pub struct LogNotifier;

#[async_trait]
impl CodeNotifier for LogNotifier {
    async fn notify(&self, identifier: &str, code: &str) -> Result<(), anyhow::Error> {
        tracing::info!(identifier = %identifier, code = %code, "Verification code issued");
        Ok(())
    }
}

/// Records every delivery; used by tests.
#[derive(Default)]
pub struct MockNotifier {
    pub sent: Mutex<Vec<(String, String)>>,
}

impl MockNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<(String, String)> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl CodeNotifier for MockNotifier {
    async fn notify(&self, identifier: &str, code: &str) -> Result<(), anyhow::Error> {
        self.sent
            .lock()
            .map_err(|e| anyhow::anyhow!("Mock notifier mutex poisoned: {}", e))?
            .push((identifier.to_string(), code.to_string()));
        Ok(())
    }
}
