use crate::config::PushoverSettings;
use async_trait::async_trait;
use std::time::Duration;

/// One-way, best-effort delivery of a short text to the profile owner.
///
/// Implementations swallow and log their own failures: nothing a notifier does
/// may change the outcome of a conversation turn.
#[async_trait]
pub trait Notifier: Send + Sync {
    async fn send(&self, text: &str);
}

/// Push notifications through the Pushover messages API
pub struct PushoverNotifier {
    settings: PushoverSettings,
    http_client: reqwest::Client,
}

impl PushoverNotifier {
    pub fn new(settings: PushoverSettings) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(10))
            .build()?;
        Ok(Self {
            settings,
            http_client,
        })
    }

    async fn deliver(&self, text: &str) -> anyhow::Result<()> {
        let form = [
            ("user", self.settings.user.as_str()),
            ("token", self.settings.token.as_str()),
            ("message", text),
        ];

        let response = self
            .http_client
            .post(&self.settings.url)
            .form(&form)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("Pushover returned {}: {}", status, body);
        }
        Ok(())
    }
}

#[async_trait]
impl Notifier for PushoverNotifier {
    async fn send(&self, text: &str) {
        tracing::info!(message = %text, "Push");
        if let Err(e) = self.deliver(text).await {
            tracing::warn!(error = %e, "Push notification was not delivered");
        }
    }
}

/// Writes notifications to the log only; for local runs without a phone attached
#[derive(Debug, Default, Clone, Copy)]
pub struct LogNotifier;

#[async_trait]
impl Notifier for LogNotifier {
    async fn send(&self, text: &str) {
        tracing::info!(message = %text, "Push (log only)");
    }
}
