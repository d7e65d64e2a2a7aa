//! A [`phomdl::Notifier`] that posts progress reports to a Slack incoming
//! webhook.
//!
//! Grounded on `original_source/source/utils.py::send_to_webhook`, which
//! posted `{"channel", "username", "text", "icon_emoji"}` to a fixed webhook
//! URL and logged (without raising) on a non-200 response.
use log::warn;
use phomdl::Notifier;

pub struct SlackWebhookNotifier {
    url: String,
    client: reqwest::blocking::Client,
}

impl SlackWebhookNotifier {
    pub fn new(url: String) -> Self {
        Self { url, client: reqwest::blocking::Client::new() }
    }
}

impl Notifier for SlackWebhookNotifier {
    fn notify(&self, message: &str) {
        let payload = serde_json::json!({
            "channel": "phomdl-anneal",
            "username": "Notification",
            "text": message,
            "icon_emoji": ":robot_face:",
        });
        match self.client.post(&self.url).json(&payload).send() {
            Ok(response) if response.status().is_success() => {}
            Ok(response) => warn!("webhook failed with status {}", response.status()),
            Err(error) => warn!("webhook failed: {error}"),
        }
    }
}
