//! Notification integrations. Implement NotifierPort.

pub mod email_webhook;
pub mod log_notifier;

pub use email_webhook::EmailWebhookNotifier;
pub use log_notifier::LogNotifier;
