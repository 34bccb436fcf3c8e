//! Activation and password-reset emails.

use std::sync::Arc;

use aristotle_db::models::user::User;
use tokio::task::JoinHandle;

use crate::delivery::email::{EmailConfig, EmailDelivery, EmailMessage};

/// Sends account emails in the background.
///
/// Without an SMTP configuration the messages are logged and dropped.
#[derive(Clone)]
pub struct AccountNotifier {
    base_url: String,
    mailer: Option<Arc<EmailDelivery>>,
}

impl AccountNotifier {
    /// `base_url` prefixes the links in every message, e.g.
    /// `https://qa.example.com`.
    pub fn new(base_url: impl Into<String>, email: Option<EmailConfig>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            mailer: email.map(|config| Arc::new(EmailDelivery::new(config))),
        }
    }

    /// A notifier that only logs. Used when SMTP is not configured.
    pub fn log_only(base_url: impl Into<String>) -> Self {
        Self::new(base_url, None)
    }

    pub fn activation_message(&self, user: &User, code: &str) -> EmailMessage {
        EmailMessage {
            to: user.email.clone(),
            subject: "Please verify your account".to_string(),
            body: format!(
                "Thank you for signing up, {}!\n\
                 To verify your account, please use the address\n\
                 {}/activate/{code}\n",
                user.username, self.base_url
            ),
        }
    }

    pub fn password_reset_message(&self, user: &User, code: &str) -> EmailMessage {
        EmailMessage {
            to: user.email.clone(),
            subject: "Reset your password".to_string(),
            body: format!(
                "Please use the address\n\
                 {}/reset/{code}\n\
                 The link expires in 10 minutes.\n",
                self.base_url
            ),
        }
    }

    pub fn send_activation_email(&self, user: &User, code: &str) -> JoinHandle<()> {
        tracing::info!(user_id = user.id, "Queueing activation email");
        self.dispatch(self.activation_message(user, code))
    }

    pub fn send_password_reset_email(&self, user: &User, code: &str) -> JoinHandle<()> {
        tracing::info!(user_id = user.id, "Queueing password reset email");
        self.dispatch(self.password_reset_message(user, code))
    }

    /// Spawn delivery. Failures are logged, never returned.
    fn dispatch(&self, message: EmailMessage) -> JoinHandle<()> {
        let mailer = self.mailer.clone();
        tokio::spawn(async move {
            match mailer {
                Some(mailer) => {
                    if let Err(e) = mailer.send(&message).await {
                        tracing::error!(error = %e, to = %message.to, "Failed to send email");
                    }
                }
                None => {
                    tracing::debug!(
                        to = %message.to,
                        subject = %message.subject,
                        "SMTP not configured, email not sent"
                    );
                }
            }
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn alice() -> User {
        User {
            id: 1,
            username: "alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: String::new(),
            first_name: String::new(),
            last_name: String::new(),
            is_active: false,
            last_login_at: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_activation_link_uses_base_url() {
        let notifier = AccountNotifier::log_only("http://qa.test/");
        let msg = notifier.activation_message(&alice(), "abc123");
        assert_eq!(msg.to, "alice@example.com");
        assert!(msg.body.contains("http://qa.test/activate/abc123"));
    }

    #[test]
    fn test_reset_link_uses_base_url() {
        let notifier = AccountNotifier::log_only("http://qa.test");
        let msg = notifier.password_reset_message(&alice(), "xyz");
        assert_eq!(msg.subject, "Reset your password");
        assert!(msg.body.contains("http://qa.test/reset/xyz"));
    }

    #[tokio::test]
    async fn test_log_only_dispatch_completes() {
        let notifier = AccountNotifier::log_only("http://qa.test");
        notifier
            .send_activation_email(&alice(), "code")
            .await
            .expect("task should not panic");
    }
}
