use async_trait::async_trait;

use crate::domain::email::Email;

/// Outbound email delivery. Verification and notification mail goes through
/// this port; the transport (Postmark, mock) is an adapter concern.
#[async_trait]
pub trait EmailClient: Send + Sync {
    async fn send_email(
        &self,
        recipient: &Email,
        subject: &str,
        content: &str,
    ) -> Result<(), String>;
}
