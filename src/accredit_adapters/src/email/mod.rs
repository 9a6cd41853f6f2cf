pub mod mock_email_client;
pub mod postmark_email_client;

pub use mock_email_client::MockEmailClient;
pub use postmark_email_client::PostmarkEmailClient;
