pub mod change_password;
pub mod error;
pub mod health;
pub mod items;
pub mod register;
pub mod resend_verification;
pub mod setup_admin;
pub mod user_exists;
pub mod verify_email;

pub use change_password::{ChangePasswordRequest, change_password};
pub use error::{ApiError, ErrorResponse};
pub use health::{MessageResponse, health};
pub use items::{CreateItemRequest, create_item, list_items};
pub use register::{AccountResponse, RegisterRequest, register};
pub use resend_verification::{ResendVerificationRequest, resend_verification};
pub use setup_admin::{SetupAdminRequest, setup_admin};
pub use user_exists::{UserExistsResponse, user_exists};
pub use verify_email::{VerifyEmailRequest, verify_email};
