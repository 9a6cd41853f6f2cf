pub mod use_cases;

pub use use_cases::{
    change_password::{ChangePasswordError, ChangePasswordUseCase},
    complete_verification::{
        CompleteVerificationError, CompleteVerificationUseCase, VerificationOutcome,
    },
    provision_account::{ProvisionAccountError, ProvisionAccountRequest, ProvisionAccountUseCase},
    request_verification::{RequestVerificationError, RequestVerificationUseCase},
};
