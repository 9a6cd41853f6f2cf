pub mod verification;

pub use verification::{
    EMAIL_VERIFICATION_SCOPE, VerificationClaims, VerificationTokenConfig, VerificationTokenError,
    generate_verification_token, validate_verification_token,
};
