pub mod change_password;
pub mod complete_verification;
pub mod provision_account;
pub mod request_verification;

#[cfg(test)]
pub(crate) mod test_support;
