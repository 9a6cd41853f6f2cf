use std::collections::HashSet;
use std::sync::Arc;
use tokio::sync::RwLock;

use accredit_core::{TokenBlacklist, TokenBlacklistError};

/// In-memory blacklist for tests and local development.
#[derive(Debug, Default, Clone)]
pub struct HashSetTokenBlacklist {
    blacklisted_tokens: Arc<RwLock<HashSet<String>>>,
}

impl HashSetTokenBlacklist {
    pub fn new() -> Self {
        Self {
            blacklisted_tokens: Arc::new(RwLock::new(HashSet::new())),
        }
    }
}

#[async_trait::async_trait]
impl TokenBlacklist for HashSetTokenBlacklist {
    async fn add_token(&self, token: String) -> Result<(), TokenBlacklistError> {
        let mut blacklisted_tokens = self.blacklisted_tokens.write().await;
        blacklisted_tokens.insert(token);
        Ok(())
    }

    async fn contains_token(&self, token: &str) -> Result<bool, TokenBlacklistError> {
        let blacklisted_tokens = self.blacklisted_tokens.read().await;
        Ok(blacklisted_tokens.contains(token))
    }
}
