pub mod hashmap_account_store;
pub mod hashmap_item_store;
pub mod hashset_token_blacklist;
mod password_hash;
pub mod postgres_account_store;
pub mod postgres_item_store;
pub mod postgres_token_blacklist;

pub use hashmap_account_store::HashMapAccountStore;
pub use hashmap_item_store::HashMapItemStore;
pub use hashset_token_blacklist::HashSetTokenBlacklist;
pub use postgres_account_store::PostgresAccountStore;
pub use postgres_item_store::PostgresItemStore;
pub use postgres_token_blacklist::PostgresTokenBlacklist;
