pub mod account;
pub mod email;
pub mod item;
pub mod password;
pub mod person_name;
