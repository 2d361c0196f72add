pub mod auth;
pub mod exchange;
pub mod message;
pub mod skills;
pub mod userskills;
