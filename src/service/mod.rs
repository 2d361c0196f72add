pub mod error;
pub mod exchange_service;
pub mod message_service;
