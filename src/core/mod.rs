pub mod app;
pub mod chat_client;
pub mod config;
pub mod constants;
pub mod message;
pub mod transcript;
