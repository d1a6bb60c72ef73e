pub mod config;
pub mod logger;
pub mod server;
pub mod error;
pub mod content;
pub mod storage;
pub mod content_store;
pub mod metrics;
pub mod health;
mod query_string;
mod test_data;
