pub mod client;
pub mod error;
pub mod models;
pub mod secrets;

pub use client::{ClientConfig, GeminiClient, test_configured_api_key};
pub use error::GenerationError;
pub use secrets::{clear_api_key, store_api_key};
