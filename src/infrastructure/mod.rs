//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with external systems like the Gemini API.

pub mod config;
pub mod gateway;

// Re-export adapters
pub use config::XdgConfigStore;
pub use gateway::GeminiGateway;
