//! Application layer - Use cases and port interfaces
//!
//! Contains the core business operations and trait definitions
//! for external system interactions.

pub mod ports;
pub mod session;

// Re-export use cases
pub use session::{AnalysisCallbacks, AnalysisSession};
