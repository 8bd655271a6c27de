//! AI gateway adapters

pub mod gemini;

pub use gemini::GeminiGateway;
