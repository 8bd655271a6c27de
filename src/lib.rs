//! PodcastAnalyzer - summarize and query YouTube videos using Google Gemini
//!
//! This crate provides the core functionality for turning a video URL into an
//! AI-generated transcript, a localized summary, and a question-answering
//! session grounded in that summary.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Core business logic, value objects, and errors
//! - **Application**: The analysis session use case and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (Gemini API, config storage)
//! - **CLI**: Command-line interface, argument parsing, and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
