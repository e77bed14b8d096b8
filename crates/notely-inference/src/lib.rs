//! # notely-inference
//!
//! LLM note-expansion backend abstraction for notely.
//!
//! This crate provides:
//! - An OpenAI-compatible implementation of `ExpansionBackend`
//! - A deterministic mock backend for testing
//!
//! # Example
//!
//! ```rust,no_run
//! use notely_inference::OpenAIBackend;
//! use notely_core::ExpansionBackend;
//!
//! #[tokio::main]
//! async fn main() {
//!     let backend = OpenAIBackend::from_env().unwrap();
//!     let expanded = backend.expand("buy milk", Some("Groceries")).await.unwrap();
//!     println!("{expanded}");
//! }
//! ```

pub mod openai;
pub mod types;

// Mock expansion backend for testing
#[cfg(any(test, feature = "mock"))]
pub mod mock;

// Re-export core types
pub use notely_core::*;

pub use openai::{OpenAIBackend, OpenAIConfig};

#[cfg(any(test, feature = "mock"))]
pub use mock::MockExpansionBackend;
