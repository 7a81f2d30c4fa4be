//! # tablegen Core
//!
//! Core types, traits, and error handling for tablegen.
//!
//! This crate provides the foundational building blocks used throughout
//! the generator, including:
//!
//! - **Types**: Storage types, model scalar types and the `TypeMap`
//! - **Traits**: `Validatable` for structural checks
//! - **Errors**: Unified error handling with `EngineError` and `EngineResult`
//!

pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used items at crate root
pub use error::{EngineError, EngineResult};
pub use traits::Validatable;
pub use types::{ScalarType, StorageType, TypeMap};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
