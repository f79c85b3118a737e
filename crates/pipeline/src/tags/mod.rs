//! Tag builder implementations.
//!
//! This module contains the concrete [`TagBuilder`](crate::traits::TagBuilder)
//! implementations, one per supported input shape.

pub mod minimal;
pub mod rich;

// Re-export for convenience
pub use minimal::MinimalTags;
pub use rich::RichTags;
