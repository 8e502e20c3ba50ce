//! # Integration Tests
//!
//! Cross-crate flows exercising the engine through its public surface.

pub mod decoration;
pub mod lifecycle_flow;
