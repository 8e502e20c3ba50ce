//! # Trellis Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── support.rs        # Shared fixtures (modules, decorators, documents)
//! │
//! └── integration/      # Cross-crate flows
//!     ├── registration.rs   # Discovery, id discipline, unregistration
//!     ├── decoration.rs     # Override and cascade laws
//!     └── lifecycle_flow.rs # Start/stop sweeps end to end
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p trellis-tests
//!
//! # By category
//! cargo test -p trellis-tests integration::registration
//! cargo test -p trellis-tests integration::decoration
//! cargo test -p trellis-tests integration::lifecycle_flow
//!
//! # Benchmarks
//! cargo bench -p trellis-tests
//! ```

#![allow(dead_code)]

pub mod integration;
pub mod support;
