//! # Diamond Router Test Suite
//!
//! Unified test crate for the diamond proxy core.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! └── integration/      # End-to-end flows through the service surface
//!     ├── cut_flows.rs       # Cut batches, atomicity, loupe reflection
//!     ├── dispatch_flows.rs  # Fallback routing and facet execution
//!     └── emergency_flows.rs # Pause, unpause, blacklist, authorization
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p diamond-tests
//!
//! # By category
//! cargo test -p diamond-tests integration::cut_flows::
//! cargo test -p diamond-tests integration::emergency_flows::
//! ```

#![allow(unused_imports)]
#![allow(dead_code)]

pub mod integration;
