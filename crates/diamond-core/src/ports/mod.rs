//! # Ports Layer (Middle Hexagon)
//!
//! Trait definitions between the diamond core and the outside world.
//!
//! - **Driving (Inbound)**: [`inbound::DiamondApi`]
//! - **Driven (Outbound)**: [`outbound::FacetHandler`], [`outbound::FacetHost`],
//!   [`outbound::EventPublisher`]
//!
//! No concrete implementations in this module.

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
