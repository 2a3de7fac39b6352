//! # Adapters Layer (Outer Hexagon)
//!
//! In-memory implementations of the driven ports: facet host and event
//! journal, plus the reference facets used by the test suites.

pub mod event_publisher;
pub mod facet_host;

pub use event_publisher::InMemoryEventPublisher;
pub use facet_host::{CounterFacet, EchoFacet, InMemoryFacetHost, RevertingFacet};
