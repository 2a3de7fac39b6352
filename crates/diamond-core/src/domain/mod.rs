//! # Domain Layer (Inner Hexagon)
//!
//! Pure diamond logic: the selector registry, the cut protocol, loupe
//! queries, dispatcher resolution, and the emergency state machine. No I/O,
//! no handler execution; forwarding happens at the service layer.

pub mod cut;
pub mod dispatcher;
pub mod emergency;
pub mod invariants;
pub mod loupe;
pub mod registry;
pub mod services;
pub mod storage;
pub mod value_objects;
