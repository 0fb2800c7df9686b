//! Event tracking with offline queuing
//!
//! Consumers fire events from the first frame, long before authentication
//! has produced the network user id an analytics tracker needs. The facade
//! absorbs that gap: events constructed before a sink exists are queued in
//! arrival order and drained exactly once when the sink is installed.

pub mod events;
pub mod facade;

pub use events::{
    BasketItem, IdentifyPayload, OrderItem, OrderPayload, ProductListPayload, ProductPagePayload,
    TrackingEvent,
};
pub use facade::{TrackingFacade, TrackingSink};
