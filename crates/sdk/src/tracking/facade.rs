//! Tracking facade: dispatch now or queue for later
//!
//! The sink (the analytics tracker) is an injected dependency created only
//! once the session is authenticated and consented. Until then every valid
//! event lands on the queue; installing the sink drains the queue once, in
//! arrival order, then delivery becomes immediate.

use std::collections::VecDeque;
use std::sync::Arc;

use dressipi_domain::Result;
use parking_lot::{Mutex, RwLock};
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use super::events::{
    BasketItem, IdentifyPayload, OrderPayload, ProductListPayload, ProductPagePayload,
    TrackingEvent,
};

/// Delivery target for tracking events
///
/// Implemented by whatever analytics tracker the host application wires in.
/// Delivery is fire-and-forget from the facade's point of view.
pub trait TrackingSink: Send + Sync {
    fn deliver(&self, event: &TrackingEvent);
}

/// Queue-or-dispatch facade over a [`TrackingSink`]
pub struct TrackingFacade {
    /// Namespace id salting the identify-email hash
    namespace_id: String,
    sink: RwLock<Option<Arc<dyn TrackingSink>>>,
    queue: Mutex<VecDeque<TrackingEvent>>,
}

impl TrackingFacade {
    #[must_use]
    pub fn new(namespace_id: impl Into<String>) -> Self {
        Self {
            namespace_id: namespace_id.into(),
            sink: RwLock::new(None),
            queue: Mutex::new(VecDeque::new()),
        }
    }

    /// Record a completed order
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` for an empty `order_id`; nothing
    /// is queued or dispatched.
    pub fn order(&self, payload: OrderPayload) -> Result<()> {
        self.dispatch(TrackingEvent::order(payload)?);
        Ok(())
    }

    /// Record an item added to the basket
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` for a missing `sku` or zero
    /// `quantity`.
    pub fn add_to_basket(&self, item: BasketItem) -> Result<()> {
        self.dispatch(TrackingEvent::add_to_basket(item)?);
        Ok(())
    }

    /// Record an item removed from the basket
    ///
    /// # Errors
    /// Same contract as [`Self::add_to_basket`].
    pub fn remove_from_basket(&self, item: BasketItem) -> Result<()> {
        self.dispatch(TrackingEvent::remove_from_basket(item)?);
        Ok(())
    }

    /// Associate the session with a customer
    ///
    /// An email-shaped value (anything containing `@`) is hashed with
    /// SHA-256 salted by the namespace id before it enters the event;
    /// non-email values pass through unhashed.
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` when neither `email` nor
    /// `customer_id` is present.
    pub fn identify(&self, mut payload: IdentifyPayload) -> Result<()> {
        if let Some(email) = payload.email.take() {
            payload.email = Some(self.obfuscate(&email));
        }
        self.dispatch(TrackingEvent::identify(payload)?);
        Ok(())
    }

    /// Record a product-display-page view
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` for an empty `sku`.
    pub fn product_display_page(&self, payload: ProductPagePayload) -> Result<()> {
        self.dispatch(TrackingEvent::product_display_page(payload)?);
        Ok(())
    }

    /// Record a product-list-page view
    pub fn product_list_page(&self, payload: ProductListPayload) {
        self.dispatch(TrackingEvent::product_list_page(payload));
    }

    /// Install the sink and drain the queue
    ///
    /// The one-shot "tracker became ready" transition: every queued event
    /// is delivered in arrival order, exactly once, then the queue is
    /// empty and subsequent events dispatch immediately.
    pub fn install_sink(&self, sink: Arc<dyn TrackingSink>) {
        let mut slot = self.sink.write();
        *slot = Some(sink.clone());

        // Drain while still holding the sink lock so no concurrent dispatch
        // can slip an event into the queue between drain and release.
        let queued: Vec<TrackingEvent> = self.queue.lock().drain(..).collect();
        if !queued.is_empty() {
            info!(count = queued.len(), "Draining queued tracking events");
        }
        for event in &queued {
            sink.deliver(event);
        }
    }

    /// Drop the sink (consent withdrawn or configuration change)
    ///
    /// Later events queue again until a new sink is installed.
    pub fn remove_sink(&self) {
        *self.sink.write() = None;
        debug!("Tracking sink removed");
    }

    /// Number of events waiting for a sink
    #[must_use]
    pub fn queued_len(&self) -> usize {
        self.queue.lock().len()
    }

    fn dispatch(&self, event: TrackingEvent) {
        let sink = self.sink.read();
        match sink.as_ref() {
            Some(sink) => {
                debug!(event = event.name(), "Dispatching tracking event");
                sink.deliver(&event);
            }
            None => {
                debug!(event = event.name(), "Queueing tracking event; no sink yet");
                self.queue.lock().push_back(event);
            }
        }
    }

    fn obfuscate(&self, value: &str) -> String {
        if !value.contains('@') {
            return value.to_string();
        }

        let mut hasher = Sha256::new();
        hasher.update(self.namespace_id.as_bytes());
        hasher.update(value.as_bytes());
        hex::encode(hasher.finalize())
    }
}

impl std::fmt::Debug for TrackingFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TrackingFacade")
            .field("namespace_id", &self.namespace_id)
            .field("has_sink", &self.sink.read().is_some())
            .field("queued", &self.queued_len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for the tracking facade.
    use parking_lot::Mutex;

    use super::*;

    /// Sink that records everything it is handed.
    #[derive(Default)]
    struct RecordingSink {
        delivered: Mutex<Vec<TrackingEvent>>,
    }

    impl TrackingSink for RecordingSink {
        fn deliver(&self, event: &TrackingEvent) {
            self.delivered.lock().push(event.clone());
        }
    }

    fn facade() -> TrackingFacade {
        TrackingFacade::new("test-namespace")
    }

    #[test]
    fn invalid_event_fails_synchronously_and_queues_nothing() {
        let facade = facade();

        let result = facade.add_to_basket(BasketItem::new("SKU-X", 0));
        assert!(result.is_err());
        assert_eq!(facade.queued_len(), 0);
    }

    #[test]
    fn events_queue_until_a_sink_exists_then_drain_in_order() {
        let facade = facade();

        facade.add_to_basket(BasketItem::new("SKU-1", 1)).unwrap();
        facade.product_list_page(ProductListPayload::default());
        facade.remove_from_basket(BasketItem::new("SKU-1", 1)).unwrap();
        assert_eq!(facade.queued_len(), 3);

        let sink = Arc::new(RecordingSink::default());
        facade.install_sink(sink.clone());

        let delivered = sink.delivered.lock();
        assert_eq!(delivered.len(), 3);
        assert_eq!(delivered[0].name(), "addToBasket");
        assert_eq!(delivered[1].name(), "productListPage");
        assert_eq!(delivered[2].name(), "removeFromBasket");
        drop(delivered);

        // Queue is spent; nothing delivers twice.
        assert_eq!(facade.queued_len(), 0);
        facade.install_sink(sink.clone());
        assert_eq!(sink.delivered.lock().len(), 3);
    }

    #[test]
    fn events_dispatch_immediately_once_sink_is_installed() {
        let facade = facade();
        let sink = Arc::new(RecordingSink::default());
        facade.install_sink(sink.clone());

        facade.add_to_basket(BasketItem::new("SKU-9", 2)).unwrap();

        let delivered = sink.delivered.lock();
        assert_eq!(delivered.len(), 1);
        assert_eq!(
            delivered[0],
            TrackingEvent::AddToBasket(BasketItem::new("SKU-9", 2))
        );
        assert_eq!(facade.queued_len(), 0);
    }

    #[test]
    fn removing_the_sink_queues_again() {
        let facade = facade();
        let sink = Arc::new(RecordingSink::default());
        facade.install_sink(sink.clone());
        facade.remove_sink();

        facade.add_to_basket(BasketItem::new("SKU-2", 1)).unwrap();

        assert_eq!(sink.delivered.lock().len(), 0);
        assert_eq!(facade.queued_len(), 1);
    }

    #[test]
    fn identify_hashes_email_shaped_values() {
        let facade = facade();
        let sink = Arc::new(RecordingSink::default());
        facade.install_sink(sink.clone());

        facade
            .identify(IdentifyPayload {
                email: Some("shopper@example.com".to_string()),
                customer_id: None,
            })
            .unwrap();

        // Independently computed SHA-256("test-namespace" + email).
        let mut hasher = Sha256::new();
        hasher.update(b"test-namespace");
        hasher.update(b"shopper@example.com");
        let expected = hex::encode(hasher.finalize());

        let delivered = sink.delivered.lock();
        let TrackingEvent::Identify(payload) = &delivered[0] else {
            panic!("expected identify event");
        };
        assert_eq!(payload.email.as_deref(), Some(expected.as_str()));
        assert_eq!(expected.len(), 64);
    }

    #[test]
    fn identify_passes_non_email_values_through() {
        let facade = facade();
        let sink = Arc::new(RecordingSink::default());
        facade.install_sink(sink.clone());

        facade
            .identify(IdentifyPayload {
                email: Some("already-a-hash-1234".to_string()),
                customer_id: None,
            })
            .unwrap();

        let delivered = sink.delivered.lock();
        let TrackingEvent::Identify(payload) = &delivered[0] else {
            panic!("expected identify event");
        };
        assert_eq!(payload.email.as_deref(), Some("already-a-hash-1234"));
    }

    #[test]
    fn identify_without_identifiers_is_rejected() {
        let facade = facade();
        assert!(facade.identify(IdentifyPayload::default()).is_err());
        assert_eq!(facade.queued_len(), 0);
    }
}
