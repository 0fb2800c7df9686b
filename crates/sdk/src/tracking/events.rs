//! Tracking events
//!
//! A closed set of event kinds, each with a typed payload, dispatched by
//! matching on the variant. Validation happens at construction: an invalid
//! payload never becomes an event, so nothing invalid can ever sit in the
//! queue.

use dressipi_domain::{DressipiError, Result};
use serde::{Deserialize, Serialize};

/// Line item of an order event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub sku: String,
    pub quantity: u32,
    #[serde(default)]
    pub unit_price: Option<f64>,
}

/// Payload of an order (purchase confirmation) event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderPayload {
    pub order_id: String,
    #[serde(default)]
    pub total_value: Option<f64>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub items: Vec<OrderItem>,
}

/// Payload of a basket add/remove event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BasketItem {
    pub sku: String,
    pub quantity: u32,
}

impl BasketItem {
    #[must_use]
    pub fn new(sku: impl Into<String>, quantity: u32) -> Self {
        Self { sku: sku.into(), quantity }
    }
}

/// Payload of an identify event
///
/// `email` may already be hashed by the facade before the event is built;
/// the payload itself is transport-agnostic.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct IdentifyPayload {
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub customer_id: Option<String>,
}

/// Payload of a product-display-page event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductPagePayload {
    pub sku: String,
}

/// Payload of a product-list-page event
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ProductListPayload {
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub skus: Vec<String>,
}

/// One tracking event, validated at construction
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event", content = "data")]
pub enum TrackingEvent {
    #[serde(rename = "order")]
    Order(OrderPayload),
    #[serde(rename = "addToBasket")]
    AddToBasket(BasketItem),
    #[serde(rename = "removeFromBasket")]
    RemoveFromBasket(BasketItem),
    #[serde(rename = "identify")]
    Identify(IdentifyPayload),
    #[serde(rename = "productDisplayPage")]
    ProductDisplayPage(ProductPagePayload),
    #[serde(rename = "productListPage")]
    ProductListPage(ProductListPayload),
}

impl TrackingEvent {
    /// Build an order event
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` when `order_id` is empty.
    pub fn order(payload: OrderPayload) -> Result<Self> {
        if payload.order_id.is_empty() {
            return Err(DressipiError::Validation("Order event requires an order_id".to_string()));
        }
        Ok(Self::Order(payload))
    }

    /// Build an add-to-basket event
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` when `sku` is empty or
    /// `quantity` is zero.
    pub fn add_to_basket(item: BasketItem) -> Result<Self> {
        validate_basket_item(&item, "Add to basket")?;
        Ok(Self::AddToBasket(item))
    }

    /// Build a remove-from-basket event
    ///
    /// # Errors
    /// Same contract as [`TrackingEvent::add_to_basket`].
    pub fn remove_from_basket(item: BasketItem) -> Result<Self> {
        validate_basket_item(&item, "Remove from basket")?;
        Ok(Self::RemoveFromBasket(item))
    }

    /// Build an identify event
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` when neither `email` nor
    /// `customer_id` is present.
    pub fn identify(payload: IdentifyPayload) -> Result<Self> {
        let has_email = payload.email.as_deref().is_some_and(|e| !e.is_empty());
        let has_customer = payload.customer_id.as_deref().is_some_and(|c| !c.is_empty());
        if !has_email && !has_customer {
            return Err(DressipiError::Validation(
                "Identify event requires an email or a customer_id".to_string(),
            ));
        }
        Ok(Self::Identify(payload))
    }

    /// Build a product-display-page event
    ///
    /// # Errors
    /// Returns `DressipiError::Validation` when `sku` is empty.
    pub fn product_display_page(payload: ProductPagePayload) -> Result<Self> {
        if payload.sku.is_empty() {
            return Err(DressipiError::Validation(
                "Product display page event requires a sku".to_string(),
            ));
        }
        Ok(Self::ProductDisplayPage(payload))
    }

    /// Build a product-list-page event (nothing to validate)
    #[must_use]
    pub fn product_list_page(payload: ProductListPayload) -> Self {
        Self::ProductListPage(payload)
    }

    /// Wire name of the event kind
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Self::Order(_) => "order",
            Self::AddToBasket(_) => "addToBasket",
            Self::RemoveFromBasket(_) => "removeFromBasket",
            Self::Identify(_) => "identify",
            Self::ProductDisplayPage(_) => "productDisplayPage",
            Self::ProductListPage(_) => "productListPage",
        }
    }
}

fn validate_basket_item(item: &BasketItem, operation: &str) -> Result<()> {
    if item.sku.is_empty() {
        return Err(DressipiError::Validation(format!("{operation} event requires a sku")));
    }
    if item.quantity == 0 {
        return Err(DressipiError::Validation(format!(
            "{operation} event requires a non-zero quantity"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    //! Unit tests for event construction.
    use super::*;

    #[test]
    fn add_to_basket_requires_sku_and_quantity() {
        assert!(TrackingEvent::add_to_basket(BasketItem::new("", 1)).is_err());
        assert!(TrackingEvent::add_to_basket(BasketItem::new("SKU-X", 0)).is_err());

        let event = TrackingEvent::add_to_basket(BasketItem::new("SKU-X", 1)).unwrap();
        assert_eq!(event.name(), "addToBasket");
    }

    #[test]
    fn identify_requires_email_or_customer_id() {
        assert!(TrackingEvent::identify(IdentifyPayload::default()).is_err());

        let by_email = IdentifyPayload { email: Some("a@example.com".into()), customer_id: None };
        assert!(TrackingEvent::identify(by_email).is_ok());

        let by_customer = IdentifyPayload { email: None, customer_id: Some("c-1".into()) };
        assert!(TrackingEvent::identify(by_customer).is_ok());

        // Present but empty does not count.
        let empty = IdentifyPayload { email: Some(String::new()), customer_id: None };
        assert!(TrackingEvent::identify(empty).is_err());
    }

    #[test]
    fn order_requires_order_id() {
        assert!(TrackingEvent::order(OrderPayload::default()).is_err());

        let payload = OrderPayload { order_id: "ord-1".into(), ..OrderPayload::default() };
        assert_eq!(TrackingEvent::order(payload).unwrap().name(), "order");
    }

    #[test]
    fn events_serialize_with_wire_names() {
        let event = TrackingEvent::add_to_basket(BasketItem::new("SKU-X", 2)).unwrap();
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["event"], "addToBasket");
        assert_eq!(json["data"]["sku"], "SKU-X");
        assert_eq!(json["data"]["quantity"], 2);
    }
}
