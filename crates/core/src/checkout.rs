//! Checkout: form validation and order summary. No payment is taken.

use crate::cart::{Cart, CartItem};
use crate::constants::{SHIPPING_EXPRESS_IDR, SHIPPING_REGULAR_IDR};
use crate::store::format_idr;
use crate::{HerbalError, HerbalResult};
use chrono::{DateTime, Utc};
use herbal_types::EmailAddress;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShippingMethod {
    #[default]
    Regular,
    Express,
}

impl ShippingMethod {
    pub fn cost(self) -> u64 {
        match self {
            ShippingMethod::Regular => SHIPPING_REGULAR_IDR,
            ShippingMethod::Express => SHIPPING_EXPRESS_IDR,
        }
    }
}

/// Chosen payment method. Recorded on the order only.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    #[default]
    Transfer,
    Ewallet,
    Cod,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutForm {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub shipping: ShippingMethod,
    #[serde(default)]
    pub payment: PaymentMethod,
}

impl CheckoutForm {
    /// Names of required fields that are blank, in form order.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("fullName", &self.full_name),
            ("email", &self.email),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("postalCode", &self.postal_code),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct OrderSummary {
    pub subtotal: u64,
    pub shipping: u64,
    pub total: u64,
    pub subtotal_formatted: String,
    pub shipping_formatted: String,
    pub total_formatted: String,
}

impl OrderSummary {
    pub fn new(subtotal: u64, shipping: ShippingMethod) -> Self {
        let shipping = shipping.cost();
        let total = subtotal.saturating_add(shipping);
        Self {
            subtotal,
            shipping,
            total,
            subtotal_formatted: format_idr(subtotal),
            shipping_formatted: format_idr(shipping),
            total_formatted: format_idr(total),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: Uuid,
    pub placed_at: DateTime<Utc>,
    pub customer_name: String,
    pub email: String,
    pub shipping_method: ShippingMethod,
    pub payment_method: PaymentMethod,
    pub items: Vec<CartItem>,
    pub summary: OrderSummary,
}

/// Validate `form`, build the order from `cart` and empty the cart.
///
/// # Errors
///
/// * [`HerbalError::EmptyCart`] if the cart has no items.
/// * [`HerbalError::MissingFields`] listing every blank required field.
/// * [`HerbalError::InvalidInput`] if the email is malformed.
///
/// The cart is left untouched on error.
pub fn place_order(cart: &mut Cart, form: &CheckoutForm) -> HerbalResult<Order> {
    if cart.is_empty() {
        return Err(HerbalError::EmptyCart);
    }

    let missing = form.missing_fields();
    if !missing.is_empty() {
        tracing::warn!(?missing, "checkout rejected");
        return Err(HerbalError::MissingFields(missing));
    }
    let email = EmailAddress::parse(&form.email)?;

    let order = Order {
        id: Uuid::new_v4(),
        placed_at: Utc::now(),
        customer_name: form.full_name.trim().to_string(),
        email: email.to_string(),
        shipping_method: form.shipping,
        payment_method: form.payment,
        items: cart.items().to_vec(),
        summary: OrderSummary::new(cart.total_amount(), form.shipping),
    };
    cart.clear();

    tracing::info!(order = %order.id, total = order.summary.total, "order placed");
    Ok(order)
}
