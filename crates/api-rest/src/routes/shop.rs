//! Storefront: products, cart and checkout.
//!
//! Cart mutations work on a copy that replaces the session cart only after it has been
//! written to the local store.

use crate::error::{map_error, not_found, ApiError};
use crate::state::{AppState, Session};
use api_shared::{AddCartItemReq, ProductsQuery, UpdateCartItemReq};
use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Json,
};
use herbal_core::cart::{Cart, CartSummary};
use herbal_core::checkout::{self, CheckoutForm, Order};
use herbal_core::store::{filter_products, Product};
use herbal_core::HerbalError;

fn saved_summary(session: &mut Session, cart: Cart) -> Result<Json<CartSummary>, ApiError> {
    session.commit_cart(cart).map_err(map_error)?;
    Ok(Json(session.cart.summary()))
}

#[utoipa::path(
    get,
    path = "/products",
    params(ProductsQuery),
    responses(
        (status = 200, description = "Products matching the filters, catalog order", body = [Product])
    )
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(query): Query<ProductsQuery>,
) -> Json<Vec<Product>> {
    let products = filter_products(
        state.catalog.products(),
        query.q.as_deref().unwrap_or_default(),
        query.category.as_deref(),
    );
    Json(products.into_iter().cloned().collect())
}

#[utoipa::path(
    get,
    path = "/products/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Product detail", body = Product),
        (status = 404, description = "Product not found")
    )
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    state
        .catalog
        .product(&id)
        .cloned()
        .map(Json)
        .ok_or_else(|| not_found("Product not found"))
}

#[utoipa::path(
    get,
    path = "/cart",
    responses(
        (status = 200, description = "Cart contents and totals", body = CartSummary),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn get_cart(State(state): State<AppState>) -> Result<Json<CartSummary>, ApiError> {
    let session = state.session()?;
    Ok(Json(session.cart.summary()))
}

#[utoipa::path(
    delete,
    path = "/cart",
    responses(
        (status = 200, description = "Cart emptied", body = CartSummary),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn clear_cart(State(state): State<AppState>) -> Result<Json<CartSummary>, ApiError> {
    let mut session = state.session()?;
    saved_summary(&mut session, Cart::default())
}

#[utoipa::path(
    post,
    path = "/cart/items",
    request_body = AddCartItemReq,
    responses(
        (status = 200, description = "Item added; quantity capped at stock", body = CartSummary),
        (status = 400, description = "Zero quantity or out of stock"),
        (status = 404, description = "Product not found"),
        (status = 500, description = "Internal server error")
    )
)]
/// Add a product to the cart
///
/// Adding a product already in the cart increases its quantity.
///
/// # Errors
/// Returns `404 Not Found` for an unknown product and `400 Bad Request` for a zero quantity
/// or a product without stock.
#[axum::debug_handler]
pub async fn add_cart_item(
    State(state): State<AppState>,
    Json(req): Json<AddCartItemReq>,
) -> Result<Json<CartSummary>, ApiError> {
    let product = state
        .catalog
        .product(&req.product_id)
        .ok_or_else(|| map_error(HerbalError::UnknownProduct(req.product_id.clone())))?;

    let mut session = state.session()?;
    let mut cart = session.cart.clone();
    cart.add(product, req.quantity).map_err(map_error)?;
    saved_summary(&mut session, cart)
}

#[utoipa::path(
    put,
    path = "/cart/items/{id}",
    params(("id" = String, Path, description = "Product id")),
    request_body = UpdateCartItemReq,
    responses(
        (status = 200, description = "Quantity set, clamped to [1, stock]", body = CartSummary),
        (status = 404, description = "Product not in cart"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn update_cart_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(req): Json<UpdateCartItemReq>,
) -> Result<Json<CartSummary>, ApiError> {
    let mut session = state.session()?;
    let mut cart = session.cart.clone();
    if cart.update_quantity(&id, req.quantity).is_none() {
        return Err(not_found("Product not in cart"));
    }
    saved_summary(&mut session, cart)
}

#[utoipa::path(
    delete,
    path = "/cart/items/{id}",
    params(("id" = String, Path, description = "Product id")),
    responses(
        (status = 200, description = "Item removed", body = CartSummary),
        (status = 404, description = "Product not in cart"),
        (status = 500, description = "Internal server error")
    )
)]
pub async fn remove_cart_item(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<CartSummary>, ApiError> {
    let mut session = state.session()?;
    let mut cart = session.cart.clone();
    if cart.remove(&id).is_none() {
        return Err(not_found("Product not in cart"));
    }
    saved_summary(&mut session, cart)
}

#[utoipa::path(
    post,
    path = "/checkout",
    request_body = CheckoutForm,
    responses(
        (status = 201, description = "Order placed and cart cleared", body = Order),
        (status = 400, description = "Empty cart, missing fields or malformed email"),
        (status = 500, description = "Internal server error")
    )
)]
/// Place an order for the cart contents
///
/// No payment is taken. The cart is cleared only when the order is accepted and the emptied
/// cart has been written to the local store.
///
/// # Errors
/// Returns `400 Bad Request` if the cart is empty or the form is incomplete, and
/// `500 Internal Server Error` if the local store cannot be written; the cart is kept then.
pub async fn checkout(
    State(state): State<AppState>,
    Json(form): Json<CheckoutForm>,
) -> Result<(StatusCode, Json<Order>), ApiError> {
    let mut session = state.session()?;
    let mut cart = session.cart.clone();
    let order = checkout::place_order(&mut cart, &form).map_err(map_error)?;
    session.commit_cart(cart).map_err(map_error)?;
    Ok((StatusCode::CREATED, Json(order)))
}
