//! # API REST
//!
//! REST API implementation for the herbal service.
//!
//! Handles:
//! - HTTP endpoints with axum
//! - OpenAPI/Swagger documentation
//! - REST-specific concerns (JSON serialization, CORS, status codes)
//!
//! Uses `api-shared` for wire types and `herbal-core` for everything else.

#![warn(rust_2018_idioms)]

pub mod error;
pub mod routes;
pub mod state;

pub use state::{AppState, Session};

use api_shared::{HealthRes, HealthService};
use axum::{
    extract::State,
    response::Json,
    routing::{get, post, put},
    Router,
};
use routes::{account, distribution, encyclopedia, export, mixer, newsletter, shop};
use tower_http::cors::CorsLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
        encyclopedia::list_herbs,
        encyclopedia::herb_categories,
        encyclopedia::get_herb,
        encyclopedia::check_interactions,
        encyclopedia::list_preparations,
        encyclopedia::list_conditions,
        encyclopedia::get_condition,
        mixer::recommend,
        mixer::list_ingredients,
        mixer::get_draft,
        mixer::add_draft_item,
        mixer::update_draft_item,
        mixer::remove_draft_item,
        mixer::validate_blend,
        mixer::list_favorites,
        mixer::save_favorite,
        mixer::delete_favorite,
        shop::list_products,
        shop::get_product,
        shop::get_cart,
        shop::clear_cart,
        shop::add_cart_item,
        shop::update_cart_item,
        shop::remove_cart_item,
        shop::checkout,
        account::login,
        account::register,
        account::logout,
        account::me,
        newsletter::subscribe,
        newsletter::list_subscribers,
        newsletter::set_subscribed,
        newsletter::list_sent,
        newsletter::send_newsletter,
        distribution::list_distribution,
        distribution::list_regions,
        distribution::add_record,
        distribution::add_location,
        distribution::remove_location,
        export::csv_template_download,
    ),
    components(schemas(
        HealthRes,
        herbal_core::catalog::Herb,
        herbal_core::catalog::Dosage,
        herbal_core::catalog::HerbInteraction,
        herbal_core::catalog::InteractionEffect,
        herbal_core::catalog::DrugHerbInteraction,
        herbal_core::catalog::Severity,
        herbal_core::catalog::PreparationMethod,
        herbal_core::catalog::Condition,
        herbal_core::catalog::Remedy,
        herbal_core::encyclopedia::HerbSummary,
        herbal_core::encyclopedia::HerbDetail,
        herbal_core::encyclopedia::RemedyUse,
        herbal_core::encyclopedia::InteractionReport,
        herbal_core::encyclopedia::ConditionDetail,
        herbal_core::encyclopedia::ResolvedRemedy,
        herbal_core::classifier::InterestFlags,
        herbal_core::mixer::Recommendation,
        herbal_core::mixer::MixerHerb,
        herbal_core::mixer::HerbProperty,
        herbal_core::mixer::BlendCategory,
        herbal_core::mixer::Complexity,
        herbal_core::mixer::ModelTier,
        herbal_core::mixer::Purpose,
        herbal_core::favorites::Favorite,
        herbal_core::ingredients::Ingredient,
        herbal_core::ingredients::BlendDraft,
        herbal_core::ingredients::SelectedIngredient,
        herbal_core::ingredients::Unit,
        herbal_core::ingredients::BlendForm,
        herbal_core::ingredients::FormCategory,
        herbal_core::ingredients::FieldError,
        herbal_core::store::Product,
        herbal_core::cart::CartItem,
        herbal_core::cart::CartSummary,
        herbal_core::checkout::CheckoutForm,
        herbal_core::checkout::ShippingMethod,
        herbal_core::checkout::PaymentMethod,
        herbal_core::checkout::Order,
        herbal_core::checkout::OrderSummary,
        herbal_core::auth::User,
        herbal_core::auth::Role,
        herbal_core::newsletter::Subscriber,
        herbal_core::newsletter::SentNewsletter,
        herbal_core::newsletter::NewsletterStatus,
        herbal_core::newsletter::SubscriberSort,
        herbal_core::search::SortDirection,
        herbal_core::distribution::DistributionRecord,
        herbal_core::distribution::RegionSummary,
        api_shared::InteractionCheckReq,
        api_shared::RecommendReq,
        api_shared::RecommendRes,
        api_shared::IngredientsRes,
        api_shared::AddDraftItemReq,
        api_shared::UpdateDraftItemReq,
        api_shared::BlendValidationRes,
        api_shared::SaveFavoriteRes,
        api_shared::AddCartItemReq,
        api_shared::UpdateCartItemReq,
        api_shared::LoginReq,
        api_shared::RegisterReq,
        api_shared::SubscribeReq,
        api_shared::SendNewsletterReq,
        api_shared::SetSubscribedReq,
        api_shared::AddLocationReq,
        api_shared::AddDistributionReq,
    ))
)]
pub struct ApiDoc;

/// Build the REST router with Swagger UI and permissive CORS.
///
/// # Arguments
/// * `state` - Shared catalog and session state, cloned into every handler.
///
/// # Returns
/// A router ready to be served by `axum::serve`.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/herbs", get(encyclopedia::list_herbs))
        .route("/herbs/categories", get(encyclopedia::herb_categories))
        .route("/herbs/:id", get(encyclopedia::get_herb))
        .route("/interactions/check", post(encyclopedia::check_interactions))
        .route("/preparations", get(encyclopedia::list_preparations))
        .route("/conditions", get(encyclopedia::list_conditions))
        .route("/conditions/:id", get(encyclopedia::get_condition))
        .route("/mixer/recommendations", post(mixer::recommend))
        .route("/mixer/ingredients", get(mixer::list_ingredients))
        .route("/mixer/draft", get(mixer::get_draft))
        .route("/mixer/draft/items", post(mixer::add_draft_item))
        .route(
            "/mixer/draft/items/:id",
            put(mixer::update_draft_item).delete(mixer::remove_draft_item),
        )
        .route("/mixer/blends/validate", post(mixer::validate_blend))
        .route(
            "/mixer/favorites",
            get(mixer::list_favorites).post(mixer::save_favorite),
        )
        .route(
            "/mixer/favorites/:id",
            axum::routing::delete(mixer::delete_favorite),
        )
        .route("/products", get(shop::list_products))
        .route("/products/:id", get(shop::get_product))
        .route("/cart", get(shop::get_cart).delete(shop::clear_cart))
        .route("/cart/items", post(shop::add_cart_item))
        .route(
            "/cart/items/:id",
            put(shop::update_cart_item).delete(shop::remove_cart_item),
        )
        .route("/checkout", post(shop::checkout))
        .route("/auth/login", post(account::login))
        .route("/auth/register", post(account::register))
        .route("/auth/logout", post(account::logout))
        .route("/auth/me", get(account::me))
        .route("/newsletter/subscribe", post(newsletter::subscribe))
        .route("/newsletter/subscribers", get(newsletter::list_subscribers))
        .route(
            "/newsletter/subscribers/:id",
            put(newsletter::set_subscribed),
        )
        .route("/newsletter/sent", get(newsletter::list_sent))
        .route("/newsletter/send", post(newsletter::send_newsletter))
        .route(
            "/distribution",
            get(distribution::list_distribution).post(distribution::add_record),
        )
        .route("/distribution/regions", get(distribution::list_regions))
        .route(
            "/distribution/:id/locations",
            post(distribution::add_location),
        )
        .route(
            "/distribution/:id/locations/:location",
            axum::routing::delete(distribution::remove_location),
        )
        .route("/export/template.csv", get(export::csv_template_download))
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint for the REST API
///
/// Reports whether a non-empty catalog is loaded. Used for monitoring and load balancer
/// health checks.
async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.catalog.herbs().len()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request, StatusCode};
    use herbal_core::local_store::{LocalStore, MemoryStore};
    use herbal_core::{Catalog, HerbalError, HerbalResult};
    use serde_json::{json, Value};
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::Arc;
    use tower::ServiceExt;

    /// Memory store whose writes fail while `fail_writes` is set.
    struct FlakyStore {
        inner: MemoryStore,
        fail_writes: Arc<AtomicBool>,
    }

    impl FlakyStore {
        fn check(&self) -> HerbalResult<()> {
            if self.fail_writes.load(Ordering::SeqCst) {
                let io = std::io::Error::new(std::io::ErrorKind::Other, "disk full");
                return Err(HerbalError::StoreWrite(io));
            }
            Ok(())
        }
    }

    impl LocalStore for FlakyStore {
        fn get(&self, key: &str) -> HerbalResult<Option<String>> {
            self.inner.get(key)
        }

        fn set(&mut self, key: &str, value: String) -> HerbalResult<()> {
            self.check()?;
            self.inner.set(key, value)
        }

        fn remove(&mut self, key: &str) -> HerbalResult<()> {
            self.check()?;
            self.inner.remove(key)
        }
    }

    fn app() -> Router {
        let catalog = Catalog::builtin().expect("catalog");
        router(AppState::new(catalog, Box::new(MemoryStore::new()), Some(7)))
    }

    fn get_req(uri: &str) -> Request<Body> {
        Request::builder()
            .method("GET")
            .uri(uri)
            .body(Body::empty())
            .unwrap()
    }

    fn json_req(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn send(app: &Router, req: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(req).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), 1 << 20).await.unwrap();
        let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, value)
    }

    async fn login_admin(app: &Router) {
        let (status, _) = send(
            app,
            json_req(
                "POST",
                "/auth/login",
                json!({"email": "admin@herbalalchemy.com", "password": "admin123"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    fn names(value: &Value) -> Vec<String> {
        value
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["name"].as_str().unwrap().to_string())
            .collect()
    }

    #[tokio::test]
    async fn health_reports_catalog_size() {
        let (status, body) = send(&app(), get_req("/health")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["ok"], true);
        assert_eq!(body["herbs"], 5);
    }

    #[tokio::test]
    async fn empty_query_lists_every_herb_sorted() {
        let (status, body) = send(&app(), get_req("/herbs")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            names(&body),
            vec!["Chamomile", "Jahe", "Kunyit", "Peppermint", "Valerian"]
        );

        let (_, desc) = send(&app(), get_req("/herbs?sort=desc")).await;
        assert_eq!(names(&desc).first().map(String::as_str), Some("Valerian"));
    }

    #[tokio::test]
    async fn category_filter_ignores_case() {
        let (_, body) = send(&app(), get_req("/herbs?category=anti-inflamasi")).await;
        assert_eq!(names(&body), vec!["Chamomile", "Jahe", "Kunyit"]);
    }

    #[tokio::test]
    async fn unknown_herb_is_404() {
        let (status, _) = send(&app(), get_req("/herbs/ginseng")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, body) = send(&app(), get_req("/herbs/turmeric")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["herb"]["name"], "Kunyit");
        assert_eq!(body["drug_interactions"][0]["drug"], "Warfarin");
    }

    #[tokio::test]
    async fn sleep_prompt_gets_calming_blend() {
        let (status, body) = send(
            &app(),
            json_req(
                "POST",
                "/mixer/recommendations",
                json!({"prompt": "saya ingin tidur nyenyak"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["flags"]["relaxation"], true);
        assert_eq!(body["flags"]["energy"], false);

        let recs = body["recommendations"].as_array().unwrap();
        assert_eq!(recs.len(), 3);
        assert_eq!(recs[0]["name"], "Ramuan Penenang");
        assert_eq!(recs[0]["herbs"][0]["name"], "Sereh");
        assert_eq!(recs[0]["rating"], 4.9);
    }

    #[tokio::test]
    async fn blank_prompt_is_rejected() {
        let (status, _) = send(
            &app(),
            json_req("POST", "/mixer/recommendations", json!({"prompt": "   "})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn favorites_deduplicate_by_content() {
        let app = app();
        let (_, body) = send(
            &app,
            json_req("POST", "/mixer/recommendations", json!({"prompt": "lelah"})),
        )
        .await;
        let rec = body["recommendations"][0].clone();

        let (status, first) =
            send(&app, json_req("POST", "/mixer/favorites", rec.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        let (status, second) = send(&app, json_req("POST", "/mixer/favorites", rec)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(second["added"], false);
        assert_eq!(first["favorite"]["id"], second["favorite"]["id"]);

        let id = first["favorite"]["id"].as_str().unwrap().to_string();
        let delete = Request::builder()
            .method("DELETE")
            .uri(format!("/mixer/favorites/{id}"))
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::OK);
        let (_, list) = send(&app, get_req("/mixer/favorites")).await;
        assert!(list.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn blend_validation_reports_every_field() {
        let (status, body) = send(
            &app(),
            json_req("POST", "/mixer/blends/validate", json!({"name": "A"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["valid"], false);
        assert_eq!(body["errors"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn cart_checkout_flow() {
        let app = app();
        let (status, cart) = send(
            &app,
            json_req("POST", "/cart/items", json!({"product_id": "3", "quantity": 100})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["total_items"], 15);

        let (status, cart) = send(
            &app,
            json_req("PUT", "/cart/items/3", json!({"quantity": 0})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["total_items"], 1);
        assert_eq!(cart["total_formatted"], "Rp 85.000");

        let (status, _) = send(
            &app,
            json_req("POST", "/cart/items", json!({"product_id": "99"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _) = send(&app, json_req("POST", "/checkout", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let form = json!({
            "fullName": "Sari Wulandari",
            "email": "sari@example.com",
            "phone": "08123456789",
            "address": "Jl. Melati 5",
            "city": "Yogyakarta",
            "postalCode": "55281",
            "shipping": "express"
        });
        let (status, order) = send(&app, json_req("POST", "/checkout", form.clone())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order["summary"]["total"], 115_000);

        let (_, cart) = send(&app, get_req("/cart")).await;
        assert_eq!(cart["total_items"], 0);
        let (status, _) = send(&app, json_req("POST", "/checkout", form)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn auth_session_lifecycle() {
        let app = app();
        let (status, _) = send(&app, get_req("/auth/me")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, _) = send(
            &app,
            json_req(
                "POST",
                "/auth/login",
                json!({"email": "admin@herbalalchemy.com", "password": "wrong"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        let (status, user) = send(
            &app,
            json_req(
                "POST",
                "/auth/register",
                json!({"name": "Budi", "email": "budi@example.com", "password": "rahasia"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(user["id"], "3");
        assert_eq!(user["role"], "user");

        let (status, _) = send(
            &app,
            json_req(
                "POST",
                "/auth/register",
                json!({"name": "Budi", "email": "budi@example.com", "password": "rahasia"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(&app, get_req("/newsletter/subscribers")).await;
        assert_eq!(status, StatusCode::FORBIDDEN);

        let (status, _) = send(&app, json_req("POST", "/auth/logout", json!({}))).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (status, _) = send(&app, get_req("/newsletter/subscribers")).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn newsletter_admin_tools() {
        let app = app();
        let (status, sub) = send(
            &app,
            json_req(
                "POST",
                "/newsletter/subscribe",
                json!({"email": "baru@example.com"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(sub["subscribed"], true);

        let (status, _) = send(
            &app,
            json_req(
                "POST",
                "/newsletter/subscribe",
                json!({"email": "baru@example.com"}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);

        login_admin(&app).await;
        let (status, list) = send(&app, get_req("/newsletter/subscribers")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(list[0]["email"], "baru@example.com");

        let (status, _) = send(
            &app,
            json_req(
                "POST",
                "/newsletter/send",
                json!({"subject": "Edisi Baru", "content": ""}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (status, sent) = send(
            &app,
            json_req(
                "POST",
                "/newsletter/send",
                json!({"subject": "Edisi Baru", "content": "Resep jamu minggu ini."}),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(sent["status"], "sent");
    }

    #[tokio::test]
    async fn distribution_locations_require_admin() {
        let app = app();
        let add = || json_req("POST", "/distribution/5/locations", json!({"location": "Bali"}));

        let (status, _) = send(&app, add()).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);

        login_admin(&app).await;
        let (status, record) = send(&app, add()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(record["locations"], json!(["Jawa", "Bali"]));

        let (status, _) = send(&app, add()).await;
        assert_eq!(status, StatusCode::CONFLICT);

        let (status, _) = send(
            &app,
            json_req("POST", "/distribution/5/locations", json!({"location": "Maluku"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let (_, regions) = send(&app, get_req("/distribution/regions")).await;
        let bali = &regions.as_array().unwrap()[5];
        assert_eq!(bali["name"], "Bali");
        assert!(!bali["herbs"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn csv_template_is_served_to_admins() {
        let app = app();
        login_admin(&app).await;
        let response = app
            .clone()
            .oneshot(get_req("/export/template.csv"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/csv; charset=utf-8"
        );
        let bytes = to_bytes(response.into_body(), 1 << 16).await.unwrap();
        let text = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(text.starts_with("Nama Herbal,Nama Latin"));
    }

    fn checkout_form() -> Value {
        json!({
            "fullName": "Sari Wulandari",
            "email": "sari@example.com",
            "phone": "08123456789",
            "address": "Jl. Melati 5",
            "city": "Yogyakarta",
            "postalCode": "55281"
        })
    }

    #[tokio::test]
    async fn failed_cart_write_keeps_previous_cart() {
        let fail_writes = Arc::new(AtomicBool::new(false));
        let store = FlakyStore {
            inner: MemoryStore::new(),
            fail_writes: Arc::clone(&fail_writes),
        };
        let catalog = Catalog::builtin().expect("catalog");
        let app = router(AppState::new(catalog, Box::new(store), Some(7)));

        let (status, _) = send(
            &app,
            json_req("POST", "/cart/items", json!({"product_id": "1", "quantity": 2})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        fail_writes.store(true, Ordering::SeqCst);
        let (status, _) = send(&app, json_req("POST", "/checkout", checkout_form())).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, cart) = send(&app, get_req("/cart")).await;
        assert_eq!(cart["total_items"], 2);

        let (status, _) = send(
            &app,
            json_req("POST", "/cart/items", json!({"product_id": "2"})),
        )
        .await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let delete = Request::builder()
            .method("DELETE")
            .uri("/cart")
            .body(Body::empty())
            .unwrap();
        let (status, _) = send(&app, delete).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        let (_, cart) = send(&app, get_req("/cart")).await;
        assert_eq!(cart["total_items"], 2);
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);

        fail_writes.store(false, Ordering::SeqCst);
        let (status, order) = send(&app, json_req("POST", "/checkout", checkout_form())).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(order["summary"]["subtotal"], 70_000);
        let (_, cart) = send(&app, get_req("/cart")).await;
        assert_eq!(cart["total_items"], 0);
    }

    #[tokio::test]
    async fn product_detail_by_id() {
        let app = app();
        let (status, product) = send(&app, get_req("/products/1")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(product["name"], "Jahe Merah Bubuk Premium");
        assert_eq!(product["price"], 35_000);

        let response = app.clone().oneshot(get_req("/products/99")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let bytes = to_bytes(response.into_body(), 1 << 10).await.unwrap();
        assert_eq!(&bytes[..], b"Product not found");
    }

    #[tokio::test]
    async fn blend_draft_lifecycle() {
        let app = app();
        let add = || json_req("POST", "/mixer/draft/items", json!({"ingredient_id": "1"}));

        let (status, draft) = send(&app, add()).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(draft["items"][0]["ingredient"]["name"], "Jahe");
        assert_eq!(draft["items"][0]["amount"], "1");
        assert_eq!(draft["items"][0]["unit"], "sendok teh");

        let (status, draft) = send(&app, add()).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(draft["items"].as_array().unwrap().len(), 1);

        let (status, _) = send(
            &app,
            json_req("POST", "/mixer/draft/items", json!({"ingredient_id": "99"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, draft) = send(
            &app,
            json_req("PUT", "/mixer/draft/items/1", json!({"amount": "2", "unit": "gram"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(draft["items"][0]["amount"], "2");
        assert_eq!(draft["items"][0]["unit"], "gram");

        let (status, draft) = send(
            &app,
            json_req("PUT", "/mixer/draft/items/1", json!({"unit": "ml"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(draft["items"][0]["amount"], "2");

        let (status, _) = send(
            &app,
            json_req("PUT", "/mixer/draft/items/2", json!({"amount": "3"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let remove = || {
            Request::builder()
                .method("DELETE")
                .uri("/mixer/draft/items/1")
                .body(Body::empty())
                .unwrap()
        };
        let (status, _) = send(&app, remove()).await;
        assert_eq!(status, StatusCode::OK);
        let (status, _) = send(&app, remove()).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, draft) = send(&app, get_req("/mixer/draft")).await;
        assert!(draft["items"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn openapi_document_is_served() {
        let (status, doc) = send(&app(), get_req("/api-docs/openapi.json")).await;
        assert_eq!(status, StatusCode::OK);
        assert!(doc["paths"]["/mixer/recommendations"].is_object());
    }
}
