//! Request bodies, query strings and response bodies of the REST API.
//!
//! Domain records (herbs, products, recommendations) are served as their core types; the
//! types here only wrap what the core does not already model.

use herbal_core::classifier::InterestFlags;
use herbal_core::favorites::Favorite;
use herbal_core::ingredients::{FieldError, Ingredient, Unit};
use herbal_core::mixer::{ModelTier, Purpose, Recommendation};
use herbal_core::newsletter::SubscriberSort;
use herbal_core::search::SortDirection;
use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};

// ============================================================================
// Query strings
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct HerbsQuery {
    /// Free text matched against name, latin name and description.
    pub q: Option<String>,
    /// Category tag, compared case-insensitively.
    pub category: Option<String>,
    pub sort: Option<SortDirection>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct TextQuery {
    pub q: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct IngredientsQuery {
    pub q: Option<String>,
    /// Property substring; `all` disables the filter.
    pub property: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ProductsQuery {
    pub q: Option<String>,
    /// Product category; `all` disables the filter.
    pub category: Option<String>,
}

#[derive(Clone, Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct SubscribersQuery {
    pub sort: Option<SubscriberSort>,
    /// Defaults to descending, newest subscribers first.
    pub dir: Option<SortDirection>,
}

// ============================================================================
// Encyclopedia
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InteractionCheckReq {
    pub herbs: Vec<String>,
    /// Only report drug interactions whose drug name contains this text.
    #[serde(default)]
    pub drug: Option<String>,
}

// ============================================================================
// Mixer
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RecommendReq {
    pub prompt: String,
    #[serde(default)]
    pub tier: ModelTier,
    #[serde(default)]
    pub purpose: Purpose,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RecommendRes {
    pub flags: InterestFlags,
    pub recommendations: Vec<Recommendation>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct IngredientsRes {
    pub ingredients: Vec<Ingredient>,
    /// Every property of every ingredient, sorted.
    pub properties: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct BlendValidationRes {
    pub valid: bool,
    pub errors: Vec<FieldError>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddDraftItemReq {
    pub ingredient_id: String,
}

/// Fields left out keep their current value.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateDraftItemReq {
    #[serde(default)]
    pub amount: Option<String>,
    #[serde(default)]
    pub unit: Option<Unit>,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SaveFavoriteRes {
    /// False when an identical recommendation was already saved.
    pub added: bool,
    pub favorite: Favorite,
}

// ============================================================================
// Store
// ============================================================================

fn one() -> u32 {
    1
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddCartItemReq {
    pub product_id: String,
    #[serde(default = "one")]
    pub quantity: u32,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateCartItemReq {
    pub quantity: u32,
}

// ============================================================================
// Accounts
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LoginReq {
    pub email: String,
    pub password: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegisterReq {
    pub name: String,
    pub email: String,
    pub password: String,
}

// ============================================================================
// Newsletter
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SubscribeReq {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SendNewsletterReq {
    pub subject: String,
    pub content: String,
    /// Subscriber ids; every active subscriber when omitted.
    #[serde(default)]
    pub recipients: Option<Vec<String>>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SetSubscribedReq {
    pub subscribed: bool,
}

// ============================================================================
// Distribution
// ============================================================================

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddLocationReq {
    pub location: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AddDistributionReq {
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub locations: Vec<String>,
}
