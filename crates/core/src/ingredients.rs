//! Ingredient selector and blend form for hand-made mixes.

use crate::search::{matches_query, Searchable};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use utoipa::ToSchema;

/// Property value that disables the property filter.
pub const ALL_PROPERTIES: &str = "all";

pub const DEFAULT_AMOUNT: &str = "1";

const MIN_BLEND_NAME_CHARS: usize = 2;
const MIN_BLEND_DESCRIPTION_CHARS: usize = 10;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Ingredient {
    pub id: String,
    pub name: String,
    pub latin_name: String,
    pub properties: Vec<String>,
    pub usage: String,
}

impl Searchable for Ingredient {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.latin_name]
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum Unit {
    #[default]
    #[serde(rename = "sendok teh")]
    SendokTeh,
    #[serde(rename = "sendok makan")]
    SendokMakan,
    #[serde(rename = "gram")]
    Gram,
    #[serde(rename = "ml")]
    Ml,
    #[serde(rename = "lembar")]
    Lembar,
    #[serde(rename = "buah")]
    Buah,
    #[serde(rename = "potong")]
    Potong,
}

/// Filter ingredients by name or latin name, and by a property substring.
///
/// A blank `query` matches every ingredient; a `property` of `None` or `"all"` disables the
/// property filter. Catalog order is preserved.
pub fn filter_ingredients<'a>(
    ingredients: &'a [Ingredient],
    query: &str,
    property: Option<&str>,
) -> Vec<&'a Ingredient> {
    let property = property
        .map(|p| p.trim().to_lowercase())
        .filter(|p| !p.is_empty() && p != ALL_PROPERTIES);

    ingredients
        .iter()
        .filter(|i| matches_query(*i, query))
        .filter(|i| match &property {
            Some(wanted) => i.properties.iter().any(|p| p.to_lowercase().contains(wanted)),
            None => true,
        })
        .collect()
}

/// Every property used by any ingredient, sorted and de-duplicated.
pub fn property_list(ingredients: &[Ingredient]) -> Vec<String> {
    ingredients
        .iter()
        .flat_map(|i| i.properties.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

// ============================================================================
// Blend draft
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectedIngredient {
    pub ingredient: Ingredient,
    pub amount: String,
    pub unit: Unit,
}

/// Ingredients picked for a blend, each at most once.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlendDraft {
    items: Vec<SelectedIngredient>,
}

impl BlendDraft {
    pub fn items(&self) -> &[SelectedIngredient] {
        &self.items
    }

    pub fn contains(&self, id: &str) -> bool {
        self.items.iter().any(|s| s.ingredient.id == id)
    }

    /// Add `ingredient` with the default amount and unit. Returns false if already present.
    pub fn add(&mut self, ingredient: &Ingredient) -> bool {
        if self.contains(&ingredient.id) {
            return false;
        }
        self.items.push(SelectedIngredient {
            ingredient: ingredient.clone(),
            amount: DEFAULT_AMOUNT.to_string(),
            unit: Unit::default(),
        });
        true
    }

    pub fn remove(&mut self, id: &str) -> bool {
        let before = self.items.len();
        self.items.retain(|s| s.ingredient.id != id);
        self.items.len() != before
    }

    pub fn set_amount(&mut self, id: &str, amount: impl Into<String>) -> bool {
        match self.items.iter_mut().find(|s| s.ingredient.id == id) {
            Some(item) => {
                item.amount = amount.into();
                true
            }
            None => false,
        }
    }

    pub fn set_unit(&mut self, id: &str, unit: Unit) -> bool {
        match self.items.iter_mut().find(|s| s.ingredient.id == id) {
            Some(item) => {
                item.unit = unit;
                true
            }
            None => false,
        }
    }
}

// ============================================================================
// Blend form
// ============================================================================

/// Category offered by the blend form. Wider than the synthesized categories.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub enum FormCategory {
    Tea,
    Tincture,
    Capsule,
    Topical,
    Other,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct BlendForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub category: Option<FormCategory>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: &'static str,
    pub message: &'static str,
}

/// Validate a blend form, collecting every field error.
pub fn validate_blend_form(form: &BlendForm) -> Result<(), Vec<FieldError>> {
    let mut errors = Vec::new();

    if form.name.trim().chars().count() < MIN_BLEND_NAME_CHARS {
        errors.push(FieldError {
            field: "name",
            message: "Nama harus minimal 2 karakter.",
        });
    }
    if form.description.trim().chars().count() < MIN_BLEND_DESCRIPTION_CHARS {
        errors.push(FieldError {
            field: "description",
            message: "Deskripsi harus minimal 10 karakter.",
        });
    }
    if form.category.is_none() {
        errors.push(FieldError {
            field: "category",
            message: "Silakan pilih kategori.",
        });
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::warn!(fields = errors.len(), "blend form rejected");
        Err(errors)
    }
}
