//! Storefront products and rupiah formatting.

use crate::search::{matches_query, Searchable};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Category value that disables the category filter.
pub const ALL_CATEGORIES: &str = "all";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Unit price in rupiah.
    pub price: u64,
    pub description: String,
    pub image: String,
    pub stock: u32,
    pub category: String,
}

impl Searchable for Product {
    fn display_name(&self) -> &str {
        &self.name
    }

    fn search_fields(&self) -> Vec<&str> {
        vec![&self.name, &self.description]
    }

    fn categories(&self) -> Vec<&str> {
        vec![&self.category]
    }
}

/// Filter products by name/description and by category. Catalog order is preserved.
///
/// `category` of `None`, blank or `"all"` keeps every category; other values must match the
/// product category exactly, ignoring case.
pub fn filter_products<'a>(
    products: &'a [Product],
    query: &str,
    category: Option<&str>,
) -> Vec<&'a Product> {
    let category = category
        .map(|c| c.trim().to_lowercase())
        .filter(|c| !c.is_empty() && c != ALL_CATEGORIES);

    products
        .iter()
        .filter(|p| matches_query(*p, query))
        .filter(|p| match &category {
            Some(wanted) => p.category.to_lowercase() == *wanted,
            None => true,
        })
        .collect()
}

/// Format a rupiah amount the Indonesian way: `Rp 1.250.000`.
pub fn format_idr(amount: u64) -> String {
    let digits = amount.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }
    format!("Rp {grouped}")
}
