//! Domain data store.
//!
//! The catalog holds every read-only reference collection the application works with: herbs,
//! herb–herb and herb–drug interactions, preparation methods, conditions with their remedies,
//! and the smaller collections used by the mixer, the store and the distribution map.
//!
//! ## Loading
//!
//! The catalog is YAML. A copy is embedded into the binary ([`BUILTIN_CATALOG_YAML`]) and an
//! override file may be configured through [`CoreConfig`]. Parsing is strict
//! (`deny_unknown_fields`) and reports the failing path via `serde_path_to_error`.
//!
//! ## Integrity
//!
//! After parsing, every cross-reference is checked: remedy herbs, interaction pairs, drug
//! interactions and suitable herbs of preparation methods must name existing herb ids, ids must
//! be unique, the mixer must contain its primary herbs and distribution locations must be known
//! map regions. A catalog that fails these checks is rejected at startup rather than producing
//! dangling lookups later.
//!
//! Lookups are linear scans; the collections hold single-digit to low-tens of records.

use crate::config::CoreConfig;
use crate::constants::{BUILTIN_CATALOG_YAML, MAP_REGIONS};
use crate::distribution::DistributionRecord;
use crate::ingredients::Ingredient;
use crate::mixer::{MixerHerb, PRIMARY_HERB_NAMES};
use crate::store::Product;
use crate::{HerbalError, HerbalResult};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};
use utoipa::ToSchema;

// ============================================================================
// Reference record types
// ============================================================================

/// Dosage guidance per population group. Only the adult dose is always present.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Dosage {
    pub adult: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub child: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elderly: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pregnant: Option<String>,
}

/// One medicinal plant.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Herb {
    pub id: String,
    pub name: String,
    pub latin_name: String,
    pub description: String,
    pub benefits: Vec<String>,
    pub dosage: Dosage,
    pub preparation: Vec<String>,
    pub side_effects: Vec<String>,
    pub warnings: Vec<String>,
    pub interactions: Vec<String>,
    pub image: String,
    pub categories: Vec<String>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum InteractionEffect {
    Positive,
    Negative,
    Neutral,
}

/// Interaction between two herbs. The pair is unordered.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct HerbInteraction {
    #[schema(value_type = Vec<String>)]
    pub herbs: [String; 2],
    pub effect: InteractionEffect,
    pub description: String,
}

impl HerbInteraction {
    /// True if this interaction is between `a` and `b`, in either order.
    pub fn involves_pair(&self, a: &str, b: &str) -> bool {
        let [x, y] = &self.herbs;
        (x == a && y == b) || (x == b && y == a)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Major,
    Moderate,
    Minor,
}

/// Known interaction between a herb and a drug.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DrugHerbInteraction {
    pub herb: String,
    pub drug: String,
    pub severity: Severity,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct PreparationMethod {
    pub id: String,
    pub name: String,
    pub description: String,
    pub steps: Vec<String>,
    pub tips: Vec<String>,
    pub suitable_herbs: Vec<String>,
}

/// A named combination of herbs used for a condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Remedy {
    pub id: String,
    pub name: String,
    pub herbs: Vec<String>,
    pub preparation: String,
    pub dosage: String,
    pub duration: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct Condition {
    pub id: String,
    pub name: String,
    pub description: String,
    pub remedies: Vec<Remedy>,
}

// ============================================================================
// Catalog
// ============================================================================

/// Immutable reference data, loaded once at process start.
#[derive(Clone, Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Catalog {
    herbs: Vec<Herb>,
    herb_interactions: Vec<HerbInteraction>,
    drug_interactions: Vec<DrugHerbInteraction>,
    preparation_methods: Vec<PreparationMethod>,
    conditions: Vec<Condition>,
    mixer_herbs: Vec<MixerHerb>,
    ingredients: Vec<Ingredient>,
    products: Vec<Product>,
    distribution: Vec<DistributionRecord>,
}

impl Catalog {
    /// Parse and validate the catalog embedded in the binary.
    pub fn builtin() -> HerbalResult<Self> {
        Self::from_yaml(BUILTIN_CATALOG_YAML)
    }

    /// Load the catalog named by `cfg`, falling back to the built-in one.
    pub fn load(cfg: &CoreConfig) -> HerbalResult<Self> {
        let catalog = match cfg.catalog_path() {
            Some(path) => {
                let text = std::fs::read_to_string(path).map_err(HerbalError::CatalogRead)?;
                Self::from_yaml(&text)?
            }
            None => Self::builtin()?,
        };

        tracing::info!(
            herbs = catalog.herbs.len(),
            conditions = catalog.conditions.len(),
            products = catalog.products.len(),
            "catalog loaded"
        );
        Ok(catalog)
    }

    /// Parse a catalog from YAML text and validate its integrity.
    ///
    /// # Errors
    ///
    /// Returns [`HerbalError::CatalogParse`] with the failing path when the YAML does not match
    /// the schema, or [`HerbalError::CatalogIntegrity`] when a cross-reference is broken.
    pub fn from_yaml(yaml_text: &str) -> HerbalResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);
        let catalog: Catalog = serde_path_to_error::deserialize(deserializer).map_err(|err| {
            let path = err.path().to_string();
            let path = if path.is_empty() || path == "." {
                "<root>".to_string()
            } else {
                path
            };
            HerbalError::CatalogParse {
                path,
                source: err.into_inner(),
            }
        })?;

        catalog.validate()?;
        Ok(catalog)
    }

    fn validate(&self) -> HerbalResult<()> {
        let herb_ids = unique_ids("herb", self.herbs.iter().map(|h| h.id.as_str()))?;
        unique_ids("condition", self.conditions.iter().map(|c| c.id.as_str()))?;
        unique_ids(
            "remedy",
            self.conditions
                .iter()
                .flat_map(|c| c.remedies.iter().map(|r| r.id.as_str())),
        )?;
        unique_ids(
            "preparation method",
            self.preparation_methods.iter().map(|m| m.id.as_str()),
        )?;
        unique_ids("product", self.products.iter().map(|p| p.id.as_str()))?;
        unique_ids("ingredient", self.ingredients.iter().map(|i| i.id.as_str()))?;
        unique_ids("mixer herb", self.mixer_herbs.iter().map(|h| h.name.as_str()))?;

        let check = |owner: &str, id: &str| -> HerbalResult<()> {
            if herb_ids.contains(id) {
                Ok(())
            } else {
                Err(HerbalError::CatalogIntegrity(format!(
                    "{owner} references unknown herb id {id:?}"
                )))
            }
        };

        for condition in &self.conditions {
            for remedy in &condition.remedies {
                for herb in &remedy.herbs {
                    check(&format!("remedy {:?}", remedy.id), herb)?;
                }
            }
        }
        for interaction in &self.herb_interactions {
            let [a, b] = &interaction.herbs;
            check("herb interaction", a)?;
            check("herb interaction", b)?;
            if a == b {
                return Err(HerbalError::CatalogIntegrity(format!(
                    "herb interaction pairs {a:?} with itself"
                )));
            }
        }
        for interaction in &self.drug_interactions {
            check(&format!("drug interaction with {:?}", interaction.drug), &interaction.herb)?;
        }
        for method in &self.preparation_methods {
            for herb in &method.suitable_herbs {
                check(&format!("preparation method {:?}", method.id), herb)?;
            }
        }

        for name in PRIMARY_HERB_NAMES {
            if !self.mixer_herbs.iter().any(|h| h.name == name) {
                return Err(HerbalError::CatalogIntegrity(format!(
                    "mixer herbs must include {name:?}"
                )));
            }
        }

        let mut distribution_ids = HashSet::new();
        for record in &self.distribution {
            if !distribution_ids.insert(record.id) {
                return Err(HerbalError::CatalogIntegrity(format!(
                    "duplicate distribution id {}",
                    record.id
                )));
            }
            for location in &record.locations {
                if !MAP_REGIONS.iter().any(|(region, _)| region == location) {
                    return Err(HerbalError::CatalogIntegrity(format!(
                        "distribution record {:?} uses unknown region {location:?}",
                        record.name
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn herbs(&self) -> &[Herb] {
        &self.herbs
    }

    pub fn herb_interactions(&self) -> &[HerbInteraction] {
        &self.herb_interactions
    }

    pub fn drug_interactions(&self) -> &[DrugHerbInteraction] {
        &self.drug_interactions
    }

    pub fn preparation_methods(&self) -> &[PreparationMethod] {
        &self.preparation_methods
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    pub fn mixer_herbs(&self) -> &[MixerHerb] {
        &self.mixer_herbs
    }

    pub fn ingredients(&self) -> &[Ingredient] {
        &self.ingredients
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn distribution(&self) -> &[DistributionRecord] {
        &self.distribution
    }

    pub fn herb(&self, id: &str) -> Option<&Herb> {
        self.herbs.iter().find(|h| h.id == id)
    }

    pub fn condition(&self, id: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.id == id)
    }

    pub fn preparation_method(&self, id: &str) -> Option<&PreparationMethod> {
        self.preparation_methods.iter().find(|m| m.id == id)
    }

    pub fn ingredient(&self, id: &str) -> Option<&Ingredient> {
        self.ingredients.iter().find(|i| i.id == id)
    }

    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// All herb categories, de-duplicated and sorted.
    pub fn categories(&self) -> Vec<String> {
        self.herbs
            .iter()
            .flat_map(|h| h.categories.iter().cloned())
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    pub fn interaction_between(&self, a: &str, b: &str) -> Option<&HerbInteraction> {
        self.herb_interactions.iter().find(|i| i.involves_pair(a, b))
    }

    pub fn drug_interactions_for(&self, herb_id: &str) -> Vec<&DrugHerbInteraction> {
        self.drug_interactions
            .iter()
            .filter(|i| i.herb == herb_id)
            .collect()
    }

    pub fn methods_for_herb(&self, herb_id: &str) -> Vec<&PreparationMethod> {
        self.preparation_methods
            .iter()
            .filter(|m| m.suitable_herbs.iter().any(|h| h == herb_id))
            .collect()
    }

    /// Remedies that use `herb_id`, paired with the condition they treat.
    pub fn remedies_using(&self, herb_id: &str) -> Vec<(&Condition, &Remedy)> {
        self.conditions
            .iter()
            .flat_map(|c| c.remedies.iter().map(move |r| (c, r)))
            .filter(|(_, r)| r.herbs.iter().any(|h| h == herb_id))
            .collect()
    }
}

fn unique_ids<'a>(
    kind: &str,
    ids: impl Iterator<Item = &'a str>,
) -> HerbalResult<HashSet<&'a str>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(HerbalError::CatalogIntegrity(format!(
                "duplicate {kind} id {id:?}"
            )));
        }
    }
    Ok(seen)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("built-in catalog is valid")
    }

    #[test]
    fn builtin_catalog_loads() {
        let catalog = catalog();
        assert_eq!(catalog.herbs().len(), 5);
        assert_eq!(catalog.conditions().len(), 5);
        assert_eq!(catalog.preparation_methods().len(), 5);
        assert_eq!(catalog.mixer_herbs().len(), 5);
        assert_eq!(catalog.ingredients().len(), 10);
        assert_eq!(catalog.products().len(), 6);
        assert_eq!(catalog.distribution().len(), 8);
    }

    #[test]
    fn lookup_by_id_is_not_an_error_when_missing() {
        let catalog = catalog();
        assert_eq!(catalog.herb("ginger").map(|h| h.name.as_str()), Some("Jahe"));
        assert!(catalog.herb("ginseng").is_none());
        assert!(catalog.condition("flu").is_none());
    }

    #[test]
    fn categories_are_sorted_and_unique() {
        let categories = catalog().categories();
        let mut sorted = categories.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(categories, sorted);
        assert!(categories.contains(&"Anti-inflamasi".to_string()));
    }

    #[test]
    fn interaction_pair_is_unordered() {
        let catalog = catalog();
        let forward = catalog.interaction_between("valerian", "ginger").expect("exists");
        let backward = catalog.interaction_between("ginger", "valerian").expect("exists");
        assert_eq!(forward, backward);
        assert_eq!(forward.effect, InteractionEffect::Negative);
    }

    #[test]
    fn herb_cross_references() {
        let catalog = catalog();
        let drugs = catalog.drug_interactions_for("turmeric");
        assert_eq!(drugs.len(), 1);
        assert_eq!(drugs[0].drug, "Warfarin");

        let methods: Vec<_> = catalog
            .methods_for_herb("turmeric")
            .into_iter()
            .map(|m| m.id.as_str())
            .collect();
        assert_eq!(methods, vec!["decoction", "tincture", "powder"]);

        let remedies: Vec<_> = catalog
            .remedies_using("peppermint")
            .into_iter()
            .map(|(_, r)| r.id.as_str())
            .collect();
        assert_eq!(remedies, vec!["ginger-mint-tea", "peppermint-compress"]);
    }

    #[test]
    fn dangling_remedy_herb_is_rejected() {
        let yaml = BUILTIN_CATALOG_YAML.replace("herbs: [ginger, peppermint]", "herbs: [ginger, ginseng]");
        let err = Catalog::from_yaml(&yaml).expect_err("should reject dangling id");
        match err {
            HerbalError::CatalogIntegrity(msg) => assert!(msg.contains("ginseng")),
            other => panic!("expected CatalogIntegrity, got {other:?}"),
        }
    }

    #[test]
    fn unknown_keys_report_their_path() {
        let yaml = BUILTIN_CATALOG_YAML.replacen("    name: Kunyit\n", "    name: Kunyit\n    colour: yellow\n", 1);
        let err = Catalog::from_yaml(&yaml).expect_err("should reject unknown key");
        match err {
            HerbalError::CatalogParse { path, source } => {
                assert!(path.starts_with("herbs[0]"), "unexpected path {path}");
                assert!(source.to_string().contains("colour"));
            }
            other => panic!("expected CatalogParse, got {other:?}"),
        }
    }

    #[test]
    fn unknown_region_is_rejected() {
        let yaml = BUILTIN_CATALOG_YAML.replace("locations: [Papua]", "locations: [Maluku]");
        let err = Catalog::from_yaml(&yaml).expect_err("should reject region");
        assert!(err.to_string().contains("Maluku"));
    }
}
