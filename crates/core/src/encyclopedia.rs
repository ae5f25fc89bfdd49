//! Encyclopedia, remedies and preparation lookups built on the catalog.
//!
//! These functions resolve the catalog's id references into self-contained views. Missing ids
//! produce `None` or are reported back to the caller; they are never errors.

use crate::catalog::{
    Catalog, Condition, DrugHerbInteraction, Herb, HerbInteraction, PreparationMethod, Remedy,
};
use crate::search::{filter_and_sort, SortDirection};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Short reference to a herb, used inside other views.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HerbSummary {
    pub id: String,
    pub name: String,
    pub latin_name: String,
}

impl From<&Herb> for HerbSummary {
    fn from(herb: &Herb) -> Self {
        Self {
            id: herb.id.clone(),
            name: herb.name.clone(),
            latin_name: herb.latin_name.clone(),
        }
    }
}

/// A remedy that uses some herb, together with the condition it treats.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RemedyUse {
    pub condition_id: String,
    pub condition_name: String,
    pub remedy: Remedy,
}

/// Everything the detail page shows for one herb.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HerbDetail {
    pub herb: Herb,
    pub drug_interactions: Vec<DrugHerbInteraction>,
    pub herb_interactions: Vec<HerbInteraction>,
    pub preparation_methods: Vec<PreparationMethod>,
    pub remedies: Vec<RemedyUse>,
}

pub fn herb_detail(catalog: &Catalog, id: &str) -> Option<HerbDetail> {
    let herb = catalog.herb(id)?;

    let herb_interactions = catalog
        .herb_interactions()
        .iter()
        .filter(|i| i.herbs.iter().any(|h| h == id))
        .cloned()
        .collect();

    Some(HerbDetail {
        herb: herb.clone(),
        drug_interactions: catalog
            .drug_interactions_for(id)
            .into_iter()
            .cloned()
            .collect(),
        herb_interactions,
        preparation_methods: catalog.methods_for_herb(id).into_iter().cloned().collect(),
        remedies: catalog
            .remedies_using(id)
            .into_iter()
            .map(|(condition, remedy)| RemedyUse {
                condition_id: condition.id.clone(),
                condition_name: condition.name.clone(),
                remedy: remedy.clone(),
            })
            .collect(),
    })
}

// ============================================================================
// Interaction check
// ============================================================================

/// Known interactions among a set of herbs, and with drugs.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct InteractionReport {
    pub herb_interactions: Vec<HerbInteraction>,
    pub drug_interactions: Vec<DrugHerbInteraction>,
    /// Requested ids that are not in the catalog.
    pub unknown_herbs: Vec<String>,
}

impl InteractionReport {
    pub fn has_warnings(&self) -> bool {
        self.herb_interactions
            .iter()
            .any(|i| i.effect == crate::catalog::InteractionEffect::Negative)
            || !self.drug_interactions.is_empty()
    }
}

/// Check a blend of herbs for pairwise interactions and drug interactions.
///
/// # Arguments
///
/// * `catalog` - Reference data.
/// * `herb_ids` - Herbs in the blend. Duplicates are ignored.
/// * `drug` - When set, only drug interactions whose drug name contains this text
///   (case-insensitive) are reported.
pub fn check_interactions(
    catalog: &Catalog,
    herb_ids: &[String],
    drug: Option<&str>,
) -> InteractionReport {
    let mut known: Vec<&str> = Vec::new();
    let mut unknown_herbs = Vec::new();
    for id in herb_ids {
        if known.contains(&id.as_str()) || unknown_herbs.contains(id) {
            continue;
        }
        if catalog.herb(id).is_some() {
            known.push(id);
        } else {
            unknown_herbs.push(id.clone());
        }
    }

    let mut herb_interactions = Vec::new();
    for (i, a) in known.iter().enumerate() {
        for b in &known[i + 1..] {
            if let Some(interaction) = catalog.interaction_between(a, b) {
                herb_interactions.push(interaction.clone());
            }
        }
    }

    let drug = drug
        .map(|d| d.trim().to_lowercase())
        .filter(|d| !d.is_empty());
    let drug_interactions = known
        .iter()
        .flat_map(|id| catalog.drug_interactions_for(id))
        .filter(|i| match &drug {
            Some(wanted) => i.drug.to_lowercase().contains(wanted),
            None => true,
        })
        .cloned()
        .collect();

    InteractionReport {
        herb_interactions,
        drug_interactions,
        unknown_herbs,
    }
}

// ============================================================================
// Conditions and preparations
// ============================================================================

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ResolvedRemedy {
    pub id: String,
    pub name: String,
    pub herbs: Vec<HerbSummary>,
    pub preparation: String,
    pub dosage: String,
    pub duration: String,
    pub notes: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConditionDetail {
    pub id: String,
    pub name: String,
    pub description: String,
    pub remedies: Vec<ResolvedRemedy>,
}

/// A condition with every remedy's herb ids resolved to herb summaries.
pub fn condition_detail(catalog: &Catalog, id: &str) -> Option<ConditionDetail> {
    let condition = catalog.condition(id)?;
    let remedies = condition
        .remedies
        .iter()
        .map(|remedy| ResolvedRemedy {
            id: remedy.id.clone(),
            name: remedy.name.clone(),
            herbs: remedy
                .herbs
                .iter()
                .filter_map(|h| catalog.herb(h))
                .map(HerbSummary::from)
                .collect(),
            preparation: remedy.preparation.clone(),
            dosage: remedy.dosage.clone(),
            duration: remedy.duration.clone(),
            notes: remedy.notes.clone(),
        })
        .collect();

    Some(ConditionDetail {
        id: condition.id.clone(),
        name: condition.name.clone(),
        description: condition.description.clone(),
        remedies,
    })
}

pub fn search_conditions<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a Condition> {
    filter_and_sort(catalog.conditions(), query, None, SortDirection::Asc)
}

pub fn search_preparations<'a>(catalog: &'a Catalog, query: &str) -> Vec<&'a PreparationMethod> {
    filter_and_sort(catalog.preparation_methods(), query, None, SortDirection::Asc)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        Catalog::builtin().expect("catalog")
    }

    #[test]
    fn herb_detail_collects_references() {
        let catalog = catalog();
        let detail = herb_detail(&catalog, "valerian").expect("exists");
        assert_eq!(detail.drug_interactions.len(), 1);
        assert_eq!(detail.drug_interactions[0].drug, "Alprazolam");
        assert_eq!(detail.herb_interactions.len(), 3);
        assert!(detail
            .remedies
            .iter()
            .all(|r| r.remedy.herbs.iter().any(|h| h == "valerian")));
        assert!(herb_detail(&catalog, "ginseng").is_none());
    }

    #[test]
    fn interaction_check_reports_pairs_once() {
        let catalog = catalog();
        let ids = vec![
            "ginger".to_string(),
            "valerian".to_string(),
            "ginger".to_string(),
            "ginseng".to_string(),
        ];
        let report = check_interactions(&catalog, &ids, None);
        assert_eq!(report.herb_interactions.len(), 1);
        assert_eq!(report.unknown_herbs, vec!["ginseng".to_string()]);
        assert_eq!(report.drug_interactions.len(), 2);
        assert!(report.has_warnings());
    }

    #[test]
    fn drug_filter_is_case_insensitive() {
        let catalog = catalog();
        let ids = vec!["ginger".to_string(), "turmeric".to_string()];
        let report = check_interactions(&catalog, &ids, Some("warf"));
        assert_eq!(report.drug_interactions.len(), 1);
        assert_eq!(report.drug_interactions[0].herb, "turmeric");
    }

    #[test]
    fn condition_detail_resolves_herbs() {
        let catalog = catalog();
        let detail = condition_detail(&catalog, "insomnia").expect("exists");
        let herbs: Vec<_> = detail.remedies[0].herbs.iter().map(|h| h.id.as_str()).collect();
        assert_eq!(herbs, vec!["valerian", "chamomile"]);
        assert!(condition_detail(&catalog, "flu").is_none());
    }

    #[test]
    fn condition_search_matches_description() {
        let catalog = catalog();
        let hits = search_conditions(&catalog, "insomnia");
        assert_eq!(hits.len(), 1);
        assert_eq!(search_conditions(&catalog, "").len(), catalog.conditions().len());
    }
}
