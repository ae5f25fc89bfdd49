//! Saved mixer recommendations.
//!
//! Each favorite gets a synthetic id when saved. Duplicates are detected by content (blend name,
//! category and herb names in order), so two different blends that happen to share a name can
//! both be kept.

use crate::mixer::{BlendCategory, Recommendation};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Favorite {
    pub id: Uuid,
    pub saved_at: DateTime<Utc>,
    pub recommendation: Recommendation,
}

/// Result of saving a recommendation.
#[derive(Clone, Debug, PartialEq)]
pub enum SaveOutcome {
    Added(Favorite),
    AlreadySaved(Favorite),
}

#[derive(PartialEq, Eq)]
struct ContentKey<'a> {
    name: &'a str,
    category: BlendCategory,
    herbs: Vec<&'a str>,
}

impl<'a> ContentKey<'a> {
    fn of(recommendation: &'a Recommendation) -> Self {
        Self {
            name: &recommendation.name,
            category: recommendation.category,
            herbs: recommendation.herb_names(),
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct Favorites {
    items: Vec<Favorite>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    /// Saved favorites in insertion order.
    pub fn list(&self) -> &[Favorite] {
        &self.items
    }

    /// Save `recommendation` unless an identical blend is already saved.
    pub fn save(&mut self, recommendation: Recommendation) -> SaveOutcome {
        let key = ContentKey::of(&recommendation);
        if let Some(existing) = self
            .items
            .iter()
            .find(|f| ContentKey::of(&f.recommendation) == key)
        {
            return SaveOutcome::AlreadySaved(existing.clone());
        }

        let favorite = Favorite {
            id: Uuid::new_v4(),
            saved_at: Utc::now(),
            recommendation,
        };
        tracing::info!(id = %favorite.id, name = %favorite.recommendation.name, "favorite saved");
        self.items.push(favorite.clone());
        SaveOutcome::Added(favorite)
    }

    /// Remove the favorite with `id`. Returns `None` when no such favorite exists.
    pub fn remove(&mut self, id: Uuid) -> Option<Favorite> {
        let index = self.items.iter().position(|f| f.id == id)?;
        Some(self.items.remove(index))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Catalog;
    use crate::classifier::classify;
    use crate::mixer::{synthesize_template, STANDARD_TEMPLATES};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn recommendation(prompt: &str) -> Recommendation {
        let catalog = Catalog::builtin().expect("catalog");
        let mut rng = StdRng::seed_from_u64(0);
        synthesize_template(
            catalog.mixer_herbs(),
            &STANDARD_TEMPLATES[0],
            &classify(prompt),
            &mut rng,
        )
    }

    #[test]
    fn saving_twice_keeps_one() {
        let mut favorites = Favorites::new();
        let rec = recommendation("tidur energi");
        let first = match favorites.save(rec.clone()) {
            SaveOutcome::Added(f) => f,
            other => panic!("expected Added, got {other:?}"),
        };
        match favorites.save(rec) {
            SaveOutcome::AlreadySaved(f) => assert_eq!(f.id, first.id),
            other => panic!("expected AlreadySaved, got {other:?}"),
        }
        assert_eq!(favorites.list().len(), 1);
    }

    #[test]
    fn same_name_different_herbs_are_distinct() {
        let mut favorites = Favorites::new();
        favorites.save(recommendation("tidur energi"));
        favorites.save(recommendation("tidur perut flu"));
        assert_eq!(favorites.list().len(), 2);
        assert_eq!(
            favorites.list()[0].recommendation.name,
            favorites.list()[1].recommendation.name
        );
    }

    #[test]
    fn remove_unknown_is_none() {
        let mut favorites = Favorites::new();
        let added = match favorites.save(recommendation("tidur")) {
            SaveOutcome::Added(f) => f,
            other => panic!("expected Added, got {other:?}"),
        };
        assert!(favorites.remove(Uuid::new_v4()).is_none());
        assert_eq!(favorites.remove(added.id).map(|f| f.id), Some(added.id));
        assert!(favorites.list().is_empty());
    }
}
