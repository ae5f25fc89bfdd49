//! Geographic distribution of herbs over the map regions.

use crate::constants::MAP_REGIONS;
use crate::{HerbalError, HerbalResult};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub struct DistributionRecord {
    pub id: u32,
    pub name: String,
    pub locations: Vec<String>,
    pub description: String,
}

/// One map region and the herbs growing there.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct RegionSummary {
    pub name: String,
    pub description: String,
    pub herbs: Vec<String>,
}

/// Canonical region name for `location`, compared case-insensitively.
pub fn canonical_region(location: &str) -> Option<&'static str> {
    let wanted = location.trim();
    MAP_REGIONS
        .iter()
        .map(|(name, _)| *name)
        .find(|name| name.eq_ignore_ascii_case(wanted))
}

fn require_region(location: &str) -> HerbalResult<&'static str> {
    if location.trim().is_empty() {
        return Err(HerbalError::InvalidInput("location cannot be empty".into()));
    }
    canonical_region(location).ok_or_else(|| HerbalError::UnknownRegion(location.trim().to_string()))
}

#[derive(Clone, Debug, Default)]
pub struct DistributionMap {
    records: Vec<DistributionRecord>,
}

impl DistributionMap {
    pub fn new(records: Vec<DistributionRecord>) -> Self {
        Self { records }
    }

    pub fn records(&self) -> &[DistributionRecord] {
        &self.records
    }

    /// Records whose name contains `query`, ignoring case.
    pub fn search(&self, query: &str) -> Vec<&DistributionRecord> {
        let needle = query.trim().to_lowercase();
        self.records
            .iter()
            .filter(|r| r.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Every map region, in map order, with the herbs recorded there.
    pub fn regions(&self) -> Vec<RegionSummary> {
        MAP_REGIONS
            .iter()
            .map(|(name, description)| RegionSummary {
                name: name.to_string(),
                description: description.to_string(),
                herbs: self
                    .records
                    .iter()
                    .filter(|r| r.locations.iter().any(|l| l == name))
                    .map(|r| r.name.clone())
                    .collect(),
            })
            .collect()
    }

    /// Add a region to a record's locations.
    ///
    /// # Errors
    ///
    /// * [`HerbalError::UnknownDistribution`] for an unknown record id.
    /// * [`HerbalError::InvalidInput`] for an empty location.
    /// * [`HerbalError::UnknownRegion`] if the location is not a map region.
    /// * [`HerbalError::DuplicateLocation`] if the record already lists it.
    pub fn add_location(&mut self, id: u32, location: &str) -> HerbalResult<&DistributionRecord> {
        let region = require_region(location)?;
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(HerbalError::UnknownDistribution(id))?;

        if record.locations.iter().any(|l| l == region) {
            return Err(HerbalError::DuplicateLocation(region.to_string()));
        }
        record.locations.push(region.to_string());
        tracing::info!(id, region, "distribution location added");
        Ok(record)
    }

    /// Remove a region from a record. Removing a region it does not list is a no-op.
    pub fn remove_location(&mut self, id: u32, location: &str) -> HerbalResult<&DistributionRecord> {
        let record = self
            .records
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or(HerbalError::UnknownDistribution(id))?;
        let wanted = location.trim();
        record.locations.retain(|l| !l.eq_ignore_ascii_case(wanted));
        Ok(record)
    }

    /// Add a new herb record with the next free id.
    ///
    /// # Errors
    ///
    /// [`HerbalError::MissingFields`] when the name or description is blank, and
    /// [`HerbalError::UnknownRegion`] for a location outside the map.
    pub fn add_record(
        &mut self,
        name: &str,
        description: &str,
        locations: &[String],
    ) -> HerbalResult<&DistributionRecord> {
        let mut missing = Vec::new();
        if name.trim().is_empty() {
            missing.push("name");
        }
        if description.trim().is_empty() {
            missing.push("description");
        }
        if !missing.is_empty() {
            return Err(HerbalError::MissingFields(missing));
        }

        let mut regions: Vec<String> = Vec::new();
        for location in locations {
            let region = require_region(location)?;
            if !regions.iter().any(|r| r == region) {
                regions.push(region.to_string());
            }
        }

        let id = self.records.iter().map(|r| r.id).max().unwrap_or(0) + 1;
        self.records.push(DistributionRecord {
            id,
            name: name.trim().to_string(),
            locations: regions,
            description: description.trim().to_string(),
        });
        let index = self.records.len() - 1;
        Ok(&self.records[index])
    }
}
