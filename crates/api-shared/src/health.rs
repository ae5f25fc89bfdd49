use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
    /// Number of herbs in the loaded catalog.
    pub herbs: u32,
}

/// Health service shared by the server binary and tests.
#[derive(Clone, Debug, Default)]
pub struct HealthService;

impl HealthService {
    pub fn new() -> Self {
        Self
    }

    /// Build a health report for a catalog holding `herb_count` herbs.
    ///
    /// # Returns
    /// A `HealthRes` that is `ok` when the catalog is not empty.
    pub fn check_health(herb_count: usize) -> HealthRes {
        let herbs = u32::try_from(herb_count).unwrap_or(u32::MAX);
        HealthRes {
            ok: herbs > 0,
            message: if herbs > 0 {
                "Herbal service is alive".into()
            } else {
                "Herbal catalog is empty".into()
            },
            herbs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_catalog_is_not_ok() {
        assert!(!HealthService::check_health(0).ok);
        let res = HealthService::check_health(5);
        assert!(res.ok);
        assert_eq!(res.herbs, 5);
    }
}
