// 📋 Registry Report - Every aggregate in one serializable value
// Used by the CLI for text and JSON output.

use crate::error::CommunityResult;
use crate::query::QueryEngine;
use indexmap::IndexMap;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryReport {
    pub political_communities: usize,
    pub postal_communities: usize,
    pub cantons: usize,
    pub districts: usize,
    pub political_communities_without_postal_communities: usize,

    /// Canton code → distinct districts, count DESC
    pub districts_by_canton: IndexMap<String, usize>,

    /// Canton code → political communities, count DESC
    pub political_communities_by_canton: IndexMap<String, usize>,
}

impl RegistryReport {
    pub fn build(engine: &QueryEngine<'_>) -> CommunityResult<Self> {
        let model = engine.model();

        Ok(RegistryReport {
            political_communities: model.political_community_count(),
            postal_communities: model.postal_communities().len(),
            cantons: engine.count_cantons(),
            districts: model.districts().len(),
            political_communities_without_postal_communities: engine
                .count_political_communities_without_postal_communities(),
            districts_by_canton: engine.district_counts_by_canton_sorted()?,
            political_communities_by_canton: engine.political_community_counts_by_canton_sorted()?,
        })
    }
}

impl fmt::Display for RegistryReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Political communities: {}", self.political_communities)?;
        writeln!(f, "Postal communities:    {}", self.postal_communities)?;
        writeln!(f, "Cantons:               {}", self.cantons)?;
        writeln!(f, "Districts:             {}", self.districts)?;
        writeln!(
            f,
            "Without postal community: {}",
            self.political_communities_without_postal_communities
        )?;

        writeln!(f, "\nDistricts per canton:")?;
        for (code, count) in &self.districts_by_canton {
            writeln!(f, "  {code:<4} {count}")?;
        }

        writeln!(f, "\nPolitical communities per canton:")?;
        for (code, count) in &self.political_communities_by_canton {
            writeln!(f, "  {code:<4} {count}")?;
        }

        Ok(())
    }
}
