// 📊 Query Engine - Read-only aggregates over a Model
//
// Counts, filters, groupings with sorted output and min-date lookups.
// Canton codes / district numbers are validated against the Model's
// cached indexes before any counting happens.

use crate::entities::District;
use crate::error::{CommunityError, CommunityResult};
use crate::model::Model;
use chrono::NaiveDate;
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;

// ============================================================================
// QUERY ENGINE
// ============================================================================

pub struct QueryEngine<'a> {
    model: &'a Model,
}

impl<'a> QueryEngine<'a> {
    pub fn new(model: &'a Model) -> Self {
        QueryEngine { model }
    }

    pub fn model(&self) -> &'a Model {
        self.model
    }

    // ========================================================================
    // CANTON / DISTRICT COUNTS
    // ========================================================================

    /// Number of political communities in a canton (e.g. "ZH")
    pub fn count_political_communities_in_canton(
        &self,
        canton_code: &str,
    ) -> CommunityResult<usize> {
        self.validate_canton_code(canton_code)?;

        Ok(self
            .model
            .political_communities()
            .filter(|pc| pc.canton.code == canton_code)
            .count())
    }

    /// Number of distinct districts (by number) in a canton
    pub fn count_districts_in_canton(&self, canton_code: &str) -> CommunityResult<usize> {
        self.validate_canton_code(canton_code)?;

        let numbers: HashSet<&str> = self
            .model
            .political_communities()
            .filter(|pc| pc.canton.code == canton_code)
            .map(|pc| pc.district.number.as_str())
            .collect();

        Ok(numbers.len())
    }

    /// Number of political communities in a district (e.g. "101")
    pub fn count_political_communities_in_district(
        &self,
        district_number: &str,
    ) -> CommunityResult<usize> {
        self.validate_district_number(district_number)?;

        Ok(self
            .model
            .political_communities()
            .filter(|pc| pc.district.number == district_number)
            .count())
    }

    pub fn count_cantons(&self) -> usize {
        self.model.cantons().len()
    }

    /// Political communities without any postal community of their own
    pub fn count_political_communities_without_postal_communities(&self) -> usize {
        self.model
            .political_communities()
            .filter(|pc| pc.postal_communities.is_empty())
            .count()
    }

    // ========================================================================
    // LOOKUPS
    // ========================================================================

    /// District names of political communities owning the zip code.
    /// Unknown zip code → empty set.
    pub fn districts_for_zip_code(&self, zip_code: &str) -> IndexSet<String> {
        self.model
            .political_communities()
            .filter(|pc| pc.has_zip_code(zip_code))
            .map(|pc| pc.district.name.clone())
            .collect()
    }

    /// Earliest last-update date among the owners of a postal community name
    pub fn last_update_for_postal_community_name(
        &self,
        postal_community_name: &str,
    ) -> CommunityResult<NaiveDate> {
        self.model
            .political_communities()
            .filter(|pc| pc.has_postal_community_named(postal_community_name))
            .map(|pc| pc.last_update)
            .min()
            .ok_or_else(|| {
                CommunityError::NotFound(format!(
                    "No political community owns postal community '{postal_community_name}'"
                ))
            })
    }

    // ========================================================================
    // SORTED GROUPINGS
    // ========================================================================

    /// Canton code → number of distinct districts, count DESC.
    ///
    /// A district is counted once, for the canton of the first political
    /// community that carries it. Equal counts keep first-seen canton order.
    pub fn district_counts_by_canton_sorted(&self) -> CommunityResult<IndexMap<String, usize>> {
        let mut seen: HashSet<&District> = HashSet::new();
        let mut counts: IndexMap<&str, usize> = IndexMap::new();

        for pc in self.model.political_communities() {
            if seen.insert(&pc.district) {
                *counts.entry(pc.canton.code.as_str()).or_default() += 1;
            }
        }

        sorted_by_count_desc(counts)
    }

    /// Canton code → number of political communities, count DESC.
    /// Equal counts keep first-seen canton order.
    pub fn political_community_counts_by_canton_sorted(
        &self,
    ) -> CommunityResult<IndexMap<String, usize>> {
        let mut counts: IndexMap<&str, usize> = IndexMap::new();

        for pc in self.model.political_communities() {
            *counts.entry(pc.canton.code.as_str()).or_default() += 1;
        }

        sorted_by_count_desc(counts)
    }

    // ========================================================================
    // VALIDATION
    // ========================================================================

    fn validate_canton_code(&self, canton_code: &str) -> CommunityResult<()> {
        if self.model.canton_codes().contains(canton_code) {
            Ok(())
        } else {
            Err(CommunityError::InvalidArgument(format!(
                "Invalid canton code: {canton_code}"
            )))
        }
    }

    fn validate_district_number(&self, district_number: &str) -> CommunityResult<()> {
        if self.model.district_numbers().contains(district_number) {
            Ok(())
        } else {
            Err(CommunityError::InvalidArgument(format!(
                "Invalid district number: {district_number}"
            )))
        }
    }
}

// ============================================================================
// HELPERS
// ============================================================================

/// Stable sort by count DESC, then insert-or-fail into an ordered map
fn sorted_by_count_desc(
    counts: IndexMap<&str, usize>,
) -> CommunityResult<IndexMap<String, usize>> {
    let mut entries: Vec<(&str, usize)> = counts.into_iter().collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1));

    insert_unique(entries)
}

/// Builds the output map, failing on a repeated key instead of overwriting
fn insert_unique<'k>(
    entries: impl IntoIterator<Item = (&'k str, usize)>,
) -> CommunityResult<IndexMap<String, usize>> {
    let mut result = IndexMap::new();

    for (key, count) in entries {
        if result.insert(key.to_string(), count).is_some() {
            return Err(CommunityError::AmbiguousAggregation(key.to_string()));
        }
    }

    Ok(result)
}
