// 🧩 Model - Immutable aggregate of the administrative hierarchy
//
// Built once by the Join Engine, read-only afterwards.
// Derived indexes (canton codes, district numbers) are computed on first use
// and cached for the lifetime of the Model.

use crate::entities::{Canton, District, PoliticalCommunity, PostalCommunity};
use indexmap::{IndexMap, IndexSet};
use std::collections::HashSet;
use std::sync::OnceLock;

#[derive(Debug, Clone)]
pub struct Model {
    /// Keyed by community number, first-seen input order
    political_communities: IndexMap<String, PoliticalCommunity>,
    postal_communities: IndexSet<PostalCommunity>,
    cantons: IndexSet<Canton>,
    districts: IndexSet<District>,

    canton_codes: OnceLock<HashSet<String>>,
    district_numbers: OnceLock<HashSet<String>>,
}

impl Model {
    pub fn new(
        political_communities: IndexMap<String, PoliticalCommunity>,
        postal_communities: IndexSet<PostalCommunity>,
        cantons: IndexSet<Canton>,
        districts: IndexSet<District>,
    ) -> Self {
        Model {
            political_communities,
            postal_communities,
            cantons,
            districts,
            canton_codes: OnceLock::new(),
            district_numbers: OnceLock::new(),
        }
    }

    pub fn political_communities(&self) -> impl Iterator<Item = &PoliticalCommunity> {
        self.political_communities.values()
    }

    /// Lookup by community number
    pub fn political_community(&self, number: &str) -> Option<&PoliticalCommunity> {
        self.political_communities.get(number)
    }

    pub fn political_community_count(&self) -> usize {
        self.political_communities.len()
    }

    pub fn postal_communities(&self) -> &IndexSet<PostalCommunity> {
        &self.postal_communities
    }

    pub fn cantons(&self) -> &IndexSet<Canton> {
        &self.cantons
    }

    pub fn districts(&self) -> &IndexSet<District> {
        &self.districts
    }

    /// All canton codes present in the Model (cached)
    pub fn canton_codes(&self) -> &HashSet<String> {
        self.canton_codes.get_or_init(|| {
            self.cantons
                .iter()
                .map(|canton| canton.code.clone())
                .collect()
        })
    }

    /// All district numbers present in the Model (cached)
    pub fn district_numbers(&self) -> &HashSet<String> {
        self.district_numbers.get_or_init(|| {
            self.districts
                .iter()
                .map(|district| district.number.clone())
                .collect()
        })
    }
}
