// 🔗 Join Engine - Flat records → normalized Model
//
// 1. Political communities keyed by number (last write wins)
// 2. Postal records grouped by zip key (first record per key wins)
// 3. Each postal community attached to its owner, unknown owner = abort
// 4. Canton + District sets projected from the political communities

use crate::entities::{Canton, District, PoliticalCommunity, PostalCommunity};
use crate::error::{CommunityError, CommunityResult};
use crate::model::Model;
use crate::records::{FlatPoliticalCommunity, FlatPostalCommunity};
use indexmap::{IndexMap, IndexSet};
use tracing::{debug, info, warn};

// ============================================================================
// JOIN ENGINE
// ============================================================================

/// Stateless: every call to `build` starts from scratch.
#[derive(Debug, Default, Clone, Copy)]
pub struct JoinEngine;

impl JoinEngine {
    pub fn new() -> Self {
        JoinEngine
    }

    /// Build a Model from the two flat collections
    ///
    /// # Errors
    /// * `MissingReference` - a postal record names an unknown political community
    pub fn build(
        &self,
        political: &[FlatPoliticalCommunity],
        postal: &[FlatPostalCommunity],
    ) -> CommunityResult<Model> {
        let mut by_number = self.political_communities_by_number(political);
        let postal_communities = self.attach_postal_communities(postal, &mut by_number)?;

        let cantons: IndexSet<Canton> = by_number.values().map(|pc| pc.canton.clone()).collect();
        let districts: IndexSet<District> =
            by_number.values().map(|pc| pc.district.clone()).collect();

        info!(
            political_communities = by_number.len(),
            postal_communities = postal_communities.len(),
            cantons = cantons.len(),
            districts = districts.len(),
            "model built"
        );

        Ok(Model::new(by_number, postal_communities, cantons, districts))
    }

    /// Step 1: one entity per number, later records replace earlier ones
    fn political_communities_by_number(
        &self,
        political: &[FlatPoliticalCommunity],
    ) -> IndexMap<String, PoliticalCommunity> {
        let mut by_number = IndexMap::with_capacity(political.len());

        for flat in political {
            // IndexMap::insert keeps the slot of the first occurrence
            if by_number
                .insert(flat.number.clone(), PoliticalCommunity::from(flat))
                .is_some()
            {
                debug!(number = %flat.number, "duplicate political community replaced");
            }
        }

        by_number
    }

    /// Steps 2-4: group by zip key, pick a representative, attach to owner
    fn attach_postal_communities(
        &self,
        postal: &[FlatPostalCommunity],
        by_number: &mut IndexMap<String, PoliticalCommunity>,
    ) -> CommunityResult<IndexSet<PostalCommunity>> {
        let groups = group_by_zip_key(postal);
        let mut created = IndexSet::with_capacity(groups.len());

        for (zip_key, group) in groups {
            let representative = group[0];

            for other in &group[1..] {
                // Dropped duplicates still need a resolvable owner
                if !by_number.contains_key(&other.political_community_number) {
                    return Err(CommunityError::MissingReference {
                        zip_key: zip_key.clone(),
                        number: other.political_community_number.clone(),
                    });
                }

                if is_conflicting(representative, other) {
                    warn!(
                        zip_key = %zip_key,
                        kept = %representative.name,
                        dropped = %other.name,
                        "conflicting postal records share a zip key, keeping the first"
                    );
                }
            }

            let owner = by_number
                .get_mut(&representative.political_community_number)
                .ok_or_else(|| CommunityError::MissingReference {
                    zip_key: zip_key.clone(),
                    number: representative.political_community_number.clone(),
                })?;

            let postal_community = PostalCommunity::from(representative);
            owner.postal_communities.insert(postal_community.clone());
            created.insert(postal_community);
        }

        Ok(created)
    }
}

/// Same zip key but different content, including a different zip/addition split
fn is_conflicting(kept: &FlatPostalCommunity, other: &FlatPostalCommunity) -> bool {
    other.zip_code != kept.zip_code
        || other.zip_code_addition != kept.zip_code_addition
        || other.name != kept.name
        || other.political_community_number != kept.political_community_number
}

/// Insertion-ordered grouping, groups keep input order
fn group_by_zip_key(
    postal: &[FlatPostalCommunity],
) -> IndexMap<String, Vec<&FlatPostalCommunity>> {
    let mut groups: IndexMap<String, Vec<&FlatPostalCommunity>> = IndexMap::new();
    for flat in postal {
        groups.entry(flat.zip_key()).or_default().push(flat);
    }
    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn create_political(number: &str, canton: &str, district: &str) -> FlatPoliticalCommunity {
        FlatPoliticalCommunity {
            number: number.to_string(),
            name: format!("Community {number}"),
            short_name: format!("C{number}"),
            last_update: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap(),
            canton_code: canton.to_string(),
            canton_name: format!("Canton {canton}"),
            district_number: district.to_string(),
            district_name: format!("District {district}"),
        }
    }

    #[test]
    fn test_build_simple_model() {
        let political = vec![
            create_political("1", "ZH", "101"),
            create_political("2", "ZH", "101"),
            create_political("3", "BE", "201"),
        ];
        let postal = vec![
            FlatPostalCommunity::new("8001", "00", "Zürich", "1"),
            FlatPostalCommunity::new("3000", "00", "Bern", "3"),
        ];

        let model = JoinEngine::new().build(&political, &postal).unwrap();

        assert_eq!(model.political_community_count(), 3);
        assert_eq!(model.postal_communities().len(), 2);
        assert_eq!(model.cantons().len(), 2);
        assert_eq!(model.districts().len(), 2);
        assert_eq!(model.political_community("1").unwrap().postal_communities.len(), 1);
        assert!(model.political_community("2").unwrap().postal_communities.is_empty());
    }

    #[test]
    fn test_duplicate_number_last_write_wins() {
        let mut later = create_political("1", "ZH", "101");
        later.name = "Renamed".to_string();
        let political = vec![
            create_political("1", "ZH", "101"),
            create_political("2", "BE", "201"),
            later,
        ];

        let model = JoinEngine::new().build(&political, &[]).unwrap();

        assert_eq!(model.political_community_count(), 2);
        assert_eq!(model.political_community("1").unwrap().name, "Renamed");
        // Replacement keeps the first position
        let numbers: Vec<&str> = model
            .political_communities()
            .map(|pc| pc.number.as_str())
            .collect();
        assert_eq!(numbers, vec!["1", "2"]);
    }

    #[test]
    fn test_duplicate_zip_keys_collapse() {
        let political = vec![create_political("1", "ZH", "101")];
        let postal = vec![
            FlatPostalCommunity::new("8001", "00", "Zürich", "1"),
            FlatPostalCommunity::new("8001", "00", "Zürich", "1"),
            FlatPostalCommunity::new("8001", "01", "Zürich", "1"),
        ];

        let model = JoinEngine::new().build(&political, &postal).unwrap();

        assert_eq!(model.postal_communities().len(), 2);
        assert_eq!(model.political_community("1").unwrap().postal_communities.len(), 2);
    }

    #[test]
    fn test_conflicting_zip_key_keeps_first_record() {
        let political = vec![
            create_political("1", "ZH", "101"),
            create_political("2", "ZH", "102"),
        ];
        let postal = vec![
            FlatPostalCommunity::new("8001", "00", "Zürich", "1"),
            FlatPostalCommunity::new("8001", "00", "Zentrum", "2"),
        ];

        let model = JoinEngine::new().build(&political, &postal).unwrap();

        assert_eq!(model.postal_communities().len(), 1);
        assert_eq!(model.postal_communities()[0].name, "Zürich");
        assert_eq!(model.political_community("1").unwrap().postal_communities.len(), 1);
        assert!(model.political_community("2").unwrap().postal_communities.is_empty());
    }

    #[test]
    fn test_missing_reference_aborts() {
        let political = vec![create_political("1", "ZH", "101")];
        let postal = vec![FlatPostalCommunity::new("9999", "", "Nowhere", "42")];

        let err = JoinEngine::new().build(&political, &postal).unwrap_err();

        match err {
            CommunityError::MissingReference { zip_key, number } => {
                assert_eq!(zip_key, "9999");
                assert_eq!(number, "42");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_missing_reference_on_dropped_duplicate_aborts() {
        let political = vec![create_political("1", "ZH", "101")];
        let postal = vec![
            FlatPostalCommunity::new("8001", "00", "Zürich", "1"),
            FlatPostalCommunity::new("8001", "00", "Zürich", "42"),
        ];

        let err = JoinEngine::new().build(&political, &postal).unwrap_err();

        match err {
            CommunityError::MissingReference { zip_key, number } => {
                assert_eq!(zip_key, "800100");
                assert_eq!(number, "42");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_different_zip_split_is_conflicting() {
        let kept = FlatPostalCommunity::new("800", "10", "Zürich", "1");
        let other = FlatPostalCommunity::new("8001", "0", "Zürich", "1");
        assert_eq!(kept.zip_key(), other.zip_key());

        assert!(is_conflicting(&kept, &other));
        assert!(!is_conflicting(&kept, &kept.clone()));

        let political = vec![create_political("1", "ZH", "101")];
        let model = JoinEngine::new().build(&political, &[kept, other]).unwrap();

        assert_eq!(model.postal_communities().len(), 1);
        assert_eq!(model.postal_communities()[0].zip_code, "800");
        assert_eq!(model.postal_communities()[0].zip_code_addition, "10");
    }

    #[test]
    fn test_ownership_closure() {
        let political = vec![
            create_political("1", "ZH", "101"),
            create_political("2", "BE", "201"),
        ];
        let postal = vec![
            FlatPostalCommunity::new("8001", "00", "Zürich", "1"),
            FlatPostalCommunity::new("8002", "00", "Zürich", "1"),
            FlatPostalCommunity::new("3000", "00", "Bern", "2"),
        ];

        let model = JoinEngine::new().build(&political, &postal).unwrap();

        for postal in model.postal_communities() {
            let owners = model
                .political_communities()
                .filter(|pc| pc.postal_communities.contains(postal))
                .count();
            assert_eq!(owners, 1, "{} owned {} times", postal.zip_key(), owners);
        }
    }

    #[test]
    fn test_engine_is_reentrant() {
        let engine = JoinEngine::new();
        let first = engine.build(&[create_political("1", "ZH", "101")], &[]).unwrap();
        let second = engine.build(&[create_political("2", "BE", "201")], &[]).unwrap();

        assert!(first.political_community("2").is_none());
        assert!(second.political_community("1").is_none());
    }
}
