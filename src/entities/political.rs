// 🏛️ Political Community - Primary entity of the hierarchy
//
// Identity: number (unique across a Model)
// Canton and District are embedded by value, one copy per community.

use super::{Canton, District, PostalCommunity};
use crate::records::FlatPoliticalCommunity;
use chrono::NaiveDate;
use indexmap::IndexSet;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PoliticalCommunity {
    // ========================================================================
    // IDENTITY
    // ========================================================================
    /// Community number, primary key of the join
    pub number: String,

    // ========================================================================
    // VALUES
    // ========================================================================
    pub name: String,
    pub short_name: String,
    pub last_update: NaiveDate,

    pub canton: Canton,
    pub district: District,

    // ========================================================================
    // ASSOCIATIONS (filled by the Join Engine)
    // ========================================================================
    pub postal_communities: IndexSet<PostalCommunity>,
}

impl PoliticalCommunity {
    /// True when any owned postal community has this zip code
    pub fn has_zip_code(&self, zip_code: &str) -> bool {
        self.postal_communities
            .iter()
            .any(|postal| postal.zip_code == zip_code)
    }

    /// True when any owned postal community carries this name
    pub fn has_postal_community_named(&self, name: &str) -> bool {
        self.postal_communities
            .iter()
            .any(|postal| postal.name == name)
    }
}

impl From<&FlatPoliticalCommunity> for PoliticalCommunity {
    fn from(flat: &FlatPoliticalCommunity) -> Self {
        PoliticalCommunity {
            number: flat.number.clone(),
            name: flat.name.clone(),
            short_name: flat.short_name.clone(),
            last_update: flat.last_update,
            canton: Canton::new(flat.canton_code.clone(), flat.canton_name.clone()),
            district: District::new(flat.district_number.clone(), flat.district_name.clone()),
            postal_communities: IndexSet::new(),
        }
    }
}
