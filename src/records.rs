// 📄 Flat Records - Input rows for the Join Engine
// One record per source row, denormalized, duplicates allowed.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ============================================================================
// FLAT POLITICAL COMMUNITY
// ============================================================================

/// One row of the political community register.
///
/// Canton and district are repeated on every row; the Join Engine turns them
/// into value entities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatPoliticalCommunity {
    /// Community number (join key)
    pub number: String,
    pub name: String,
    pub short_name: String,
    pub last_update: NaiveDate,

    pub canton_code: String,
    pub canton_name: String,

    pub district_number: String,
    pub district_name: String,
}

// ============================================================================
// FLAT POSTAL COMMUNITY
// ============================================================================

/// One row of the postal community register.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatPostalCommunity {
    pub zip_code: String,

    /// May be empty
    pub zip_code_addition: String,

    pub name: String,

    /// Foreign key into the political community register
    pub political_community_number: String,
}

impl FlatPostalCommunity {
    pub fn new(
        zip_code: impl Into<String>,
        zip_code_addition: impl Into<String>,
        name: impl Into<String>,
        political_community_number: impl Into<String>,
    ) -> Self {
        FlatPostalCommunity {
            zip_code: zip_code.into(),
            zip_code_addition: zip_code_addition.into(),
            name: name.into(),
            political_community_number: political_community_number.into(),
        }
    }

    /// Deduplication key: zip code followed by its addition
    pub fn zip_key(&self) -> String {
        format!("{}{}", self.zip_code, self.zip_code_addition)
    }
}
