// 📮 Postal Community - Named area behind a zip code
//
// No back-reference to its owner: the association lives on
// PoliticalCommunity only.

use crate::records::FlatPostalCommunity;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PostalCommunity {
    pub zip_code: String,
    pub zip_code_addition: String,
    pub name: String,
}

impl PostalCommunity {
    pub fn new(
        zip_code: impl Into<String>,
        zip_code_addition: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        PostalCommunity {
            zip_code: zip_code.into(),
            zip_code_addition: zip_code_addition.into(),
            name: name.into(),
        }
    }

    /// Same key the Join Engine deduplicates on
    pub fn zip_key(&self) -> String {
        format!("{}{}", self.zip_code, self.zip_code_addition)
    }
}

impl From<&FlatPostalCommunity> for PostalCommunity {
    fn from(flat: &FlatPostalCommunity) -> Self {
        PostalCommunity {
            zip_code: flat.zip_code.clone(),
            zip_code_addition: flat.zip_code_addition.clone(),
            name: flat.name.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_flat_drops_owner() {
        let flat = FlatPostalCommunity::new("8001", "00", "Zürich", "261");
        let postal = PostalCommunity::from(&flat);

        assert_eq!(postal, PostalCommunity::new("8001", "00", "Zürich"));
        assert_eq!(postal.zip_key(), flat.zip_key());
    }
}
