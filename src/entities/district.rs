// 🗺️ District - Subdivision of a canton

use serde::{Deserialize, Serialize};

/// District value, equal by (number, name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct District {
    pub number: String,
    pub name: String,
}

impl District {
    pub fn new(number: impl Into<String>, name: impl Into<String>) -> Self {
        District {
            number: number.into(),
            name: name.into(),
        }
    }
}
