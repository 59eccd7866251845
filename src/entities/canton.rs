// 🏔️ Canton - Top-level administrative region
// Value type: two cantons are the same canton iff code AND name match.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Canton {
    /// Short code, e.g. "ZH"
    pub code: String,
    pub name: String,
}

impl Canton {
    pub fn new(code: impl Into<String>, name: impl Into<String>) -> Self {
        Canton {
            code: code.into(),
            name: name.into(),
        }
    }
}
