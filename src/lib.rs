// Community Registry - Core Library
// Joins the political and postal community registers into one in-memory
// model and answers aggregate queries over it.

pub mod config;
pub mod entities;
pub mod error;
pub mod join;
pub mod loader;
pub mod model;
pub mod query;
pub mod records;
pub mod report;

// Re-export commonly used types
pub use config::LoaderConfig;
pub use entities::{Canton, District, PoliticalCommunity, PostalCommunity};
pub use error::{CommunityError, CommunityResult};
pub use join::JoinEngine;
pub use loader::{
    load_political_communities, load_postal_communities,
    read_political_communities, read_postal_communities,
};
pub use model::Model;
pub use query::QueryEngine;
pub use records::{FlatPoliticalCommunity, FlatPostalCommunity};
pub use report::RegistryReport;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
