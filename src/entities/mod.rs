// Entity Models
//
// Plain value types. Canton and District dedupe by value (Hash + Eq),
// PoliticalCommunity owns its postal communities one-directionally.

pub mod canton;
pub mod district;
pub mod political;
pub mod postal;

pub use canton::Canton;
pub use district::District;
pub use political::PoliticalCommunity;
pub use postal::PostalCommunity;
