// Canonical quantity store: one authoritative value per widget plus the
// auxiliary parameters that shape its conversions.

pub mod params;
pub mod store;

pub use params::{AuxParams, AuxValue};
pub use store::{CanonicalStore, Quantity};
