// Static reference data consumed read-only by widgets.

pub mod tables;

pub use tables::{normalize_key, ReferenceTable};
