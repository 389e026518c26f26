// Field synchronization: N visible fields kept consistent with one
// canonical value held in a CanonicalStore.

pub mod field;
pub mod format;
pub mod input;
pub mod observer;
pub mod synchronizer;

#[cfg(test)]
mod tests;

pub use field::{FieldSpec, Representation, UnitField};
pub use format::{DisplayPolicy, PrecisionRule};
pub use input::{parse_fraction, parse_number};
pub use observer::{ChannelObserver, FnObserver, SyncObserver};
pub use synchronizer::{AuxRule, DisplayMap, EditStatus, FieldInfo, FieldSynchronizer, SyncUpdate};
