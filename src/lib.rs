pub mod config;
pub mod error;
pub mod fraction;
pub mod quantity;
pub mod reference;
pub mod sync;
pub mod widgets;

#[cfg(target_arch = "wasm32")]
pub mod wasm;

pub use config::Config;
pub use error::{CalcError, ErrorKind};
pub use quantity::{AuxParams, AuxValue, CanonicalStore, Quantity};
pub use sync::{AuxRule, EditStatus, FieldSpec, FieldSynchronizer, SyncObserver, SyncUpdate};
pub use widgets::WidgetKind;
