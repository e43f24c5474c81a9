pub mod model;
pub mod ports;

pub use model::{DomainConfig, GlobalState, KeyBehavior, KeyEvent, Outcome, StoredSettings};
pub use ports::{DomQuery, Editable, NodeProbe, SettingsStore};
