pub mod collector;
pub mod engine;
pub mod keywords;
pub mod resolver;
pub mod scorer;

pub use crate::domain::model::{KeyAction, KeyEvent, Outcome};
pub use crate::domain::ports::{DomQuery, Editable, NodeProbe, SettingsStore};
pub use crate::utils::error::Result;
