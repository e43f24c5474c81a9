pub mod store;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use crate::utils::validation::{self, Validate};
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};

#[cfg(feature = "cli")]
use crate::domain::model::KeyEvent;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum KeyChord {
    Enter,
    CtrlEnter,
    ShiftEnter,
}

#[cfg(feature = "cli")]
impl KeyChord {
    pub fn to_event(self) -> KeyEvent {
        match self {
            KeyChord::Enter => KeyEvent::enter(),
            KeyChord::CtrlEnter => KeyEvent::ctrl_enter(),
            KeyChord::ShiftEnter => KeyEvent::shift_enter(),
        }
    }
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "enter-remap")]
#[command(about = "Probe an HTML snapshot for the most likely send button")]
pub struct CliConfig {
    /// HTML snapshot file to scan
    #[arg(long)]
    pub page: String,

    /// UI locale used to build the keyword list
    #[arg(long, default_value = "en")]
    pub locale: String,

    /// Explicit selector override (comma-separated list, tried in order)
    #[arg(long)]
    pub selector: Option<String>,

    /// Hostname used for adapter and per-domain config lookup
    #[arg(long)]
    pub domain: Option<String>,

    /// JSON settings file in the synced-storage format
    #[arg(long)]
    pub settings: Option<String>,

    /// Also run a keydown through the engine and report the decision
    #[arg(long, value_enum)]
    pub key: Option<KeyChord>,

    /// Print the full scored candidate table
    #[arg(long)]
    pub candidates: bool,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_non_empty_string("page", &self.page)?;
        validation::validate_locale("locale", &self.locale)?;
        if let Some(selector) = &self.selector {
            validation::validate_selector_list("selector", selector)?;
        }
        Ok(())
    }
}
