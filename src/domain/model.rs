use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::LazyLock;

/// Key under which the fallback configuration lives in the domain map.
pub const DEFAULT_DOMAIN_KEY: &str = "default";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum KeyBehavior {
    #[default]
    #[serde(rename = "default")]
    Default,
    #[serde(rename = "send")]
    Send,
    #[serde(rename = "addNewline")]
    AddNewline,
    #[serde(rename = "block")]
    Block,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModifierSlot {
    Enter,
    CtrlEnter,
    ShiftEnter,
}

impl ModifierSlot {
    pub fn from_event(event: &KeyEvent) -> Self {
        if event.ctrl || event.meta {
            ModifierSlot::CtrlEnter
        } else if event.shift {
            ModifierSlot::ShiftEnter
        } else {
            ModifierSlot::Enter
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DomainConfig {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub selector: String,
    #[serde(default = "default_enter_behavior")]
    pub enter: KeyBehavior,
    #[serde(rename = "ctrlEnter", default = "default_ctrl_enter_behavior")]
    pub ctrl_enter: KeyBehavior,
    #[serde(rename = "shiftEnter", default)]
    pub shift_enter: KeyBehavior,
}

fn default_enter_behavior() -> KeyBehavior {
    KeyBehavior::AddNewline
}

fn default_ctrl_enter_behavior() -> KeyBehavior {
    KeyBehavior::Send
}

impl Default for DomainConfig {
    fn default() -> Self {
        Self {
            enabled: None,
            selector: String::new(),
            enter: KeyBehavior::AddNewline,
            ctrl_enter: KeyBehavior::Send,
            shift_enter: KeyBehavior::Default,
        }
    }
}

impl DomainConfig {
    pub fn behavior(&self, slot: ModifierSlot) -> KeyBehavior {
        match slot {
            ModifierSlot::Enter => self.enter,
            ModifierSlot::CtrlEnter => self.ctrl_enter,
            ModifierSlot::ShiftEnter => self.shift_enter,
        }
    }

    pub fn explicit_selector(&self) -> Option<&str> {
        let trimmed = self.selector.trim();
        (!trimmed.is_empty()).then_some(trimmed)
    }
}

/// Partial update carried by a `CONFIG_UPDATED` message; absent fields are
/// left untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DomainConfigPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enter: Option<KeyBehavior>,
    #[serde(rename = "ctrlEnter", default, skip_serializing_if = "Option::is_none")]
    pub ctrl_enter: Option<KeyBehavior>,
    #[serde(rename = "shiftEnter", default, skip_serializing_if = "Option::is_none")]
    pub shift_enter: Option<KeyBehavior>,
}

impl DomainConfigPatch {
    pub fn apply(&self, config: &mut DomainConfig) {
        if let Some(selector) = &self.selector {
            config.selector = selector.clone();
        }
        if let Some(enter) = self.enter {
            config.enter = enter;
        }
        if let Some(ctrl_enter) = self.ctrl_enter {
            config.ctrl_enter = ctrl_enter;
        }
        if let Some(shift_enter) = self.shift_enter {
            config.shift_enter = shift_enter;
        }
    }
}

/// On-the-wire mirror of the synced settings document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredSettings {
    #[serde(rename = "domainConfigs", default = "default_domain_configs")]
    pub domain_configs: HashMap<String, DomainConfig>,
    #[serde(rename = "defaultEnabled", default = "default_enabled_flag")]
    pub default_enabled: bool,
}

fn default_domain_configs() -> HashMap<String, DomainConfig> {
    HashMap::from([(DEFAULT_DOMAIN_KEY.to_string(), DomainConfig::default())])
}

fn default_enabled_flag() -> bool {
    true
}

impl Default for StoredSettings {
    fn default() -> Self {
        Self {
            domain_configs: default_domain_configs(),
            default_enabled: true,
        }
    }
}

/// Change notification pushed when the backing store is written elsewhere;
/// present fields replace the in-memory value wholesale.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct SettingsChange {
    #[serde(rename = "domainConfigs", default)]
    pub domain_configs: Option<HashMap<String, DomainConfig>>,
    #[serde(rename = "defaultEnabled", default)]
    pub default_enabled: Option<bool>,
}

static FALLBACK_CONFIG: LazyLock<DomainConfig> = LazyLock::new(DomainConfig::default);

/// In-memory configuration mirror for one page context. Never persisted by
/// the core; the settings store owns durability.
#[derive(Debug, Clone, PartialEq)]
pub struct GlobalState {
    configs: HashMap<String, DomainConfig>,
    default_enabled: bool,
}

impl Default for GlobalState {
    fn default() -> Self {
        Self::from_stored(StoredSettings::default())
    }
}

impl GlobalState {
    pub fn from_stored(stored: StoredSettings) -> Self {
        let mut state = Self {
            configs: stored.domain_configs,
            default_enabled: stored.default_enabled,
        };
        state.configs.entry(DEFAULT_DOMAIN_KEY.to_string()).or_default();
        state
    }

    pub fn config(&self, domain: &str) -> Option<&DomainConfig> {
        self.configs.get(domain)
    }

    /// The one config governing a keydown: the per-domain entry if present,
    /// else the default entry.
    pub fn active_config(&self, domain: &str) -> &DomainConfig {
        self.configs
            .get(domain)
            .or_else(|| self.configs.get(DEFAULT_DOMAIN_KEY))
            .unwrap_or(&FALLBACK_CONFIG)
    }

    /// Tri-state deference: an unset `enabled` inherits the global flag.
    pub fn effective_enabled(&self, config: &DomainConfig) -> bool {
        config.enabled.unwrap_or(self.default_enabled)
    }

    pub fn ensure_domain(&mut self, domain: &str) -> &mut DomainConfig {
        let template = self
            .configs
            .get(DEFAULT_DOMAIN_KEY)
            .cloned()
            .unwrap_or_default();
        self.configs.entry(domain.to_string()).or_insert(template)
    }

    pub fn replace_configs(&mut self, configs: HashMap<String, DomainConfig>) {
        self.configs = configs;
        self.configs.entry(DEFAULT_DOMAIN_KEY.to_string()).or_default();
    }

    pub fn default_enabled(&self) -> bool {
        self.default_enabled
    }

    pub fn set_default_enabled(&mut self, enabled: bool) {
        self.default_enabled = enabled;
    }
}

/// Request/response contract with the other extension surfaces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Request {
    #[serde(rename = "GET_DOMAIN")]
    GetDomain,
    #[serde(rename = "CONFIG_UPDATED")]
    ConfigUpdated { config: DomainConfigPatch },
    #[serde(rename = "SET_DEFAULT_ENABLED")]
    SetDefaultEnabled { enabled: bool },
    #[serde(rename = "TOGGLE_DOMAIN")]
    ToggleDomain {
        #[serde(default)]
        domain: Option<String>,
        enabled: bool,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Reply {
    Domain { domain: String },
    Success { success: bool },
}

/// A logical keydown as seen by the capture-phase listener.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyEvent {
    pub key: String,
    pub ctrl: bool,
    pub meta: bool,
    pub shift: bool,
}

impl KeyEvent {
    pub fn enter() -> Self {
        Self {
            key: "Enter".to_string(),
            ctrl: false,
            meta: false,
            shift: false,
        }
    }

    pub fn ctrl_enter() -> Self {
        Self {
            ctrl: true,
            ..Self::enter()
        }
    }

    pub fn shift_enter() -> Self {
        Self {
            shift: true,
            ..Self::enter()
        }
    }

    pub fn is_enter(&self) -> bool {
        self.key == "Enter"
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyPhase {
    Down,
    Press,
    Up,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetKind {
    TextArea,
    RichText,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditNotice {
    Input,
    BeforeInputLineBreak,
    InputLineBreak,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub fn has_area(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    pub fn within(&self, max_edge: f32) -> bool {
        self.width <= max_edge && self.height <= max_edge
    }
}

/// Style and geometry facts about an element, as far as the backing DOM
/// implementation can know them.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderProbe {
    pub display_none: bool,
    pub visibility_hidden: bool,
    pub opacity_zero: bool,
    pub pointer_events_none: bool,
    pub rect: Rect,
}

impl RenderProbe {
    pub fn visible(&self) -> bool {
        !(self.display_none || self.visibility_hidden || self.opacity_zero || self.pointer_events_none)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    SyntheticSuppressed,
    NotEnter,
    NotReady,
    NotEditable,
    Disabled,
}

/// What the engine did (or deliberately did not do) with one keydown.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome<N> {
    Ignored(IgnoreReason),
    PassThrough,
    Handled(KeyAction<N>),
}

impl<N> Outcome<N> {
    /// `Handled` means the host must stop propagation and prevent the
    /// native default; everything else leaves the event alone.
    pub fn suppresses_native(&self) -> bool {
        matches!(self, Outcome::Handled(_))
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum KeyAction<N> {
    /// Send resolved to a concrete button; the host binding performs the click.
    ClickSend(N),
    /// Send executed through a synthetic Enter sequence.
    SendKeys,
    /// Newline spliced into the target.
    NewlineInserted,
    /// Newline executed through a synthetic Shift+Enter sequence.
    NewlineKeys,
    Blocked,
    NoOp,
}
