use crate::adapters::sites::{self, NewlineStrategy, SendStrategy, SiteAdapter};
use crate::core::keywords::KeywordSet;
use crate::core::resolver;
use crate::domain::model::{
    DomainConfig, EditNotice, GlobalState, IgnoreReason, KeyAction, KeyBehavior, KeyEvent,
    KeyPhase, ModifierSlot, Outcome, Reply, Request, SettingsChange, StoredSettings, TargetKind,
};
use crate::domain::ports::{DomQuery, Editable, SettingsStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Startup gate: keydowns arriving before the settings load completes are
/// ignored outright, never queued.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Readiness {
    Loading,
    Ready,
}

/// Guard flag shared between the engine and any host code dispatching
/// synthetic key events, so those events never re-enter the handler.
#[derive(Debug, Clone, Default)]
pub struct SuppressionFlag(Arc<AtomicBool>);

impl SuppressionFlag {
    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Sets the flag for the lifetime of the returned hold. Dropping the
    /// hold clears it unconditionally, unwinding included.
    pub fn hold(&self) -> SuppressionHold {
        self.0.store(true, Ordering::SeqCst);
        SuppressionHold(self.clone())
    }
}

pub struct SuppressionHold(SuppressionFlag);

impl Drop for SuppressionHold {
    fn drop(&mut self) {
        (self.0).0.store(false, Ordering::SeqCst);
    }
}

/// Per-page-context decision core: owns the configuration mirror, the
/// readiness state and the suppression flag, and turns captured keydowns
/// into actions.
pub struct EnterKeyEngine {
    domain: String,
    keywords: KeywordSet,
    readiness: Readiness,
    state: GlobalState,
    suppression: SuppressionFlag,
}

impl EnterKeyEngine {
    pub fn new(domain: impl Into<String>, locale: &str) -> Self {
        Self {
            domain: domain.into(),
            keywords: KeywordSet::for_locale(locale),
            readiness: Readiness::Loading,
            state: GlobalState::default(),
            suppression: SuppressionFlag::default(),
        }
    }

    /// Loads the settings mirror and becomes Ready. A failed load falls
    /// back to pristine defaults; the engine becomes Ready either way.
    pub async fn initialize<S: SettingsStore>(&mut self, store: &S) {
        let stored = match store.load().await {
            Ok(stored) => stored,
            Err(err) => {
                tracing::warn!("settings load failed, using defaults: {err}");
                StoredSettings::default()
            }
        };
        self.initialize_with(stored);
    }

    pub fn initialize_with(&mut self, stored: StoredSettings) {
        self.state = GlobalState::from_stored(stored);
        self.readiness = Readiness::Ready;
    }

    pub fn readiness(&self) -> Readiness {
        self.readiness
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn state(&self) -> &GlobalState {
        &self.state
    }

    /// Shared handle for host bindings that dispatch their own synthetic
    /// events and need them ignored here.
    pub fn suppression(&self) -> SuppressionFlag {
        self.suppression.clone()
    }

    pub fn is_suppressed(&self) -> bool {
        self.suppression.is_set()
    }

    /// Decides and executes the remapping for one captured keydown.
    pub fn handle_keydown<D, T>(
        &mut self,
        event: &KeyEvent,
        target: &mut T,
        dom: &D,
    ) -> Outcome<D::Node>
    where
        D: DomQuery,
        T: Editable,
    {
        if self.suppression.is_set() {
            return Outcome::Ignored(IgnoreReason::SyntheticSuppressed);
        }
        if !event.is_enter() {
            return Outcome::Ignored(IgnoreReason::NotEnter);
        }
        if self.readiness == Readiness::Loading {
            return Outcome::Ignored(IgnoreReason::NotReady);
        }
        if target.kind() == TargetKind::Other {
            return Outcome::Ignored(IgnoreReason::NotEditable);
        }

        let config = self.state.active_config(&self.domain).clone();
        if !self.state.effective_enabled(&config) {
            return Outcome::Ignored(IgnoreReason::Disabled);
        }

        let slot = ModifierSlot::from_event(event);
        let behavior = config.behavior(slot);
        tracing::trace!(domain = %self.domain, ?slot, ?behavior, "keydown");

        let adapter = sites::adapter_for(&self.domain);
        let action = match behavior {
            KeyBehavior::Default => return Outcome::PassThrough,
            KeyBehavior::Send => self.execute_send(&config, adapter, target, dom),
            KeyBehavior::AddNewline => self.execute_newline(adapter, target),
            KeyBehavior::Block => KeyAction::Blocked,
        };
        Outcome::Handled(action)
    }

    /// Applies a request from another extension surface. Mutations land on
    /// the in-memory mirror only; persistence stays with the sender.
    pub fn handle_request(&mut self, request: Request) -> Reply {
        match request {
            Request::GetDomain => Reply::Domain {
                domain: self.domain.clone(),
            },
            Request::ConfigUpdated { config } => {
                let entry = self.state.ensure_domain(&self.domain);
                config.apply(entry);
                Reply::Success { success: true }
            }
            Request::SetDefaultEnabled { enabled } => {
                self.state.set_default_enabled(enabled);
                Reply::Success { success: true }
            }
            Request::ToggleDomain { domain, enabled } => {
                let domain = domain.unwrap_or_else(|| self.domain.clone());
                self.state.ensure_domain(&domain).enabled = Some(enabled);
                Reply::Success { success: true }
            }
        }
    }

    /// Applies a store change notification; present fields replace the
    /// mirrored value wholesale.
    pub fn apply_store_change(&mut self, change: SettingsChange) {
        if let Some(configs) = change.domain_configs {
            self.state.replace_configs(configs);
        }
        if let Some(enabled) = change.default_enabled {
            self.state.set_default_enabled(enabled);
        }
    }

    fn execute_send<D, T>(
        &self,
        config: &DomainConfig,
        adapter: Option<&SiteAdapter>,
        target: &mut T,
        dom: &D,
    ) -> KeyAction<D::Node>
    where
        D: DomQuery,
        T: Editable,
    {
        if let Some(strategy) = adapter.and_then(SiteAdapter::send_strategy) {
            match strategy {
                SendStrategy::SimulateEnter => {
                    self.dispatch_enter_sequence(target, false);
                    return KeyAction::SendKeys;
                }
            }
        }

        let adapter_selector = adapter.and_then(SiteAdapter::selector);
        match resolver::resolve_send_button(
            dom,
            &self.keywords,
            config.explicit_selector(),
            adapter_selector,
        ) {
            Some(node) => KeyAction::ClickSend(node),
            None => {
                tracing::debug!(domain = %self.domain, "send requested but no button resolved");
                KeyAction::NoOp
            }
        }
    }

    fn execute_newline<N, T>(&self, adapter: Option<&SiteAdapter>, target: &mut T) -> KeyAction<N>
    where
        T: Editable,
    {
        if let Some(strategy) = adapter.and_then(SiteAdapter::newline_strategy) {
            match strategy {
                NewlineStrategy::SimulateShiftEnter => {
                    self.dispatch_enter_sequence(target, true);
                    return KeyAction::NewlineKeys;
                }
            }
        }

        if self.insert_newline(target) {
            KeyAction::NewlineInserted
        } else {
            KeyAction::NoOp
        }
    }

    fn insert_newline<T: Editable>(&self, target: &mut T) -> bool {
        match target.kind() {
            TargetKind::TextArea => {
                let value = target.value();
                let (start, end) = target.selection();
                let start = start.min(value.len());
                let end = end.clamp(start, value.len());
                if !value.is_char_boundary(start) || !value.is_char_boundary(end) {
                    return false;
                }

                let mut next = String::with_capacity(value.len() + 1);
                next.push_str(&value[..start]);
                next.push('\n');
                next.push_str(&value[end..]);
                target.set_value(next);
                target.set_caret(start + 1);
                target.notify(EditNotice::Input);
                true
            }
            TargetKind::RichText => {
                if !target.has_cursor() {
                    return false;
                }
                if !target.insert_line_break() {
                    target.insert_line_break_manual();
                }
                target.notify(EditNotice::BeforeInputLineBreak);
                target.notify(EditNotice::InputLineBreak);
                true
            }
            TargetKind::Other => false,
        }
    }

    /// keydown, keypress, keyup for Enter in strict sequence, under the
    /// suppression hold. A simulation requested while the flag is already
    /// held is a no-op.
    fn dispatch_enter_sequence<T: Editable>(&self, target: &mut T, shift: bool) {
        if self.suppression.is_set() {
            return;
        }
        let _hold = self.suppression.hold();
        let event = if shift {
            KeyEvent::shift_enter()
        } else {
            KeyEvent::enter()
        };
        target.dispatch_key(KeyPhase::Down, &event);
        target.dispatch_key(KeyPhase::Press, &event);
        target.dispatch_key(KeyPhase::Up, &event);
    }
}
