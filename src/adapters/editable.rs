use crate::core::engine::SuppressionFlag;
use crate::domain::model::{EditNotice, KeyEvent, KeyPhase, TargetKind};
use crate::domain::ports::Editable;

/// One recorded side effect on a buffer target.
#[derive(Debug, Clone, PartialEq)]
pub enum TargetEvent {
    Key { phase: KeyPhase, event: KeyEvent },
    Notice(EditNotice),
    ManualLineBreak,
}

/// In-memory editable target: a plain value with a selection, plus a log of
/// every notification and synthetic key that reaches it. Stands in for the
/// page's textarea or contenteditable region when driving the engine
/// outside a browser.
#[derive(Debug, Clone)]
pub struct BufferTarget {
    kind: TargetKind,
    value: String,
    selection: (usize, usize),
    cursor_active: bool,
    native_line_breaks: bool,
    events: Vec<TargetEvent>,
    witness: Option<SuppressionFlag>,
    witnessed: Vec<bool>,
}

impl BufferTarget {
    fn new(kind: TargetKind) -> Self {
        Self {
            kind,
            value: String::new(),
            selection: (0, 0),
            cursor_active: true,
            native_line_breaks: true,
            events: Vec::new(),
            witness: None,
            witnessed: Vec::new(),
        }
    }

    pub fn textarea(value: &str, caret: usize) -> Self {
        Self {
            value: value.to_string(),
            selection: (caret, caret),
            ..Self::new(TargetKind::TextArea)
        }
    }

    pub fn rich_text() -> Self {
        Self::new(TargetKind::RichText)
    }

    pub fn other() -> Self {
        Self::new(TargetKind::Other)
    }

    pub fn with_selection(mut self, start: usize, end: usize) -> Self {
        self.selection = (start, end);
        self
    }

    /// Models an editor whose native line-break command is unsupported.
    pub fn without_native_line_breaks(mut self) -> Self {
        self.native_line_breaks = false;
        self
    }

    /// Models a rich region with no active selection range.
    pub fn without_cursor(mut self) -> Self {
        self.cursor_active = false;
        self
    }

    /// Records the suppression flag's state at every key dispatch, so the
    /// non-reentrancy guarantee can be observed from outside the engine.
    pub fn with_suppression_witness(mut self, flag: SuppressionFlag) -> Self {
        self.witness = Some(flag);
        self
    }

    pub fn events(&self) -> &[TargetEvent] {
        &self.events
    }

    pub fn witnessed_suppression(&self) -> &[bool] {
        &self.witnessed
    }
}

impl Editable for BufferTarget {
    fn kind(&self) -> TargetKind {
        self.kind
    }

    fn value(&self) -> String {
        self.value.clone()
    }

    fn set_value(&mut self, value: String) {
        self.value = value;
    }

    fn selection(&self) -> (usize, usize) {
        self.selection
    }

    fn set_caret(&mut self, at: usize) {
        self.selection = (at, at);
    }

    fn has_cursor(&self) -> bool {
        self.cursor_active
    }

    fn insert_line_break(&mut self) -> bool {
        if !self.native_line_breaks {
            return false;
        }
        self.value.push('\n');
        true
    }

    fn insert_line_break_manual(&mut self) {
        self.value.push('\n');
        self.events.push(TargetEvent::ManualLineBreak);
    }

    fn notify(&mut self, notice: EditNotice) {
        self.events.push(TargetEvent::Notice(notice));
    }

    fn dispatch_key(&mut self, phase: KeyPhase, event: &KeyEvent) {
        if let Some(flag) = &self.witness {
            self.witnessed.push(flag.is_set());
        }
        self.events.push(TargetEvent::Key {
            phase,
            event: event.clone(),
        });
    }
}
