use crate::domain::model::{EditNotice, KeyEvent, KeyPhase, RenderProbe, StoredSettings, TargetKind};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Element inspector: everything the scorer and collector are allowed to
/// know about a DOM node. Backed by a parsed snapshot here; a live-browser
/// binding would implement the same surface.
pub trait NodeProbe: Clone + PartialEq {
    fn tag(&self) -> String;
    fn attr(&self, name: &str) -> Option<String>;
    fn text(&self) -> String;
    fn inner_html(&self) -> String;
    fn parent(&self) -> Option<Self>;
    fn children(&self) -> Vec<Self>;
    /// Element descendants in document order, excluding the node itself.
    fn descendants(&self) -> Vec<Self>;
    fn ancestors(&self) -> Vec<Self>;
    fn is_connected(&self) -> bool;
    fn is_disabled(&self) -> bool;
    fn render(&self) -> RenderProbe;
}

pub trait DomQuery {
    type Node: NodeProbe;

    /// Runs a CSS selector against the live document. Invalid selector
    /// syntax surfaces as an error so callers can skip it.
    fn query(&self, selector: &str) -> Result<Vec<Self::Node>>;

    /// All elements in document order.
    fn elements(&self) -> Vec<Self::Node> {
        self.query("*").unwrap_or_default()
    }
}

/// The editable element a keydown landed on: a plain text field with a
/// caret, or a rich contenteditable region.
pub trait Editable {
    fn kind(&self) -> TargetKind;

    fn value(&self) -> String;
    fn set_value(&mut self, value: String);
    fn selection(&self) -> (usize, usize);
    fn set_caret(&mut self, at: usize);

    /// Whether a rich region has an active cursor to insert at.
    fn has_cursor(&self) -> bool;
    /// Editor-native line-break insertion; false when unsupported.
    fn insert_line_break(&mut self) -> bool;
    fn insert_line_break_manual(&mut self);

    fn notify(&mut self, notice: EditNotice);
    fn dispatch_key(&mut self, phase: KeyPhase, event: &KeyEvent);
}

#[async_trait]
pub trait SettingsStore: Send + Sync {
    async fn load(&self) -> Result<StoredSettings>;
    async fn save(&self, settings: &StoredSettings) -> Result<()>;
}
