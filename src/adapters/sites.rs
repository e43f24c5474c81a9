/// How an adapter sends instead of clicking a resolved button.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SendStrategy {
    /// Dispatch a synthetic plain-Enter sequence at the target.
    SimulateEnter,
}

/// How an adapter inserts a newline instead of splicing the value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NewlineStrategy {
    /// Dispatch a synthetic Shift+Enter sequence at the target.
    SimulateShiftEnter,
}

/// Per-site override, consulted before any generic heuristic. Each variant
/// declares exactly the capability the site needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SiteAdapter {
    SelectorOnly { selector: &'static str },
    CustomSend { strategy: SendStrategy },
    CustomNewline { strategy: NewlineStrategy },
}

impl SiteAdapter {
    pub fn selector(&self) -> Option<&'static str> {
        match self {
            SiteAdapter::SelectorOnly { selector } => Some(selector),
            _ => None,
        }
    }

    pub fn send_strategy(&self) -> Option<SendStrategy> {
        match self {
            SiteAdapter::CustomSend { strategy } => Some(*strategy),
            _ => None,
        }
    }

    pub fn newline_strategy(&self) -> Option<NewlineStrategy> {
        match self {
            SiteAdapter::CustomNewline { strategy } => Some(*strategy),
            _ => None,
        }
    }
}

// Compiled-in table, keyed by exact hostname.
const ADAPTERS: &[(&str, SiteAdapter)] = &[
    (
        "chatgpt.com",
        SiteAdapter::CustomNewline {
            strategy: NewlineStrategy::SimulateShiftEnter,
        },
    ),
    (
        "www.qianwen.com",
        SiteAdapter::SelectorOnly {
            selector: ".operateBtn-JsB9e2",
        },
    ),
    (
        "chat.deepseek.com",
        SiteAdapter::SelectorOnly {
            selector: "._7436101",
        },
    ),
    (
        "github.com",
        SiteAdapter::CustomSend {
            strategy: SendStrategy::SimulateEnter,
        },
    ),
    (
        "chatglm.cn",
        SiteAdapter::CustomSend {
            strategy: SendStrategy::SimulateEnter,
        },
    ),
    (
        "filehelper.weixin.qq.com",
        SiteAdapter::CustomNewline {
            strategy: NewlineStrategy::SimulateShiftEnter,
        },
    ),
];

pub fn adapter_for(domain: &str) -> Option<&'static SiteAdapter> {
    ADAPTERS
        .iter()
        .find(|(host, _)| *host == domain)
        .map(|(_, adapter)| adapter)
}

pub fn has_adapter(domain: &str) -> bool {
    adapter_for(domain).is_some()
}
