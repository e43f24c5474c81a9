use crate::core::collector;
use crate::core::keywords::KeywordSet;
use crate::core::scorer::{self, Candidate};
use crate::domain::ports::{DomQuery, NodeProbe};

/// Upper bound on either rendered edge of a clickable hit; anything larger
/// is assumed to be a page-level container, not a button.
pub const MAX_CLICKABLE_EDGE: f32 = 200.0;

const SUBMIT_SELECTOR: &str = r#"button[type="submit"]"#;

/// Finds the single element most likely to be the send button, or none.
///
/// Resolution order, first success wins: the configured selector list (the
/// user's explicit selector if non-empty, else the site adapter's static
/// one), then keyword-bearing `aria-label`/`data-testid` attributes, then
/// the first submit button, then the scored candidate fallback. Best-effort
/// only; a concurrent DOM mutation between steps is not guarded against.
pub fn resolve_send_button<D: DomQuery>(
    dom: &D,
    keywords: &KeywordSet,
    explicit_selector: Option<&str>,
    adapter_selector: Option<&str>,
) -> Option<D::Node> {
    let configured = explicit_selector
        .filter(|selector| !selector.trim().is_empty())
        .or(adapter_selector);
    if let Some(list) = configured {
        if let Some(node) = resolve_from_selector_list(dom, list) {
            return Some(node);
        }
    }

    if let Some(node) = resolve_from_keyword_attributes(dom, keywords) {
        return Some(node);
    }

    if let Some(node) = dom
        .query(SUBMIT_SELECTOR)
        .unwrap_or_default()
        .into_iter()
        .next()
    {
        if is_clickable(&node) {
            return Some(node);
        }
    }

    rank_candidates(dom, keywords)
        .into_iter()
        .next()
        .filter(|top| top.score > scorer::MIN_ACCEPTED_SCORE)
        .map(|top| top.node)
}

/// All collected candidates with their scores, best first; equal scores
/// keep collection order.
pub fn rank_candidates<D: DomQuery>(dom: &D, keywords: &KeywordSet) -> Vec<Candidate<D::Node>> {
    let mut ranked: Vec<Candidate<D::Node>> = collector::collect_candidates(dom)
        .into_iter()
        .map(|node| Candidate {
            score: scorer::score(&node, keywords),
            node,
        })
        .collect();
    ranked.sort_by(|a, b| b.score.cmp(&a.score));
    ranked
}

fn resolve_from_selector_list<D: DomQuery>(dom: &D, list: &str) -> Option<D::Node> {
    for part in list.split(',').map(str::trim).filter(|part| !part.is_empty()) {
        match dom.query(part) {
            Ok(nodes) => {
                if let Some(node) = nodes.into_iter().next() {
                    if is_clickable(&node) {
                        return Some(node);
                    }
                }
            }
            Err(err) => {
                tracing::debug!("skipping unusable selector {part:?}: {err}");
            }
        }
    }
    None
}

fn resolve_from_keyword_attributes<D: DomQuery>(dom: &D, keywords: &KeywordSet) -> Option<D::Node> {
    let elements = dom.elements();
    for keyword in keywords.iter() {
        let hit = elements
            .iter()
            .find(|node| attr_contains(*node, "aria-label", keyword))
            .or_else(|| {
                elements
                    .iter()
                    .find(|node| attr_contains(*node, "data-testid", keyword))
            });
        if let Some(node) = hit {
            if is_clickable(node) {
                return Some(node.clone());
            }
        }
    }
    None
}

fn attr_contains<N: NodeProbe>(node: &N, name: &str, needle: &str) -> bool {
    node.attr(name)
        .is_some_and(|value| value.to_lowercase().contains(needle))
}

pub(crate) fn is_clickable<N: NodeProbe>(node: &N) -> bool {
    collector::is_presentable(node) && node.render().rect.within(MAX_CLICKABLE_EDGE)
}
