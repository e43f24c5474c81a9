use crate::domain::ports::{DomQuery, NodeProbe};

// Structural groups scanned for send-button candidates. Anything matching
// one of these is a candidate as long as it is enabled, attached and
// actually rendered.
const CONTROL_GROUP: &str = r#"button, input[type="button"], input[type="submit"], [role="button"]"#;
const ANCHOR_GROUP: &str = r#"a[class*="send"], a[id*="send"]"#;
const CONTAINER_GROUP: &str = r#"div[class*="send"], div[class*="submit"], div[class*="enter"]"#;
const ICON_HOST_GROUP: &str = "div";

/// Scans the live DOM for plausibly-clickable elements. Order is collection
/// order and carries no meaning beyond downstream tie-breaking; re-invoking
/// re-scans and may observe a mutated document.
pub fn collect_candidates<D: DomQuery>(dom: &D) -> Vec<D::Node> {
    let mut candidates: Vec<D::Node> = Vec::new();

    for group in [CONTROL_GROUP, ANCHOR_GROUP, CONTAINER_GROUP] {
        for node in dom.query(group).unwrap_or_default() {
            push_candidate(&mut candidates, node);
        }
    }

    // Generic containers holding a send-ish icon image or any inline vector
    // graphic; expressed through child iteration on the inspector port.
    for node in dom.query(ICON_HOST_GROUP).unwrap_or_default() {
        if hosts_send_icon(&node) {
            push_candidate(&mut candidates, node);
        }
    }

    candidates
}

fn push_candidate<N: NodeProbe>(candidates: &mut Vec<N>, node: N) {
    if is_presentable(&node) && !candidates.contains(&node) {
        candidates.push(node);
    }
}

fn hosts_send_icon<N: NodeProbe>(node: &N) -> bool {
    node.children().iter().any(|child| match child.tag().as_str() {
        "img" => child
            .attr("src")
            .is_some_and(|src| src.to_lowercase().contains("send")),
        "svg" => true,
        _ => false,
    })
}

/// Enabled, attached, and actually rendered with a non-zero box.
pub(crate) fn is_presentable<N: NodeProbe>(node: &N) -> bool {
    if node.is_disabled() || !node.is_connected() {
        return false;
    }
    let probe = node.render();
    probe.visible() && probe.rect.has_area()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::snapshot::PageSnapshot;

    #[test]
    fn test_filters_disabled_and_hidden() {
        let page = PageSnapshot::parse(
            r#"<body>
                <button id="ok">Go</button>
                <button id="off" disabled>Go</button>
                <button id="aria-off" aria-disabled="true">Go</button>
                <button id="gone" style="display: none">Go</button>
                <button id="ghost" style="visibility: hidden">Go</button>
                <button id="clear" style="opacity: 0">Go</button>
                <button id="inert" style="pointer-events: none">Go</button>
                <button id="flat" style="width: 0px">Go</button>
            </body>"#,
        );
        let candidates = collect_candidates(&page.dom());

        let ids: Vec<String> = candidates
            .iter()
            .filter_map(|node| node.attr("id"))
            .collect();
        assert_eq!(ids, vec!["ok"]);
    }

    #[test]
    fn test_icon_host_group() {
        let page = PageSnapshot::parse(
            r#"<body>
                <div id="icon-img"><img src="/static/send-arrow.png"></div>
                <div id="icon-svg"><svg viewBox="0 0 24 24"></svg></div>
                <div id="plain"><img src="/static/logo.png"></div>
            </body>"#,
        );
        let candidates = collect_candidates(&page.dom());

        let ids: Vec<String> = candidates
            .iter()
            .filter_map(|node| node.attr("id"))
            .collect();
        assert_eq!(ids, vec!["icon-img", "icon-svg"]);
    }

    #[test]
    fn test_deduplicates_across_groups() {
        // Matches both the container group (class) and the icon-host group.
        let page = PageSnapshot::parse(
            r#"<body><div id="both" class="send-wrap"><svg></svg></div></body>"#,
        );
        let candidates = collect_candidates(&page.dom());
        assert_eq!(candidates.len(), 1);
    }

    #[test]
    fn test_collection_order_is_document_order_within_groups() {
        let page = PageSnapshot::parse(
            r#"<body>
                <button id="first">a</button>
                <button id="second">b</button>
            </body>"#,
        );
        let candidates = collect_candidates(&page.dom());
        let ids: Vec<String> = candidates
            .iter()
            .filter_map(|node| node.attr("id"))
            .collect();
        assert_eq!(ids, vec!["first", "second"]);
    }
}
