use crate::domain::model::{Rect, RenderProbe};
use crate::domain::ports::{DomQuery, NodeProbe};
use crate::utils::error::{RemapError, Result};
use scraper::{ElementRef, Html, Selector};

/// Rendered size assumed for elements that declare none; a parsed snapshot
/// carries no layout, so size and visibility are read from inline style and
/// the `hidden`/`width`/`height` attributes.
pub const DEFAULT_EDGE: f32 = 24.0;

/// An HTML document captured as text and queried like the live page.
pub struct PageSnapshot {
    html: Html,
}

impl PageSnapshot {
    pub fn parse(html: &str) -> Self {
        Self {
            html: Html::parse_document(html),
        }
    }

    pub fn dom(&self) -> SnapshotDom<'_> {
        SnapshotDom { html: &self.html }
    }
}

#[derive(Clone, Copy)]
pub struct SnapshotDom<'a> {
    html: &'a Html,
}

impl<'a> DomQuery for SnapshotDom<'a> {
    type Node = SnapshotNode<'a>;

    fn query(&self, selector: &str) -> Result<Vec<SnapshotNode<'a>>> {
        let parsed = Selector::parse(selector).map_err(|err| RemapError::SelectorSyntaxError {
            selector: selector.to_string(),
            reason: err.to_string(),
        })?;
        Ok(self.html.select(&parsed).map(SnapshotNode::new).collect())
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SnapshotNode<'a> {
    el: ElementRef<'a>,
}

impl<'a> SnapshotNode<'a> {
    fn new(el: ElementRef<'a>) -> Self {
        Self { el }
    }
}

impl PartialEq for SnapshotNode<'_> {
    fn eq(&self, other: &Self) -> bool {
        self.el.id() == other.el.id()
    }
}

impl<'a> NodeProbe for SnapshotNode<'a> {
    fn tag(&self) -> String {
        self.el.value().name().to_lowercase()
    }

    fn attr(&self, name: &str) -> Option<String> {
        self.el.value().attr(name).map(str::to_string)
    }

    fn text(&self) -> String {
        self.el.text().collect()
    }

    fn inner_html(&self) -> String {
        self.el.inner_html()
    }

    fn parent(&self) -> Option<Self> {
        self.el.parent().and_then(ElementRef::wrap).map(Self::new)
    }

    fn children(&self) -> Vec<Self> {
        self.el
            .children()
            .filter_map(ElementRef::wrap)
            .map(Self::new)
            .collect()
    }

    fn descendants(&self) -> Vec<Self> {
        self.el
            .descendants()
            .skip(1)
            .filter_map(ElementRef::wrap)
            .map(Self::new)
            .collect()
    }

    fn ancestors(&self) -> Vec<Self> {
        self.el
            .ancestors()
            .filter_map(ElementRef::wrap)
            .map(Self::new)
            .collect()
    }

    fn is_connected(&self) -> bool {
        // A parsed node is attached to its document by construction.
        true
    }

    fn is_disabled(&self) -> bool {
        self.el.value().attr("disabled").is_some()
            || self.el.value().attr("aria-disabled") == Some("true")
    }

    fn render(&self) -> RenderProbe {
        let style = self.attr("style").unwrap_or_default().to_lowercase();

        let width = style_value(&style, "width")
            .and_then(|value| parse_px(&value))
            .or_else(|| self.attr("width").and_then(|value| parse_px(&value)))
            .unwrap_or(DEFAULT_EDGE);
        let height = style_value(&style, "height")
            .and_then(|value| parse_px(&value))
            .or_else(|| self.attr("height").and_then(|value| parse_px(&value)))
            .unwrap_or(DEFAULT_EDGE);

        RenderProbe {
            display_none: self.el.value().attr("hidden").is_some()
                || style_value(&style, "display").as_deref() == Some("none"),
            visibility_hidden: style_value(&style, "visibility").as_deref() == Some("hidden"),
            opacity_zero: style_value(&style, "opacity")
                .and_then(|value| value.parse::<f32>().ok())
                .is_some_and(|opacity| opacity == 0.0),
            pointer_events_none: style_value(&style, "pointer-events").as_deref() == Some("none"),
            rect: Rect { width, height },
        }
    }
}

fn style_value(style: &str, property: &str) -> Option<String> {
    style
        .split(';')
        .filter_map(|declaration| declaration.split_once(':'))
        .find_map(|(name, value)| (name.trim() == property).then(|| value.trim().to_string()))
}

fn parse_px(value: &str) -> Option<f32> {
    value.trim().trim_end_matches("px").trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first<'a>(dom: &SnapshotDom<'a>, selector: &str) -> SnapshotNode<'a> {
        dom.query(selector).unwrap().into_iter().next().unwrap()
    }

    #[test]
    fn test_invalid_selector_is_an_error() {
        let page = PageSnapshot::parse("<body></body>");
        let err = page.dom().query("div[[[").unwrap_err();
        assert!(matches!(err, RemapError::SelectorSyntaxError { .. }));
    }

    #[test]
    fn test_declared_geometry_and_default_edge() {
        let page = PageSnapshot::parse(
            r#"<body>
                <button id="sized" style="width: 300px; height: 40px">x</button>
                <button id="bare">x</button>
            </body>"#,
        );
        let dom = page.dom();

        let sized = first(&dom, "#sized").render();
        assert_eq!(sized.rect.width, 300.0);
        assert_eq!(sized.rect.height, 40.0);

        let bare = first(&dom, "#bare").render();
        assert_eq!(bare.rect.width, DEFAULT_EDGE);
    }

    #[test]
    fn test_visibility_probes() {
        let page = PageSnapshot::parse(
            r#"<body>
                <div id="none" style="display: none">x</div>
                <div id="hidden-attr" hidden>x</div>
                <div id="clear" style="opacity: 0.0">x</div>
                <div id="faint" style="opacity: 0.5">x</div>
            </body>"#,
        );
        let dom = page.dom();

        assert!(first(&dom, "#none").render().display_none);
        assert!(first(&dom, "#hidden-attr").render().display_none);
        assert!(first(&dom, "#clear").render().opacity_zero);
        assert!(first(&dom, "#faint").render().visible());
    }

    #[test]
    fn test_traversal_surface() {
        let page = PageSnapshot::parse(
            r#"<body><form><div id="wrap"><textarea></textarea><svg></svg></div></form></body>"#,
        );
        let dom = page.dom();
        let wrap = first(&dom, "#wrap");

        let child_tags: Vec<String> = wrap.children().iter().map(NodeProbe::tag).collect();
        assert_eq!(child_tags, vec!["textarea", "svg"]);
        assert_eq!(wrap.descendants().len(), 2);
        assert!(wrap
            .ancestors()
            .iter()
            .any(|ancestor| ancestor.tag() == "form"));
        assert_eq!(wrap.parent().unwrap().tag(), "form");
    }

    #[test]
    fn test_disabled_probe() {
        let page = PageSnapshot::parse(
            r#"<body>
                <button id="off" disabled>x</button>
                <div id="aria-off" aria-disabled="true">x</div>
                <button id="on">x</button>
            </body>"#,
        );
        let dom = page.dom();
        assert!(first(&dom, "#off").is_disabled());
        assert!(first(&dom, "#aria-off").is_disabled());
        assert!(!first(&dom, "#on").is_disabled());
    }
}
