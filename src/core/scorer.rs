use crate::core::keywords::KeywordSet;
use crate::domain::ports::NodeProbe;

// Heuristic weights, tuned empirically against real chat pages. Treat as
// opaque constants; the relative ordering matters more than exact values.
pub const ARIA_LABEL_EXACT: i32 = 100;
pub const ARIA_LABEL_PARTIAL: i32 = 80;
pub const TEST_ID_EXACT: i32 = 90;
pub const TEST_ID_PARTIAL: i32 = 70;
pub const TYPE_SUBMIT: i32 = 85;
pub const TYPE_BUTTON: i32 = 20;
pub const CLASS_OR_ID_KEYWORD: i32 = 60;
pub const ROLE_BUTTON: i32 = 10;
pub const VISIBLE_TEXT_KEYWORD: i32 = 30;
pub const INNER_MARKUP_KEYWORD: i32 = 20;
pub const CHILD_CLASS_KEYWORD: i32 = 40;
pub const IMG_SRC_KEYWORD: i32 = 45;
pub const IMG_ALT_KEYWORD: i32 = 50;
pub const SVG_LABEL_KEYWORD: i32 = 25;
pub const USE_HREF_KEYWORD: i32 = 45;
pub const FORM_ANCESTOR: i32 = 10;
pub const INPUT_UNDER_SAME_PARENT: i32 = 15;
pub const TAG_BUTTON: i32 = 5;
pub const TAG_INPUT: i32 = 3;

/// Scores at or below this never win; the resolver returns none instead.
pub const MIN_ACCEPTED_SCORE: i32 = 0;

/// One element under consideration, alive for a single resolution call.
#[derive(Debug, Clone)]
pub struct Candidate<N> {
    pub node: N,
    pub score: i32,
}

/// Additive relevance score. Deterministic for an unchanged element and
/// keyword set; free of side effects.
pub fn score<N: NodeProbe>(node: &N, keywords: &KeywordSet) -> i32 {
    let mut score = 0;

    let attr = |name: &str| node.attr(name).unwrap_or_default().to_lowercase();
    let aria_label = attr("aria-label");
    let test_id = attr("data-testid");
    let test = attr("data-test");
    let input_type = attr("type");
    let class = attr("class");
    let id = attr("id");
    let text = node.text().trim().to_lowercase();
    let markup = node.inner_html().to_lowercase();

    score += keywords.match_weight(&aria_label, ARIA_LABEL_EXACT, ARIA_LABEL_PARTIAL);
    score += keywords.match_weight(&test_id, TEST_ID_EXACT, TEST_ID_PARTIAL);
    score += keywords.match_weight(&test, TEST_ID_EXACT, TEST_ID_PARTIAL);

    if input_type == "submit" {
        score += TYPE_SUBMIT;
    } else if input_type == "button" {
        score += TYPE_BUTTON;
    }

    // First match only; class and id hits do not accumulate.
    if keywords.iter().any(|kw| class.contains(kw) || id.contains(kw)) {
        score += CLASS_OR_ID_KEYWORD;
    }

    if attr("role") == "button" {
        score += ROLE_BUTTON;
    }

    score += keywords.match_weight(&text, VISIBLE_TEXT_KEYWORD, VISIBLE_TEXT_KEYWORD);
    score += keywords.match_weight(&markup, INNER_MARKUP_KEYWORD, INNER_MARKUP_KEYWORD);

    let descendants = node.descendants();

    if descendants.iter().any(|child| {
        let child_class = child.attr("class").unwrap_or_default().to_lowercase();
        keywords.any_match(&child_class)
    }) {
        score += CHILD_CLASS_KEYWORD;
    }

    if let Some(img) = descendants.iter().find(|child| child.tag() == "img") {
        let src = img.attr("src").unwrap_or_default().to_lowercase();
        let alt = img.attr("alt").unwrap_or_default().to_lowercase();
        score += keywords.match_weight(&src, IMG_SRC_KEYWORD, IMG_SRC_KEYWORD);
        score += keywords.match_weight(&alt, IMG_ALT_KEYWORD, IMG_ALT_KEYWORD);
    }

    if markup.contains("<svg") {
        if let Some(svg) = descendants.iter().find(|child| child.tag() == "svg") {
            let label = ["aria-label", "title", "name", "data-icon"]
                .iter()
                .filter_map(|name| svg.attr(name))
                .collect::<Vec<_>>()
                .join(" ")
                .to_lowercase();
            if keywords.any_match(&label) {
                score += SVG_LABEL_KEYWORD;
            }
        }
        if let Some(use_node) = descendants.iter().find(|child| child.tag() == "use") {
            let href = use_node
                .attr("xlink:href")
                .or_else(|| use_node.attr("href"))
                .unwrap_or_default()
                .to_lowercase();
            if keywords.any_match(&href) {
                score += USE_HREF_KEYWORD;
            }
        }
    }

    if node
        .ancestors()
        .iter()
        .any(|ancestor| matches!(ancestor.tag().as_str(), "form" | "fieldset"))
    {
        score += FORM_ANCESTOR;
    }

    if node.parent().is_some_and(|parent| {
        parent
            .descendants()
            .iter()
            .any(|sibling| matches!(sibling.tag().as_str(), "textarea" | "input"))
    }) {
        score += INPUT_UNDER_SAME_PARENT;
    }

    match node.tag().as_str() {
        "button" => score += TAG_BUTTON,
        "input" => score += TAG_INPUT,
        _ => {}
    }

    score
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::snapshot::PageSnapshot;
    use crate::domain::ports::DomQuery;

    fn score_of(html: &str, selector: &str, locale: &str) -> i32 {
        let page = PageSnapshot::parse(html);
        let keywords = KeywordSet::for_locale(locale);
        let dom = page.dom();
        let node = dom.query(selector).unwrap().into_iter().next().unwrap();
        score(&node, &keywords)
    }

    #[test]
    fn test_test_id_substring_plus_tag_bonus() {
        let got = score_of(
            r#"<body><button data-testid="send-msg"></button></body>"#,
            "button",
            "en",
        );
        assert!(got >= TEST_ID_PARTIAL + TAG_BUTTON, "score was {got}");
    }

    #[test]
    fn test_aria_label_exact_beats_partial() {
        let exact = score_of(
            r#"<body><div aria-label="send"></div></body>"#,
            "div",
            "en",
        );
        let partial = score_of(
            r#"<body><div aria-label="send a message"></div></body>"#,
            "div",
            "en",
        );
        assert_eq!(exact - partial, ARIA_LABEL_EXACT - ARIA_LABEL_PARTIAL);
    }

    #[test]
    fn test_class_and_id_hits_do_not_accumulate() {
        let both = score_of(
            r#"<body><div id="send" class="send"></div></body>"#,
            "div",
            "en",
        );
        let one = score_of(r#"<body><div class="send"></div></body>"#, "div", "en");
        assert_eq!(both, one);
    }

    #[test]
    fn test_submit_type_and_form_ancestor() {
        let got = score_of(
            r#"<body><form><input type="submit"></form></body>"#,
            "input",
            "en",
        );
        assert_eq!(got, TYPE_SUBMIT + FORM_ANCESTOR + TAG_INPUT + INPUT_UNDER_SAME_PARENT);
    }

    #[test]
    fn test_localized_keyword_in_text() {
        let zh = score_of(r#"<body><button>发送</button></body>"#, "button", "zh-CN");
        let en = score_of(r#"<body><button>发送</button></body>"#, "button", "en");
        assert_eq!(zh - en, VISIBLE_TEXT_KEYWORD + INNER_MARKUP_KEYWORD);
    }

    #[test]
    fn test_svg_use_href() {
        let got = score_of(
            r##"<body><div><svg><use href="#icon-send"></use></svg></div></body>"##,
            "div",
            "en",
        );
        assert!(got >= USE_HREF_KEYWORD + INNER_MARKUP_KEYWORD, "score was {got}");
    }

    #[test]
    fn test_scoring_is_idempotent() {
        let page = PageSnapshot::parse(
            r#"<body><form><button data-testid="send" class="send-btn"><svg></svg></button></form></body>"#,
        );
        let keywords = KeywordSet::for_locale("en");
        let dom = page.dom();
        let node = dom.query("button").unwrap().into_iter().next().unwrap();
        assert_eq!(score(&node, &keywords), score(&node, &keywords));
    }

    #[test]
    fn test_unrelated_element_scores_zero() {
        let got = score_of(r#"<body><div class="nav-menu">About</div></body>"#, "div", "en");
        assert_eq!(got, 0);
    }
}
