/// Keywords every locale gets, in priority order.
pub const BASE_KEYWORDS: [&str; 2] = ["send", "submit"];

const LOCALE_KEYWORDS: &[(&str, &[&str])] = &[
    ("zh", &["发送", "提交"]),
    ("zh-CN", &["发送", "提交"]),
    ("zh-TW", &["發送", "提交"]),
    ("ja", &["送信", "送る", "投稿"]),
    ("ko", &["보내기", "전송"]),
    ("es", &["enviar"]),
    ("fr", &["envoyer"]),
    ("de", &["senden"]),
    ("pt", &["enviar"]),
    ("ru", &["отправить"]),
    ("ar", &["إرسال"]),
];

/// Ordered lowercase "send"-like keywords for one UI locale. Built once at
/// startup and read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeywordSet {
    keywords: Vec<String>,
}

impl KeywordSet {
    /// Exact locale tag first, then the primary language subtag, else base
    /// keywords only. Unknown locales are not an error.
    pub fn for_locale(locale: &str) -> Self {
        let mut keywords: Vec<String> = BASE_KEYWORDS.iter().map(|kw| kw.to_string()).collect();

        let primary = locale.split('-').next().unwrap_or_default().to_lowercase();
        let extra = lookup(locale).or_else(|| lookup(&primary)).unwrap_or(&[]);
        keywords.extend(extra.iter().map(|kw| kw.to_string()));

        Self { keywords }
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.keywords.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.keywords.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keywords.is_empty()
    }

    /// First keyword that matches `value` decides the weight: `exact` on
    /// equality, `partial` on substring containment, 0 otherwise.
    pub fn match_weight(&self, value: &str, exact: i32, partial: i32) -> i32 {
        for keyword in &self.keywords {
            if value == keyword {
                return exact;
            }
            if value.contains(keyword.as_str()) {
                return partial;
            }
        }
        0
    }

    pub fn any_match(&self, value: &str) -> bool {
        self.keywords.iter().any(|kw| value.contains(kw.as_str()))
    }
}

fn lookup(tag: &str) -> Option<&'static [&'static str]> {
    LOCALE_KEYWORDS
        .iter()
        .find(|(candidate, _)| *candidate == tag)
        .map(|(_, keywords)| *keywords)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_keywords_always_present() {
        let keywords = KeywordSet::for_locale("tlh");
        let collected: Vec<&str> = keywords.iter().collect();
        assert_eq!(collected, vec!["send", "submit"]);
    }

    #[test]
    fn test_exact_tag_wins_over_subtag() {
        let keywords = KeywordSet::for_locale("zh-TW");
        assert!(keywords.iter().any(|kw| kw == "發送"));
        assert!(!keywords.iter().any(|kw| kw == "发送"));
    }

    #[test]
    fn test_subtag_fallback() {
        let keywords = KeywordSet::for_locale("ja-JP");
        assert!(keywords.iter().any(|kw| kw == "送信"));
    }

    #[test]
    fn test_match_weight_prefers_exact() {
        let keywords = KeywordSet::for_locale("en");
        assert_eq!(keywords.match_weight("send", 100, 80), 100);
        assert_eq!(keywords.match_weight("send message", 100, 80), 80);
        assert_eq!(keywords.match_weight("cancel", 100, 80), 0);
    }

    #[test]
    fn test_deterministic_for_locale() {
        assert_eq!(KeywordSet::for_locale("de"), KeywordSet::for_locale("de"));
    }
}
