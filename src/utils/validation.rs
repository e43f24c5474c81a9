use crate::utils::error::{RemapError, Result};
use regex::Regex;
use scraper::Selector;
use std::sync::LazyLock;
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

static LOCALE_TAG: LazyLock<Option<Regex>> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z]{2,8}(-[A-Za-z0-9]{1,8})*$").ok());

static WWW_PREFIX: LazyLock<Option<Regex>> = LazyLock::new(|| Regex::new(r"^www\.").ok());

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(RemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_locale(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let well_formed = LOCALE_TAG
        .as_ref()
        .map(|re| re.is_match(value.trim()))
        .unwrap_or(true);
    if !well_formed {
        return Err(RemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Not a well-formed BCP 47 language tag".to_string(),
        });
    }
    Ok(())
}

/// A selector list is usable if at least one comma-separated part parses;
/// unusable parts are skipped at resolution time, not here.
pub fn validate_selector_list(field_name: &str, value: &str) -> Result<()> {
    validate_non_empty_string(field_name, value)?;

    let any_valid = value
        .split(',')
        .map(str::trim)
        .filter(|part| !part.is_empty())
        .any(|part| Selector::parse(part).is_ok());
    if !any_valid {
        return Err(RemapError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "No parseable CSS selector in list".to_string(),
        });
    }
    Ok(())
}

/// Reduces user input like `https://www.example.com/chat` to the bare
/// hostname `example.com` used as a configuration key.
pub fn normalize_domain(input: &str) -> Result<String> {
    let trimmed = input.trim();
    validate_non_empty_string("domain", trimmed)?;

    let host = if trimmed.contains("://") {
        Url::parse(trimmed)
            .ok()
            .and_then(|url| url.host_str().map(str::to_string))
            .ok_or_else(|| RemapError::InvalidConfigValueError {
                field: "domain".to_string(),
                value: trimmed.to_string(),
                reason: "Not a parseable URL".to_string(),
            })?
    } else {
        trimmed.split('/').next().unwrap_or_default().to_string()
    };

    let host = host.to_lowercase();
    let host = match WWW_PREFIX.as_ref() {
        Some(re) => re.replace(&host, "").into_owned(),
        None => host,
    };
    validate_non_empty_string("domain", &host)?;
    Ok(host)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_locale() {
        assert!(validate_locale("locale", "en").is_ok());
        assert!(validate_locale("locale", "zh-CN").is_ok());
        assert!(validate_locale("locale", "").is_err());
        assert!(validate_locale("locale", "not a tag").is_err());
    }

    #[test]
    fn test_validate_selector_list() {
        assert!(validate_selector_list("selector", ".send-btn").is_ok());
        assert!(validate_selector_list("selector", "div[[[, #real").is_ok());
        assert!(validate_selector_list("selector", "div[[[").is_err());
        assert!(validate_selector_list("selector", "").is_err());
    }

    #[test]
    fn test_normalize_domain() {
        assert_eq!(
            normalize_domain("https://www.example.com/chat").unwrap(),
            "example.com"
        );
        assert_eq!(normalize_domain("www.example.com/chat").unwrap(), "example.com");
        assert_eq!(normalize_domain("Chat.DeepSeek.com").unwrap(), "chat.deepseek.com");
        assert_eq!(normalize_domain("  github.com  ").unwrap(), "github.com");
        assert!(normalize_domain("").is_err());
        assert!(normalize_domain("https://").is_err());
    }
}
