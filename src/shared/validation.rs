use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// Slugs: lowercase letters, digits and hyphens only
    /// - Valid: "about-us", "web-hosting", "24-7-support"
    /// - Invalid: "About", "about_us", "about us", ""
    pub static ref SLUG_REGEX: Regex = Regex::new(r"^[a-z0-9-]+$").unwrap();

    static ref NON_SLUG_CHARS: Regex = Regex::new(r"[^a-z0-9]+").unwrap();
}

/// Derive a slug from a display name ("Web Hosting & Infrastructure" -> "web-hosting-infrastructure")
pub fn slugify(name: &str) -> String {
    let lowered = name.to_lowercase();
    NON_SLUG_CHARS
        .replace_all(&lowered, "-")
        .trim_matches('-')
        .to_string()
}

/// Accepts an absolute http(s) URL or an empty string (form fields left blank)
pub fn validate_url_or_empty(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() {
        return Ok(());
    }
    let valid = (value.starts_with("http://") || value.starts_with("https://"))
        && value.len() > "https://".len()
        && !value.chars().any(char::is_whitespace);
    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("url");
        err.message = Some("Must be a valid URL".into());
        Err(err)
    }
}

/// Empty strings from admin forms are stored as NULL
pub fn blank_to_none(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_regex_valid() {
        assert!(SLUG_REGEX.is_match("about-us"));
        assert!(SLUG_REGEX.is_match("web-hosting"));
        assert!(SLUG_REGEX.is_match("24-7-support"));
        assert!(SLUG_REGEX.is_match("a"));
    }

    #[test]
    fn test_slug_regex_invalid() {
        assert!(!SLUG_REGEX.is_match("About")); // uppercase
        assert!(!SLUG_REGEX.is_match("about_us")); // underscore
        assert!(!SLUG_REGEX.is_match("about us")); // space
        assert!(!SLUG_REGEX.is_match("")); // empty
        assert!(!SLUG_REGEX.is_match("über")); // non-ascii
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Web Hosting & Infrastructure"), "web-hosting-infrastructure");
        assert_eq!(slugify("  UI/UX Design  "), "ui-ux-design");
        assert_eq!(slugify("About Us"), "about-us");
        assert!(SLUG_REGEX.is_match(&slugify("E-Commerce: 2025 Edition!")));
    }

    #[test]
    fn test_url_or_empty() {
        assert!(validate_url_or_empty("").is_ok());
        assert!(validate_url_or_empty("https://ienet.online/about").is_ok());
        assert!(validate_url_or_empty("not a url").is_err());
        assert!(validate_url_or_empty("ftp://files").is_err());
    }

    #[test]
    fn test_blank_to_none() {
        assert_eq!(blank_to_none(Some("  ".into())), None);
        assert_eq!(blank_to_none(Some("x".into())), Some("x".into()));
        assert_eq!(blank_to_none(None), None);
    }
}
