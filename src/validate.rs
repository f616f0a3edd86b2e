//! Reusable answer validators and naming helpers.
//!
//! Each validator returns `Ok(())` or a fixed human-readable message; the
//! resolver wraps failures into [`crate::error::Error::ValidationError`]
//! without rewording them.

use cruet::Inflector;
use regex::Regex;
use std::sync::OnceLock;
use url::Url;

/// Environment variable that switches Kiln into test execution mode.
pub const ENV_MODE_VAR: &str = "KILN_ENV";

/// Value of [`ENV_MODE_VAR`] that enables test mode.
pub const ENV_MODE_TEST: &str = "test";

/// Package name accepted without validation when running in test mode.
pub const TEST_PACKAGE_NAME: &str = "kiln";

fn package_name_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-z0-9][a-z0-9._-]*$").expect("valid regex"))
}

fn email_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("valid regex"))
}

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Alphanumeric with single interior hyphens, no leading/trailing hyphen.
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9](?:-?[a-zA-Z0-9])*$").expect("valid regex"))
}

fn as_str(value: &serde_json::Value) -> Result<&str, String> {
    value.as_str().ok_or_else(|| "Expected a string value".to_string())
}

fn is_test_mode() -> bool {
    std::env::var(ENV_MODE_VAR).map(|v| v == ENV_MODE_TEST).unwrap_or(false)
}

/// Package-name syntax: lowercase, no spaces, valid identifier characters.
///
/// In test execution mode the designated sentinel name is accepted as-is,
/// so automated runs can exercise the pipeline with a fixed name.
pub fn package_name(value: &serde_json::Value) -> Result<(), String> {
    let name = as_str(value)?;

    if is_test_mode() && name == TEST_PACKAGE_NAME {
        return Ok(());
    }

    if name.is_empty() {
        return Err("package name cannot be empty".to_string());
    }
    if name.len() > 214 {
        return Err("package name cannot be longer than 214 characters".to_string());
    }
    if name.chars().any(|c| c.is_ascii_uppercase()) {
        return Err("package name cannot contain uppercase letters".to_string());
    }
    if name.chars().any(char::is_whitespace) {
        return Err("package name cannot contain spaces".to_string());
    }
    if !package_name_re().is_match(name) {
        return Err(
            "package name may only contain lowercase letters, digits, dots, hyphens and underscores"
                .to_string(),
        );
    }
    Ok(())
}

/// Email syntax.
pub fn email(value: &serde_json::Value) -> Result<(), String> {
    let email = as_str(value)?;
    if email_re().is_match(email) {
        Ok(())
    } else {
        Err("Invalid email".to_string())
    }
}

fn is_http_url(value: &str) -> bool {
    match Url::parse(value) {
        Ok(url) => (url.scheme() == "http" || url.scheme() == "https") && url.has_host(),
        Err(_) => false,
    }
}

/// Absolute http(s) URL syntax.
pub fn absolute_url(value: &serde_json::Value) -> Result<(), String> {
    let url = as_str(value)?;
    if is_http_url(url) {
        Ok(())
    } else {
        Err("Invalid URL".to_string())
    }
}

/// Like [`absolute_url`] but accepts the empty string (optional answer).
pub fn optional_url(value: &serde_json::Value) -> Result<(), String> {
    let url = as_str(value)?;
    if url.is_empty() {
        Ok(())
    } else {
        absolute_url(value)
    }
}

/// GitHub-style username or organization syntax.
pub fn github_username(value: &serde_json::Value) -> Result<(), String> {
    let username = as_str(value)?;
    if !username.is_empty() && username.len() <= 39 && username_re().is_match(username) {
        Ok(())
    } else {
        Err("Invalid GitHub username".to_string())
    }
}

/// GitHub repository URL: `https://github.com/` prefix, no trailing slash.
pub fn github_repo_url(value: &serde_json::Value) -> Result<(), String> {
    let repo = as_str(value)?;
    if is_http_url(repo) && repo.starts_with("https://github.com/") && !repo.ends_with('/') {
        Ok(())
    } else {
        Err("Please include a valid GitHub.com URL without a trailing slash".to_string())
    }
}

/// Kebab-case slug used for derived repository URLs and exposed to
/// templates as the `slug` filter. Idempotent: `slug(slug(s)) == slug(s)`.
pub fn slug(value: &str) -> String {
    value.to_kebab_case()
}

/// lowerCamelCase, exposed to templates as the `camelcase` filter.
pub fn camel_case(value: &str) -> String {
    value.to_camel_case()
}

/// UpperCamelCase, exposed to templates as the `pascalcase` filter.
pub fn pascal_case(value: &str) -> String {
    let camel = value.to_camel_case();
    let mut chars = camel.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => camel,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_package_name_rejects_uppercase_and_spaces() {
        let err = package_name(&json!("Foo Bar Baz Beep")).unwrap_err();
        assert!(err.contains("uppercase"));

        let err = package_name(&json!("foo bar")).unwrap_err();
        assert!(err.contains("spaces"));
    }

    #[test]
    fn test_package_name_accepts_valid_names() {
        assert!(package_name(&json!("my-package-name")).is_ok());
        assert!(package_name(&json!("pkg.plugin_2")).is_ok());
        assert!(package_name(&json!("")).is_err());
        assert!(package_name(&json!("-leading")).is_err());
    }

    #[test]
    fn test_test_mode_relaxes_only_the_sentinel_name() {
        // Set and remove the marker within one test; the other name tests
        // never use the sentinel, so they are unaffected either way.
        std::env::set_var(ENV_MODE_VAR, ENV_MODE_TEST);
        let sentinel = package_name(&json!(TEST_PACKAGE_NAME));
        let still_invalid = package_name(&json!("Foo Bar Baz Beep"));
        let too_long = package_name(&json!("a".repeat(215)));
        std::env::remove_var(ENV_MODE_VAR);

        assert!(sentinel.is_ok());
        // The marker relaxes the sentinel, not validation as a whole.
        assert!(still_invalid.unwrap_err().contains("uppercase"));
        assert!(too_long.is_err());
    }

    #[test]
    fn test_email() {
        assert!(email(&json!("user@example.com")).is_ok());
        assert_eq!(email(&json!("niftylettuce")).unwrap_err(), "Invalid email");
    }

    #[test]
    fn test_urls() {
        assert!(absolute_url(&json!("https://example.com")).is_ok());
        assert_eq!(absolute_url(&json!("niftylettuce")).unwrap_err(), "Invalid URL");
        assert!(optional_url(&json!("")).is_ok());
        assert!(optional_url(&json!("not a url")).is_err());
    }

    #[test]
    fn test_github_username() {
        assert!(github_username(&json!("lassjs")).is_ok());
        assert!(github_username(&json!("my-org-42")).is_ok());
        assert!(github_username(&json!("$$$")).is_err());
        assert!(github_username(&json!("-leading")).is_err());
        assert!(github_username(&json!("trailing-")).is_err());
    }

    #[test]
    fn test_github_repo_url() {
        assert!(github_repo_url(&json!("https://github.com/user/repo")).is_ok());
        let err = github_repo_url(&json!("https://bitbucket.org/foo/bar")).unwrap_err();
        assert!(err.contains("GitHub.com URL without a trailing slash"));
        assert!(github_repo_url(&json!("https://github.com/user/repo/")).is_err());
    }

    #[test]
    fn test_slug_is_idempotent() {
        assert_eq!(slug("My Package"), "my-package");
        assert_eq!(slug(&slug("My Package")), "my-package");
        assert_eq!(slug("my-package-name"), "my-package-name");
    }

    #[test]
    fn test_case_helpers() {
        assert_eq!(camel_case("foo bar"), "fooBar");
        assert_eq!(pascal_case("foo bar"), "FooBar");
    }
}
