use crate::error::MarkupResult;

/// Prefixes that mark an href as already navigable.
const NAVIGABLE_PREFIXES: &[&str] = &["http://", "https://", "mailto:", "tel:"];

/// Schemes that must never be followed from post content.
const BLOCKED_SCHEMES: &[&str] = &["javascript:", "data:", "vbscript:"];

/// Collaborator that performs navigation on behalf of the reader.
///
/// Navigation only ever targets a new browsing context, so following an
/// in-post link never ends the reader's session in the tab they came from.
pub trait Navigator {
    /// Open `url` in a new browsing context (tab or window).
    fn open_in_new_context(&mut self, url: &str) -> MarkupResult<()>;
}

/// Turn a raw link target into the URL to navigate to.
///
/// Known protocols are kept verbatim, anything that looks like a domain
/// (contains a `.`) gets `https://`, and everything else is returned as-is.
pub fn resolve_href(href: &str) -> String {
    if NAVIGABLE_PREFIXES.iter().any(|p| href.starts_with(p)) {
        href.to_string()
    } else if href.contains('.') {
        format!("https://{}", href)
    } else {
        href.to_string()
    }
}

/// Whether a resolved URL uses a scheme that can execute code.
///
/// The URL is normalized the way a browser parses it first: leading control
/// characters and whitespace are stripped and tabs and newlines removed.
pub fn is_blocked_scheme(url: &str) -> bool {
    let normalized: String = url
        .trim_start_matches(|c: char| c.is_ascii_control() || c.is_whitespace())
        .chars()
        .filter(|c| !matches!(c, '\t' | '\n' | '\r'))
        .collect::<String>()
        .to_ascii_lowercase();
    BLOCKED_SCHEMES.iter().any(|s| normalized.starts_with(s))
}

/// Resolve `href` and open it in a new browsing context.
pub fn resolve_and_open<N: Navigator + ?Sized>(href: &str, navigator: &mut N) -> MarkupResult<()> {
    let url = resolve_href(href);
    tracing::debug!(href, url = %url, "opening link in new context");
    navigator.open_in_new_context(&url)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MarkupError;

    #[derive(Default)]
    struct RecordingNavigator {
        opened: Vec<String>,
    }

    impl Navigator for RecordingNavigator {
        fn open_in_new_context(&mut self, url: &str) -> MarkupResult<()> {
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    struct FailingNavigator;

    impl Navigator for FailingNavigator {
        fn open_in_new_context(&mut self, url: &str) -> MarkupResult<()> {
            Err(MarkupError::NavigationFailed {
                url: url.to_string(),
                reason: "popup blocked".to_string(),
            })
        }
    }

    #[test]
    fn test_known_protocols_verbatim() {
        for href in [
            "http://x.com",
            "https://x.com/a?b=c",
            "mailto:keeper@petsite.example",
            "tel:+15551234",
        ] {
            assert_eq!(resolve_href(href), href);
        }
    }

    #[test]
    fn test_domain_gets_https() {
        assert_eq!(resolve_href("example.com"), "https://example.com");
        assert_eq!(resolve_href("www.x.org/path"), "https://www.x.org/path");
    }

    #[test]
    fn test_no_dot_left_alone() {
        assert_eq!(resolve_href("localhost"), "localhost");
        assert_eq!(resolve_href("/forums/42"), "/forums/42");
    }

    #[test]
    fn test_blocked_schemes() {
        assert!(is_blocked_scheme("javascript:alert(1)"));
        assert!(is_blocked_scheme("JavaScript:alert(1)"));
        assert!(is_blocked_scheme("data:text/html,hi"));
        assert!(!is_blocked_scheme("https://example.com"));
    }

    #[test]
    fn test_blocked_schemes_behind_control_characters() {
        assert!(is_blocked_scheme("\u{1}javascript:alert(1)"));
        assert!(is_blocked_scheme("\u{0}\u{1f} \u{7f}JavaScript:alert(1)"));
        assert!(is_blocked_scheme("java\tscr\nipt:alert(1)"));
        assert!(is_blocked_scheme(" \r\ndata:text/html,hi"));
        assert!(!is_blocked_scheme("\u{1}https://example.com"));
    }

    #[test]
    fn test_resolve_and_open_uses_new_context() {
        let mut nav = RecordingNavigator::default();
        resolve_and_open("example.com", &mut nav).unwrap();
        resolve_and_open("https://x.com", &mut nav).unwrap();
        assert_eq!(nav.opened, vec!["https://example.com", "https://x.com"]);
    }

    #[test]
    fn test_navigator_failure_propagates() {
        let err = resolve_and_open("example.com", &mut FailingNavigator).unwrap_err();
        assert_eq!(
            err,
            MarkupError::NavigationFailed {
                url: "https://example.com".to_string(),
                reason: "popup blocked".to_string(),
            }
        );
    }
}
