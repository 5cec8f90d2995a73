use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[\w\-.]+@([\w-]+\.)+[\w-]{2,4}$").expect("email pattern must compile")
});

/// Loose shape check for an email address.
///
/// Shared by the validator (when the policy asks for it) and the notifier,
/// which refuses to send to an address that fails it.
pub fn is_plausible_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_addresses() {
        assert!(is_plausible_email("a@x.com"));
        assert!(is_plausible_email("first.last-name@mail.example.org"));
    }

    #[test]
    fn rejects_malformed_addresses() {
        assert!(!is_plausible_email(""));
        assert!(!is_plausible_email("no-at-sign.com"));
        assert!(!is_plausible_email("a@b"));
        assert!(!is_plausible_email("a@b.toolongtld"));
        assert!(!is_plausible_email(" a@x.com"));
    }
}
