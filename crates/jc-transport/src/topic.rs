//! Topic name rules.

use crate::error::{TransportError, TransportResult};

/// Check a topic name.
///
/// A valid topic is non-empty, is not just `/`, and contains no whitespace,
/// no `@` and no empty segment (`//`).
pub fn is_valid_topic(topic: &str) -> bool {
    !topic.is_empty()
        && topic != "/"
        && !topic.chars().any(char::is_whitespace)
        && !topic.contains('@')
        && !topic.contains("//")
}

/// Validate and root a topic name (`cmd` becomes `/cmd`).
pub fn normalize_topic(topic: &str) -> TransportResult<String> {
    if !is_valid_topic(topic) {
        return Err(TransportError::InvalidTopic {
            topic: topic.to_string(),
        });
    }
    if topic.starts_with('/') {
        Ok(topic.to_string())
    } else {
        Ok(format!("/{topic}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_usual_topics() {
        assert!(is_valid_topic("/model/cart/joint/wheel/cmd_vel"));
        assert!(is_valid_topic("cmd"));
    }

    #[test]
    fn rejects_malformed_topics() {
        for bad in ["", "/", "/a b", "/a//b", "/a@b", "\t"] {
            assert!(!is_valid_topic(bad), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn normalize_roots_relative_topics() {
        assert_eq!(normalize_topic("cmd").unwrap(), "/cmd");
        assert_eq!(normalize_topic("/cmd").unwrap(), "/cmd");
        assert!(normalize_topic("a b").is_err());
    }
}
