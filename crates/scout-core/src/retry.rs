//! Retry-hint parsing for upstream rate-limit messages
//!
//! The Gemini API reports quota exhaustion with a free-text message; two
//! formats are recognized. Example: "Please retry in 16.028201274s.", or
//! an embedded detail field `"retryDelay":"16s"`. Anything else is an
//! unknown delay.

use std::sync::OnceLock;

use regex::Regex;

fn retry_in_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?i)retry in\s+(\d+(?:\.\d+)?)s").unwrap())
}

fn retry_delay_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r#"(?i)"retryDelay"\s*:\s*"(\d+)s""#).unwrap())
}

/// Parse a retry delay in whole seconds out of an upstream error message.
///
/// Fractional delays are rounded up so the client never retries early.
/// Returns `None` when no recognized pattern matches.
pub fn retry_after_seconds(message: &str) -> Option<u64> {
    if let Some(caps) = retry_in_pattern().captures(message) {
        if let Ok(seconds) = caps[1].parse::<f64>() {
            return Some(seconds.ceil() as u64);
        }
    }

    if let Some(caps) = retry_delay_pattern().captures(message) {
        if let Ok(seconds) = caps[1].parse::<u64>() {
            return Some(seconds);
        }
    }

    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractional_delay_is_rounded_up() {
        assert_eq!(retry_after_seconds("Please retry in 16.03s."), Some(17));
    }

    #[test]
    fn whole_second_delay_is_kept() {
        assert_eq!(retry_after_seconds("please retry in 5s"), Some(5));
    }

    #[test]
    fn embedded_retry_delay_field_is_parsed() {
        let message = r#"429 Too Many Requests ... "retryDelay":"16s" ..."#;
        assert_eq!(retry_after_seconds(message), Some(16));
    }

    #[test]
    fn retry_in_takes_precedence_over_retry_delay() {
        let message = r#"Please retry in 16.028201274s. "retryDelay":"20s""#;
        assert_eq!(retry_after_seconds(message), Some(17));
    }

    #[test]
    fn unknown_formats_are_none() {
        assert_eq!(retry_after_seconds("quota exceeded, try again later"), None);
        assert_eq!(retry_after_seconds(""), None);
    }
}
