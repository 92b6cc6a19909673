//! Log Redaction Layer
//!
//! Scrubs provider API keys and bearer tokens from strings prior to logging.

use regex::Regex;
use std::sync::LazyLock;

static API_KEY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(sk-[a-zA-Z0-9_\-]{20,})|(AIza[0-9A-Za-z_\-]{30,})|(Bearer\s+[a-zA-Z0-9\-\._~+/]+=*)")
        .unwrap()
});
static KEY_PARAM_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"([?&](?:key|api_key)=)[^&\s)]+").unwrap());

/// Redacts sensitive patterns in a string.
pub fn redact_sensitive_data(input: &str) -> String {
    // Query-string keys first, so the parameter name survives.
    let redacted = KEY_PARAM_RE.replace_all(input, "${1}[REDACTED]");
    API_KEY_RE
        .replace_all(&redacted, "[REDACTED_TOKEN]")
        .into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_redaction() {
        let raw = "OpenAI returned 401: Incorrect API key provided: sk-proj-abcdefghijklmnopqrstuvwxyz0123 \
                   (sent Bearer eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9)";
        let clean = redact_sensitive_data(raw);
        assert!(!clean.contains("sk-proj-abcdefghijklmnopqrstuvwxyz0123"));
        assert!(!clean.contains("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9"));
        assert!(clean.starts_with("OpenAI returned 401"));
    }

    #[test]
    fn redacts_google_keys_and_query_params() {
        let raw = "error sending request for url (https://generativelanguage.googleapis.com/v1beta/models/m:generateContent?key=secret123&alt=json)";
        let clean = redact_sensitive_data(raw);
        assert!(clean.contains("?key=[REDACTED]&alt=json"));
        assert!(!clean.contains("secret123"));

        let raw = "bad key AIzaSyA1234567890abcdefghijklmnopqrstu";
        assert_eq!(redact_sensitive_data(raw), "bad key [REDACTED_TOKEN]");
    }

    #[test]
    fn plain_text_is_untouched() {
        let raw = "Gemini returned 503 Service Unavailable: model overloaded";
        assert_eq!(redact_sensitive_data(raw), raw);
    }
}
