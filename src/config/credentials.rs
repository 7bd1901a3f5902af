use tracing::debug;

/// Resolve a credential value. If the value starts with '$', treat it as an
/// environment variable reference and resolve from the environment.
pub fn resolve_credential(value: &str) -> Option<String> {
    match value.strip_prefix('$') {
        Some(var_name) => match std::env::var(var_name) {
            Ok(resolved) => {
                debug!(var = %var_name, "Resolved credential from environment");
                Some(resolved)
            }
            Err(_) => {
                debug!(var = %var_name, "Environment variable not set");
                None
            }
        },
        None => Some(value.to_string()),
    }
}

/// Replace the API key in text that may end up in logs or error messages.
pub fn redact_secret(text: &str, secret: &str) -> String {
    if secret.len() < 4 {
        return text.to_string();
    }
    text.replace(secret, "[REDACTED]")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_credential_literal() {
        assert_eq!(resolve_credential("abcd-1234"), Some("abcd-1234".to_string()));
    }

    #[test]
    fn test_resolve_credential_env_var() {
        std::env::set_var("TEST_MUNISCORE_KEY", "secret123");
        assert_eq!(resolve_credential("$TEST_MUNISCORE_KEY"), Some("secret123".to_string()));
        std::env::remove_var("TEST_MUNISCORE_KEY");
    }

    #[test]
    fn test_resolve_credential_missing_env_var() {
        assert_eq!(resolve_credential("$NONEXISTENT_MUNISCORE_VAR"), None);
    }

    #[test]
    fn test_redact_secret() {
        let text = "GET /vendor failed with key S3cretKey";
        let redacted = redact_secret(text, "S3cretKey");
        assert!(!redacted.contains("S3cretKey"));
        assert!(redacted.contains("[REDACTED]"));
    }

    #[test]
    fn test_redact_short_secret_ignored() {
        assert_eq!(redact_secret("key=ab", "ab"), "key=ab");
    }
}
