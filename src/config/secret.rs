//! Secret string wrapper that never appears in logs.

use serde::Deserialize;

/// Wrapper for the HipChat auth token (and any other credential) that never
/// appears in logs.
///
/// `Debug` and `Display` always print `[REDACTED]`; the token reaches the
/// wire only through [`SecretString::expose`], which the dispatcher calls
/// when building the endpoint URL.
#[derive(Clone)]
pub struct SecretString(String);

impl SecretString {
    pub fn new(s: impl Into<String>) -> Self {
        SecretString(s.into())
    }

    /// Expose the underlying secret value.
    ///
    /// Never pass the result to logging or any user-visible output.
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// True when the secret holds no value, i.e. the setting is missing.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl std::fmt::Debug for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl std::fmt::Display for SecretString {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl From<&str> for SecretString {
    fn from(s: &str) -> Self {
        SecretString::new(s)
    }
}

impl From<String> for SecretString {
    fn from(s: String) -> Self {
        SecretString::new(s)
    }
}

impl<'de> Deserialize<'de> for SecretString {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Ok(SecretString::new(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redacts_in_debug_and_display() {
        let token = SecretString::new("9xKq3mVtR8sLwYz0");

        let debug_output = format!("{:?}", token);
        assert!(!debug_output.contains("9xKq3mVtR8sLwYz0"));
        assert_eq!(debug_output, "[REDACTED]");

        let display_output = format!("{}", token);
        assert!(!display_output.contains("9xKq3mVtR8sLwYz0"));
        assert_eq!(display_output, "[REDACTED]");

        assert_eq!(token.expose(), "9xKq3mVtR8sLwYz0");
    }

    #[test]
    fn redacts_when_nested_in_containers() {
        let token = SecretString::new("v2-token-abc123");

        for repr in [
            format!("{:?}", Some(&token)),
            format!("{:?}", vec![&token]),
        ] {
            assert!(
                !repr.contains("abc123"),
                "token leaked through container Debug: {}",
                repr
            );
        }
    }

    #[test]
    fn empty_detection() {
        assert!(SecretString::new("").is_empty());
        assert!(!SecretString::new("t").is_empty());
    }
}
