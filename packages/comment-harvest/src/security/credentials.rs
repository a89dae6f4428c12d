//! Credential handling with secure memory.
//!
//! Uses the `secrecy` crate so gradebook passwords and provider API keys
//! never show up in logs, debug output, or error messages. Nothing here has
//! a default value: credentials must be supplied explicitly.

use secrecy::{ExposeSecret, SecretBox};
use std::fmt;

use crate::error::ConfigError;

/// Password or API key that prints as `[REDACTED]`.
pub struct SecretString(SecretBox<str>);

impl SecretString {
    pub fn new(value: impl Into<String>) -> Self {
        Self(SecretBox::new(value.into().into_boxed_str()))
    }

    /// Only call this at the point of use (login form, API request).
    pub fn expose(&self) -> &str {
        self.0.expose_secret()
    }
}

impl Clone for SecretString {
    fn clone(&self) -> Self {
        Self::new(self.expose())
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("[REDACTED]")
    }
}

/// Gradebook login credentials.
#[derive(Clone)]
pub struct LoginCredentials {
    pub email: String,
    pub password: SecretString,
}

impl LoginCredentials {
    /// Both values are required and must be non-blank.
    pub fn new(email: impl Into<String>, password: impl Into<String>) -> Result<Self, ConfigError> {
        let email = email.into();
        let password = password.into();

        if email.trim().is_empty() {
            return Err(ConfigError::Missing("email"));
        }
        if password.is_empty() {
            return Err(ConfigError::Missing("password"));
        }

        Ok(Self {
            email: email.trim().to_string(),
            password: SecretString::new(password),
        })
    }
}

impl fmt::Debug for LoginCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoginCredentials")
            .field("email", &self.email)
            .field("password", &"[REDACTED]")
            .finish()
    }
}

/// Settings for the translation providers.
#[derive(Clone, Default)]
pub struct ProviderSettings {
    /// Google Cloud Translation API key (required for the google service)
    pub google_api_key: Option<SecretString>,

    /// Override for the Google endpoint
    pub google_base_url: Option<String>,

    /// LibreTranslate server (defaults to the public instance)
    pub libre_base_url: Option<String>,

    /// LibreTranslate API key, if the server needs one
    pub libre_api_key: Option<SecretString>,
}

impl ProviderSettings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read `GOOGLE_TRANSLATE_API_KEY`, `LIBRETRANSLATE_URL`, and
    /// `LIBRETRANSLATE_API_KEY` from the environment.
    pub fn from_env() -> Self {
        let var = |key: &str| std::env::var(key).ok().filter(|v| !v.trim().is_empty());
        Self {
            google_api_key: var("GOOGLE_TRANSLATE_API_KEY").map(SecretString::new),
            google_base_url: var("GOOGLE_TRANSLATE_URL"),
            libre_base_url: var("LIBRETRANSLATE_URL"),
            libre_api_key: var("LIBRETRANSLATE_API_KEY").map(SecretString::new),
        }
    }

    pub fn with_google_api_key(mut self, key: impl Into<String>) -> Self {
        self.google_api_key = Some(SecretString::new(key));
        self
    }

    pub fn with_google_base_url(mut self, url: impl Into<String>) -> Self {
        self.google_base_url = Some(url.into());
        self
    }

    pub fn with_libre_base_url(mut self, url: impl Into<String>) -> Self {
        self.libre_base_url = Some(url.into());
        self
    }

    pub fn with_libre_api_key(mut self, key: impl Into<String>) -> Self {
        self.libre_api_key = Some(SecretString::new(key));
        self
    }
}

impl fmt::Debug for ProviderSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSettings")
            .field("google_api_key", &self.google_api_key.as_ref().map(|_| "[REDACTED]"))
            .field("google_base_url", &self.google_base_url)
            .field("libre_base_url", &self.libre_base_url)
            .field("libre_api_key", &self.libre_api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_secret_not_in_debug_output() {
        let secret = SecretString::new("hunter2");
        assert_eq!(format!("{:?}", secret), "[REDACTED]");
        assert_eq!(secret.clone().expose(), "hunter2");
    }

    #[test]
    fn test_login_credentials_required() {
        assert!(matches!(
            LoginCredentials::new("", "pw"),
            Err(ConfigError::Missing("email"))
        ));
        assert!(matches!(
            LoginCredentials::new("teacher@school.edu", ""),
            Err(ConfigError::Missing("password"))
        ));

        let creds = LoginCredentials::new(" teacher@school.edu ", "pw").unwrap();
        assert_eq!(creds.email, "teacher@school.edu");
    }

    #[test]
    fn test_login_credentials_debug_redacts_password() {
        let creds = LoginCredentials::new("teacher@school.edu", "hunter2").unwrap();
        let debug = format!("{:?}", creds);
        assert!(debug.contains("teacher@school.edu"));
        assert!(!debug.contains("hunter2"));
    }

    #[test]
    fn test_provider_settings_debug_redacts_keys() {
        let settings = ProviderSettings::new()
            .with_google_api_key("AIza-secret")
            .with_libre_api_key("libre-secret");
        let debug = format!("{:?}", settings);
        assert!(!debug.contains("AIza-secret"));
        assert!(!debug.contains("libre-secret"));
    }
}
