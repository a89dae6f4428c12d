//! Credential handling.

pub mod credentials;

pub use credentials::{LoginCredentials, ProviderSettings, SecretString};
