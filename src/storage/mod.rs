// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! Durable client-side key/value storage.

pub mod credentials;
pub mod file;
pub mod memory;

pub use credentials::CredentialStore;
pub use file::FileStore;
pub use memory::MemoryStore;

/// Storage keys as constants.
pub mod keys {
    /// Opaque bearer token
    pub const ACCESS_TOKEN: &str = "access_token";
    /// Declared token expiry (RFC 3339)
    pub const ACCESS_TOKEN_EXPIRES_AT: &str = "access_token_expires_at";
    /// Serialized user snapshot (cache only)
    pub const USER: &str = "user";
    /// Preferred locale code
    pub const PREFERRED_LANGUAGE: &str = "preferredLanguage";
}

/// Minimal synchronous key/value store, in the spirit of browser local storage.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Storage errors
#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Failed to read storage file: {0}")]
    Read(String),

    #[error("Failed to write storage file: {0}")]
    Write(String),

    #[error("Corrupt storage file: {0}")]
    Corrupt(String),

    #[error("Failed to serialize value: {0}")]
    Serialize(String),
}
