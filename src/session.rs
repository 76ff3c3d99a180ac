//! Durable session storage for the OratorAI SDK
//!
//! The auth slice is the only persisted part of client state: the bearer
//! token and the user object are written to a JSON file and restored on
//! startup. An optional obfuscation key XORs the payload before writing;
//! this keeps casual eyes off the token but is not a security boundary.

use base64::Engine;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

use orator_protocol::User;

use crate::error::{OratorError, Result};

/// Stored session information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredSession {
    pub user: User,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Session storage configuration
#[derive(Debug, Clone, Default)]
pub struct SessionStoreConfig {
    pub enabled: bool,
    pub storage_path: Option<PathBuf>,
    pub obfuscation_key: Option<String>,
}

/// Session storage manager
#[derive(Debug, Clone)]
pub struct SessionStore {
    config: SessionStoreConfig,
    session: Option<StoredSession>,
}

impl SessionStore {
    pub fn new(config: SessionStoreConfig) -> Result<Self> {
        let mut store = Self {
            config,
            session: None,
        };

        if store.config.enabled {
            store.load_session()?;
        }

        Ok(store)
    }

    pub fn store_session(&mut self, session: StoredSession) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        self.session = Some(session);
        self.save_session()?;
        Ok(())
    }

    pub fn get_session(&self) -> Option<StoredSession> {
        if !self.config.enabled {
            return None;
        }
        self.session.clone()
    }

    pub fn has_session(&self) -> bool {
        self.config.enabled && self.session.is_some()
    }

    pub fn remove_session(&mut self) -> Result<()> {
        if !self.config.enabled {
            return Ok(());
        }

        self.session = None;
        self.save_session()?;
        Ok(())
    }

    fn get_storage_path(&self) -> Result<PathBuf> {
        self.config
            .storage_path
            .clone()
            .ok_or_else(|| OratorError::invalid_input("Session storage path not configured"))
    }

    fn load_session(&mut self) -> Result<()> {
        let path = self.get_storage_path()?;

        if !path.exists() {
            return Ok(());
        }

        let content = fs::read_to_string(&path)
            .map_err(|e| OratorError::internal(format!("Failed to read session storage: {}", e)))?;

        if content.trim().is_empty() {
            return Ok(());
        }

        let plain_content = if let Some(key) = &self.config.obfuscation_key {
            self.decode_content(&content, key)?
        } else {
            content
        };

        self.session = serde_json::from_str(&plain_content)
            .map_err(|e| OratorError::internal(format!("Failed to parse session storage: {}", e)))?;

        Ok(())
    }

    fn save_session(&self) -> Result<()> {
        let path = self.get_storage_path()?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                OratorError::internal(format!("Failed to create storage directory: {}", e))
            })?;
        }

        let content = serde_json::to_string_pretty(&self.session)
            .map_err(|e| OratorError::internal(format!("Failed to serialize session: {}", e)))?;

        let final_content = if let Some(key) = &self.config.obfuscation_key {
            self.encode_content(&content, key)
        } else {
            content
        };

        fs::write(&path, final_content)
            .map_err(|e| OratorError::internal(format!("Failed to write session storage: {}", e)))?;

        Ok(())
    }

    fn encode_content(&self, content: &str, key: &str) -> String {
        let key_bytes = key.as_bytes();
        let content_bytes = content.as_bytes();
        let mut encoded = Vec::new();

        for (i, &byte) in content_bytes.iter().enumerate() {
            let key_byte = key_bytes[i % key_bytes.len()];
            encoded.push(byte ^ key_byte);
        }

        base64::engine::general_purpose::STANDARD.encode(encoded)
    }

    fn decode_content(&self, encoded_content: &str, key: &str) -> Result<String> {
        let encoded_bytes = base64::engine::general_purpose::STANDARD
            .decode(encoded_content)
            .map_err(|e| {
                OratorError::internal(format!("Failed to decode session content: {}", e))
            })?;

        let key_bytes = key.as_bytes();
        let mut decoded = Vec::new();

        for (i, &byte) in encoded_bytes.iter().enumerate() {
            let key_byte = key_bytes[i % key_bytes.len()];
            decoded.push(byte ^ key_byte);
        }

        String::from_utf8(decoded)
            .map_err(|e| OratorError::internal(format!("Failed to decode session content: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tests::utils::test_helpers::{create_temp_dir, sample_user};

    fn store_config(path: PathBuf, key: Option<&str>) -> SessionStoreConfig {
        SessionStoreConfig {
            enabled: true,
            storage_path: Some(path),
            obfuscation_key: key.map(str::to_string),
        }
    }

    fn sample_session() -> StoredSession {
        StoredSession {
            user: sample_user(7, "student@university.edu"),
            token: "tok-abc123".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_store_and_reload_session() {
        let dir = create_temp_dir();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::new(store_config(path.clone(), None)).unwrap();
        store.store_session(sample_session()).unwrap();

        let reloaded = SessionStore::new(store_config(path, None)).unwrap();
        let session = reloaded.get_session().unwrap();
        assert_eq!(session.token, "tok-abc123");
        assert_eq!(session.user.id, 7);
    }

    #[test]
    fn test_obfuscated_round_trip() {
        let dir = create_temp_dir();
        let path = dir.path().join("session.json");

        let mut store =
            SessionStore::new(store_config(path.clone(), Some("local-key"))).unwrap();
        store.store_session(sample_session()).unwrap();

        // On-disk content must not contain the raw token.
        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(!raw.contains("tok-abc123"));

        let reloaded = SessionStore::new(store_config(path, Some("local-key"))).unwrap();
        assert_eq!(reloaded.get_session().unwrap().token, "tok-abc123");
    }

    #[test]
    fn test_remove_session_clears_storage() {
        let dir = create_temp_dir();
        let path = dir.path().join("session.json");

        let mut store = SessionStore::new(store_config(path.clone(), None)).unwrap();
        store.store_session(sample_session()).unwrap();
        store.remove_session().unwrap();

        let reloaded = SessionStore::new(store_config(path, None)).unwrap();
        assert!(!reloaded.has_session());
    }

    #[test]
    fn test_corrupt_storage_is_an_error() {
        let dir = create_temp_dir();
        let path = dir.path().join("session.json");
        std::fs::write(&path, "{ not json").unwrap();

        let result = SessionStore::new(store_config(path, None));
        assert!(result.is_err());
    }

    #[test]
    fn test_disabled_store_is_inert() {
        let mut store = SessionStore::new(SessionStoreConfig::default()).unwrap();
        store.store_session(sample_session()).unwrap();
        assert!(store.get_session().is_none());
        assert!(!store.has_session());
    }
}
