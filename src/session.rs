//! Signed-in state kept between invocations

use crate::error::Result;
use crate::models::user::{ChatMessage, UserAnalysis};
use log::debug;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

const SESSION_FILE: &str = "session.json";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Session {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<String>,
    /// Most recent candidate-side analysis; chat, guidance and role advice read it.
    #[serde(default)]
    pub last_analysis: Option<UserAnalysis>,
    /// Conversation about `last_analysis`; reset when a new resume is analysed.
    #[serde(default)]
    pub chat_history: Vec<ChatMessage>,
}

impl Session {
    pub fn path(state_dir: &Path) -> PathBuf {
        state_dir.join(SESSION_FILE)
    }

    /// Stored session, or an empty one when nothing was saved.
    pub fn load(state_dir: &Path) -> Result<Self> {
        let path = Self::path(state_dir);
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(&path)?;
        Ok(serde_json::from_str(&content)?)
    }

    pub fn save(&self, state_dir: &Path) -> Result<()> {
        std::fs::create_dir_all(state_dir)?;
        let path = Self::path(state_dir);
        std::fs::write(&path, serde_json::to_string_pretty(self)?)?;
        debug!("Session saved to {}", path.display());
        Ok(())
    }

    /// Forget everything, on disk and in memory.
    pub fn clear(&mut self, state_dir: &Path) -> Result<()> {
        *self = Self::default();
        let path = Self::path(state_dir);
        if path.exists() {
            std::fs::remove_file(&path)?;
        }
        Ok(())
    }

    pub fn token(&self) -> Option<&str> {
        self.access_token.as_deref().filter(|t| !t.is_empty())
    }

    pub fn is_signed_in(&self) -> bool {
        self.token().is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_is_empty_session() {
        let dir = TempDir::new().unwrap();
        let session = Session::load(dir.path()).unwrap();
        assert!(!session.is_signed_in());
        assert!(session.last_analysis.is_none());
    }

    #[test]
    fn test_save_load_clear() {
        let dir = TempDir::new().unwrap();
        let state_dir = dir.path().join("nested");

        let mut session = Session {
            access_token: Some("tok-123".to_string()),
            email: Some("asha@example.com".to_string()),
            role: Some("admin".to_string()),
            last_analysis: None,
            chat_history: Vec::new(),
        };
        session.save(&state_dir).unwrap();

        let loaded = Session::load(&state_dir).unwrap();
        assert_eq!(loaded.token(), Some("tok-123"));
        assert_eq!(loaded.role.as_deref(), Some("admin"));

        session.clear(&state_dir).unwrap();
        assert!(!session.is_signed_in());
        assert!(!Session::path(&state_dir).exists());
        // clearing twice is fine
        session.clear(&state_dir).unwrap();
    }

    #[test]
    fn test_empty_token_is_not_signed_in() {
        let session = Session {
            access_token: Some(String::new()),
            ..Session::default()
        };
        assert!(!session.is_signed_in());
    }
}
