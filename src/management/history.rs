use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Most recently charted usernames, newest first, plus the one used last.
///
/// The list is capped at [`SearchHistory::MAX_ENTRIES`] and de-duplicated;
/// recording a name that is already present moves it to the front instead
/// of adding a second copy. Persisted as `state/search-history.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SearchHistory {
    usernames: Vec<String>,
    last_username: Option<String>,
}

impl SearchHistory {
    pub const MAX_ENTRIES: usize = 5;

    /// Loads the persisted history. A missing or unreadable file yields an
    /// empty history rather than an error; history is a convenience, not a
    /// requirement.
    pub async fn load() -> Self {
        let path = Self::history_path();
        match async_fs::read_to_string(&path).await {
            Ok(content) => serde_json::from_str(&content).unwrap_or_default(),
            Err(_) => Self::default(),
        }
    }

    pub async fn persist(&self) -> Result<(), String> {
        let path = Self::history_path();
        if let Some(parent) = path.parent() {
            async_fs::create_dir_all(parent)
                .await
                .map_err(|e| e.to_string())?;
        }

        let json = serde_json::to_string_pretty(self).map_err(|e| e.to_string())?;
        async_fs::write(path, json).await.map_err(|e| e.to_string())
    }

    /// Moves `username` to the front of the list, evicting the oldest
    /// entry when the cap is exceeded, and marks it as last used.
    pub fn record(&mut self, username: &str) {
        self.usernames.retain(|u| u != username);
        self.usernames.insert(0, username.to_string());
        self.usernames.truncate(Self::MAX_ENTRIES);
        self.last_username = Some(username.to_string());
    }

    pub fn usernames(&self) -> &[String] {
        &self.usernames
    }

    pub fn last_username(&self) -> Option<&str> {
        self.last_username.as_deref()
    }

    pub fn clear(&mut self) {
        self.usernames.clear();
        self.last_username = None;
    }

    fn history_path() -> PathBuf {
        let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
        path.push("collagefm/state/search-history.json");
        path
    }
}
