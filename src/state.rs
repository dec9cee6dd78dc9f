use crate::clipboard::ClipboardBridge;
use crate::config::Config;
use std::sync::Arc;
use tokio::sync::RwLock;

pub type SharedState = Arc<AppState>;

pub struct AppState {
    pub config: Config,
    pub text: TextStore,
    pub clipboard: Arc<dyn ClipboardBridge>,
}

impl AppState {
    pub fn new(config: Config, clipboard: Arc<dyn ClipboardBridge>) -> Self {
        Self {
            config,
            text: TextStore::default(),
            clipboard,
        }
    }
}

/// The single synced text value. Last writer wins; nothing is kept across
/// restarts.
#[derive(Default)]
pub struct TextStore {
    current: RwLock<String>,
}

impl TextStore {
    pub async fn get(&self) -> String {
        self.current.read().await.clone()
    }

    /// Replaces the stored text and returns its length in characters.
    pub async fn replace(&self, text: String) -> usize {
        let length = text.chars().count();
        *self.current.write().await = text;
        length
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_starts_empty() {
        let store = TextStore::default();
        assert_eq!(store.get().await, "");
    }

    #[tokio::test]
    async fn test_replace_overwrites() {
        let store = TextStore::default();
        assert_eq!(store.replace("hello".to_string()).await, 5);
        assert_eq!(store.replace("héllo wörld".to_string()).await, 11);
        assert_eq!(store.get().await, "héllo wörld");
        assert_eq!(store.replace(String::new()).await, 0);
        assert_eq!(store.get().await, "");
    }
}
