use crate::error::Result;
use async_trait::async_trait;

#[cfg(feature = "file-storage")]
pub mod file_storage;
pub mod memory_storage;

#[cfg(feature = "file-storage")]
pub use file_storage::FileStore;
pub use memory_storage::MemoryStore;

/// Durable string key-value store holding the board snapshot
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Reads the value under `key`, `None` when nothing was written yet
    async fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value under `key`
    async fn set(&self, key: &str, value: &str) -> Result<()>;
}

/// Keys every backend accepts: non-empty ASCII letters, digits, `-` and `_`
pub fn is_valid_key(key: &str) -> bool {
    !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid_key() {
        assert!(is_valid_key("kanbanBoard"));
        assert!(is_valid_key("board-2_a"));
        assert!(!is_valid_key(""));
        assert!(!is_valid_key("my.board"));
        assert!(!is_valid_key("../escape"));
        assert!(!is_valid_key("a b"));
    }
}
