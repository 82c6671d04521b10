use crate::{
    error::{KanbanError, Result},
    storage::{is_valid_key, KeyValueStore},
};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;

/// File-based store: one file per key under a root directory
pub struct FileStore {
    root_path: PathBuf,
}

impl FileStore {
    const KANBAN_DIR: &'static str = ".kanban";

    /// Creates a FileStore keeping its files in `<project_root>/.kanban`
    pub fn new(project_root: impl AsRef<Path>) -> Self {
        Self {
            root_path: project_root.as_ref().join(Self::KANBAN_DIR),
        }
    }

    fn value_file(&self, key: &str) -> Result<PathBuf> {
        if !is_valid_key(key) {
            return Err(KanbanError::StorageError(format!(
                "Invalid storage key '{}'",
                key
            )));
        }
        Ok(self.root_path.join(format!("{}.json", key)))
    }

    async fn ensure_directory_exists(&self, path: &Path) -> Result<()> {
        if !path.exists() {
            fs::create_dir_all(path).await?;
        }
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>> {
        let file_path = self.value_file(key)?;

        if !file_path.exists() {
            return Ok(None);
        }

        let contents = fs::read_to_string(&file_path).await?;
        Ok(Some(contents))
    }

    async fn set(&self, key: &str, value: &str) -> Result<()> {
        let file_path = self.value_file(key)?;
        self.ensure_directory_exists(&self.root_path).await?;

        // Readers only ever see a complete value
        let tmp_path = file_path.with_extension("json.tmp");
        fs::write(&tmp_path, value).await?;
        fs::rename(&tmp_path, &file_path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_get_before_first_write() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert_eq!(store.get("kanbanBoard").await.unwrap(), None);
        assert!(!store.root_path.exists());
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        store
            .set("kanbanBoard", r#"[{"columnId":1,"cards":[]}]"#)
            .await
            .unwrap();
        store.set("kanbanBoard", "[]").await.unwrap();

        assert_eq!(store.get("kanbanBoard").await.unwrap().as_deref(), Some("[]"));
        assert!(store.value_file("kanbanBoard").unwrap().exists());
    }

    #[tokio::test]
    async fn test_values_survive_a_new_instance() {
        let temp_dir = TempDir::new().unwrap();
        FileStore::new(temp_dir.path())
            .set("kanbanBoard", "[]")
            .await
            .unwrap();

        let reopened = FileStore::new(temp_dir.path());
        assert_eq!(
            reopened.get("kanbanBoard").await.unwrap().as_deref(),
            Some("[]")
        );
    }

    #[tokio::test]
    async fn test_rejects_path_like_keys() {
        let temp_dir = TempDir::new().unwrap();
        let store = FileStore::new(temp_dir.path());

        assert!(store.set("../escape", "x").await.is_err());
        assert!(store.get("").await.is_err());
    }
}
