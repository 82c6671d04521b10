use crate::{
    domain::ids::{ColumnId, MAX_ID},
    error::{KanbanError, Result},
    storage::is_valid_key,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Board configuration. Every field has a default, so a partial JSON
/// document is enough.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KanbanConfig {
    /// Key the snapshot is stored under
    pub storage_key: String,
    /// Text of a freshly added card
    pub default_card_text: String,
    /// Title used when a column is created without one
    pub default_column_title: String,
    /// Prefix of the title given to restored columns that have none
    pub restored_title_prefix: String,
    /// Ids are handed out starting right after this value
    pub id_baseline: u64,
    pub prompts: PromptMessages,
}

/// Messages shown when asking the user for text
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PromptMessages {
    pub new_column: String,
    pub edit_card: String,
    pub edit_column: String,
}

impl Default for PromptMessages {
    fn default() -> Self {
        Self {
            new_column: "Introduce el título de la nueva columna:".to_string(),
            edit_card: "Editar tarea:".to_string(),
            edit_column: "Editar título de la columna:".to_string(),
        }
    }
}

impl Default for KanbanConfig {
    fn default() -> Self {
        Self {
            storage_key: "kanbanBoard".to_string(),
            default_card_text: "Nueva Tarea".to_string(),
            default_column_title: "Nueva Columna".to_string(),
            restored_title_prefix: "Column".to_string(),
            id_baseline: 0,
            prompts: PromptMessages::default(),
        }
    }
}

impl KanbanConfig {
    /// Parses and validates a JSON configuration document
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: KanbanConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads a JSON configuration file
    pub async fn load(path: impl AsRef<Path>) -> Result<Self> {
        let contents = tokio::fs::read_to_string(path).await?;
        Self::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<()> {
        if !is_valid_key(&self.storage_key) {
            return Err(KanbanError::ConfigError(format!(
                "storage_key '{}' may only hold ASCII letters, digits, '-' and '_'",
                self.storage_key
            )));
        }
        if self.id_baseline >= MAX_ID {
            return Err(KanbanError::ConfigError(format!(
                "id_baseline must be below {}",
                MAX_ID
            )));
        }
        if self.default_card_text.trim().is_empty() {
            return Err(KanbanError::ConfigError(
                "default_card_text must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Title for a restored column whose snapshot carries none
    pub fn restored_title(&self, id: ColumnId) -> String {
        format!("{} {}", self.restored_title_prefix, id)
    }
}
