use crate::{
    config::KanbanConfig,
    domain::{board::Board, ids::IdGenerator},
    error::Result,
    storage::KeyValueStore,
};
use log::{debug, warn};
use std::sync::Arc;

pub mod snapshot;

pub use snapshot::{ColumnSnapshot, Snapshot};

/// Writes and reads board snapshots under a single store key
#[derive(Clone)]
pub struct BoardPersistence {
    store: Arc<dyn KeyValueStore>,
    key: String,
}

impl BoardPersistence {
    pub fn new(store: Arc<dyn KeyValueStore>, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Serializes the whole board and replaces the stored snapshot
    pub async fn save(&self, board: &Board) -> Result<()> {
        let blob = Snapshot::capture(board).encode()?;
        self.store.set(&self.key, &blob).await?;
        debug!(
            "saved board snapshot: {} columns, {} cards",
            board.columns().len(),
            board.card_count()
        );
        Ok(())
    }

    /// Rebuilds the board from the stored snapshot.
    ///
    /// A missing snapshot yields an empty board, and so does one that cannot
    /// be decoded. Store failures are returned.
    pub async fn load(&self, ids: &mut dyn IdGenerator, config: &KanbanConfig) -> Result<Board> {
        let Some(blob) = self.store.get(&self.key).await? else {
            debug!("no snapshot under '{}', starting with an empty board", self.key);
            return Ok(Board::new());
        };

        match Snapshot::decode(&blob) {
            Ok(snapshot) => Ok(snapshot.restore(ids, config)),
            Err(err) => {
                warn!("discarding unreadable snapshot under '{}': {}", self.key, err);
                Ok(Board::new())
            }
        }
    }
}
