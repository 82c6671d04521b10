use crate::{
    config::KanbanConfig,
    domain::{
        board::{Board, Card, Column},
        ids::{CardId, ColumnId, IdGenerator, MAX_ID},
    },
    error::Result,
};
use log::warn;
use serde::{de, Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

/// Serialized form of one column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSnapshot {
    #[serde(deserialize_with = "lenient_column_id")]
    pub column_id: ColumnId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub cards: Vec<String>,
}

/// The whole board as written to storage: columns in order, each with its
/// card texts top to bottom
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Snapshot {
    pub columns: Vec<ColumnSnapshot>,
}

/// Older blobs wrote `columnId` as a numeric string
#[derive(Deserialize)]
#[serde(untagged)]
enum RawColumnId {
    Number(u64),
    Text(String),
}

fn lenient_column_id<'de, D>(deserializer: D) -> std::result::Result<ColumnId, D::Error>
where
    D: Deserializer<'de>,
{
    let id = match RawColumnId::deserialize(deserializer)? {
        RawColumnId::Number(n) => n,
        RawColumnId::Text(s) => s
            .trim()
            .parse::<u64>()
            .map_err(|_| de::Error::custom(format!("invalid columnId '{}'", s)))?,
    };
    if id > MAX_ID {
        return Err(de::Error::custom(format!("columnId {} out of range", id)));
    }
    Ok(ColumnId::new(id))
}

impl Snapshot {
    /// Captures the board in visual order
    pub fn capture(board: &Board) -> Self {
        let columns = board
            .columns()
            .iter()
            .map(|col| ColumnSnapshot {
                column_id: col.id,
                title: Some(col.title.clone()),
                cards: col.cards.iter().map(|card| card.text.clone()).collect(),
            })
            .collect();
        Self { columns }
    }

    /// Compact JSON encoding; equal snapshots always encode to equal bytes
    pub fn encode(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(blob: &str) -> Result<Self> {
        Ok(serde_json::from_str(blob)?)
    }

    /// Rebuilds a board.
    ///
    /// Column ids are kept and reserved in `ids`; a column id seen twice gets
    /// a fresh one. Cards receive fresh ids.
    pub fn restore(&self, ids: &mut dyn IdGenerator, config: &KanbanConfig) -> Board {
        for col in &self.columns {
            ids.reserve(col.column_id.get());
        }

        let mut board = Board::new();
        let mut seen = HashSet::new();
        for entry in &self.columns {
            let id = if seen.insert(entry.column_id) {
                entry.column_id
            } else {
                let fresh = ColumnId::new(ids.next());
                warn!(
                    "duplicate column id {} in snapshot, restored as {}",
                    entry.column_id, fresh
                );
                seen.insert(fresh);
                fresh
            };

            let title = entry
                .title
                .clone()
                .unwrap_or_else(|| config.restored_title(entry.column_id));
            let mut column = Column::new(id, title);
            column.cards = entry
                .cards
                .iter()
                .map(|text| Card::new(CardId::new(ids.next()), text.clone()))
                .collect();
            board.push_column(column);
        }
        board
    }
}
