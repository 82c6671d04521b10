//! # Kanban Core
//!
//! Board model, drag reordering and snapshot persistence for a kanban board.
//!
//! The crate owns the board state and the rules that change it. Rendering,
//! pointer geometry, text prompts and durable storage belong to the host and
//! are reached through the [`CardLayout`], [`TextPrompt`] and
//! [`KeyValueStore`] traits.

pub mod app;
pub mod config;
pub mod domain;
pub mod error;
pub mod persistence;
pub mod prompt;
pub mod storage;
pub mod view;

// Re-export commonly used types
pub use app::KanbanApp;
pub use config::KanbanConfig;
pub use domain::{
    board::{Board, Card, Column},
    drag::{DragSession, DragState, DropOutcome, DropTarget},
    ids::{CardId, ColumnId, IdGenerator},
    reorder::{CardLayout, Placement, Rect},
};
pub use error::{KanbanError, Result};
pub use persistence::{BoardPersistence, Snapshot};
pub use prompt::TextPrompt;
pub use storage::KeyValueStore;
pub use view::BoardView;
