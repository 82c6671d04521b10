//! Board controller.
//!
//! Each method corresponds to one user gesture. Gestures that change the
//! board end with a snapshot write; gestures that resolve to nothing (a
//! cancelled prompt, a missing column, a drop without target) leave both the
//! board and the store alone.

use crate::{
    config::KanbanConfig,
    domain::{
        board::Board,
        drag::{DragSession, DropOutcome, DropTarget},
        ids::{CardId, ColumnId, IdGenerator, SequentialIdGenerator},
        reorder::{CardLayout, Placement},
    },
    error::Result,
    persistence::BoardPersistence,
    prompt::{normalize_text, TextPrompt},
    storage::KeyValueStore,
    view::BoardView,
};
use log::{debug, info};
use std::sync::Arc;

pub struct KanbanApp {
    board: Board,
    drag: DragSession,
    ids: Box<dyn IdGenerator>,
    prompt: Arc<dyn TextPrompt>,
    persistence: BoardPersistence,
    config: KanbanConfig,
}

impl KanbanApp {
    /// Loads the stored board and wires the collaborators together
    pub async fn open(
        config: KanbanConfig,
        store: Arc<dyn KeyValueStore>,
        prompt: Arc<dyn TextPrompt>,
        mut ids: Box<dyn IdGenerator>,
    ) -> Result<Self> {
        config.validate()?;
        let persistence = BoardPersistence::new(store, config.storage_key.clone());
        let board = persistence.load(ids.as_mut(), &config).await?;
        info!(
            "board opened with {} columns and {} cards",
            board.columns().len(),
            board.card_count()
        );

        Ok(Self {
            board,
            drag: DragSession::new(),
            ids,
            prompt,
            persistence,
            config,
        })
    }

    /// Same as `open`, with sequential ids starting after `config.id_baseline`
    pub async fn open_sequential(
        config: KanbanConfig,
        store: Arc<dyn KeyValueStore>,
        prompt: Arc<dyn TextPrompt>,
    ) -> Result<Self> {
        let ids = Box::new(SequentialIdGenerator::new(config.id_baseline));
        Self::open(config, store, prompt, ids).await
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn config(&self) -> &KanbanConfig {
        &self.config
    }

    pub fn drag(&self) -> &DragSession {
        &self.drag
    }

    pub fn view(&self) -> BoardView {
        BoardView::project(&self.board, &self.drag)
    }

    /// Writes the current board to the store
    pub async fn save(&self) -> Result<()> {
        self.persistence.save(&self.board).await
    }

    /// Add-column button: asks for a title, does nothing when cancelled
    pub async fn add_column(&mut self) -> Result<Option<ColumnId>> {
        let answer = self
            .prompt
            .request_text(&self.config.prompts.new_column, "");
        let Some(title) = normalize_text(answer) else {
            debug!("add column cancelled");
            return Ok(None);
        };
        self.create_column(Some(title)).await.map(Some)
    }

    /// Creates a column directly, falling back to the default title
    pub async fn create_column(&mut self, title: Option<String>) -> Result<ColumnId> {
        let title =
            normalize_text(title).unwrap_or_else(|| self.config.default_column_title.clone());
        let id = self.board.add_column(self.ids.as_mut(), title);
        debug!("column {id} added");
        self.save().await?;
        Ok(id)
    }

    /// Add-card button of a column. `None` when the column is gone.
    pub async fn add_card(&mut self, column: ColumnId) -> Result<Option<CardId>> {
        let text = self.config.default_card_text.clone();
        match self.board.add_card(self.ids.as_mut(), column, text) {
            Ok(card) => {
                debug!("card {card} added to column {column}");
                self.save().await?;
                Ok(Some(card))
            }
            Err(err) => {
                debug!("add card ignored: {err}");
                Ok(None)
            }
        }
    }

    /// Double-click on a card. Returns whether the text changed.
    pub async fn edit_card(&mut self, card: CardId) -> Result<bool> {
        let Some(current) = self.board.card(card).map(|c| c.text.clone()) else {
            return Ok(false);
        };
        let answer = self
            .prompt
            .request_text(&self.config.prompts.edit_card, &current);
        let Some(text) = normalize_text(answer) else {
            return Ok(false);
        };

        self.board.rename_card(card, text)?;
        self.save().await?;
        Ok(true)
    }

    /// Double-click on a column header. Returns whether the title changed.
    pub async fn edit_column_title(&mut self, column: ColumnId) -> Result<bool> {
        let Some(current) = self.board.column(column).map(|c| c.title.clone()) else {
            return Ok(false);
        };
        let answer = self
            .prompt
            .request_text(&self.config.prompts.edit_column, &current);
        let Some(title) = normalize_text(answer) else {
            return Ok(false);
        };

        self.board.rename_column(column, title)?;
        self.save().await?;
        Ok(true)
    }

    pub fn begin_drag(&mut self, card: CardId) -> bool {
        self.drag.start(&self.board, card)
    }

    pub fn drag_enter(&mut self, column: ColumnId) {
        self.drag.enter(column);
    }

    pub fn drag_leave(&mut self, column: ColumnId) {
        self.drag.leave(column);
    }

    /// Pointer moved over a column while dragging
    pub fn drag_over(
        &mut self,
        layout: &dyn CardLayout,
        column: ColumnId,
        pointer_y: f64,
    ) -> Option<Placement> {
        self.drag.hover(&self.board, layout, column, pointer_y)
    }

    /// Pointer released. The snapshot is written only when the card moved.
    pub async fn drop_card(
        &mut self,
        layout: &dyn CardLayout,
        target: Option<DropTarget>,
    ) -> Result<DropOutcome> {
        let outcome = self.drag.drop(&mut self.board, layout, target);
        if outcome.is_mutation() {
            self.save().await?;
        }
        Ok(outcome)
    }

    pub fn cancel_drag(&mut self) {
        self.drag.cancel();
    }
}
