//! Render-ready projection of the board.
//!
//! The board stays the source of truth; a view is rebuilt from it and the
//! current drag session whenever the host repaints.

use crate::domain::{
    board::Board,
    drag::DragSession,
    ids::{CardId, ColumnId},
};
use log::debug;

pub const CARD_CLASS: &str = "card";
pub const DRAGGING_CLASS: &str = "dragging";
pub const COLUMN_CLASS: &str = "column";
pub const DRAG_OVER_CLASS: &str = "drag-over";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: CardId,
    pub text: String,
    pub dragging: bool,
}

impl CardView {
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![CARD_CLASS];
        if self.dragging {
            classes.push(DRAGGING_CLASS);
        }
        classes
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnView {
    pub id: ColumnId,
    pub title: String,
    pub drag_over: bool,
    pub cards: Vec<CardView>,
}

impl ColumnView {
    pub fn classes(&self) -> Vec<&'static str> {
        let mut classes = vec![COLUMN_CLASS];
        if self.drag_over {
            classes.push(DRAG_OVER_CLASS);
        }
        classes
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardView {
    pub columns: Vec<ColumnView>,
}

impl BoardView {
    /// Projects the board, showing a dragged card at its tentative placement
    pub fn project(board: &Board, drag: &DragSession) -> Self {
        let dragged = drag.dragged_card();

        let previewed;
        let source = match (dragged, drag.preview()) {
            (Some(card), Some(placement)) => {
                let mut board = board.clone();
                // a stale preview leaves the card where it is
                if let Err(err) = board.move_card(card, placement.column, placement.before) {
                    debug!("stale drag preview for card {card}: {err}");
                }
                previewed = board;
                &previewed
            }
            _ => board,
        };

        let columns = source
            .columns()
            .iter()
            .map(|col| ColumnView {
                id: col.id,
                title: col.title.clone(),
                drag_over: drag.hovered_column() == Some(col.id),
                cards: col
                    .cards
                    .iter()
                    .map(|card| CardView {
                        id: card.id,
                        text: card.text.clone(),
                        dragging: dragged == Some(card.id),
                    })
                    .collect(),
            })
            .collect();

        Self { columns }
    }

    pub fn column(&self, id: ColumnId) -> Option<&ColumnView> {
        self.columns.iter().find(|col| col.id == id)
    }
}
