use crate::domain::{
    board::Board,
    ids::{CardId, ColumnId},
    reorder::{placement_for, CardLayout, Placement},
};
use log::debug;

/// Drag gesture state
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragState {
    #[default]
    Idle,
    Dragging { card: CardId, origin: ColumnId },
}

/// Pointer release over a column
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DropTarget {
    pub column: ColumnId,
    pub pointer_y: f64,
}

impl DropTarget {
    pub fn new(column: ColumnId, pointer_y: f64) -> Self {
        Self { column, pointer_y }
    }
}

/// Result of finishing a drag
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropOutcome {
    /// No drag was in progress
    Inert,
    /// The drag ended without a usable target; the board is untouched
    Aborted,
    /// The card now sits at `index` inside `to`
    Moved {
        card: CardId,
        from: ColumnId,
        to: ColumnId,
        index: usize,
    },
}

impl DropOutcome {
    pub fn is_mutation(&self) -> bool {
        matches!(self, Self::Moved { .. })
    }
}

/// Tracks one drag gesture plus its transient markers: the hovered column
/// (`drag-over`) and the tentative placement shown while the pointer moves.
#[derive(Debug, Clone, Default)]
pub struct DragSession {
    state: DragState,
    hovered: Option<ColumnId>,
    preview: Option<Placement>,
}

impl DragSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        self.state != DragState::Idle
    }

    pub fn dragged_card(&self) -> Option<CardId> {
        match self.state {
            DragState::Dragging { card, .. } => Some(card),
            DragState::Idle => None,
        }
    }

    /// Column currently carrying the `drag-over` marker
    pub fn hovered_column(&self) -> Option<ColumnId> {
        self.hovered
    }

    /// Placement the dragged card would take if dropped now
    pub fn preview(&self) -> Option<Placement> {
        self.preview
    }

    /// Picks up a card. Returns `false` when the card is not on the board.
    pub fn start(&mut self, board: &Board, card: CardId) -> bool {
        match board.locate_card(card) {
            Some((origin, _)) => {
                debug!("drag started: card {card} from column {origin}");
                self.state = DragState::Dragging { card, origin };
                self.hovered = None;
                self.preview = None;
                true
            }
            None => false,
        }
    }

    pub fn enter(&mut self, column: ColumnId) {
        if self.is_dragging() {
            self.hovered = Some(column);
        }
    }

    pub fn leave(&mut self, column: ColumnId) {
        if self.hovered == Some(column) {
            self.hovered = None;
        }
    }

    /// Updates the tentative placement for a pointer moving over `column`
    pub fn hover(
        &mut self,
        board: &Board,
        layout: &dyn CardLayout,
        column: ColumnId,
        pointer_y: f64,
    ) -> Option<Placement> {
        let card = self.dragged_card()?;
        let placement = placement_for(board, layout, card, column, pointer_y)?;
        self.preview = Some(placement);
        Some(placement)
    }

    /// Finishes the gesture.
    ///
    /// Markers are cleared whatever the outcome; the board only changes when
    /// the outcome is `Moved`.
    pub fn drop(
        &mut self,
        board: &mut Board,
        layout: &dyn CardLayout,
        target: Option<DropTarget>,
    ) -> DropOutcome {
        let state = std::mem::take(&mut self.state);
        self.hovered = None;
        self.preview = None;

        let DragState::Dragging { card, origin } = state else {
            return DropOutcome::Inert;
        };
        let Some(target) = target else {
            debug!("drag of card {card} ended without a target");
            return DropOutcome::Aborted;
        };
        let DropTarget { column, pointer_y } = target;
        let Some(placement) = placement_for(board, layout, card, column, pointer_y) else {
            debug!("drop target column {column} not found");
            return DropOutcome::Aborted;
        };

        match board.move_card(card, placement.column, placement.before) {
            Ok(index) => {
                debug!("card {card} dropped into column {} at {index}", placement.column);
                DropOutcome::Moved {
                    card,
                    from: origin,
                    to: placement.column,
                    index,
                }
            }
            Err(err) => {
                debug!("drop of card {card} aborted: {err}");
                DropOutcome::Aborted
            }
        }
    }

    /// Drops the gesture without touching the board
    pub fn cancel(&mut self) {
        *self = Self::default();
    }
}
