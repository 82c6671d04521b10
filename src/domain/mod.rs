pub mod board;
pub mod drag;
pub mod ids;
pub mod reorder;

pub use board::{Board, Card, Column};
pub use drag::{DragSession, DragState, DropOutcome, DropTarget};
pub use ids::{CardId, ColumnId, IdGenerator, RandomIdGenerator, SequentialIdGenerator};
pub use reorder::{drag_after_card, placement_for, CardLayout, Placement, Rect, UniformLayout};
